use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::TAU;
use std::path::Path;

use crate::analysis::{percentage, saturating_sum};
use crate::figure_config::FigureStyle;
use crate::palette::series_color;

/// Angle (degrees, counter-clockwise from 3 o'clock) of the first pie slice
const PIE_START_ANGLE: f64 = 140.0;

/// Fraction of a category slot covered by its bars
const GROUP_WIDTH: f64 = 0.8;

type CategoryChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Caption and axis descriptions of a cartesian figure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLabels<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
}

/// One bar with the text drawn above it
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub annotation: String,
}

/// One series of a grouped bar chart, one value per category
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub name: String,
    pub values: Vec<f64>,
    pub annotations: Option<Vec<String>>,
    /// Taller translucent bars drawn behind the series
    pub overlay: Option<Overlay>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub values: Vec<f64>,
    pub annotations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// Index into the legend, fixes the slice color
    pub category: usize,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PiePanel {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

/// Label an x position with its category name; off-center positions stay blank
fn category_label(categories: &[String]) -> impl Fn(&f64) -> String + '_ {
    move |x| {
        let index = x.round();
        if (x - index).abs() > 1e-6 || index < 0.0 {
            return String::new();
        }
        categories.get(index as usize).cloned().unwrap_or_default()
    }
}

fn y_upper<I: Iterator<Item = f64>>(values: I) -> f64 {
    values.fold(0.0f64, f64::max).max(1.0) * 1.15
}

/// Pixels of a category chart outside its plotting area, besides the caption
const CHART_CHROME_PX: i32 = 120;
/// Largest share of the plotting area kept free above the bars
const MAX_HEADROOM: f64 = 0.6;

/// Y range that keeps `reserved_px` pixels free above `data_max`
fn y_upper_reserving(data_max: f64, reserved_px: i32, style: &FigureStyle) -> f64 {
    let plot_px = (style.height as i32 - style.caption_size as i32 - CHART_CHROME_PX).max(1) as f64;
    let free = (reserved_px as f64 / plot_px).min(MAX_HEADROOM);
    data_max.max(1.0) / (1.0 - free)
}

/// Room above the tallest group: its labels, a lifted overlay label and the legend
fn grouped_headroom_px(series: &[BarSeries], style: &FigureStyle) -> i32 {
    fn most_lines<'a>(texts: impl Iterator<Item = &'a String>) -> i32 {
        texts.map(|t| t.lines().count()).max().unwrap_or(0) as i32
    }
    let main = most_lines(series.iter().flat_map(|s| s.annotations.iter().flatten()));
    let overlay = most_lines(
        series
            .iter()
            .flat_map(|s| s.overlay.iter().flat_map(|o| o.annotations.iter())),
    );
    let legend = series.len() as i32 * (line_height(style) + 6) + 20;
    (main + overlay) * line_height(style) + style.annotation_offset + legend
}

fn annotation_style(style: &FigureStyle, color: &'static RGBColor) -> TextStyle<'static> {
    TextStyle::from(("sans-serif", style.font_size).into_font())
        .pos(Pos::new(HPos::Center, VPos::Bottom))
        .color(color)
}

fn line_height(style: &FigureStyle) -> i32 {
    style.font_size as i32 + 2
}

/// Split multi-line annotations into (line, anchor, pixel lift) triples, bottom line lowest
fn annotation_lines(
    text: &str,
    anchor: (f64, f64),
    lift: i32,
    style: &FigureStyle,
) -> Vec<(String, (f64, f64), i32)> {
    let lines: Vec<&str> = text.lines().collect();
    let count = lines.len() as i32;
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let above = count - 1 - i as i32;
            (line.to_string(), anchor, -(lift + above * line_height(style)))
        })
        .collect()
}

fn draw_annotations(
    chart: &mut CategoryChart<'_, '_>,
    lines: &[(String, (f64, f64), i32)],
    text_style: &TextStyle<'static>,
) -> Result<(), Box<dyn std::error::Error>> {
    chart.draw_series(lines.iter().map(|(line, anchor, dy)| {
        EmptyElement::at(*anchor) + Text::new(line.clone(), (0, *dy), text_style.clone())
    }))?;
    Ok(())
}

fn build_category_chart<'a, 'b>(
    root: &'a DrawingArea<BitMapBackend<'b>, plotters::coord::Shift>,
    categories: &[String],
    y_max: f64,
    labels: &ChartLabels,
    style: &FigureStyle,
) -> Result<CategoryChart<'a, 'b>, Box<dyn std::error::Error>> {
    let mut chart = ChartBuilder::on(root)
        .caption(labels.title, ("sans-serif", style.caption_size).into_font())
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5f64..(categories.len() as f64 - 0.5), 0f64..y_max)?;

    let formatter = category_label(categories);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(categories.len())
        .x_label_formatter(&formatter)
        .label_style(("sans-serif", style.font_size).into_font())
        .x_desc(labels.x_desc)
        .y_desc(labels.y_desc)
        .draw()?;

    Ok(chart)
}

/// Plot one bar per category with its annotation on top
pub fn plot_annotated_bars(
    bars: &[Bar],
    labels: &ChartLabels,
    style: &FigureStyle,
    output_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(output_path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let categories: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();
    let y_max = y_upper(bars.iter().map(|b| b.value));
    let mut chart = build_category_chart(&root, &categories, y_max, labels, style)?;

    let half = GROUP_WIDTH / 2.0;
    chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
        let x = i as f64;
        Rectangle::new([(x - half, 0.0), (x + half, bar.value)], series_color(0).filled())
    }))?;

    let lines: Vec<_> = bars
        .iter()
        .enumerate()
        .flat_map(|(i, bar)| {
            annotation_lines(&bar.annotation, (i as f64, bar.value), style.annotation_offset, style)
        })
        .collect();
    draw_annotations(&mut chart, &lines, &annotation_style(style, &BLACK))?;

    root.present()?;
    println!("📊 Bar chart saved to: {}", output_path.display());
    Ok(())
}

/// Left edge of series `index` inside category `category`
fn bar_left(category: usize, index: usize, series_count: usize) -> f64 {
    let width = GROUP_WIDTH / series_count as f64;
    category as f64 - GROUP_WIDTH / 2.0 + index as f64 * width
}

/// Plot several series side by side per category, with a legend
pub fn plot_grouped_bars(
    categories: &[String],
    series: &[BarSeries],
    labels: &ChartLabels,
    style: &FigureStyle,
    output_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(output_path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let data_max = series
        .iter()
        .flat_map(|s| {
            let overlay = s.overlay.iter().flat_map(|o| o.values.iter());
            s.values.iter().chain(overlay).copied()
        })
        .fold(0.0f64, f64::max);
    let y_max = y_upper(std::iter::once(data_max)).max(y_upper_reserving(
        data_max,
        grouped_headroom_px(series, style),
        style,
    ));
    let mut chart = build_category_chart(&root, categories, y_max, labels, style)?;

    let count = series.len().max(1);
    let width = GROUP_WIDTH / count as f64;

    // Overlays first so the main bars stay on top
    for (j, s) in series.iter().enumerate() {
        if let Some(overlay) = &s.overlay {
            let color = series_color(j);
            chart.draw_series(overlay.values.iter().enumerate().map(|(i, v)| {
                let x0 = bar_left(i, j, count);
                Rectangle::new([(x0, 0.0), (x0 + width, *v)], color.mix(0.5).filled())
            }))?;
        }
    }

    for (j, s) in series.iter().enumerate() {
        let color = series_color(j);
        chart
            .draw_series(s.values.iter().enumerate().map(|(i, v)| {
                let x0 = bar_left(i, j, count);
                Rectangle::new([(x0, 0.0), (x0 + width, *v)], color.filled())
            }))?
            .label(s.name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 16, y + 6)], color.filled()));
    }

    let mut main_lines = Vec::new();
    let mut overlay_lines = Vec::new();
    for (j, s) in series.iter().enumerate() {
        let center = |i: usize| bar_left(i, j, count) + width / 2.0;

        if let Some(annotations) = &s.annotations {
            for (i, (text, v)) in annotations.iter().zip(&s.values).enumerate() {
                main_lines.extend(annotation_lines(text, (center(i), *v), style.annotation_offset, style));
            }
        }

        if let Some(overlay) = &s.overlay {
            for (i, (text, v)) in overlay.annotations.iter().zip(&overlay.values).enumerate() {
                let main_value = s.values.get(i).copied().unwrap_or(0.0);
                let main_text_lines = s
                    .annotations
                    .as_ref()
                    .and_then(|a| a.get(i))
                    .map(|t| t.lines().count())
                    .unwrap_or(0);
                let lift = style.annotation_offset
                    + overlay_lift(*v, main_value, y_max, main_text_lines, style);
                overlay_lines.extend(annotation_lines(text, (center(i), *v), lift, style));
            }
        }
    }
    draw_annotations(&mut chart, &main_lines, &annotation_style(style, &BLACK))?;
    draw_annotations(&mut chart, &overlay_lines, &annotation_style(style, &RED))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(("sans-serif", style.font_size).into_font())
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    println!("📊 Grouped bar chart saved to: {}", output_path.display());
    Ok(())
}

/// Extra pixels to lift an overlay label that would collide with the main bar's label
fn overlay_lift(
    overlay_value: f64,
    main_value: f64,
    y_max: f64,
    main_text_lines: usize,
    style: &FigureStyle,
) -> i32 {
    if (overlay_value - main_value).abs() < y_max * 0.06 {
        main_text_lines as i32 * line_height(style)
    } else {
        0
    }
}

/// Pixel position at `radius` and `theta` radians around `center`, y pointing down
fn polar(center: (i32, i32), radius: f64, theta: f64) -> (i32, i32) {
    (
        center.0 + (radius * theta.cos()).round() as i32,
        center.1 - (radius * theta.sin()).round() as i32,
    )
}

/// Outline of a pie slice: the center followed by points along the arc
fn wedge_points(center: (i32, i32), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = ((sweep.to_degrees() / 2.0).ceil() as usize).max(1);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let theta = start + sweep * step as f64 / steps as f64;
        points.push(polar(center, radius, theta));
    }
    points
}

fn slice_label(value: u64, total: u64) -> String {
    format!("{} ({:.0}%)", value, percentage(value, total))
}

/// What a pie panel paints, in painting order
#[derive(Debug, Clone, PartialEq)]
enum PieElement {
    Wedge {
        points: Vec<(i32, i32)>,
        category: usize,
    },
    Label {
        text: String,
        at: (i32, i32),
    },
}

/// Every wedge first, then every label, so no wedge covers a neighbour's label
fn pie_elements(panel: &PiePanel, center: (i32, i32), radius: f64) -> Vec<PieElement> {
    let total = saturating_sum(panel.slices.iter().map(|s| s.value));
    if total == 0 {
        return Vec::new();
    }

    let mut wedges = Vec::new();
    let mut labels = Vec::new();
    let mut angle = PIE_START_ANGLE.to_radians();
    for slice in panel.slices.iter().filter(|s| s.value > 0) {
        let sweep = slice.value as f64 / total as f64 * TAU;
        wedges.push(PieElement::Wedge {
            points: wedge_points(center, radius, angle, sweep),
            category: slice.category,
        });
        labels.push(PieElement::Label {
            text: slice_label(slice.value, total),
            at: polar(center, radius * 0.6, angle + sweep / 2.0),
        });
        angle += sweep;
    }
    wedges.extend(labels);
    wedges
}

fn draw_pie(
    area: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    panel: &PiePanel,
    style: &FigureStyle,
) -> Result<(), Box<dyn std::error::Error>> {
    let area = area.titled(&panel.title, ("sans-serif", style.font_size + 8).into_font())?;
    let (w, h) = area.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = w.min(h) as f64 * 0.42;

    let text_style = TextStyle::from(("sans-serif", style.font_size).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));
    for element in pie_elements(panel, center, radius) {
        match element {
            PieElement::Wedge { points, category } => {
                area.draw(&Polygon::new(points, series_color(category).filled()))?;
            }
            PieElement::Label { text, at } => {
                area.draw(&Text::new(text, at, text_style.clone()))?;
            }
        }
    }
    Ok(())
}

fn draw_legend(
    area: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    entries: &[&str],
    style: &FigureStyle,
) -> Result<(), Box<dyn std::error::Error>> {
    let (w, _) = area.dim_in_pixel();
    let column_width = w as i32 / 4;
    let row_height = line_height(style) + 10;
    let swatch = style.font_size as i32;

    for (i, entry) in entries.iter().enumerate() {
        let x = w as i32 / 2 - column_width + (i % 2) as i32 * column_width;
        let y = 10 + (i / 2) as i32 * row_height;
        area.draw(&Rectangle::new(
            [(x, y), (x + swatch, y + swatch)],
            series_color(i).filled(),
        ))?;
        area.draw(&Text::new(
            entry.to_string(),
            (x + swatch + 8, y),
            ("sans-serif", style.font_size).into_font(),
        ))?;
    }
    Ok(())
}

/// Plot a `(rows, columns)` grid of pies sharing one legend and one title
pub fn plot_pie_grid(
    title: &str,
    panels: &[PiePanel],
    legend: &[&str],
    grid: (usize, usize),
    style: &FigureStyle,
    output_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(output_path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(title, ("sans-serif", style.caption_size).into_font())?;

    let (_, h) = root.dim_in_pixel();
    let legend_rows = ((legend.len() + 1) / 2) as u32;
    let legend_height = legend_rows * (style.font_size + 12) + 20;
    let (body, legend_area) = root.split_vertically(h.saturating_sub(legend_height));

    let cells = body.split_evenly(grid);
    for (cell, panel) in cells.iter().zip(panels) {
        draw_pie(cell, panel, style)?;
    }
    draw_legend(&legend_area, legend, style)?;

    root.present()?;
    println!("📊 Pie grid saved to: {}", output_path.display());
    Ok(())
}
