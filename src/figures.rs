use clap::ValueEnum;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::analysis::{
    aligned_values, cumulative_counts, issue_shares, percentage, round2, saturating_sum,
    union_sorted_keys, version_shares, Share, ToolCompatibility, ToolIssues, ToolTransparency,
    COMPATIBILITY_ISSUE_KINDS, ES_VERSION_ORDER, TRANSPARENCY_ISSUE_KINDS,
};
use crate::archive::Archive;
use crate::data;
use crate::error::{FigureError, Result};
use crate::export::FigureSummary;
use crate::figure_config::FigureStyle;
use crate::output::{deliver, OutputTarget, Viewer};
use crate::plotting::{
    plot_annotated_bars, plot_grouped_bars, plot_pie_grid, Bar, BarSeries, ChartLabels, Overlay,
    PiePanel, PieSlice,
};

const TRANSPARENCY_LABELS: [&str; 3] = ["Transparent", "Non-transparent", "N/A"];
const PIE_COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Figure {
    /// Sites per minimum ECMAScript version
    EcmascriptVersions,
    /// Cumulative sites per ECMAScript version, in release order
    VersionCdf,
    /// External vs inline scripts per ECMAScript version
    ScriptVersions,
    /// Syntactically compatible sites per tool
    SyntacticCompatibility,
    /// Syntactic vs eventual compatibility per tool
    EventualCompatibility,
    /// Syntactic, eventual and full compatibility with unknown outcomes
    CompatibilityAnalysis,
    /// Why sites are not eventually compatible, per tool
    EventualIssues,
    /// Transparent, non-transparent and N/A sites per tool
    Transparency,
    /// JavaScript error kinds behind non-transparent sites, per tool
    TransparencyIssues,
}

impl Figure {
    pub const ALL: [Figure; 9] = [
        Figure::EcmascriptVersions,
        Figure::VersionCdf,
        Figure::ScriptVersions,
        Figure::SyntacticCompatibility,
        Figure::EventualCompatibility,
        Figure::CompatibilityAnalysis,
        Figure::EventualIssues,
        Figure::Transparency,
        Figure::TransparencyIssues,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Figure::EcmascriptVersions => "ecmascript-versions",
            Figure::VersionCdf => "version-cdf",
            Figure::ScriptVersions => "script-versions",
            Figure::SyntacticCompatibility => "syntactic-compatibility",
            Figure::EventualCompatibility => "eventual-compatibility",
            Figure::CompatibilityAnalysis => "compatibility-analysis",
            Figure::EventualIssues => "eventual-issues",
            Figure::Transparency => "transparency",
            Figure::TransparencyIssues => "transparency-issues",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.png", self.name())
    }

    /// Figures with no embedded fallback
    pub fn needs_archive(&self) -> bool {
        matches!(self, Figure::TransparencyIssues)
    }

    /// Figures that read the archive when one is given
    pub fn reads_archive(&self) -> bool {
        !matches!(self, Figure::ScriptVersions)
    }

    /// Build plot-ready data from the archive, or from the embedded datasets
    pub fn prepare(&self, archive: Option<&Archive>) -> Result<FigureData> {
        if archive.is_some() && !self.reads_archive() {
            warn!(figure = self.name(), "figure only uses embedded data, ignoring archive");
        }
        let source = if archive.is_some() && self.reads_archive() {
            "archive"
        } else {
            "embedded"
        };

        let data = match self {
            Figure::EcmascriptVersions => version_bars(*self, &version_counts(archive)?),
            Figure::VersionCdf => version_cdf(*self, &version_counts(archive)?),
            Figure::ScriptVersions => script_versions(*self),
            Figure::SyntacticCompatibility => syntactic_bars(*self, &tool_compatibility(archive)?),
            Figure::EventualCompatibility => {
                syntactic_vs_eventual(*self, &tool_compatibility(archive)?)
            }
            Figure::CompatibilityAnalysis => {
                compatibility_analysis(*self, &tool_compatibility(archive)?)
            }
            Figure::EventualIssues => eventual_issues(*self, &compatibility_issues(archive)?),
            Figure::Transparency => transparency_pies(*self, &tool_transparency(archive)?)?,
            Figure::TransparencyIssues => {
                let archive = archive.ok_or(FigureError::ArchiveRequired {
                    figure: self.name(),
                })?;
                let issues: Vec<ToolIssues> = archive
                    .tool_reports()?
                    .iter()
                    .map(ToolIssues::transparency)
                    .collect();
                transparency_issues(*self, &issues)
            }
        };

        info!(figure = self.name(), source, entries = data.summary.entries.len(), "prepared figure");
        Ok(data)
    }
}

/// Chart shape and content of one figure
#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Bars {
        labels: ChartLabels<'static>,
        bars: Vec<Bar>,
    },
    Grouped {
        labels: ChartLabels<'static>,
        categories: Vec<String>,
        series: Vec<BarSeries>,
    },
    Pies {
        title: &'static str,
        panels: Vec<PiePanel>,
        legend: Vec<&'static str>,
    },
}

/// A prepared figure: what to draw and the aggregates behind it
#[derive(Debug, Clone, PartialEq)]
pub struct FigureData {
    pub figure: Figure,
    pub chart: Chart,
    pub summary: FigureSummary,
}

impl FigureData {
    pub fn render(
        &self,
        style: &FigureStyle,
        output_path: &Path,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        match &self.chart {
            Chart::Bars { labels, bars } => plot_annotated_bars(bars, labels, style, output_path),
            Chart::Grouped {
                labels,
                categories,
                series,
            } => plot_grouped_bars(categories, series, labels, style, output_path),
            Chart::Pies {
                title,
                panels,
                legend,
            } => {
                let rows = ((panels.len() + PIE_COLUMNS - 1) / PIE_COLUMNS).max(1);
                plot_pie_grid(
                    title,
                    panels,
                    legend,
                    (rows, PIE_COLUMNS),
                    &style.for_pie_grid(),
                    output_path,
                )
            }
        }
    }
}

/// Prepare, draw and deliver one figure; returns the image path and its summary
pub fn render_figure(
    figure: Figure,
    archive: Option<&Archive>,
    style: &FigureStyle,
    target: &OutputTarget,
    viewer: &dyn Viewer,
) -> Result<(PathBuf, FigureSummary)> {
    let data = figure.prepare(archive)?;
    let path = deliver(target, viewer, |path| data.render(style, path))?;
    Ok((path, data.summary))
}

fn version_counts(archive: Option<&Archive>) -> Result<Vec<(String, u64)>> {
    match archive {
        Some(archive) => Ok(archive.syntax_report()?.version_counts().to_vec()),
        None => Ok(data::site_versions()),
    }
}

fn tool_compatibility(archive: Option<&Archive>) -> Result<Vec<ToolCompatibility>> {
    match archive {
        Some(archive) => archive
            .tool_reports()?
            .iter()
            .map(|r| ToolCompatibility::from_report(r).map_err(FigureError::InvalidData))
            .collect(),
        None => Ok(data::tool_compatibility()),
    }
}

fn tool_transparency(archive: Option<&Archive>) -> Result<Vec<ToolTransparency>> {
    match archive {
        Some(archive) => archive
            .tool_reports()?
            .iter()
            .map(|r| ToolTransparency::from_report(r).map_err(FigureError::InvalidData))
            .collect(),
        None => Ok(data::tool_transparency()),
    }
}

fn compatibility_issues(archive: Option<&Archive>) -> Result<Vec<ToolIssues>> {
    match archive {
        Some(archive) => Ok(archive
            .tool_reports()?
            .iter()
            .map(ToolIssues::compatibility)
            .collect()),
        None => Ok(data::compatibility_issues()),
    }
}

/// Shared denominator when every tool reports the same accessible count
fn common_denominator(tools: &[ToolCompatibility]) -> Option<u64> {
    let first = tools.first()?.accessible;
    tools.iter().all(|t| t.accessible == first).then_some(first)
}

fn count_and_share(count: u64, denominator: u64) -> String {
    format!("{}\n({:.0}%)", count, percentage(count, denominator))
}

fn version_bars(figure: Figure, counts: &[(String, u64)]) -> FigureData {
    let mut summary = FigureSummary::new(figure.name(), None);
    let bars = version_shares(counts)
        .into_iter()
        .map(|share| {
            summary.push(&share.label, "sites", share.count as f64, Some(round2(share.percentage)));
            Bar {
                annotation: format!("{:.0}%", share.percentage),
                value: share.count as f64,
                label: share.label,
            }
        })
        .collect();

    FigureData {
        figure,
        chart: Chart::Bars {
            labels: ChartLabels {
                title: "Website distribution with respect to ECMAScript versions",
                x_desc: "ECMAScript version",
                y_desc: "Number of websites",
            },
            bars,
        },
        summary,
    }
}

fn version_cdf(figure: Figure, counts: &[(String, u64)]) -> FigureData {
    let total = saturating_sum(counts.iter().map(|(_, c)| *c));
    let mut summary = FigureSummary::new(figure.name(), Some(total));
    let bars = cumulative_counts(counts, &ES_VERSION_ORDER)
        .into_iter()
        .map(|(label, running)| {
            let share = percentage(running, total);
            summary.push(&label, "cumulative sites", running as f64, Some(round2(share)));
            Bar {
                label,
                value: running as f64,
                annotation: format!("{:.0}%", share),
            }
        })
        .collect();

    FigureData {
        figure,
        chart: Chart::Bars {
            labels: ChartLabels {
                title: "Cumulative distribution with respect to ECMAScript versions",
                x_desc: "ECMAScript version",
                y_desc: "Number of websites",
            },
            bars,
        },
        summary,
    }
}

fn script_versions(figure: Figure) -> FigureData {
    let external = data::external_script_versions();
    let inline = data::inline_script_versions();
    let keys = union_sorted_keys(&external, &inline);

    let mut summary = FigureSummary::new(figure.name(), None);
    let mut series = Vec::new();
    for (name, dataset) in [("external scripts", &external), ("inline scripts", &inline)] {
        let values = aligned_values(dataset, &keys);
        for (key, value) in keys.iter().zip(&values) {
            summary.push(key, name, *value as f64, None);
        }
        series.push(BarSeries {
            name: name.to_string(),
            values: values.into_iter().map(|v| v as f64).collect(),
            annotations: None,
            overlay: None,
        });
    }

    FigureData {
        figure,
        chart: Chart::Grouped {
            labels: ChartLabels {
                title: "Distribution of external and inline scripts w.r.t. ECMAScript versions",
                x_desc: "ECMAScript version",
                y_desc: "Number of websites",
            },
            categories: keys,
            series,
        },
        summary,
    }
}

fn syntactic_bars(figure: Figure, tools: &[ToolCompatibility]) -> FigureData {
    let mut summary = FigureSummary::new(figure.name(), common_denominator(tools));
    let bars = tools
        .iter()
        .map(|tool| {
            let share = percentage(tool.syntactically_compatible, tool.accessible);
            summary.push(
                &tool.tool,
                "syntactically compatible",
                tool.syntactically_compatible as f64,
                Some(round2(share)),
            );
            Bar {
                label: tool.tool.clone(),
                value: tool.syntactically_compatible as f64,
                annotation: format!("{:.0}%", share),
            }
        })
        .collect();

    FigureData {
        figure,
        chart: Chart::Bars {
            labels: ChartLabels {
                title: "Syntactic compatibility",
                x_desc: "Tool",
                y_desc: "Number of websites",
            },
            bars,
        },
        summary,
    }
}

fn syntactic_vs_eventual(figure: Figure, tools: &[ToolCompatibility]) -> FigureData {
    let mut summary = FigureSummary::new(figure.name(), common_denominator(tools));
    let pick: [(&str, fn(&ToolCompatibility) -> u64); 2] = [
        ("syntactic", |t| t.syntactically_compatible),
        ("eventual", |t| t.eventually_compatible),
    ];

    let series = pick
        .iter()
        .map(|(name, count_of)| {
            let mut values = Vec::new();
            let mut annotations = Vec::new();
            for tool in tools {
                let count = count_of(tool);
                let share = percentage(count, tool.accessible);
                summary.push(&tool.tool, name, count as f64, Some(round2(share)));
                values.push(count as f64);
                annotations.push(format!("{:.0}%", share));
            }
            BarSeries {
                name: name.to_string(),
                values,
                annotations: Some(annotations),
                overlay: None,
            }
        })
        .collect();

    FigureData {
        figure,
        chart: Chart::Grouped {
            labels: ChartLabels {
                title: "Syntactic and eventual compatibility",
                x_desc: "Tool",
                y_desc: "Number of websites",
            },
            categories: tools.iter().map(|t| t.tool.clone()).collect(),
            series,
        },
        summary,
    }
}

fn compatibility_analysis(figure: Figure, tools: &[ToolCompatibility]) -> FigureData {
    let mut summary = FigureSummary::new(figure.name(), common_denominator(tools));
    // label, count, whether unknown outcomes get an overlay
    let pick: [(&str, fn(&ToolCompatibility) -> u64, bool); 3] = [
        ("Syntactically compatible", |t| t.syntactically_compatible, false),
        ("Eventually compatible", |t| t.eventually_compatible, true),
        ("Compatible", |t| t.compatible, true),
    ];

    let series = pick
        .iter()
        .map(|(name, count_of, with_unknown)| {
            let mut values = Vec::new();
            let mut annotations = Vec::new();
            let mut overlay = Overlay {
                values: Vec::new(),
                annotations: Vec::new(),
            };
            for tool in tools {
                let count = count_of(tool);
                summary.push(
                    &tool.tool,
                    name,
                    count as f64,
                    Some(round2(percentage(count, tool.accessible))),
                );
                values.push(count as f64);
                annotations.push(count_and_share(count, tool.accessible));

                if *with_unknown {
                    let upper = tool.with_unknown(count);
                    overlay.values.push(upper as f64);
                    overlay.annotations.push(count_and_share(upper, tool.accessible));
                }
            }
            BarSeries {
                name: name.to_string(),
                values,
                annotations: Some(annotations),
                overlay: with_unknown.then_some(overlay),
            }
        })
        .collect();

    FigureData {
        figure,
        chart: Chart::Grouped {
            labels: ChartLabels {
                title: "Compatibility analysis",
                x_desc: "Tool",
                y_desc: "Number of websites",
            },
            categories: tools.iter().map(|t| t.tool.clone()).collect(),
            series,
        },
        summary,
    }
}

fn issue_panels(
    summary: &mut FigureSummary,
    issues: &[ToolIssues],
    kinds: &[(&str, &str)],
) -> Vec<PiePanel> {
    let keys: Vec<&str> = kinds.iter().map(|(key, _)| *key).collect();
    issues
        .iter()
        .map(|tool| {
            let counts = tool.ordered(&keys);
            let total = saturating_sum(counts.iter().copied());
            let slices = counts
                .iter()
                .enumerate()
                .filter(|(_, count)| **count > 0)
                .map(|(category, count)| {
                    summary.push(
                        &tool.tool,
                        kinds[category].1,
                        *count as f64,
                        Some(round2(percentage(*count, total))),
                    );
                    PieSlice {
                        category,
                        value: *count,
                    }
                })
                .collect();
            PiePanel {
                title: tool.tool.clone(),
                slices,
            }
        })
        .collect()
}

fn eventual_issues(figure: Figure, issues: &[ToolIssues]) -> FigureData {
    let mut summary = FigureSummary::new(figure.name(), None);
    let panels = issue_panels(&mut summary, issues, &COMPATIBILITY_ISSUE_KINDS);

    FigureData {
        figure,
        chart: Chart::Pies {
            title: "Eventual compatibility issues",
            panels,
            legend: COMPATIBILITY_ISSUE_KINDS.iter().map(|(_, label)| *label).collect(),
        },
        summary,
    }
}

fn transparency_pies(figure: Figure, tools: &[ToolTransparency]) -> Result<FigureData> {
    let denominator = tools.first().map(|t| t.accessible);
    let shared = tools.iter().all(|t| Some(t.accessible) == denominator);
    let mut summary = FigureSummary::new(figure.name(), denominator.filter(|_| shared));

    let mut panels = Vec::new();
    for tool in tools {
        let breakdown = tool.breakdown().map_err(FigureError::InvalidData)?;
        let mut slices = Vec::new();
        for (category, value) in breakdown.slices().into_iter().enumerate() {
            summary.push(
                &tool.tool,
                TRANSPARENCY_LABELS[category],
                value as f64,
                Some(round2(percentage(value, tool.accessible))),
            );
            if value > 0 {
                slices.push(PieSlice { category, value });
            }
        }
        panels.push(PiePanel {
            title: tool.tool.clone(),
            slices,
        });
    }

    Ok(FigureData {
        figure,
        chart: Chart::Pies {
            title: "Transparency",
            panels,
            legend: TRANSPARENCY_LABELS.to_vec(),
        },
        summary,
    })
}

fn transparency_issues(figure: Figure, issues: &[ToolIssues]) -> FigureData {
    let mut summary = FigureSummary::new(figure.name(), None);
    let keys: Vec<&str> = TRANSPARENCY_ISSUE_KINDS.iter().map(|(key, _)| *key).collect();
    // one row per tool, one share per issue kind
    let shares: Vec<Vec<Share>> = issues.iter().map(|t| issue_shares(&t.counts, &keys)).collect();

    let series = TRANSPARENCY_ISSUE_KINDS
        .iter()
        .enumerate()
        .map(|(kind, (_, label))| {
            let mut values = Vec::new();
            let mut annotations = Vec::new();
            for (tool, row) in issues.iter().zip(&shares) {
                let share = &row[kind];
                summary.push(&tool.tool, label, share.count as f64, Some(round2(share.percentage)));
                values.push(share.percentage);
                annotations.push(format!("{}\n({:.0}%)", share.count, share.percentage));
            }
            BarSeries {
                name: label.to_string(),
                values,
                annotations: Some(annotations),
                overlay: None,
            }
        })
        .collect();

    FigureData {
        figure,
        chart: Chart::Grouped {
            labels: ChartLabels {
                title: "Transparency issues",
                x_desc: "Tool",
                y_desc: "Share of issues (%)",
            },
            categories: issues.iter().map(|t| t.tool.clone()).collect(),
            series,
        },
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn archive_with(body: &str) -> (TempDir, Archive) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("logfile.json"), body).unwrap();
        let archive = Archive::open(dir.path()).unwrap();
        (dir, archive)
    }

    #[test]
    fn every_figure_has_a_distinct_name() {
        let mut names: Vec<_> = Figure::ALL.iter().map(|f| f.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Figure::ALL.len());

        for figure in Figure::ALL {
            let parsed = Figure::from_str(figure.name(), false).unwrap();
            assert_eq!(parsed, figure);
        }
    }

    #[test]
    fn embedded_figures_prepare_without_archive() {
        for figure in Figure::ALL.iter().filter(|f| !f.needs_archive()) {
            let data = figure.prepare(None).unwrap();
            assert_eq!(data.figure, *figure);
            assert!(!data.summary.entries.is_empty(), "{}", figure.name());
        }
    }

    #[test]
    fn transparency_issues_needs_an_archive() {
        let err = Figure::TransparencyIssues.prepare(None).unwrap_err();
        assert!(matches!(err, FigureError::ArchiveRequired { figure } if figure == "transparency-issues"));
    }

    #[test]
    fn ecmascript_versions_from_archive_pairs() {
        let (_dir, archive) =
            archive_with(r#"{"syntaxReport": [["ES5", 538], ["ES2015", 1941]], "toolReport": []}"#);
        let data = Figure::EcmascriptVersions.prepare(Some(&archive)).unwrap();

        let shares: Vec<_> = data.summary.entries.iter().map(|e| e.percentage.unwrap()).collect();
        assert_eq!(shares, vec![21.7, 78.3]);
        match data.chart {
            Chart::Bars { bars, .. } => {
                assert_eq!(bars[0].annotation, "22%");
                assert_eq!(bars[1].value, 1941.0);
            }
            other => panic!("expected bars, got {:?}", other),
        }
    }

    #[test]
    fn version_cdf_is_monotonic_and_ends_at_total() {
        let data = Figure::VersionCdf.prepare(None).unwrap();
        let values: Vec<f64> = data.summary.entries.iter().map(|e| e.value).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*values.last().unwrap(), data::ACCESSIBLE_SITES as f64);
        assert_eq!(data.summary.entries[0].label, "ES5");
    }

    #[test]
    fn script_versions_use_sorted_union_of_labels() {
        let data = Figure::ScriptVersions.prepare(None).unwrap();
        match data.chart {
            Chart::Grouped { categories, series, .. } => {
                let mut sorted = categories.clone();
                sorted.sort();
                assert_eq!(categories, sorted);
                assert_eq!(series.len(), 2);
                assert_eq!(series[0].values.len(), categories.len());
            }
            other => panic!("expected grouped bars, got {:?}", other),
        }
    }

    #[test]
    fn compatibility_analysis_overlays_unknowns() {
        let data = Figure::CompatibilityAnalysis.prepare(None).unwrap();
        match data.chart {
            Chart::Grouped { categories, series, .. } => {
                let jalangi = categories.iter().position(|c| c == "Jalangi").unwrap();
                assert!(series[0].overlay.is_none());
                let eventual = series[1].overlay.as_ref().unwrap();
                assert_eq!(eventual.values[jalangi], 2656.0);
                assert_eq!(eventual.annotations[jalangi], "2656\n(78%)");
                assert_eq!(series[1].annotations.as_ref().unwrap()[jalangi], "2261\n(66%)");
            }
            other => panic!("expected grouped bars, got {:?}", other),
        }
        assert_eq!(data.summary.denominator, Some(data::ACCESSIBLE_SITES));
    }

    #[test]
    fn transparency_pies_include_not_applicable() {
        let data = Figure::Transparency.prepare(None).unwrap();
        let jest: Vec<_> = data
            .summary
            .entries
            .iter()
            .filter(|e| e.label == "JEST")
            .map(|e| e.value as u64)
            .collect();
        assert_eq!(jest, vec![45, 218, 3147]);
        assert_eq!(jest.iter().sum::<u64>(), data::ACCESSIBLE_SITES);
    }

    #[test]
    fn eventual_issue_pies_drop_empty_slices_but_keep_colors() {
        let data = Figure::EventualIssues.prepare(None).unwrap();
        match data.chart {
            Chart::Pies { panels, legend, .. } => {
                assert_eq!(legend.len(), 4);
                let foxhound = panels.iter().find(|p| p.title == "Project Foxhound").unwrap();
                assert_eq!(foxhound.slices, vec![PieSlice { category: 0, value: 408 }]);
                let jalangi = panels.iter().find(|p| p.title == "Jalangi").unwrap();
                assert_eq!(jalangi.slices.len(), 3);
            }
            other => panic!("expected pies, got {:?}", other),
        }
    }

    #[test]
    fn transparency_issues_from_archive() {
        let (_dir, archive) = archive_with(
            r#"{"syntaxReport": [], "toolReport": [
                {"toolName": "JEST", "transparencyIssues": {"TypeError": 6, "ReferenceError": 2}},
                {"toolName": "GIFC", "transparencyIssues": {}}
            ]}"#,
        );
        let data = Figure::TransparencyIssues.prepare(Some(&archive)).unwrap();
        match data.chart {
            Chart::Grouped { categories, series, .. } => {
                assert_eq!(categories, vec!["JEST", "GIFC"]);
                assert_eq!(series[0].name, "ReferenceError");
                assert_eq!(series[0].values, vec![25.0, 0.0]);
                assert_eq!(series[2].values, vec![75.0, 0.0]);
                assert_eq!(series[2].annotations.as_ref().unwrap()[0], "6\n(75%)");
            }
            other => panic!("expected grouped bars, got {:?}", other),
        }
    }

    #[test]
    fn inconsistent_transparency_counts_are_rejected() {
        let (_dir, archive) = archive_with(
            r#"{"syntaxReport": [], "toolReport": [
                {"toolName": "JEST", "accessible": 10, "transparent": 8, "nonTransparent": 5}
            ]}"#,
        );
        let err = Figure::Transparency.prepare(Some(&archive)).unwrap_err();
        assert!(matches!(err, FigureError::InvalidData(msg) if msg.contains("JEST")));
    }

    #[test]
    fn overflowing_counts_are_rejected_not_panicking() {
        let (_dir, archive) = archive_with(
            r#"{"syntaxReport": [["ES5", 18446744073709551615], ["ES2015", 2]], "toolReport": [
                {"toolName": "JEST", "accessible": 10, "transparent": 18446744073709551615,
                 "nonTransparent": 2}
            ]}"#,
        );
        let err = Figure::Transparency.prepare(Some(&archive)).unwrap_err();
        assert!(matches!(err, FigureError::InvalidData(msg) if msg.contains("exceeds accessible")));

        let versions = Figure::EcmascriptVersions.prepare(Some(&archive)).unwrap();
        assert_eq!(versions.summary.entries[0].percentage, Some(100.0));
        let cdf = Figure::VersionCdf.prepare(Some(&archive)).unwrap();
        assert_eq!(cdf.summary.denominator, Some(u64::MAX));
    }

    #[test]
    fn missing_tool_report_propagates() {
        let (_dir, archive) = archive_with(r#"{"syntaxReport": []}"#);
        let err = Figure::SyntacticCompatibility.prepare(Some(&archive)).unwrap_err();
        assert!(matches!(err, FigureError::MissingSection { .. }));
    }
}
