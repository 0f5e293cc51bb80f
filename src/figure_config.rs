#[derive(Debug, Clone, PartialEq)]
pub struct FigureStyle {
    pub width: u32,
    pub height: u32,
    pub font_size: u32,
    pub caption_size: u32,
    /// Gap in pixels between a bar top and its annotation
    pub annotation_offset: i32,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            font_size: 16,
            caption_size: 40,
            annotation_offset: 3,
        }
    }
}

impl FigureStyle {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Pie grids need more room than a single chart
    pub fn for_pie_grid(&self) -> Self {
        Self {
            width: self.width.max(1500),
            height: self.height.max(1000),
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.width < 300 || self.height < 200 {
            return Err(format!(
                "figure size {}x{} is too small (minimum 300x200)",
                self.width, self.height
            ));
        }
        if self.font_size == 0 || self.caption_size == 0 {
            return Err("font sizes must be positive".to_string());
        }
        if self.font_size.saturating_mul(4) > self.height {
            return Err(format!(
                "font size {} does not fit a {} pixel tall figure",
                self.font_size, self.height
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_is_valid() {
        let style = FigureStyle::default();
        assert_eq!((style.width, style.height), (1200, 800));
        assert_eq!(style.font_size, 16);
        assert!(style.validate().is_ok());
    }

    #[test]
    fn tiny_figures_are_rejected() {
        let style = FigureStyle::default().with_size(100, 100);
        assert!(style.validate().unwrap_err().contains("too small"));

        let style = FigureStyle::default().with_font_size(0);
        assert!(style.validate().is_err());
    }

    #[test]
    fn huge_fonts_are_rejected_without_overflow() {
        let style = FigureStyle::default().with_font_size(1_073_741_824);
        assert!(style.validate().unwrap_err().contains("does not fit"));

        let style = FigureStyle::default().with_font_size(u32::MAX);
        assert!(style.validate().is_err());
    }

    #[test]
    fn pie_grid_grows_but_keeps_fonts() {
        let style = FigureStyle::default().with_font_size(12).for_pie_grid();
        assert_eq!((style.width, style.height), (1500, 1000));
        assert_eq!(style.font_size, 12);

        let large = FigureStyle::default().with_size(2000, 1400).for_pie_grid();
        assert_eq!((large.width, large.height), (2000, 1400));
    }
}
