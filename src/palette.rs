use plotters::style::RGBColor;

/// Series colors shared by every figure
pub const CUSTOM_COLORS: [RGBColor; 6] = [
    RGBColor(0x4c, 0x72, 0xb0),
    RGBColor(0xdd, 0x84, 0x52),
    RGBColor(0x55, 0xa8, 0x68),
    RGBColor(0xc4, 0x4e, 0x52),
    RGBColor(0x81, 0x72, 0xb3),
    RGBColor(0x93, 0x78, 0x60),
];

/// Color for the `index`-th series, wrapping around the palette
pub fn series_color(index: usize) -> &'static RGBColor {
    &CUSTOM_COLORS[index % CUSTOM_COLORS.len()]
}
