/// Fixed page geometry for one render, millimeters.
///
/// The side margins bound the content width; they play no role in the
/// vertical flow, which is governed entirely by the band heights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    /// Left and right margin.
    pub side_margin_mm: f32,
}

impl PageGeometry {
    /// A4 portrait with 10mm side margins.
    pub fn a4() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            side_margin_mm: 10.0,
        }
    }

    /// Usable content height once the bands reserve their space.
    pub fn content_height(&self, header_mm: f32, footer_mm: f32) -> f32 {
        self.page_height_mm - header_mm - footer_mm
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}
