//! Fixed visual styling shared by every generated report.
//!
//! The style pair is constant across requests and is never derived from the
//! submitted data.  Measures are specified in points and converted to the
//! millimetre units `genpdf` works in.

use genpdf::style::{Color, Style};
use genpdf::{Alignment, Margins, Mm};

const HEADING_FONT_SIZE: u8 = 18;
const HEADING_COLOR: Color = Color::Rgb(0, 0, 139);
const HEADING_SPACE_AFTER_PT: f64 = 32.0;

const BODY_FONT_SIZE: u8 = 12;
const BODY_LEADING_PT: f64 = 16.0;
const BODY_SPACE_AFTER_PT: f64 = 12.0;

const PAGE_MARGIN_PT: f64 = 36.0;
const BORDER_INSET_PT: f64 = 20.0;

/// Converts a point measure into millimetres.
pub fn mm_from_pt(value: f64) -> Mm {
    Mm::from(printpdf::Mm::from(printpdf::Pt(value)))
}

/// The style pair and page geometry applied to every report.
#[derive(Clone, Debug)]
pub struct ReportStyles {
    /// Block style for the heading.
    pub heading: Style,
    /// Horizontal alignment of the heading.
    pub heading_alignment: Alignment,
    /// Vertical gap between the heading and the first body paragraph.
    pub heading_space_after: Mm,
    /// Block style for body paragraphs.
    pub body: Style,
    /// Horizontal alignment of body paragraphs.
    pub body_alignment: Alignment,
    /// Vertical gap after each body paragraph.
    pub body_space_after: Mm,
    /// Content margins applied inside the page border.
    pub page_margins: Margins,
    /// Distance between the page edge and the border rectangle.
    pub border_inset: Mm,
    /// Stroke color of the page border.
    pub border_color: Color,
}

impl Default for ReportStyles {
    fn default() -> Self {
        Self {
            heading: Style::new()
                .bold()
                .with_font_size(HEADING_FONT_SIZE)
                .with_color(HEADING_COLOR),
            heading_alignment: Alignment::Center,
            heading_space_after: mm_from_pt(HEADING_SPACE_AFTER_PT),
            body: Style::new()
                .with_font_size(BODY_FONT_SIZE)
                .with_line_spacing(BODY_LEADING_PT / BODY_FONT_SIZE as f64),
            body_alignment: Alignment::Left,
            body_space_after: mm_from_pt(BODY_SPACE_AFTER_PT),
            page_margins: Margins::all(mm_from_pt(PAGE_MARGIN_PT)),
            border_inset: mm_from_pt(BORDER_INSET_PT),
            border_color: Color::Rgb(0, 0, 0),
        }
    }
}
