//! Report document construction.
//!
//! Lays out a submitted heading and body onto letter-sized pages using the
//! fixed [`ReportStyles`].  A page decorator draws the border rectangle on
//! every page before the content margins are applied; pagination itself is
//! left entirely to `genpdf`.

use genpdf::elements::Paragraph;
use genpdf::error::Error;
use genpdf::style::{Color, Style};
use genpdf::{self, Element, Margins, Mm, PageDecorator, PaperSize, Position};

use crate::error::RenderError;
use crate::fonts;
use crate::markup::{self, Span};
use crate::styles::ReportStyles;

/// A fully rendered report document.
#[derive(Debug)]
pub struct RenderedReport {
    /// The complete PDF byte stream.
    pub bytes: Vec<u8>,
}

/// Renders the submitted heading and content into a PDF.
///
/// The content is split on newlines; each line is trimmed and lines that are
/// empty after trimming produce no paragraph.  Markup in the heading or any
/// body line fails the whole render.
pub fn render_report(
    heading: &str,
    content: &str,
    styles: &ReportStyles,
) -> Result<RenderedReport, RenderError> {
    let heading_spans = markup::parse_markup(heading)?;
    let body_spans = body_paragraphs(content)
        .map(markup::parse_markup)
        .collect::<Result<Vec<_>, _>>()?;

    let font_family = fonts::default_font_family()?;
    let mut document = genpdf::Document::new(font_family);
    document.set_paper_size(PaperSize::Letter);
    document.set_page_decorator(BorderedPageDecorator::new(
        styles.page_margins,
        styles.border_inset,
        styles.border_color,
    ));

    document.push(heading_block(heading_spans, styles));
    for spans in body_spans {
        document.push(body_block(spans, styles));
    }

    let mut bytes = Vec::new();
    document.render(&mut bytes)?;
    log::debug!("rendered report pdf ({} bytes)", bytes.len());

    Ok(RenderedReport { bytes })
}

/// Splits submitted content into renderable paragraphs: one per line,
/// trimmed, skipping lines that are empty after trimming.
pub fn body_paragraphs(content: &str) -> impl Iterator<Item = &str> {
    content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

fn paragraph_from_spans(spans: Vec<Span>) -> Paragraph {
    let mut paragraph = Paragraph::default();
    for span in &spans {
        paragraph.push(span.to_styled_string());
    }
    paragraph
}

fn heading_block(spans: Vec<Span>, styles: &ReportStyles) -> impl Element {
    let mut paragraph = paragraph_from_spans(spans);
    paragraph.set_alignment(styles.heading_alignment);
    paragraph
        .styled(styles.heading.clone())
        .padded(Margins::trbl(0, 0, styles.heading_space_after, 0))
}

fn body_block(spans: Vec<Span>, styles: &ReportStyles) -> impl Element {
    let mut paragraph = paragraph_from_spans(spans);
    paragraph.set_alignment(styles.body_alignment);
    paragraph
        .styled(styles.body.clone())
        .padded(Margins::trbl(0, 0, styles.body_space_after, 0))
}

/// Page decorator that strokes a rectangle inset from the page edge and then
/// applies the content margins.  Runs for the first page and every page the
/// layout engine breaks onto afterwards.
struct BorderedPageDecorator {
    margins: Margins,
    inset: Mm,
    color: Color,
}

impl BorderedPageDecorator {
    fn new(margins: Margins, inset: Mm, color: Color) -> Self {
        Self {
            margins,
            inset,
            color,
        }
    }
}

impl PageDecorator for BorderedPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        _context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        _style: Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        let size = area.size();
        let inset = self.inset;
        area.draw_line(
            vec![
                Position::new(inset, inset),
                Position::new(size.width - inset, inset),
                Position::new(size.width - inset, size.height - inset),
                Position::new(inset, size.height - inset),
                Position::new(inset, inset),
            ],
            Style::new().with_color(self.color),
        );

        area.add_margins(self.margins);
        Ok(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_produce_no_paragraphs() {
        let paragraphs: Vec<_> = body_paragraphs("A\n\n\nB").collect();
        assert_eq!(paragraphs, vec!["A", "B"]);
    }

    #[test]
    fn lines_are_trimmed() {
        let paragraphs: Vec<_> = body_paragraphs("  A  \n B ").collect();
        assert_eq!(paragraphs, vec!["A", "B"]);
    }

    #[test]
    fn carriage_returns_are_trimmed_with_whitespace() {
        let paragraphs: Vec<_> = body_paragraphs("A\r\nB\r\n").collect();
        assert_eq!(paragraphs, vec!["A", "B"]);
    }

    #[test]
    fn whitespace_only_content_is_empty() {
        assert_eq!(body_paragraphs("  \n\t\n ").count(), 0);
    }

    #[test]
    fn malformed_markup_fails_before_font_loading() {
        let styles = ReportStyles::default();
        let err = render_report("**oops", "body", &styles).unwrap_err();
        assert!(matches!(err, RenderError::Markup(_)));

        let err = render_report("Title", "fine\n[color=#zz]{x}", &styles).unwrap_err();
        assert!(matches!(err, RenderError::Markup(_)));
    }
}
