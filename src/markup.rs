//! Inline markup for submitted report text.
//!
//! Headings and body paragraphs may carry a small markdown-inspired syntax
//! for inline decorations.  The parser is strict: a malformed directive or an
//! unterminated span is a [`ParseError`], which aborts the whole render
//! instead of passing mangled text through to the PDF.

use std::fmt;

use genpdf::style::{Color, Style, StyledString};

/// A fragment of report text together with its inline decorations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Span {
    text: String,
    bold: bool,
    italic: bool,
    color: Option<Color>,
}

impl Span {
    /// Creates an undecorated span.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Returns the raw text of the span.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the span is bold.
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Returns whether the span is italic.
    pub fn is_italic(&self) -> bool {
        self.italic
    }

    /// Returns the span color, if one was set.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Marks the span as bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Marks the span as italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Assigns a color to the span.
    pub fn colored(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    fn to_style(&self) -> Style {
        let mut style = Style::new();
        if let Some(color) = self.color {
            style.set_color(color);
        }
        if self.bold {
            style.set_bold();
        }
        if self.italic {
            style.set_italic();
        }
        style
    }

    /// Converts the span into a `genpdf` styled string.  The span style is
    /// merged over the enclosing block style at render time.
    pub fn to_styled_string(&self) -> StyledString {
        StyledString::new(self.text.clone(), self.to_style())
    }
}

impl From<&Span> for StyledString {
    fn from(span: &Span) -> Self {
        span.to_styled_string()
    }
}

/// Error produced when submitted text contains malformed markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    index: usize,
    message: String,
}

impl ParseError {
    fn new(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            message: message.into(),
        }
    }

    /// Byte index in the submitted text where the error was detected.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Human-readable description of the problem.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.index)
    }
}

impl std::error::Error for ParseError {}

#[derive(Clone, Copy, Debug, Default)]
struct Decorations {
    bold: bool,
    italic: bool,
    color: Option<Color>,
}

impl Decorations {
    fn to_span(self, text: impl Into<String>) -> Span {
        Span {
            text: text.into(),
            bold: self.bold,
            italic: self.italic,
            color: self.color,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marker {
    Bold,
    Italic,
    Color,
}

impl Marker {
    fn closing_token(self) -> &'static str {
        match self {
            Marker::Bold => "**",
            Marker::Italic => "*",
            Marker::Color => "}",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Marker::Bold => "bold span",
            Marker::Italic => "italic span",
            Marker::Color => "color span",
        }
    }
}

/// Parses a line of submitted text into decorated [`Span`]s.
///
/// Supported constructs:
///
/// - `**bold**`
/// - `*italic*`
/// - `[color=#RRGGBB]{text}` with a hexadecimal RGB value
///
/// Constructs may nest.  Anything else involving the reserved characters
/// `*`, `[`, `]`, `{`, `}` is rejected with positional information.
pub fn parse_markup(input: &str) -> Result<Vec<Span>, ParseError> {
    let (spans, index) = parse_spans(input, 0, Decorations::default(), None)?;
    debug_assert_eq!(index, input.len());
    Ok(spans)
}

fn parse_spans(
    input: &str,
    mut index: usize,
    state: Decorations,
    closing_marker: Option<Marker>,
) -> Result<(Vec<Span>, usize), ParseError> {
    let mut spans = Vec::new();
    let mut buffer = String::new();

    let flush = |buffer: &mut String, spans: &mut Vec<Span>| {
        if !buffer.is_empty() {
            spans.push(state.to_span(std::mem::take(buffer)));
        }
    };

    while index < input.len() {
        let rest = &input[index..];

        if let Some(marker) = closing_marker {
            if rest.starts_with(marker.closing_token()) {
                flush(&mut buffer, &mut spans);
                return Ok((spans, index + marker.closing_token().len()));
            }
        }

        if rest.starts_with("**") {
            flush(&mut buffer, &mut spans);
            let mut nested = state;
            nested.bold = true;
            let (inner, next) = parse_spans(input, index + 2, nested, Some(Marker::Bold))?;
            spans.extend(inner);
            index = next;
            continue;
        }

        if rest.starts_with('*') {
            flush(&mut buffer, &mut spans);
            let mut nested = state;
            nested.italic = true;
            let (inner, next) = parse_spans(input, index + 1, nested, Some(Marker::Italic))?;
            spans.extend(inner);
            index = next;
            continue;
        }

        if rest.starts_with("[color=") {
            let (color, after_directive) = parse_color_directive(input, index)?;
            flush(&mut buffer, &mut spans);
            let mut nested = state;
            nested.color = Some(color);
            let (inner, next) = parse_spans(input, after_directive, nested, Some(Marker::Color))?;
            spans.extend(inner);
            index = next;
            continue;
        }

        if rest.starts_with('}') {
            return Err(ParseError::new(
                index,
                "unexpected closing token `}` without matching opening `[color=...]`",
            ));
        }
        if rest.starts_with(']') {
            return Err(ParseError::new(index, "unexpected closing token `]`"));
        }
        if rest.starts_with('[') {
            return Err(ParseError::new(
                index,
                "unsupported directive; expected `[color=#RRGGBB]{...}`",
            ));
        }

        let ch = rest.chars().next().expect("non-empty remainder");
        buffer.push(ch);
        index += ch.len_utf8();
    }

    match closing_marker {
        Some(marker) => Err(ParseError::new(
            index,
            format!("unterminated {}", marker.description()),
        )),
        None => {
            flush(&mut buffer, &mut spans);
            Ok((spans, index))
        }
    }
}

fn parse_color_directive(input: &str, index: usize) -> Result<(Color, usize), ParseError> {
    const PREFIX: &str = "[color=";
    let hash_index = index + PREFIX.len();
    if !input[hash_index..].starts_with('#') {
        return Err(ParseError::new(
            hash_index,
            "expected `#` followed by a hexadecimal RGB value",
        ));
    }

    let hex_start = hash_index + 1;
    let hex_end = hex_start + 6;
    if hex_end > input.len() {
        return Err(ParseError::new(
            hex_start,
            "incomplete color specification; expected 6 hexadecimal digits",
        ));
    }

    let hex = &input[hex_start..hex_end];
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ParseError::new(
            hex_start,
            "invalid RGB specification; use hexadecimal digits only",
        ));
    }

    let r = u8::from_str_radix(&hex[0..2], 16).expect("validated hex digits");
    let g = u8::from_str_radix(&hex[2..4], 16).expect("validated hex digits");
    let b = u8::from_str_radix(&hex[4..6], 16).expect("validated hex digits");

    if !input[hex_end..].starts_with(']') {
        return Err(ParseError::new(
            hex_end,
            "expected `]` to close color directive",
        ));
    }

    let brace_index = hex_end + 1;
    if !input[brace_index..].starts_with('{') {
        return Err(ParseError::new(
            brace_index,
            "expected `{` to start the colored text",
        ));
    }

    Ok((Color::Rgb(r, g, b), brace_index + 1))
}
