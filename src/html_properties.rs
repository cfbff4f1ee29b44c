//! Closed enumerations for the restricted CSS property set inscriptis honors.
//!
//! Mirrors `inscriptis.html_properties` from the original Python implementation:
//! `Display`, `WhiteSpace`, `HorizontalAlignment`, and `VerticalAlignment` are the
//! only axes of layout this crate's CSS model understands.

/// Whether an element's content participates in block layout, inline flow, or
/// is suppressed entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Inline,
    Block,
    /// `display: none` — the content (and its descendants) is not rendered.
    None,
}

/// Whitespace handling strategy inherited down the element tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhiteSpace {
    /// Collapse runs of whitespace into a single space.
    Normal,
    /// Preserve whitespace verbatim (`<pre>`, `<xmp>`, ...).
    Pre,
}

/// Horizontal alignment of a table cell's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Right,
    Center,
}

impl HorizontalAlignment {
    /// The `str::format`-style alignment character rumdl-flavored table
    /// formatting code uses (`<`, `>`, `^`).
    pub fn format_char(self) -> char {
        match self {
            HorizontalAlignment::Left => '<',
            HorizontalAlignment::Right => '>',
            HorizontalAlignment::Center => '^',
        }
    }
}

/// Vertical alignment of a table cell's content within its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    Top,
    #[default]
    Middle,
    Bottom,
}
