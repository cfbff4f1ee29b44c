//! The restricted CSS model: the `HtmlElement` layout record and its
//! refinement rule, plus the two built-in profiles and the inline
//! style/attribute parsers.
//!
//! Grounded on `examples/original_source/src/inscriptis/model/html_element.py`
//! and `model/css.py`, reworked in the teacher's (`rvben-rumdl`) style of a
//! plain value-typed record (see `src/rule.rs`'s `LintWarning`) rather than a
//! Python `__slots__` class.

pub mod parser;
pub mod profiles;

use crate::html_properties::{Display, HorizontalAlignment, VerticalAlignment, WhiteSpace};

/// Per-tag layout record computed while walking the HTML tree.
///
/// A fresh `HtmlElement` is produced for every opened tag by refining the
/// profile's default for that tag (or an empty default) against the parent
/// element currently on the engine's tag stack (`refine`). Unlike the Python
/// original, this type does not hold a reference to the canvas it writes
/// to — see `DESIGN.md` for why the engine keeps a canvas stack instead.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlElement {
    pub tag: String,
    pub prefix: String,
    pub suffix: String,
    pub display: Display,
    pub margin_before: usize,
    pub margin_after: usize,
    pub padding_inline: usize,
    pub list_bullet: String,
    pub whitespace: Option<WhiteSpace>,
    pub limit_whitespace_affixes: bool,
    pub align: HorizontalAlignment,
    pub valign: VerticalAlignment,
    pub annotation: Vec<String>,
    pub previous_margin_after: usize,
}

impl Default for HtmlElement {
    fn default() -> Self {
        HtmlElement {
            tag: "default".to_string(),
            prefix: String::new(),
            suffix: String::new(),
            display: Display::Inline,
            margin_before: 0,
            margin_after: 0,
            padding_inline: 0,
            list_bullet: String::new(),
            whitespace: None,
            limit_whitespace_affixes: false,
            align: HorizontalAlignment::Left,
            valign: VerticalAlignment::Middle,
            annotation: Vec::new(),
            previous_margin_after: 0,
        }
    }
}

impl HtmlElement {
    pub fn new(tag: impl Into<String>) -> Self {
        HtmlElement {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    pub fn with_margins(mut self, before: usize, after: usize) -> Self {
        self.margin_before = before;
        self.margin_after = after;
        self
    }

    pub fn with_padding(mut self, padding_inline: usize) -> Self {
        self.padding_inline = padding_inline;
        self
    }

    pub fn with_affixes(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }

    pub fn with_whitespace(mut self, whitespace: WhiteSpace) -> Self {
        self.whitespace = Some(whitespace);
        self
    }

    pub fn with_limit_whitespace_affixes(mut self) -> Self {
        self.limit_whitespace_affixes = true;
        self
    }

    /// The effective whitespace handling, inline elements default to `Normal`.
    pub fn whitespace_or_normal(&self) -> WhiteSpace {
        self.whitespace.unwrap_or(WhiteSpace::Normal)
    }

    /// Compute `self`'s effective record given that `self` was produced as a
    /// child opened while `parent` was the current element.
    ///
    /// `display: none` is inherited and terminates further refinement;
    /// `whitespace` is inherited when unset; in a `pre` parent with
    /// `limit_whitespace_affixes` set, whitespace-only affixes are erased;
    /// and `previous_margin_after` is set for margin collapsing when both
    /// elements are block-level.
    pub fn refine(&self, mut child: HtmlElement) -> HtmlElement {
        if self.display == Display::None {
            child.display = Display::None;
            return child;
        }

        if child.whitespace.is_none() {
            child.whitespace = self.whitespace;
        }

        if child.limit_whitespace_affixes && self.whitespace_or_normal() == WhiteSpace::Pre {
            if is_whitespace_only(&child.prefix) {
                child.prefix.clear();
            }
            if is_whitespace_only(&child.suffix) {
                child.suffix.clear();
            }
        }

        if child.display == Display::Block && self.display == Display::Block {
            child.previous_margin_after = self.margin_after;
        }

        child
    }
}

fn is_whitespace_only(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_whitespace)
}
