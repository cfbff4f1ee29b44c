//! The two built-in CSS profiles: `strict` (Firefox-like browser defaults)
//! and `relaxed` (adds spacing suited for downstream text mining).
//!
//! Grounded on `examples/original_source/src/inscriptis/css_profiles.py`.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::css::HtmlElement;
use crate::html_properties::{Display, WhiteSpace};

pub type CssProfile = HashMap<String, HtmlElement>;

fn block(tag: &str) -> HtmlElement {
    HtmlElement::new(tag).with_display(Display::Block)
}

fn none(tag: &str) -> HtmlElement {
    HtmlElement::new(tag).with_display(Display::None)
}

fn build_strict_profile() -> CssProfile {
    let mut css = CssProfile::new();

    for tag in ["head", "link", "meta", "script", "style", "title"] {
        css.insert(tag.to_string(), none(tag));
    }

    for tag in ["p", "figure", "h1", "h2", "h3", "h4", "h5", "h6"] {
        css.insert(tag.to_string(), block(tag).with_margins(1, 1));
    }

    css.insert("ul".to_string(), block("ul").with_padding(4));
    css.insert("ol".to_string(), block("ol").with_padding(4));
    css.insert("li".to_string(), block("li"));

    for tag in [
        "address",
        "article",
        "aside",
        "div",
        "footer",
        "header",
        "hgroup",
        "layer",
        "main",
        "nav",
        "figcaption",
        "blockquote",
    ] {
        css.insert(tag.to_string(), block(tag));
    }

    css.insert(
        "q".to_string(),
        HtmlElement::new("q").with_affixes("\"", "\""),
    );

    for tag in ["pre", "xmp", "listing", "plaintext"] {
        css.insert(
            tag.to_string(),
            block(tag).with_whitespace(WhiteSpace::Pre),
        );
    }

    css
}

fn build_relaxed_profile() -> CssProfile {
    let mut css = build_strict_profile();
    css.insert("div".to_string(), block("div").with_padding(2));
    css.insert(
        "span".to_string(),
        HtmlElement::new("span")
            .with_display(Display::Inline)
            .with_affixes(" ", " ")
            .with_limit_whitespace_affixes(),
    );
    css
}

lazy_static! {
    pub static ref STRICT_CSS_PROFILE: CssProfile = build_strict_profile();
    pub static ref RELAXED_CSS_PROFILE: CssProfile = build_relaxed_profile();
}

/// Look up a named built-in profile by the CLI's `--indentation` vocabulary
/// (`strict` / `extended` aka `relaxed`).
pub fn named_profile(name: &str) -> Option<&'static CssProfile> {
    match name {
        "strict" => Some(&STRICT_CSS_PROFILE),
        "relaxed" | "extended" => Some(&RELAXED_CSS_PROFILE),
        _ => None,
    }
}
