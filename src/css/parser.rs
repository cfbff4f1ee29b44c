//! The inline `style="…"` parser and the `align`/`valign` attribute parsers.
//!
//! Grounded on `examples/original_source/src/inscriptis/css.py`'s
//! `CssParse` class; errors are swallowed the way `css.py`'s
//! `except AttributeError: pass` does: unknown properties, selectors, and
//! unit suffixes are silently ignored.

use lazy_static::lazy_static;
use regex::Regex;

use crate::css::HtmlElement;
use crate::html_properties::{Display, HorizontalAlignment, VerticalAlignment, WhiteSpace};

lazy_static! {
    static ref RE_UNIT: Regex = Regex::new(r"([\-0-9.]+)(\w+)").unwrap();
}

/// Convert a CSS length (`2em`, `16px`, `3rem`, ...) to an integer line/column
/// count. `em`/`qem`/`rem` are taken at face value (rounded); any other unit
/// is divided by 8 and rounded.
fn parse_length(value: &str) -> Option<i64> {
    let caps = RE_UNIT.captures(value)?;
    let number: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str();
    if matches!(unit, "em" | "qem" | "rem") {
        Some(number.round() as i64)
    } else {
        Some((number / 8.0).round() as i64)
    }
}

fn parse_length_usize(value: &str) -> Option<usize> {
    parse_length(value).map(|v| v.max(0) as usize)
}

/// Apply a `style="…"` attribute value to a clone of `base`, returning the
/// refined element. Unknown keys/values/units are ignored one directive at a
/// time; a malformed directive does not poison the rest of the style string.
pub fn apply_style_attribute(style_attribute: &str, base: &HtmlElement) -> HtmlElement {
    let mut element = base.clone();
    for directive in style_attribute.to_ascii_lowercase().split(';') {
        let Some((key, value)) = directive.split_once(':') else {
            continue;
        };
        let key = key.trim().replace("-webkit-", "").replace('-', "_");
        let value = value.trim();
        apply_style_key(&key, value, &mut element);
    }
    element
}

fn apply_style_key(key: &str, value: &str, element: &mut HtmlElement) {
    match key {
        "display" => {
            // `none` is sticky: once an element is suppressed (whether by
            // its own base profile or by inheritance), no later directive
            // can turn it back on.
            if element.display == Display::None {
                return;
            }
            element.display = match value {
                "block" => Display::Block,
                "none" => Display::None,
                _ => Display::Inline,
            };
        }
        "white_space" => {
            element.whitespace = Some(match value {
                "pre" | "pre_line" | "pre_wrap" => WhiteSpace::Pre,
                _ => WhiteSpace::Normal,
            });
        }
        "margin_top" | "margin_before" => {
            if let Some(v) = parse_length_usize(value) {
                element.margin_before = v;
            }
        }
        "margin_bottom" | "margin_after" => {
            if let Some(v) = parse_length_usize(value) {
                element.margin_after = v;
            }
        }
        "padding_left" | "padding_start" => {
            if let Some(v) = parse_length_usize(value) {
                element.padding_inline = v;
            }
        }
        "text_align" => {
            if let Some(align) = parse_horizontal_alignment(value) {
                element.align = align;
            }
        }
        "vertical_align" => {
            if let Some(valign) = parse_vertical_alignment(value) {
                element.valign = valign;
            }
        }
        _ => {}
    }
}

fn parse_horizontal_alignment(value: &str) -> Option<HorizontalAlignment> {
    match value {
        "left" => Some(HorizontalAlignment::Left),
        "right" => Some(HorizontalAlignment::Right),
        "center" => Some(HorizontalAlignment::Center),
        _ => None,
    }
}

fn parse_vertical_alignment(value: &str) -> Option<VerticalAlignment> {
    match value {
        "top" => Some(VerticalAlignment::Top),
        "middle" => Some(VerticalAlignment::Middle),
        "bottom" => Some(VerticalAlignment::Bottom),
        _ => None,
    }
}

/// Apply the `align="…"` HTML attribute (routes through the same parser as
/// `text-align` in `style`).
pub fn apply_align_attribute(value: &str, element: &mut HtmlElement) {
    if let Some(align) = parse_horizontal_alignment(&value.to_ascii_lowercase()) {
        element.align = align;
    }
}

/// Apply the `valign="…"` HTML attribute.
pub fn apply_valign_attribute(value: &str, element: &mut HtmlElement) {
    if let Some(valign) = parse_vertical_alignment(&value.to_ascii_lowercase()) {
        element.valign = valign;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_em_lengths_at_face_value() {
        assert_eq!(parse_length("2em"), Some(2));
        assert_eq!(parse_length("1.6rem"), Some(2));
    }

    #[test]
    fn parses_px_lengths_divided_by_eight() {
        assert_eq!(parse_length("16px"), Some(2));
        assert_eq!(parse_length("8pt"), Some(1));
    }

    #[test]
    fn display_none_style_directive() {
        let base = HtmlElement::new("div");
        let refined = apply_style_attribute("display: none", &base);
        assert_eq!(refined.display, Display::None);
    }

    #[test]
    fn margin_and_padding_directives() {
        let base = HtmlElement::new("div");
        let refined = apply_style_attribute(
            "margin-top:1em;margin-bottom:2em;padding-left:4em",
            &base,
        );
        assert_eq!(refined.margin_before, 1);
        assert_eq!(refined.margin_after, 2);
        assert_eq!(refined.padding_inline, 4);
    }

    #[test]
    fn webkit_prefix_is_stripped() {
        let base = HtmlElement::new("div");
        let refined = apply_style_attribute("-webkit-display: block", &base);
        assert_eq!(refined.display, Display::Block);
    }

    #[test]
    fn unknown_property_is_ignored() {
        let base = HtmlElement::new("div");
        let refined = apply_style_attribute("color: red; display: block", &base);
        assert_eq!(refined.display, Display::Block);
    }

    #[test]
    fn malformed_directive_does_not_poison_the_rest() {
        let base = HtmlElement::new("div");
        let refined = apply_style_attribute("nonsense; display: block", &base);
        assert_eq!(refined.display, Display::Block);
    }

    #[test]
    fn align_attribute_routes_through_same_parser() {
        let mut element = HtmlElement::new("td");
        apply_align_attribute("RIGHT", &mut element);
        assert_eq!(element.align, HorizontalAlignment::Right);
    }

    #[test]
    fn valign_attribute_routes_through_same_parser() {
        let mut element = HtmlElement::new("td");
        apply_valign_attribute("top", &mut element);
        assert_eq!(element.valign, VerticalAlignment::Top);
    }

    #[test]
    fn invalid_numeric_length_is_ignored() {
        let base = HtmlElement::new("div").with_margins(5, 5);
        let refined = apply_style_attribute("margin-top: notanumber", &base);
        assert_eq!(refined.margin_before, 5);
    }
}
