//! Annotations: `(start, end, label)` spans attached to the rendered text,
//! plus their rule model and output formatters.
//!
//! Grounded on `examples/original_source/src/inscriptis/annotation/__init__.py`.

pub mod output;
pub mod rules;

use crate::html_properties::HorizontalAlignment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

impl Annotation {
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Annotation {
            start,
            end,
            label: label.into(),
        }
    }

    /// Sort order: ascending `start`, then descending span length — so that
    /// at an identical start offset, the outer (larger) span is ordered
    /// first.
    pub fn sort_key(&self) -> (usize, std::cmp::Reverse<usize>) {
        (self.start, std::cmp::Reverse(self.end - self.start))
    }
}

/// Translate `annotations`' `start`/`end` from Unicode character counts (the
/// unit the rendering engine counts in — see `canvas/block.rs`'s
/// `merge_normal_text`/`merge_pre_text`) to byte offsets into `text`, the
/// unit `str` indexing and slicing actually needs. Formatters that slice or
/// key by byte offset must call this first; everywhere else in the engine
/// keeps working in character counts.
pub(crate) fn to_byte_offsets(text: &str, annotations: &[Annotation]) -> Vec<Annotation> {
    let mut char_to_byte: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
    char_to_byte.push(text.len());

    annotations
        .iter()
        .map(|a| {
            Annotation::new(
                char_to_byte.get(a.start).copied().unwrap_or(text.len()),
                char_to_byte.get(a.end).copied().unwrap_or(text.len()),
                a.label.clone(),
            )
        })
        .collect()
}

/// Shift a set of annotations to account for the horizontal alignment and
/// padding applied when a line of `content_width` is laid out in a field of
/// `line_width`. `shift` is an additional caller-supplied offset (e.g. the
/// cell's position within its row).
///
/// The `right` formula here (`line_width - content_width`) is the corrected
/// one: an earlier revision of the original source computed
/// `content_width - line_width`, which this crate does not reproduce.
pub fn horizontal_shift(
    annotations: &[Annotation],
    content_width: usize,
    line_width: usize,
    align: HorizontalAlignment,
    shift: i64,
) -> Vec<Annotation> {
    let h_align: i64 = match align {
        HorizontalAlignment::Left => shift,
        HorizontalAlignment::Right => shift + line_width as i64 - content_width as i64,
        HorizontalAlignment::Center => shift + (line_width as i64 - content_width as i64) / 2,
    };

    annotations
        .iter()
        .map(|a| {
            Annotation::new(
                (a.start as i64 + h_align).max(0) as usize,
                (a.end as i64 + h_align).max(0) as usize,
                a.label.clone(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_alignment_shifts_by_line_minus_content_width() {
        let annotations = vec![Annotation::new(0, 4, "x")];
        let shifted = horizontal_shift(&annotations, 4, 10, HorizontalAlignment::Right, 0);
        assert_eq!(shifted[0].start, 6);
        assert_eq!(shifted[0].end, 10);
    }

    #[test]
    fn center_alignment_shifts_by_half_the_remainder() {
        let annotations = vec![Annotation::new(0, 4, "x")];
        let shifted = horizontal_shift(&annotations, 4, 10, HorizontalAlignment::Center, 0);
        assert_eq!(shifted[0].start, 3);
        assert_eq!(shifted[0].end, 7);
    }

    #[test]
    fn left_alignment_only_applies_the_extra_shift() {
        let annotations = vec![Annotation::new(2, 5, "x")];
        let shifted = horizontal_shift(&annotations, 4, 10, HorizontalAlignment::Left, 3);
        assert_eq!(shifted[0].start, 5);
        assert_eq!(shifted[0].end, 8);
    }

    #[test]
    fn to_byte_offsets_accounts_for_multi_byte_characters() {
        let text = "Hello café!";
        let chars = vec![Annotation::new(6, 10, "word")];
        let bytes = to_byte_offsets(text, &chars);
        assert_eq!(&text[bytes[0].start..bytes[0].end], "café");
    }

    #[test]
    fn sort_key_orders_outer_spans_first_at_equal_start() {
        let outer = Annotation::new(0, 10, "outer");
        let inner = Annotation::new(0, 4, "inner");
        let mut spans = vec![inner.clone(), outer.clone()];
        spans.sort_by_key(|a| a.sort_key());
        assert_eq!(spans[0], outer);
        assert_eq!(spans[1], inner);
    }
}
