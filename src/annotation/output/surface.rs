//! The surface-form extractor: non-destructively attaches the literal text
//! each annotation spans.
//!
//! Grounded on `examples/original_source/src/inscriptis/annotation/output/surface.py`.

use super::{AnnotatedText, AnnotationProcessor};

pub struct SurfaceExtractor;

impl AnnotationProcessor for SurfaceExtractor {
    const VERBATIM: bool = false;
}

impl SurfaceExtractor {
    /// `[(label, text[start..end]), ...]` in annotation order. `start`/`end`
    /// are character counts, so they're converted to byte offsets before
    /// slicing `annotated.text`.
    pub fn extract(annotated: &AnnotatedText) -> Vec<(String, String)> {
        let byte_spans = crate::annotation::to_byte_offsets(&annotated.text, &annotated.label);
        annotated
            .label
            .iter()
            .zip(byte_spans.iter())
            .map(|(a, b)| (a.label.clone(), annotated.text[b.start..b.end].to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Annotation;

    #[test]
    fn extracts_the_literal_span_per_label() {
        let annotated = AnnotatedText::new(
            "Hello World!".to_string(),
            vec![Annotation::new(6, 11, "bold")],
        );
        let surface = SurfaceExtractor::extract(&annotated);
        assert_eq!(surface, vec![("bold".to_string(), "World".to_string())]);
    }

    #[test]
    fn applying_twice_on_the_surface_form_itself_is_idempotent() {
        let annotated = AnnotatedText::new("abc".to_string(), vec![]);
        assert!(SurfaceExtractor::extract(&annotated).is_empty());
        assert!(SurfaceExtractor::extract(&annotated).is_empty());
    }

    #[test]
    fn multi_byte_characters_in_the_span_do_not_panic_or_misplace_text() {
        let annotated = AnnotatedText::new(
            "Hello café!".to_string(),
            vec![Annotation::new(6, 10, "word")],
        );
        let surface = SurfaceExtractor::extract(&annotated);
        assert_eq!(surface, vec![("word".to_string(), "café".to_string())]);
    }
}
