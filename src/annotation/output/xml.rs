//! The XML extractor: wraps the text in an `<content>` root under an XML
//! declaration, with annotations rendered as nested open/close tags.
//!
//! Grounded on `examples/original_source/src/inscriptis/annotation/output/xml.py`;
//! the `<content>` root is added here (older revisions of the original
//! omitted it).

use std::collections::BTreeMap;

use super::{AnnotatedText, AnnotationProcessor};

pub struct XmlExtractor;

impl AnnotationProcessor for XmlExtractor {
    const VERBATIM: bool = true;
}

impl XmlExtractor {
    /// `start`/`end` are character counts; converted to byte offsets once,
    /// up front, since this extractor slices `annotated.text` as a `str`.
    pub fn extract(annotated: &AnnotatedText) -> String {
        let byte_spans = crate::annotation::to_byte_offsets(&annotated.text, &annotated.label);
        let mut tag_indices: BTreeMap<usize, Vec<String>> = BTreeMap::new();

        let mut sorted_labels: Vec<_> = byte_spans.iter().collect();
        sorted_labels.sort_by(|a, b| (a.start, a.end, &a.label).cmp(&(b.start, b.end, &b.label)));

        for annotation in &sorted_labels {
            tag_indices
                .entry(annotation.start)
                .or_default()
                .push(annotation.label.clone());
            tag_indices
                .entry(annotation.end)
                .or_default()
                .push(format!("/{}", annotation.label));
        }

        let mut current_idx = 0;
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n<content>");
        for (&index, tags) in &tag_indices {
            out.push_str(&annotated.text[current_idx..index]);

            let mut closing: Vec<&String> = tags.iter().filter(|t| t.starts_with('/')).collect();
            closing.sort_by(|a, b| b.cmp(a));
            for tag in closing {
                out.push('<');
                out.push_str(tag);
                out.push('>');
            }

            let mut opening: Vec<&String> = tags.iter().filter(|t| !t.starts_with('/')).collect();
            opening.sort();
            for tag in opening {
                out.push('<');
                out.push_str(tag);
                out.push('>');
            }

            current_idx = index;
        }
        out.push_str(&annotated.text[current_idx..]);
        out.push_str("</content>");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Annotation;

    #[test]
    fn wraps_text_with_xml_declaration_and_content_root() {
        let annotated = AnnotatedText::new("World".to_string(), vec![]);
        assert_eq!(
            XmlExtractor::extract(&annotated),
            "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n<content>World</content>"
        );
    }

    #[test]
    fn a_single_span_is_wrapped_in_its_tag() {
        let annotated = AnnotatedText::new(
            "Hello World!".to_string(),
            vec![Annotation::new(6, 11, "bold")],
        );
        let xml = XmlExtractor::extract(&annotated);
        assert!(xml.contains("Hello <bold>World</bold>!"));
    }

    #[test]
    fn stripping_tags_recovers_the_original_text() {
        let annotated = AnnotatedText::new(
            "Hello World!".to_string(),
            vec![Annotation::new(6, 11, "bold")],
        );
        let xml = XmlExtractor::extract(&annotated);
        let stripped: String = {
            let inner = xml
                .strip_prefix("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n<content>")
                .unwrap()
                .strip_suffix("</content>")
                .unwrap();
            let mut result = String::new();
            let mut in_tag = false;
            for ch in inner.chars() {
                match ch {
                    '<' => in_tag = true,
                    '>' => in_tag = false,
                    _ if !in_tag => result.push(ch),
                    _ => {}
                }
            }
            result
        };
        assert_eq!(stripped, annotated.text);
    }

    #[test]
    fn multi_byte_characters_in_the_span_do_not_panic_or_misplace_tags() {
        let annotated = AnnotatedText::new(
            "Hello café!".to_string(),
            vec![Annotation::new(6, 10, "word")],
        );
        let xml = XmlExtractor::extract(&annotated);
        assert!(xml.contains("Hello <word>café</word>!"));
    }

    #[test]
    fn adjacent_spans_sharing_a_boundary_balance() {
        let annotated = AnnotatedText::new(
            "Item1Item2".to_string(),
            vec![Annotation::new(0, 5, "inner"), Annotation::new(5, 10, "inner")],
        );
        let xml = XmlExtractor::extract(&annotated);
        assert!(xml.contains("<inner>Item1</inner><inner>Item2</inner>"));
    }
}
