//! The HTML extractor: renders annotated text as colored `<span>`s inside a
//! standalone HTML document.
//!
//! Grounded on `examples/original_source/src/inscriptis/annotation/output/html.py`.

use std::collections::{BTreeMap, BTreeSet};

use super::{AnnotatedText, AnnotationProcessor};

const COLOR_SCHEMA: [&str; 5] = ["#D8115980", "#8F2D5680", "#21838080", "#FBB13C80", "#73D2DE80"];

pub struct HtmlExtractor;

impl AnnotationProcessor for HtmlExtractor {
    const VERBATIM: bool = true;
}

impl HtmlExtractor {
    pub fn extract(annotated: &AnnotatedText) -> String {
        let mut tag_indices: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        let mut sorted_labels: Vec<_> = annotated.label.iter().collect();
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

        let mut open_tags: Vec<String> = Vec::new();
        let mut out = String::from("<html><head><style>");
        out.push_str(&Self::css(&annotated.label));
        out.push_str("</style></head><body><pre>");

        // `tag_indices` is keyed by character count (the unit annotation
        // offsets are expressed in), not byte offset, so iterate by
        // character position too.
        for (idx, ch) in annotated.text.chars().enumerate() {
            if let Some(tags) = tag_indices.get(&idx) {
                let mut closing: Vec<&String> = tags.iter().filter(|t| t.starts_with('/')).collect();
                closing.sort_by(|a, b| b.cmp(a));
                for _ in closing {
                    open_tags.pop();
                    out.push_str("</span>");
                }

                let mut opening: Vec<&String> = tags.iter().filter(|t| !t.starts_with('/')).collect();
                opening.sort_by(|a, b| b.cmp(a));
                for tag in opening {
                    open_tags.push(tag.clone());
                    out.push_str(&format!(
                        "<span class=\"{tag}-label\">{tag}</span><span class=\"{tag}\">"
                    ));
                }
            }

            if ch == '\n' {
                for _ in &open_tags {
                    out.push_str("</span>");
                }
                out.push_str("</pre>\n<pre>");
                for tag in &open_tags {
                    out.push_str(&format!("<span class=\"{tag}\">"));
                }
            } else {
                out.push(ch);
            }
        }

        out.push_str("</pre></body></html>");
        out
    }

    fn label_colors(labels: &[crate::annotation::Annotation]) -> BTreeMap<String, &'static str> {
        let distinct: BTreeSet<&str> = labels.iter().map(|a| a.label.as_str()).collect();
        distinct
            .into_iter()
            .enumerate()
            .map(|(i, label)| (label.to_string(), COLOR_SCHEMA[i % COLOR_SCHEMA.len()]))
            .collect()
    }

    fn css(labels: &[crate::annotation::Annotation]) -> String {
        let mut rules = Vec::new();
        for (label, color) in Self::label_colors(labels) {
            rules.push(format!(
                "pre{{\n  position: relative;\n}}\n.{label} {{\n  background-color: {color};\n  border-radius: 0.4em;\n}}\n.{label}-label {{\n  top: -1.0em;\n  content: \"{label}\";\n  position: absolute;\n  background-color: {color};\n  font-size: 75%; }}\n"
            ));
        }
        rules.join("\n")
    }
}
