//! Annotation rule parsing: `{"b": ["bold"], "div#class=toc": ["toc"]}`.
//!
//! Grounded on `examples/original_source/src/inscriptis/annotation/parser.py`.

use std::collections::HashMap;

use crate::css::HtmlElement;

/// A rule installed against one attribute name: on every element carrying
/// that attribute, append `labels` if the tag and value constraints (when
/// present) are satisfied.
#[derive(Debug, Clone)]
pub struct ApplyAnnotation {
    pub labels: Vec<String>,
    pub attr: String,
    pub match_tag: Option<String>,
    pub match_value: Option<String>,
}

impl ApplyAnnotation {
    /// Apply this rule to `element` given the raw value of the matched
    /// attribute. A no-op unless both constraints (tag, whitespace-separated
    /// value token) that are present are satisfied.
    pub fn apply(&self, attr_value: &str, element: &mut HtmlElement) {
        if let Some(tag) = &self.match_tag {
            if tag != &element.tag {
                return;
            }
        }
        if let Some(value) = &self.match_value {
            if !attr_value.split_whitespace().any(|token| token == value) {
                return;
            }
        }
        element.annotation.extend(self.labels.iter().cloned());
    }
}

/// The parsed annotation rule set: tag-only rules folded directly into a
/// (cloned) CSS profile, and attribute rules to be consulted by the engine
/// whenever it sees a matching attribute.
#[derive(Debug, Clone, Default)]
pub struct AnnotationModel {
    pub css: HashMap<String, HtmlElement>,
    pub attribute_rules: Vec<ApplyAnnotation>,
}

impl AnnotationModel {
    /// Fold `rules` over a copy of `css_profile`. Tag-only keys extend (or
    /// create) that tag's `annotation` list; `tag#attr`/`tag#attr=value`/
    /// `#attr`/`#attr=value` keys become attribute rules. A key containing
    /// `#` with an empty attribute name is malformed and is skipped.
    pub fn new(css_profile: &HashMap<String, HtmlElement>, rules: &HashMap<String, Vec<String>>) -> Self {
        let mut css = css_profile.clone();
        let mut attribute_rules = Vec::new();

        for (key, labels) in rules {
            if let Some(hash_pos) = key.find('#') {
                let tag = &key[..hash_pos];
                let rest = &key[hash_pos + 1..];
                let (attr, value) = match rest.split_once('=') {
                    Some((attr, value)) => (attr, Some(value.to_string())),
                    None => (rest, None),
                };
                if attr.is_empty() {
                    continue;
                }
                attribute_rules.push(ApplyAnnotation {
                    labels: labels.clone(),
                    attr: attr.to_string(),
                    match_tag: if tag.is_empty() { None } else { Some(tag.to_string()) },
                    match_value: value,
                });
            } else {
                let entry = css
                    .entry(key.clone())
                    .or_insert_with(|| HtmlElement::new(key.clone()));
                entry.annotation.extend(labels.iter().cloned());
            }
        }

        AnnotationModel { css, attribute_rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn tag_only_rule_extends_a_copy_of_the_profile() {
        let mut profile = HashMap::new();
        profile.insert("b".to_string(), HtmlElement::new("b"));
        let mut rules = HashMap::new();
        rules.insert("b".to_string(), vec!["bold".to_string()]);

        let model = AnnotationModel::new(&profile, &rules);
        assert_eq!(model.css["b"].annotation, vec!["bold".to_string()]);
        assert!(profile["b"].annotation.is_empty());
    }

    #[test]
    fn attribute_rule_with_tag_and_value_constraint() {
        let profile = HashMap::new();
        let mut rules = HashMap::new();
        rules.insert("div#class=toc".to_string(), vec!["table-of-contents".to_string()]);
        let model = AnnotationModel::new(&profile, &rules);

        assert_eq!(model.attribute_rules.len(), 1);
        let rule = &model.attribute_rules[0];

        let mut div = HtmlElement::new("div");
        rule.apply("toc", &mut div);
        assert_eq!(div.annotation, vec!["table-of-contents".to_string()]);

        let mut span = HtmlElement::new("span");
        rule.apply("toc", &mut span);
        assert!(span.annotation.is_empty());
    }

    #[test]
    fn bare_attribute_rule_matches_any_tag() {
        let profile = HashMap::new();
        let mut rules = HashMap::new();
        rules.insert("#class=short-description".to_string(), vec!["description".to_string()]);
        let model = AnnotationModel::new(&profile, &rules);

        let mut p = HtmlElement::new("p");
        model.attribute_rules[0].apply("short-description", &mut p);
        assert_eq!(p.annotation, vec!["description".to_string()]);
    }

    #[test]
    fn malformed_key_with_empty_attribute_is_skipped() {
        let profile = HashMap::new();
        let mut rules = HashMap::new();
        rules.insert("div#".to_string(), vec!["x".to_string()]);
        let model = AnnotationModel::new(&profile, &rules);
        assert!(model.attribute_rules.is_empty());
    }
}
