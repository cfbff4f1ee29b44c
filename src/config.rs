//! `ParserConfig`: the tunable surface of a single conversion.
//!
//! Grounded on `examples/original_source/src/inscriptis/model/config.py`'s
//! `ParserConfig` dataclass.

use std::collections::HashMap;

use crate::annotation::rules::AnnotationModel;
use crate::css::profiles::{CssProfile, RELAXED_CSS_PROFILE};
use crate::css::HtmlElement;
use crate::engine::{EndHandler, StartHandler};

/// The options that shape a single `get_text`/`get_annotated_text` call.
#[derive(Clone)]
pub struct ParserConfig {
    /// Overrides the default relaxed profile wholesale when set.
    pub css: Option<CssProfile>,
    pub display_images: bool,
    pub deduplicate_captions: bool,
    pub display_links: bool,
    pub display_anchors: bool,
    /// Rule keys of the form `tag`, `tag#attr`, `tag#attr=value`, `#attr`,
    /// `#attr=value`, mapped to the labels they attach.
    pub annotation_rules: HashMap<String, Vec<String>>,
    pub table_cell_separator: String,
    custom_start_handlers: HashMap<String, StartHandler>,
    custom_end_handlers: HashMap<String, EndHandler>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            css: None,
            display_images: false,
            deduplicate_captions: false,
            display_links: false,
            display_anchors: false,
            annotation_rules: HashMap::new(),
            table_cell_separator: "  ".to_string(),
            custom_start_handlers: HashMap::new(),
            custom_end_handlers: HashMap::new(),
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        ParserConfig::default()
    }

    /// Install (or override) a tag's start handler, merged over the engine
    /// defaults.
    pub fn set_custom_start_handler(&mut self, tag: impl Into<String>, handler: StartHandler) {
        self.custom_start_handlers.insert(tag.into(), handler);
    }

    pub fn set_custom_end_handler(&mut self, tag: impl Into<String>, handler: EndHandler) {
        self.custom_end_handlers.insert(tag.into(), handler);
    }

    pub(crate) fn custom_start_handler(&self, tag: &str) -> Option<StartHandler> {
        self.custom_start_handlers.get(tag).cloned()
    }

    pub(crate) fn custom_end_handler(&self, tag: &str) -> Option<EndHandler> {
        self.custom_end_handlers.get(tag).cloned()
    }

    fn base_css_profile(&self) -> CssProfile {
        self.css.clone().unwrap_or_else(|| RELAXED_CSS_PROFILE.clone())
    }

    /// The CSS profile folded with `annotation_rules`'s tag-only keys, plus
    /// the attribute-keyed rules the engine consults per element.
    pub(crate) fn annotation_model(&self) -> AnnotationModel {
        log::debug!(
            "[inscriptis-config] folding {} annotation rule(s) into the CSS profile",
            self.annotation_rules.len()
        );
        AnnotationModel::new(&self.base_css_profile(), &self.annotation_rules)
    }
}

impl std::fmt::Debug for ParserConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserConfig")
            .field("css", &self.css.as_ref().map(|_| "<custom profile>"))
            .field("display_images", &self.display_images)
            .field("deduplicate_captions", &self.deduplicate_captions)
            .field("display_links", &self.display_links)
            .field("display_anchors", &self.display_anchors)
            .field("annotation_rules", &self.annotation_rules)
            .field("table_cell_separator", &self.table_cell_separator)
            .finish_non_exhaustive()
    }
}
