//! inscriptis converts HTML documents into clean, readable text, optionally
//! attaching NLP-oriented annotations to spans of the rendered output.
//!
//! The entry points are [`get_text`] and [`get_annotated_text`], or the
//! [`Inscriptis`] struct when a parsed tree is worth reusing across both.
//!
//! Grounded on `examples/original_source/src/inscriptis/__init__.py`'s public
//! surface (`get_text`, `get_annotated_text`), reworked onto this crate's
//! `html5ever`-based parser and engine.

pub mod annotation;
pub mod canvas;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod css;
pub mod dom;
pub mod engine;
pub mod error;
pub mod exit_codes;
pub mod html_properties;
#[cfg(feature = "http-service")]
pub mod service;
pub mod table;

pub use annotation::output::AnnotatedText;
pub use config::ParserConfig;
pub use error::{InscriptisError, InscriptisResult};

use markup5ever_rcdom::Handle;

use annotation::Annotation;
use engine::Engine;

/// A parsed document bound to the config it will be rendered with,
/// exposing both output forms without re-parsing.
pub struct Inscriptis<'a> {
    root: Handle,
    config: &'a ParserConfig,
}

impl<'a> Inscriptis<'a> {
    pub fn new(root: &Handle, config: &'a ParserConfig) -> Self {
        Inscriptis {
            root: root.clone(),
            config,
        }
    }

    /// Parse `html` and bind it to `config` in one step.
    pub fn from_html(html: &str, config: &'a ParserConfig) -> Self {
        Inscriptis::new(&dom::parse_html(html), config)
    }

    pub fn get_text(&self) -> String {
        Engine::new(self.config).run(&self.root).0
    }

    pub fn get_annotated_text(&self) -> AnnotatedText {
        let (text, annotations) = Engine::new(self.config).run(&self.root);
        AnnotatedText::new(text, annotations)
    }

    /// The raw `(start, end, label)` spans, without the text they index
    /// into.
    pub fn get_annotations(&self) -> Vec<Annotation> {
        Engine::new(self.config).run(&self.root).1
    }
}

/// Convert `html` to plain text using `config`, or the relaxed default
/// profile when `config` is `None`.
pub fn get_text(html: &str, config: Option<&ParserConfig>) -> String {
    let default_config;
    let config = match config {
        Some(c) => c,
        None => {
            default_config = ParserConfig::default();
            &default_config
        }
    };
    let root = dom::parse_html(html);
    Engine::new(config).run(&root).0
}

/// Convert `html` to text while recording annotation spans, or the relaxed
/// default profile when `config` is `None`.
pub fn get_annotated_text(html: &str, config: Option<&ParserConfig>) -> AnnotatedText {
    let default_config;
    let config = match config {
        Some(c) => c,
        None => {
            default_config = ParserConfig::default();
            &default_config
        }
    };
    let root = dom::parse_html(html);
    let (text, annotations) = Engine::new(config).run(&root);
    AnnotatedText::new(text, annotations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_text_uses_the_relaxed_default_profile() {
        let text = get_text("<body><p>Hello</p><p>World</p></body>", None);
        assert_eq!(text, "Hello\n\nWorld");
    }

    #[test]
    fn get_text_honors_an_explicit_config() {
        let mut config = ParserConfig::new();
        config.display_links = true;
        let text = get_text(r#"<a href="https://example.com">here</a>"#, Some(&config));
        assert_eq!(text, "[here](https://example.com)");
    }

    #[test]
    fn get_annotated_text_attaches_spans_to_the_rendered_string() {
        let mut config = ParserConfig::new();
        config.annotation_rules.insert("b".to_string(), vec!["bold".to_string()]);
        let annotated = get_annotated_text("<body>Hello <b>World</b>!</body>", Some(&config));
        assert_eq!(annotated.text, "Hello World!");
        assert_eq!(annotated.label.len(), 1);
        let ann = &annotated.label[0];
        assert_eq!(&annotated.text[ann.start..ann.end], "World");
    }

    #[test]
    fn inscriptis_struct_reuses_one_parsed_tree_for_both_outputs() {
        let config = ParserConfig::new();
        let doc = Inscriptis::from_html("<p>Hello</p>", &config);
        assert_eq!(doc.get_text(), "Hello");
        assert!(doc.get_annotations().is_empty());
    }
}
