//! Command-line argument definitions for the `inscript` binary.
//!
//! Grounded on `examples/original_source/src/inscriptis/cli/inscript.py`'s
//! `argparse` surface and the teacher's `#[derive(Parser)] struct Cli` in
//! `src/main.rs`, flattened to this crate's single subcommand-free binary.

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "inscript", about = "Convert the given HTML document to text.", long_about = None)]
pub struct Args {
    /// HTML input: a file path or an http(s):// URL (default: stdin).
    pub input: Option<String>,

    /// Output file (default: stdout).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Input encoding to use (default: UTF-8 for files, the server-reported
    /// encoding for URLs).
    #[arg(short, long, value_name = "ENCODING")]
    pub encoding: Option<String>,

    /// Display image captions.
    #[arg(short = 'i', long = "display-image-captions")]
    pub display_image_captions: bool,

    /// Suppress consecutive identical image captions.
    #[arg(short = 'd', long = "deduplicate-image-captions")]
    pub deduplicate_image_captions: bool,

    /// Display link targets.
    #[arg(short = 'l', long = "display-link-targets")]
    pub display_link_targets: bool,

    /// Display anchor URLs.
    #[arg(short = 'a', long = "display-anchor-urls")]
    pub display_anchor_urls: bool,

    /// Path to a JSON file of annotation rules.
    #[arg(short = 'r', long = "annotation-rules", value_name = "PATH")]
    pub annotation_rules: Option<String>,

    /// Postprocessor to run over the annotated text; requires
    /// `--annotation-rules`.
    #[arg(short = 'p', long, value_enum)]
    pub postprocessor: Option<Postprocessor>,

    /// How to handle indentation.
    #[arg(long, value_enum, default_value_t = Indentation::Extended)]
    pub indentation: Indentation,

    /// Separator to use between table cells.
    #[arg(long, default_value = "  ")]
    pub table_cell_separator: String,

    /// Request timeout in seconds, for http(s):// input.
    #[arg(long, default_value_t = 5)]
    pub timeout: u64,

    /// Display version information and exit.
    #[arg(short, long)]
    pub version: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Postprocessor {
    Surface,
    Xml,
    Html,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Indentation {
    Extended,
    Strict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_indentation_is_extended() {
        let args = Args::parse_from(["inscript"]);
        assert_eq!(args.indentation, Indentation::Extended);
        assert_eq!(args.table_cell_separator, "  ");
        assert_eq!(args.timeout, 5);
    }

    #[test]
    fn short_flags_parse_independently() {
        let args = Args::parse_from(["inscript", "-i", "-d", "-l", "-a", "page.html"]);
        assert!(args.display_image_captions);
        assert!(args.deduplicate_image_captions);
        assert!(args.display_link_targets);
        assert!(args.display_anchor_urls);
        assert_eq!(args.input.as_deref(), Some("page.html"));
    }

    #[test]
    fn postprocessor_accepts_the_three_names() {
        let args = Args::parse_from(["inscript", "-p", "xml"]);
        assert_eq!(args.postprocessor, Some(Postprocessor::Xml));
    }
}
