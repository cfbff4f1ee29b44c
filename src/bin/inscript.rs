//! `inscript`: the command-line client wrapping [`inscriptis::get_text`] and
//! [`inscriptis::get_annotated_text`].
//!
//! Grounded on `examples/original_source/src/inscriptis/cli/inscript.py`
//! (input resolution, postprocessor dispatch) and the teacher's `main.rs`
//! (env_logger setup, `exit_codes::exit` helpers).

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Duration;

use clap::Parser;

use inscriptis::annotation::output::html::HtmlExtractor;
use inscriptis::annotation::output::surface::SurfaceExtractor;
use inscriptis::annotation::output::xml::XmlExtractor;
use inscriptis::annotation::output::AnnotationProcessor;
use inscriptis::cli::{Args, Indentation, Postprocessor};
use inscriptis::config::ParserConfig;
use inscriptis::css::profiles::{RELAXED_CSS_PROFILE, STRICT_CSS_PROFILE};
use inscriptis::exit_codes::exit;

const NAME: &str = "Inscript HTML to text conversion";
const COPYRIGHT: &str = "2016-2026 weblyzard.com";
const LICENSE: &str = "GNU Affero General Public License v3";
const DEFAULT_TIMEOUT: u64 = 5;

fn main() {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();

    let args = Args::parse();

    if args.version {
        print_version();
        exit::success();
    }

    let html_content = match get_html_content(&args) {
        Some(content) => content,
        None => {
            eprintln!(
                "ERROR: Cannot open input file '{}'.",
                args.input.as_deref().unwrap_or("<stdin>")
            );
            exit::input_error();
        }
    };

    let annotation_rules: Option<serde_json::Map<String, serde_json::Value>> =
        match &args.annotation_rules {
            Some(path) => match fs::read_to_string(path).and_then(|raw| {
                serde_json::from_str(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            }) {
                Ok(rules) => Some(rules),
                Err(_) => {
                    eprintln!("ERROR: Cannot open annotation rule file '{path}'.");
                    exit::input_error();
                }
            },
            None => None,
        };

    let mut config = ParserConfig::new();
    config.css = Some(match args.indentation {
        Indentation::Extended => RELAXED_CSS_PROFILE.clone(),
        Indentation::Strict => STRICT_CSS_PROFILE.clone(),
    });
    config.display_images = args.display_image_captions;
    config.deduplicate_captions = args.deduplicate_image_captions;
    config.display_links = args.display_link_targets;
    config.display_anchors = args.display_anchor_urls;
    config.table_cell_separator = args.table_cell_separator.clone();
    if let Some(rules) = &annotation_rules {
        for (key, labels) in rules {
            let labels: Vec<String> = labels
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
            config.annotation_rules.insert(key.clone(), labels);
        }
    }

    let output = if annotation_rules.is_none() {
        inscriptis::get_text(&html_content, Some(&config))
    } else {
        let annotated = inscriptis::get_annotated_text(&html_content, Some(&config));
        match args.postprocessor {
            Some(Postprocessor::Surface) => {
                serde_json::to_string(&SurfaceExtractor::extract(&annotated))
                    .expect("surface extractions serialize")
            }
            Some(Postprocessor::Xml) => {
                debug_assert!(XmlExtractor::VERBATIM);
                XmlExtractor::extract(&annotated)
            }
            Some(Postprocessor::Html) => {
                debug_assert!(HtmlExtractor::VERBATIM);
                HtmlExtractor::extract(&annotated)
            }
            None => annotated.text,
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                eprintln!("ERROR: Cannot write output file '{path}': {e}");
                exit::input_error();
            }
        }
        None => {
            println!("{output}");
        }
    }
}

fn print_version() {
    println!("{NAME} (based on the inscriptis library version {})", env!("CARGO_PKG_VERSION"));
    println!("Copyright (C) {COPYRIGHT}");
    println!("\nInscript comes with ABSOLUTELY NO WARRANTY.");
    println!("This is free software and you are welcome to redistribute it under the terms of the {LICENSE}.");
}

/// Resolve `args.input` to HTML text: stdin when absent, a file when it
/// names one, otherwise an `http(s)://` fetch.
fn get_html_content(args: &Args) -> Option<String> {
    match &args.input {
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).ok()?;
            Some(buf)
        }
        Some(input) if Path::new(input).is_file() => fs::read_to_string(input).ok(),
        Some(input) if input.starts_with("http://") || input.starts_with("https://") => {
            let timeout = if args.timeout == 0 { DEFAULT_TIMEOUT } else { args.timeout };
            ureq::get(input)
                .timeout(Duration::from_secs(timeout))
                .call()
                .ok()?
                .into_string()
                .ok()
        }
        Some(_) => None,
    }
}
