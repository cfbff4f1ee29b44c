//! Regression bank of paired `.html`/`.txt` fixtures for the strict
//! profile, and paired `.html`/`.json` fixtures for rule-driven
//! annotations.

use std::fs;
use std::path::Path;

use inscriptis::annotation::Annotation;
use inscriptis::css::profiles::named_profile;
use inscriptis::{get_annotated_text, get_text, ParserConfig};
use serde_json::Value;

#[test]
fn strict_profile_corpus_matches_expected_text() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/strict");
    let mut checked = 0;
    for entry in fs::read_dir(&dir).expect("fixtures/strict exists") {
        let path = entry.expect("readable dir entry").path();
        if path.extension().and_then(|e| e.to_str()) != Some("html") {
            continue;
        }
        let html = fs::read_to_string(&path).expect("read fixture html");
        let expected = fs::read_to_string(path.with_extension("txt")).expect("matching .txt fixture");

        let mut config = ParserConfig::new();
        config.css = Some(named_profile("strict").expect("strict profile registered").clone());

        let actual = get_text(html.trim_end(), Some(&config));
        assert_eq!(
            actual,
            expected.trim_end(),
            "fixture {:?} did not match",
            path.file_name().unwrap()
        );
        checked += 1;
    }
    assert!(checked > 0, "expected at least one strict fixture pair");
}

#[test]
fn rule_driven_annotation_corpus_matches_expected_spans() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/rules");
    let mut checked = 0;
    for entry in fs::read_dir(&dir).expect("fixtures/rules exists") {
        let path = entry.expect("readable dir entry").path();
        if path.extension().and_then(|e| e.to_str()) != Some("html") {
            continue;
        }
        let html = fs::read_to_string(&path).expect("read fixture html");
        let spec: Value = serde_json::from_str(
            &fs::read_to_string(path.with_extension("json")).expect("matching .json fixture"),
        )
        .expect("valid json fixture");

        let mut config = ParserConfig::new();
        for (tag, labels) in spec["rules"].as_object().expect("rules object") {
            let labels: Vec<String> = labels
                .as_array()
                .expect("label array")
                .iter()
                .map(|l| l.as_str().unwrap().to_string())
                .collect();
            config.annotation_rules.insert(tag.clone(), labels);
        }

        let annotated = get_annotated_text(html.trim_end(), Some(&config));
        assert_eq!(annotated.text, spec["text"].as_str().expect("expected text"));

        let expected_annotations: Vec<Annotation> = spec["annotations"]
            .as_array()
            .expect("annotations array")
            .iter()
            .map(|a| {
                let a = a.as_array().expect("annotation triple");
                Annotation {
                    start: a[0].as_u64().unwrap() as usize,
                    end: a[1].as_u64().unwrap() as usize,
                    label: a[2].as_str().unwrap().to_string(),
                }
            })
            .collect();
        assert_eq!(annotated.label, expected_annotations);
        checked += 1;
    }
    assert!(checked > 0, "expected at least one rule fixture pair");
}
