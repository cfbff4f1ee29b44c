//! `Block`: one logical output line and its whitespace-collapsing rules.
//!
//! Grounded on `examples/original_source/src/inscriptis/model/canvas/block.py`.
//! `Prefix` is shared across the `Block`s of one canvas (pushes/pops during
//! traversal must be visible to whichever `Block` is currently being written
//! into), so it is held behind `Rc<RefCell<_>>` rather than by value.

use std::cell::RefCell;
use std::rc::Rc;

use crate::canvas::prefix::Prefix;
use crate::html_properties::WhiteSpace;

pub type SharedPrefix = Rc<RefCell<Prefix>>;

#[derive(Debug)]
pub struct Block {
    pub idx: usize,
    prefix: SharedPrefix,
    raw_content: String,
    collapsable_whitespace: bool,
}

impl Block {
    pub fn new(idx: usize, prefix: SharedPrefix) -> Self {
        Block {
            idx,
            prefix,
            raw_content: String::new(),
            collapsable_whitespace: true,
        }
    }

    pub fn merge(&mut self, text: &str, whitespace: WhiteSpace) {
        match whitespace {
            WhiteSpace::Pre => self.merge_pre_text(text),
            WhiteSpace::Normal => self.merge_normal_text(text),
        }
    }

    /// Collapse runs of whitespace into single spaces, honoring the
    /// cross-call `collapsable_whitespace` flag so `"a "` followed by
    /// `" b"` still collapses to `"a b"`.
    pub fn merge_normal_text(&mut self, text: &str) {
        let mut normalized = String::new();
        for ch in text.chars() {
            if !ch.is_whitespace() {
                normalized.push(ch);
                self.collapsable_whitespace = false;
            } else if !self.collapsable_whitespace {
                normalized.push(' ');
                self.collapsable_whitespace = true;
            }
        }

        if normalized.is_empty() {
            return;
        }

        let text = if self.raw_content.is_empty() {
            format!("{}{}", self.prefix.borrow_mut().first(), normalized)
        } else {
            normalized
        };
        let text = unescape_entities(&text);
        self.idx += text.chars().count();
        self.raw_content.push_str(&text);
    }

    /// Write pre-formatted text verbatim, reindenting continuation lines
    /// with `Prefix::rest`.
    pub fn merge_pre_text(&mut self, text: &str) {
        let first = self.prefix.borrow_mut().first();
        let rest = self.prefix.borrow().rest();
        let reindented = text.replace('\n', &format!("\n{rest}"));
        let text = unescape_entities(&format!("{first}{reindented}"));
        self.idx += text.chars().count();
        self.raw_content.push_str(&text);
        self.collapsable_whitespace = false;
    }

    pub fn is_empty(&mut self) -> bool {
        self.content().is_empty()
    }

    /// The block's rendered content. If the last appended character is a
    /// collapsable space, it is trimmed here (and `idx` decremented) — the
    /// contract that guarantees lines never end with whitespace introduced
    /// by collapsing (invariant I2). Idempotent: a second call is a no-op.
    pub fn content(&mut self) -> String {
        if self.collapsable_whitespace && self.raw_content.ends_with(' ') {
            self.raw_content.pop();
            self.idx -= 1;
        }
        self.raw_content.clone()
    }

    /// Start a new block sharing this one's `Prefix`, positioned one past
    /// this block's current index (reserving a slot for the pending newline
    /// between blocks).
    pub fn new_block(&mut self) -> Block {
        self.prefix.borrow_mut().start_new_block();
        Block::new(self.idx + 1, Rc::clone(&self.prefix))
    }

    /// A handle to this block's shared `Prefix`, for callers (the `Canvas`)
    /// that need to register/pop frames outside of text merges.
    pub fn prefix_handle(&self) -> SharedPrefix {
        Rc::clone(&self.prefix)
    }
}

/// Decode the small set of HTML character references that can still appear
/// in text reaching a `Block` (the DOM adapter already decodes entities in
/// ordinary text nodes; this guards callers who construct text directly).
pub fn unescape_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    let bytes = text.as_bytes();
    while i < bytes.len() {
        if bytes[i] == b'&' {
            if let Some(end) = text[i..].find(';').map(|p| p + i) {
                let entity = &text[i + 1..end];
                if let Some(decoded) = decode_entity(entity) {
                    out.push(decoded);
                    i = end + 1;
                    continue;
                }
            }
        }
        let ch = text[i..].chars().next().unwrap();
        out.push(ch);
        i += ch.len_utf8();
    }
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                None
            }
        }
    }
}
