//! `Canvas`: the ordered list of completed blocks plus the current `Block`,
//! margin-collapsing, and the annotation list.
//!
//! Grounded on `examples/original_source/src/inscriptis/model/canvas/__init__.py`.

pub mod block;
pub mod prefix;

use std::cell::RefCell;
use std::rc::Rc;

use crate::annotation::Annotation;
use crate::css::HtmlElement;
use crate::html_properties::{Display, WhiteSpace};

use block::Block;
use prefix::Prefix;

#[derive(Debug)]
pub struct Canvas {
    blocks: Vec<String>,
    current_block: Block,
    /// Blank lines pending before the next non-empty block. Starts at
    /// `usize::MAX` so no leading blank lines ever appear before the first
    /// block of a document.
    margin: usize,
    pub annotations: Vec<Annotation>,
    open_annotations: Vec<(String, usize)>,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        let prefix = Rc::new(RefCell::new(Prefix::new()));
        Canvas {
            blocks: Vec::new(),
            current_block: Block::new(0, prefix),
            margin: usize::MAX,
            annotations: Vec::new(),
            open_annotations: Vec::new(),
        }
    }

    pub fn current_idx(&self) -> usize {
        self.current_block.idx
    }

    fn prefix(&self) -> Rc<RefCell<Prefix>> {
        self.current_block.prefix_handle()
    }

    /// Record the annotation start index (if any) and open the block, if
    /// the tag is block-level.
    pub fn open_tag(&mut self, tag: &HtmlElement) {
        if !tag.annotation.is_empty() {
            self.open_annotations
                .push((tag.tag.clone(), self.current_block.idx));
        }
        if tag.display == Display::Block {
            self.open_block(tag);
        }
    }

    pub fn open_block(&mut self, tag: &HtmlElement) {
        let flushed = self.flush_inline();
        if !flushed && !tag.list_bullet.is_empty() {
            self.write_unconsumed_bullet();
        }
        self.prefix()
            .borrow_mut()
            .register_prefix(tag.padding_inline, &tag.list_bullet);

        let required_margin = tag.previous_margin_after.max(tag.margin_before);
        self.require_margin(required_margin);
    }

    /// Push `required - margin` blank lines directly onto the completed
    /// blocks list (as `'\n' * (required - margin - 1)`, the `-1` accounting
    /// for the `'\n'` the final `blocks.join('\n')` supplies) without
    /// starting a new `Block` — the current block is left untouched, only
    /// its `idx` advances.
    fn require_margin(&mut self, required: usize) {
        if required > self.margin {
            let gap = required - self.margin;
            self.current_block.idx += gap;
            self.blocks.push("\n".repeat(gap.saturating_sub(1)));
            self.margin = required;
        }
    }

    /// Flush any bullet registered but never emitted (an empty `<li></li>`)
    /// as its own completed block, then start a fresh current block.
    fn write_unconsumed_bullet(&mut self) {
        if let Some(bullet) = self.prefix().borrow_mut().unconsumed_bullet() {
            self.current_block.idx += bullet.chars().count();
            self.blocks.push(bullet);
            self.current_block = self.current_block.new_block();
            self.margin = 0;
        }
    }

    /// Write `text` through the current block, honoring `whitespace` if
    /// given, else `tag.whitespace`.
    /// Writes `text` through `tag`, wrapping it in `tag.prefix`/`tag.suffix`
    /// (quote marks for `q`, padding for a relaxed-profile `span`) the way
    /// `HtmlElement.write` does in the original.
    pub fn write(&mut self, tag: &HtmlElement, text: &str, whitespace: Option<WhiteSpace>) {
        if text.is_empty() {
            return;
        }
        let effective = whitespace.unwrap_or_else(|| tag.whitespace_or_normal());
        if tag.prefix.is_empty() && tag.suffix.is_empty() {
            self.current_block.merge(text, effective);
        } else {
            self.current_block
                .merge(&format!("{}{}{}", tag.prefix, text, tag.suffix), effective);
        }
    }

    pub fn close_tag(&mut self, tag: &HtmlElement) {
        if tag.display == Display::Block {
            let flushed = self.flush_inline();
            if !flushed && !tag.list_bullet.is_empty() {
                self.write_unconsumed_bullet();
            }
            self.prefix().borrow_mut().remove_last_prefix();
            self.close_block(tag);
        }

        if let Some(pos) = self.open_annotations.iter().rposition(|(t, _)| t == &tag.tag) {
            let (_, start) = self.open_annotations.remove(pos);
            let end = self.current_block.idx;
            if start != end {
                for label in &tag.annotation {
                    self.annotations.push(Annotation::new(start, end, label.clone()));
                }
            }
        }
    }

    pub fn close_block(&mut self, tag: &HtmlElement) {
        self.require_margin(tag.margin_after);
    }

    pub fn write_newline(&mut self) {
        if !self.flush_inline() {
            self.current_block.idx += 1;
            self.blocks.push(String::new());
            self.current_block = self.current_block.new_block();
        }
    }

    /// Close the current block (if non-empty) onto the completed-blocks
    /// list and start a fresh one. Returns whether anything was flushed.
    pub fn flush_inline(&mut self) -> bool {
        if self.current_block.is_empty() {
            return false;
        }
        let content = self.current_block.content();
        self.blocks.push(content);
        self.current_block = self.current_block.new_block();
        self.margin = 0;
        true
    }

    pub fn get_text(&mut self) -> String {
        self.flush_inline();
        self.blocks.join("\n")
    }

    pub fn left_margin(&self) -> usize {
        self.prefix().borrow().current_padding()
    }
}
