//! The rendering engine: a depth-first walk over the parsed DOM that drives
//! the `Canvas`/`Table` machinery.
//!
//! Grounded on `examples/original_source/src/inscriptis/model/html_document_state.py`
//! (engine state shape), `model/tag/a_tag.py`, `br_tag.py`, `img_tag.py`,
//! `list_tag.py` (per-tag handlers) and `model/tag/table_tag.py` (table
//! wiring). To avoid a cyclic reference, `HtmlElement` does not carry a
//! canvas pointer; instead the engine keeps a `canvas_stack` keyed by the
//! tag stack position that only grows at `<table>` and `<td>`/`<th>`.

use std::rc::Rc;

use markup5ever_rcdom::Handle;

use crate::annotation::rules::ApplyAnnotation;
use crate::annotation::Annotation;
use crate::canvas::Canvas;
use crate::config::ParserConfig;
use crate::css::parser::{apply_align_attribute, apply_style_attribute, apply_valign_attribute};
use crate::css::HtmlElement;
use crate::dom;
use crate::html_properties::WhiteSpace;
use crate::table::{Table, TableCell};

/// A handler invoked when a tag is entered, after the attribute handlers and
/// the refinement rule have produced the effective element but before it is
/// registered with the canvas. May further mutate the element (e.g. to set
/// `list_bullet`).
pub type StartHandler = Rc<dyn Fn(&mut Engine, &Handle, &mut HtmlElement)>;

/// A handler invoked when a tag is closed, after the canvas's generic
/// `close_tag` has already run for that element.
pub type EndHandler = Rc<dyn Fn(&mut Engine, &Handle, &HtmlElement)>;

enum ListCounter {
    Bullet(String),
    Numeric(u64),
}

const UL_BULLETS: [&str; 4] = ["* ", "+ ", "o ", "- "];

pub struct Engine<'a> {
    config: &'a ParserConfig,
    css: std::collections::HashMap<String, HtmlElement>,
    attribute_rules: Vec<ApplyAnnotation>,
    canvas_stack: Vec<Canvas>,
    table_stack: Vec<Table>,
    tag_stack: Vec<HtmlElement>,
    list_stack: Vec<ListCounter>,
    link_target_stack: Vec<Option<String>>,
    last_caption: Option<String>,
}

impl<'a> Engine<'a> {
    pub fn new(config: &'a ParserConfig) -> Self {
        let model = config.annotation_model();
        Engine {
            config,
            css: model.css,
            attribute_rules: model.attribute_rules,
            canvas_stack: vec![Canvas::new()],
            table_stack: Vec::new(),
            tag_stack: Vec::new(),
            list_stack: Vec::new(),
            link_target_stack: Vec::new(),
            last_caption: None,
        }
    }

    fn current_canvas(&mut self) -> &mut Canvas {
        self.canvas_stack.last_mut().expect("root canvas is never popped")
    }

    /// Walk `root` (the document node) and return the finished canvas.
    pub fn run(mut self, root: &Handle) -> (String, Vec<Annotation>) {
        self.walk_children(root);
        let mut canvas = self.canvas_stack.pop().expect("root canvas");
        let text = canvas.get_text();
        (text, canvas.annotations)
    }

    fn walk_children(&mut self, node: &Handle) {
        for child in node.children.borrow().iter() {
            self.walk_node(child);
        }
    }

    fn walk_node(&mut self, node: &Handle) {
        if let Some(text) = dom::text_content(node) {
            let tag = self.tag_stack.last().cloned().unwrap_or_default();
            self.current_canvas().write(&tag, &text, None);
            return;
        }

        if dom::is_comment(node) {
            // Comments themselves produce no output; any text that follows
            // them as a sibling is handled by the next iteration of the
            // parent's child loop.
            return;
        }

        let Some(tag_name) = dom::element_tag(node) else {
            // Document, Doctype, processing instructions: recurse for
            // children (the Document node has the <html> element below it)
            // but contribute no content of their own.
            self.walk_children(node);
            return;
        };
        let tag_name = tag_name.into_owned();

        let mut element = self.effective_element(node, &tag_name);
        self.dispatch_start(node, &mut element);
        self.current_canvas().open_tag(&element);
        self.tag_stack.push(element);

        self.walk_children(node);

        let element = self.tag_stack.pop().expect("pushed above");
        self.current_canvas().close_tag(&element);
        self.dispatch_end(node, &element);
    }

    fn effective_element(&mut self, node: &Handle, tag: &str) -> HtmlElement {
        let mut element = self
            .css
            .get(tag)
            .cloned()
            .unwrap_or_else(|| HtmlElement::new(tag));
        element.tag = tag.to_string();

        element = match self.tag_stack.last() {
            Some(parent) => parent.refine(element),
            None => element,
        };

        for (name, value) in dom::attrs(node) {
            match name.as_str() {
                "style" => element = apply_style_attribute(&value, &element),
                "align" => apply_align_attribute(&value, &mut element),
                "valign" => apply_valign_attribute(&value, &mut element),
                _ => {}
            }
            for rule in &self.attribute_rules {
                if rule.attr == name {
                    rule.apply(&value, &mut element);
                }
            }
        }

        element
    }

    fn dispatch_start(&mut self, node: &Handle, element: &mut HtmlElement) {
        if let Some(handler) = self.config.custom_start_handler(&element.tag) {
            handler(self, node, element);
            return;
        }
        match element.tag.as_str() {
            "a" => self.start_a(node, element),
            "br" => {}
            "img" => self.start_img(node, element),
            "ul" => self.start_ul(),
            "ol" => self.start_ol(node),
            "li" => self.start_li(node, element),
            "table" => self.start_table(element),
            "tr" => self.start_tr(),
            "td" | "th" => self.start_td(element),
            _ => {}
        }
    }

    fn dispatch_end(&mut self, node: &Handle, element: &HtmlElement) {
        if let Some(handler) = self.config.custom_end_handler(&element.tag) {
            handler(self, node, element);
            return;
        }
        match element.tag.as_str() {
            "a" => self.end_a(),
            "br" => self.current_canvas().write_newline(),
            "ul" | "ol" => {
                self.list_stack.pop();
            }
            "td" | "th" => self.end_td(element),
            "table" => self.end_table(element),
            _ => {}
        }
    }

    fn start_a(&mut self, node: &Handle, element: &HtmlElement) {
        if !self.config.display_links && !self.config.display_anchors {
            self.link_target_stack.push(None);
            return;
        }
        let mut target = if self.config.display_links {
            dom::attr(node, "href").unwrap_or_default()
        } else {
            String::new()
        };
        if target.is_empty() && self.config.display_anchors {
            target = dom::attr(node, "name").unwrap_or_default();
        }
        if !target.is_empty() {
            self.current_canvas().write(element, "[", None);
        }
        self.link_target_stack.push(if target.is_empty() { None } else { Some(target) });
    }

    fn end_a(&mut self) {
        if let Some(Some(target)) = self.link_target_stack.pop() {
            let tag = self.tag_stack.last().cloned().unwrap_or_default();
            self.current_canvas().write(&tag, &format!("]({target})"), None);
        }
    }

    fn start_img(&mut self, node: &Handle, element: &HtmlElement) {
        if !self.config.display_images {
            return;
        }
        let caption = dom::attr(node, "alt")
            .filter(|v| !v.is_empty())
            .or_else(|| dom::attr(node, "title"))
            .unwrap_or_default();
        if caption.is_empty() {
            return;
        }
        if self.config.deduplicate_captions && self.last_caption.as_deref() == Some(caption.as_str()) {
            return;
        }
        self.current_canvas().write(element, &format!("[{caption}]"), None);
        self.last_caption = Some(caption);
    }

    fn start_ul(&mut self) {
        let depth = self.list_stack.len();
        self.list_stack.push(ListCounter::Bullet(UL_BULLETS[depth % UL_BULLETS.len()].to_string()));
    }

    fn start_ol(&mut self, node: &Handle) {
        let start = dom::attr(node, "start").and_then(|v| v.parse().ok()).unwrap_or(1);
        self.list_stack.push(ListCounter::Numeric(start));
    }

    fn start_li(&mut self, node: &Handle, element: &mut HtmlElement) {
        let Some(counter) = self.list_stack.last_mut() else {
            return;
        };
        match counter {
            ListCounter::Numeric(n) => {
                if let Some(value) = dom::attr(node, "value").and_then(|v| v.parse::<u64>().ok()) {
                    *n = value;
                }
                element.list_bullet = format!("{n}. ");
                *n += 1;
            }
            ListCounter::Bullet(bullet) => {
                element.list_bullet = bullet.clone();
            }
        }
    }

    fn start_table(&mut self, element: &HtmlElement) {
        let left_margin_len = self.current_canvas().left_margin();
        self.canvas_stack.push(Canvas::new());
        self.table_stack
            .push(Table::new(left_margin_len, self.config.table_cell_separator.clone()));
        let _ = element;
    }

    fn start_tr(&mut self) {
        if let Some(table) = self.table_stack.last_mut() {
            table.add_row();
        }
    }

    fn start_td(&mut self, element: &HtmlElement) {
        if self.table_stack.is_empty() {
            return;
        }
        let _ = element;
        self.canvas_stack.push(Canvas::new());
    }

    fn end_td(&mut self, element: &HtmlElement) {
        if self.table_stack.is_empty() {
            return;
        }
        let cell_canvas = self.canvas_stack.pop().expect("pushed in start_td");
        let mut cell = TableCell::new(element.align, element.valign);
        cell.canvas = cell_canvas;
        self.table_stack.last_mut().expect("checked above").add_cell(cell);
    }

    fn end_table(&mut self, element: &HtmlElement) {
        if self.table_stack.is_empty() {
            return;
        }
        // A missing `</td>`/`</tr>` never reaches this point: html5ever's
        // HTML5 tree construction already inserts the implied end tags for
        // table content, so every `<td>`/`<th>` push here is already
        // matched by a pop.
        let mut table_level_canvas = self.canvas_stack.pop().expect("pushed in start_table");
        let mut table = self.table_stack.pop().expect("pushed in start_table");

        let out_of_table_text = table_level_canvas.get_text().trim().to_string();
        if !out_of_table_text.is_empty() {
            let plain = HtmlElement::new("default");
            self.current_canvas().write(&plain, &out_of_table_text, None);
            self.current_canvas().write_newline();
        }

        let start_idx = self.current_canvas().current_idx();
        // `Table::render` terminates every line, including the last, with
        // '\n'; that trailing newline is an artifact of its per-row loop and
        // would otherwise leave a dangling blank line in the outer canvas.
        let rendered = table.get_text();
        let plain = HtmlElement::new("default");
        self.current_canvas()
            .write(&plain, rendered.trim_end_matches('\n'), Some(WhiteSpace::Pre));
        self.current_canvas().flush_inline();
        let end_idx = self.current_canvas().current_idx();

        for label in &element.annotation {
            self.current_canvas()
                .annotations
                .push(Annotation::new(start_idx, end_idx, label.clone()));
        }

        let left_margin_len = table.left_margin_len;
        for annotation in table.get_annotations(0) {
            let start = start_idx + reindent_offset(&rendered, annotation.start, left_margin_len);
            let end = start_idx + reindent_offset(&rendered, annotation.end, left_margin_len);
            self.current_canvas()
                .annotations
                .push(Annotation::new(start, end, annotation.label));
        }
    }
}

/// Translate a character offset into `table_text` (before it was reindented
/// by `merge_pre_text`) to its offset once embedded in the outer canvas:
/// every `'\n'` preceding `local_pos` picked up `left_margin_len` extra
/// characters of continuation-line padding.
fn reindent_offset(table_text: &str, local_pos: usize, left_margin_len: usize) -> usize {
    let newlines_before = table_text.chars().take(local_pos).filter(|&c| c == '\n').count();
    local_pos + newlines_before * left_margin_len
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(html: &str, config: &ParserConfig) -> (String, Vec<Annotation>) {
        let root = dom::parse_html(html);
        Engine::new(config).run(&root)
    }

    #[test]
    fn simple_paragraph_renders_with_margins() {
        let config = ParserConfig::default();
        let (text, _) = render("<p>Hello</p><p>World</p>", &config);
        assert_eq!(text, "Hello\n\nWorld");
    }

    #[test]
    fn br_inserts_a_line_break() {
        let config = ParserConfig::default();
        let (text, _) = render("<p>Hello<br/>World</p>", &config);
        assert_eq!(text, "Hello\nWorld");
    }

    #[test]
    fn link_target_is_written_when_display_links_enabled() {
        let mut config = ParserConfig::default();
        config.display_links = true;
        let (text, _) = render(r#"<a href="http://x">click</a>"#, &config);
        assert_eq!(text, "[click](http://x)");
    }

    #[test]
    fn link_without_display_links_renders_plain_text() {
        let config = ParserConfig::default();
        let (text, _) = render(r#"<a href="http://x">click</a>"#, &config);
        assert_eq!(text, "click");
    }

    #[test]
    fn image_caption_is_rendered_when_display_images_enabled() {
        let mut config = ParserConfig::default();
        config.display_images = true;
        let (text, _) = render(r#"<img alt="a cat"/>"#, &config);
        assert_eq!(text, "[a cat]");
    }

    #[test]
    fn duplicate_captions_are_suppressed_when_deduplicating() {
        let mut config = ParserConfig::default();
        config.display_images = true;
        config.deduplicate_captions = true;
        let (text, _) = render(r#"<img alt="x"/><img alt="x"/>"#, &config);
        assert_eq!(text, "[x]");
    }

    #[test]
    fn nested_unordered_lists_cycle_bullets_by_depth() {
        let config = ParserConfig::default();
        let (text, _) = render(
            "<ul><li>one<ul><li>two<ul><li>three<ul><li>four<ul><li>five</li></ul></li></ul></li></ul></li></ul></li></ul>",
            &config,
        );
        let bullets: Vec<&str> = text.lines().map(|l| &l[..2]).collect();
        assert_eq!(bullets, vec!["* ", "+ ", "o ", "- ", "* "]);
    }

    #[test]
    fn ordered_list_numbers_items_and_increments() {
        let config = ParserConfig::default();
        let (text, _) = render("<ol><li>a</li><li>b</li></ol>", &config);
        assert_eq!(text, "1. a\n2. b");
    }

    #[test]
    fn ol_start_attribute_offsets_the_first_item() {
        let config = ParserConfig::default();
        let (text, _) = render(r#"<ol start="5"><li>a</li><li>b</li></ol>"#, &config);
        assert_eq!(text, "5. a\n6. b");
    }

    #[test]
    fn li_value_attribute_overrides_the_running_counter() {
        let config = ParserConfig::default();
        let (text, _) = render(r#"<ol><li value="2">a</li><li>b</li></ol>"#, &config);
        assert_eq!(text, "2. a\n3. b");
    }

    #[test]
    fn empty_list_item_still_emits_its_bullet() {
        let config = ParserConfig::default();
        let (text, _) = render("<ul><li></li><li>x</li></ul>", &config);
        // The unconsumed bullet is pushed verbatim (with its trailing
        // space), unlike a written block's content which gets trimmed.
        assert_eq!(text, "* \n* x");
    }

    #[test]
    fn q_tag_wraps_its_content_in_quote_marks() {
        let config = ParserConfig::default();
        let (text, _) = render("<q>to be or not to be</q>", &config);
        assert_eq!(text, "\"to be or not to be\"");
    }

    #[test]
    fn relaxed_span_pads_to_avoid_sticking_to_neighbouring_words() {
        let config = ParserConfig::default();
        let (text, _) = render("<p>a<span>b</span>c</p>", &config);
        assert_eq!(text, "a b c");
    }

    #[test]
    fn simple_table_lays_out_columns() {
        let config = ParserConfig::default();
        let (text, _) = render(
            "<table><tr><td>Hallo</td><td>Echo</td></tr><tr><td>Eins</td><td>Zwei</td></tr></table>",
            &config,
        );
        assert_eq!(text, "Hallo  Echo\nEins   Zwei");
    }

    #[test]
    fn annotation_rule_produces_a_span_around_rendered_text() {
        let mut config = ParserConfig::default();
        config.annotation_rules.insert("h1".to_string(), vec!["heading".to_string()]);
        let (text, annotations) = render("<h1>Title</h1>", &config);
        assert_eq!(annotations.len(), 1);
        assert_eq!(&text[annotations[0].start..annotations[0].end], "Title");
        assert_eq!(annotations[0].label, "heading");
    }

    #[test]
    fn comment_is_skipped_but_tail_text_survives() {
        let config = ParserConfig::default();
        let (text, _) = render("<p>a<!-- skip me -->b</p>", &config);
        assert_eq!(text, "ab");
    }

    #[test]
    fn missing_closing_tags_inside_a_table_are_tolerated() {
        let config = ParserConfig::default();
        // html5ever's HTML5 tree construction auto-closes the dangling
        // <td>/<tr> before the engine ever sees this tree, so malformed
        // table markup is tolerated at the parser layer.
        let (text, _) = render("<table><tr><td>a<td>b</table>", &config);
        assert!(text.contains('a') && text.contains('b'));
    }
}
