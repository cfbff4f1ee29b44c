//! Table layout: `TableCell`/`TableRow`/`Table`, width/height equalization,
//! and the post-hoc translation of in-cell annotation offsets into the
//! outer canvas's coordinate space.
//!
//! Grounded on `examples/original_source/src/inscriptis/model/table.py` (the
//! width/height equalization algorithm) and
//! `examples/original_source/src/inscriptis/model/tag/table_tag.py` (how the
//! engine wires cells into the outer canvas and splices annotations back).

use crate::annotation::{horizontal_shift, Annotation};
use crate::canvas::Canvas;
use crate::html_properties::{HorizontalAlignment, VerticalAlignment};

pub struct TableCell {
    pub canvas: Canvas,
    pub align: HorizontalAlignment,
    pub valign: VerticalAlignment,
    /// Formatted column width, set by [`Table::equalize`].
    pub width: Option<usize>,
    /// Per-line pre-padding, pre-format width, aligned with `lines`.
    line_width: Vec<usize>,
    /// The cell's content, one entry per output line, before vertical
    /// padding and horizontal width formatting are applied.
    lines: Vec<String>,
    /// Blank lines prepended above `lines` by vertical alignment (`bottom`
    /// prepends the whole delta, `middle` prepends half).
    vertical_padding_before: usize,
    /// The annotations recorded against this cell's own canvas, in the
    /// cell's local coordinate space (character offsets into the
    /// unpadded, newline-joined `lines`).
    local_annotations: Vec<Annotation>,
}

impl TableCell {
    pub fn new(align: HorizontalAlignment, valign: VerticalAlignment) -> Self {
        TableCell {
            canvas: Canvas::new(),
            align,
            valign,
            width: None,
            line_width: Vec::new(),
            lines: Vec::new(),
            vertical_padding_before: 0,
            local_annotations: Vec::new(),
        }
    }

    /// Flush the cell's canvas and split every resulting block on internal
    /// newlines into individual one-line entries (a cell's pre-formatted
    /// text may itself contain `'\n'`). An empty cell becomes `[""]`.
    fn normalize(&mut self) {
        self.local_annotations = self.canvas.annotations.clone();
        let text = self.canvas.get_text();
        self.lines = if text.is_empty() {
            vec![String::new()]
        } else {
            text.split('\n').map(str::to_string).collect()
        };
        self.line_width = self.lines.iter().map(|l| l.chars().count()).collect();
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    fn pad_to_height(&mut self, row_height: usize) {
        let delta = row_height.saturating_sub(self.lines.len());
        if delta == 0 {
            return;
        }
        match self.valign {
            VerticalAlignment::Top => {
                self.lines.extend(std::iter::repeat(String::new()).take(delta));
            }
            VerticalAlignment::Bottom => {
                self.vertical_padding_before = delta;
                let mut padded = vec![String::new(); delta];
                padded.append(&mut self.lines);
                self.lines = padded;
            }
            VerticalAlignment::Middle => {
                let before = delta / 2;
                let after = delta - before;
                self.vertical_padding_before = before;
                let mut padded = vec![String::new(); before];
                padded.append(&mut self.lines);
                padded.extend(std::iter::repeat(String::new()).take(after));
                self.lines = padded;
            }
        }
    }

    fn content_width(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0)
    }

    /// Format every line to `width` using this cell's horizontal alignment.
    fn format_to_width(&mut self, width: usize) {
        self.width = Some(width);
        for line in &mut self.lines {
            let pad = width.saturating_sub(line.chars().count());
            *line = match self.align {
                HorizontalAlignment::Left => format!("{line}{}", " ".repeat(pad)),
                HorizontalAlignment::Right => format!("{}{line}", " ".repeat(pad)),
                HorizontalAlignment::Center => {
                    let left = pad / 2;
                    let right = pad - left;
                    format!("{}{line}{}", " ".repeat(left), " ".repeat(right))
                }
            };
        }
    }
}

#[derive(Default)]
pub struct TableRow {
    pub columns: Vec<TableCell>,
}

pub struct Table {
    pub rows: Vec<TableRow>,
    pub left_margin_len: usize,
    pub cell_separator: String,
}

impl Table {
    pub fn new(left_margin_len: usize, cell_separator: impl Into<String>) -> Self {
        Table {
            rows: Vec::new(),
            left_margin_len,
            cell_separator: cell_separator.into(),
        }
    }

    pub fn add_row(&mut self) {
        self.rows.push(TableRow::default());
    }

    pub fn add_cell(&mut self, cell: TableCell) {
        if self.rows.is_empty() {
            self.add_row();
        }
        self.rows.last_mut().unwrap().columns.push(cell);
    }

    /// Normalize every cell, equalize row heights (respecting vertical
    /// alignment), then equalize column widths (respecting horizontal
    /// alignment). Must run once, before [`Table::render`].
    fn equalize(&mut self) {
        for row in &mut self.rows {
            for cell in &mut row.columns {
                cell.normalize();
            }
            let row_height = row.columns.iter().map(TableCell::height).max().unwrap_or(1);
            for cell in &mut row.columns {
                cell.pad_to_height(row_height);
            }
        }

        let max_columns = self.rows.iter().map(|r| r.columns.len()).max().unwrap_or(0);
        for column_idx in 0..max_columns {
            let width = self
                .rows
                .iter()
                .filter_map(|r| r.columns.get(column_idx))
                .map(TableCell::content_width)
                .max()
                .unwrap_or(0);
            for row in &mut self.rows {
                if let Some(cell) = row.columns.get_mut(column_idx) {
                    cell.format_to_width(width);
                }
            }
        }
    }

    fn row_width(row: &TableRow, separator_len: usize) -> usize {
        let cells: usize = row.columns.iter().map(|c| c.width.unwrap_or(0)).sum();
        let seps = row.columns.len().saturating_sub(1) * separator_len;
        cells + seps
    }

    /// Render the table text: `cell_separator`-joined columns per line,
    /// newline-joined rows, with a trailing newline. Also returns, per row,
    /// the character offset (within the returned string) at which that
    /// row's first line begins — used by [`Table::splice_annotations`].
    fn render(&mut self) -> (String, Vec<usize>) {
        self.equalize();

        let mut out = String::new();
        let mut row_offsets = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            row_offsets.push(out.chars().count());
            let row_height = row.columns.iter().map(TableCell::height).max().unwrap_or(0);
            for line_idx in 0..row_height {
                let line = row
                    .columns
                    .iter()
                    .map(|c| c.lines.get(line_idx).map(String::as_str).unwrap_or(""))
                    .collect::<Vec<_>>()
                    .join(&self.cell_separator);
                out.push_str(&line);
                out.push('\n');
            }
        }
        (out, row_offsets)
    }

    /// The full rendered table text.
    pub fn get_text(&mut self) -> String {
        self.render().0
    }

    /// Translate every cell-local annotation into the outer canvas's
    /// coordinate space. `outer_start` is the character index in the outer
    /// canvas at which this table's text begins.
    pub fn get_annotations(&mut self, outer_start: usize) -> Vec<Annotation> {
        let (_, row_offsets) = self.render();
        let sep_len = self.cell_separator.chars().count();
        let mut result = Vec::new();

        for (row, row_offset) in self.rows.iter().zip(row_offsets.iter()) {
            let row_width = Self::row_width(row, sep_len);
            let mut column_offset = 0usize;
            for cell in &row.columns {
                let width = cell.width.unwrap_or(0);
                for annotation in &cell.local_annotations {
                    result.extend(Self::shift_cell_annotation(
                        annotation,
                        cell,
                        width,
                        row_width,
                        *row_offset,
                        column_offset,
                        outer_start,
                    ));
                }
                column_offset += width + sep_len;
            }
        }
        result
    }

    fn shift_cell_annotation(
        annotation: &Annotation,
        cell: &TableCell,
        width: usize,
        row_width: usize,
        row_offset: usize,
        column_offset: usize,
        outer_start: usize,
    ) -> Vec<Annotation> {
        // Locate the original (pre-padding) line the annotation's start
        // falls on, via the cumulative sums of the cell's original line
        // widths (each line consumed one trailing '\n' in the flattened
        // cell text except the last).
        let (line_idx, line_start) = Self::locate_line(&cell.line_width, annotation.start);
        let content_width = cell.line_width.get(line_idx).copied().unwrap_or(0);

        let local = Annotation::new(
            annotation.start - line_start,
            annotation.end - line_start,
            annotation.label.clone(),
        );
        let shifted = horizontal_shift(&[local], content_width, width, cell.align, 0);

        let final_line_idx = line_idx + cell.vertical_padding_before;
        let base = outer_start + row_offset + final_line_idx * (row_width + 1) + column_offset;
        shifted
            .into_iter()
            .map(|a| Annotation::new(base + a.start, base + a.end, a.label))
            .collect()
    }

    /// Returns `(line_index, offset-of-that-line's-first-char)` for a
    /// character offset into the newline-joined original cell lines.
    fn locate_line(line_widths: &[usize], offset: usize) -> (usize, usize) {
        let mut cumulative = 0usize;
        for (idx, &width) in line_widths.iter().enumerate() {
            let line_end = cumulative + width;
            if offset <= line_end {
                return (idx, cumulative);
            }
            cumulative = line_end + 1; // the '\n' joining this line to the next
        }
        (line_widths.len().saturating_sub(1), cumulative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::HtmlElement;

    fn write_line(cell: &mut TableCell, text: &str) {
        let el = HtmlElement::new("td");
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            cell.canvas.write(&el, first, None);
        }
        for line in lines {
            cell.canvas.write_newline();
            cell.canvas.write(&el, line, None);
        }
    }

    #[test]
    fn two_by_two_table_aligns_columns() {
        let mut table = Table::new(0, "  ");
        table.add_row();
        let mut c1 = TableCell::new(HorizontalAlignment::Left, VerticalAlignment::Top);
        write_line(&mut c1, "Hallo\nEins");
        let mut c2 = TableCell::new(HorizontalAlignment::Left, VerticalAlignment::Top);
        write_line(&mut c2, "Echo\nZwei");
        table.add_cell(c1);
        table.add_cell(c2);

        let text = table.get_text();
        assert_eq!(text, "Hallo  Echo\nEins   Zwei\n");
    }

    #[test]
    fn custom_cell_separator_is_used() {
        let mut table = Table::new(0, "\t");
        table.add_row();
        let mut c1 = TableCell::new(HorizontalAlignment::Left, VerticalAlignment::Top);
        write_line(&mut c1, "a");
        let mut c2 = TableCell::new(HorizontalAlignment::Left, VerticalAlignment::Top);
        write_line(&mut c2, "b");
        table.add_cell(c1);
        table.add_cell(c2);

        assert_eq!(table.get_text(), "a\tb\n");
    }

    #[test]
    fn short_row_columns_pad_with_spaces() {
        let mut table = Table::new(0, "  ");
        table.add_row();
        let mut c1 = TableCell::new(HorizontalAlignment::Left, VerticalAlignment::Top);
        write_line(&mut c1, "x");
        table.add_cell(c1);
        table.add_row();
        let mut c2 = TableCell::new(HorizontalAlignment::Left, VerticalAlignment::Top);
        write_line(&mut c2, "longer");
        table.add_cell(c2);

        let text = table.get_text();
        assert_eq!(text, "x     \nlonger\n");
    }

    #[test]
    fn annotation_inside_a_left_aligned_cell_shifts_by_row_geometry() {
        let mut table = Table::new(0, "  ");
        table.add_row();
        let mut c1 = TableCell::new(HorizontalAlignment::Left, VerticalAlignment::Top);
        let el = HtmlElement::new("b");
        c1.canvas.write(&el, "hi", None);
        c1.canvas.annotations.push(Annotation::new(0, 2, "bold"));
        let mut c2 = TableCell::new(HorizontalAlignment::Left, VerticalAlignment::Top);
        write_line(&mut c2, "world!");
        table.add_cell(c1);
        table.add_cell(c2);

        let text = table.get_text();
        let annotations = table.get_annotations(0);
        assert_eq!(annotations.len(), 1);
        let a = &annotations[0];
        assert_eq!(&text[a.start..a.end], "hi");
    }
}
