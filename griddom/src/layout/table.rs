use super::flow::{intrinsic_width, layout_children, sum_widths, text_width, zero_subtree};
use super::{LayoutResult, Rect, TextMetrics};
use crate::element::{Content, Element};
use crate::text::collapse_whitespace;
use crate::types::Tag;

/// Resolved column geometry of a table.
struct Columns {
    widths: Vec<i32>,
    /// x offset of each column relative to the table's left edge.
    offsets: Vec<i32>,
}

impl Columns {
    fn total(&self) -> i32 {
        sum_widths(self.widths.iter().copied())
    }

    fn span_width(&self, start: usize, span: usize) -> i32 {
        let end = start.saturating_add(span).min(self.widths.len());
        self.widths
            .get(start..end)
            .map_or(0, |w| sum_widths(w.iter().copied()))
    }
}

fn col_elements(table: &Element) -> Vec<&Element> {
    table
        .child_elements()
        .iter()
        .filter(|c| c.tag == Tag::Colgroup)
        .flat_map(|g| g.child_elements().iter().filter(|c| c.tag == Tag::Col))
        .collect()
}

fn displayed_cells(row: &Element) -> impl Iterator<Item = &Element> {
    row.child_elements()
        .iter()
        .filter(|c| c.tag.is_cell() && c.style.is_displayed())
}

fn cell_width(cell: &Element, metrics: &TextMetrics) -> i32 {
    if let Some(width) = cell.style.width {
        return width.max(0);
    }
    let content = match &cell.content {
        Content::None => 0,
        Content::Text(text) => text_width(&collapse_whitespace(text), metrics),
        Content::Children(children) => {
            sum_widths(children.iter().map(|c| intrinsic_width(c, metrics)))
        }
    };
    content.saturating_add(2 * metrics.cell_padding)
}

/// Resolve column widths. A `<col>` with an explicit width fixes its
/// column; other columns take the widest single-span cell among the rows
/// that are displayed. Spanning cells widen the last column they cover.
fn resolve_columns(table: &Element, metrics: &TextMetrics) -> Columns {
    let cols = col_elements(table);
    let rows: Vec<&Element> = table
        .table_rows()
        .into_iter()
        .filter(|r| r.style.is_displayed())
        .collect();

    let count = rows
        .iter()
        .map(|r| displayed_cells(r).map(Element::colspan).sum::<usize>())
        .max()
        .unwrap_or(0)
        .max(cols.len());

    let fixed: Vec<Option<i32>> = (0..count)
        .map(|i| {
            cols.get(i)
                .and_then(|c| c.style.width)
                .map(|w| w.max(0))
        })
        .collect();
    let mut widths: Vec<i32> = fixed
        .iter()
        .map(|f| f.unwrap_or(2 * metrics.cell_padding))
        .collect();

    let mut spanning = Vec::new();
    for row in &rows {
        let mut index = 0;
        for cell in displayed_cells(row) {
            let span = cell.colspan();
            let wanted = cell_width(cell, metrics);
            if span == 1 {
                if fixed[index].is_none() {
                    widths[index] = widths[index].max(wanted);
                }
            } else {
                spanning.push((index, span, wanted));
            }
            index += span;
        }
    }

    for (start, span, wanted) in spanning {
        let end = start.saturating_add(span).min(count);
        let covered = sum_widths(widths[start..end].iter().copied());
        let last = end - 1;
        if wanted > covered && fixed[last].is_none() {
            widths[last] = widths[last].saturating_add(wanted - covered);
        }
    }

    let mut offsets = Vec::with_capacity(count);
    let mut x: i32 = 0;
    for width in &widths {
        offsets.push(x);
        x = x.saturating_add(*width);
    }
    Columns { widths, offsets }
}

pub(super) fn intrinsic_table_width(table: &Element, metrics: &TextMetrics) -> i32 {
    let natural = resolve_columns(table, metrics).total();
    table.style.width.map_or(natural, |w| w.max(natural))
}

pub(super) fn layout_table(
    table: &Element,
    x: i32,
    y: i32,
    metrics: &TextMetrics,
    result: &mut LayoutResult,
) -> Rect {
    let columns = resolve_columns(table, metrics);
    let width = table.style.width.map_or(columns.total(), |w| w.max(columns.total()));

    let mut cursor_y = y;
    for child in table.child_elements() {
        if child.tag == Tag::Tr {
            let height = layout_row(child, x, cursor_y, width, &columns, metrics, result);
            cursor_y = cursor_y.saturating_add(height);
        } else if child.tag.is_row_group() {
            if !child.style.is_displayed() {
                zero_subtree(child, x, cursor_y, result);
                continue;
            }
            let start = cursor_y;
            for row in child.child_elements().iter().filter(|r| r.tag == Tag::Tr) {
                let height = layout_row(row, x, cursor_y, width, &columns, metrics, result);
                cursor_y = cursor_y.saturating_add(height);
            }
            result.insert(child.id.clone(), Rect::new(x, start, width, cursor_y - start));
        }
    }
    let height = cursor_y - y;

    for group in table.child_elements().iter().filter(|c| c.tag == Tag::Colgroup) {
        result.insert(group.id.clone(), Rect::new(x, y, width, height));
    }
    for (i, col) in col_elements(table).into_iter().enumerate() {
        let rect = match (columns.offsets.get(i), columns.widths.get(i)) {
            (Some(offset), Some(w)) => Rect::new(x.saturating_add(*offset), y, *w, height),
            _ => Rect::new(x.saturating_add(width), y, 0, height),
        };
        result.insert(col.id.clone(), rect);
    }

    let rect = Rect::new(x, y, width, height);
    result.insert(table.id.clone(), rect);
    rect
}

fn layout_row(
    row: &Element,
    x: i32,
    y: i32,
    width: i32,
    columns: &Columns,
    metrics: &TextMetrics,
    result: &mut LayoutResult,
) -> i32 {
    if !row.style.is_displayed() {
        zero_subtree(row, x, y, result);
        return 0;
    }

    let mut height = metrics.line_height;
    let mut placed = Vec::new();
    let mut index = 0;
    for cell in row.child_elements() {
        if !cell.tag.is_cell() {
            continue;
        }
        if !cell.style.is_displayed() {
            zero_subtree(cell, x, y, result);
            continue;
        }
        let span = cell.colspan();
        let offset = columns.offsets.get(index).copied().unwrap_or(columns.total());
        let cell_x = x.saturating_add(offset);
        let cell_width = columns.span_width(index, span);
        let inner_width = (cell_width - 2 * metrics.cell_padding).max(0);
        let content = layout_children(
            cell,
            cell_x.saturating_add(metrics.cell_padding),
            y,
            inner_width,
            metrics,
            result,
        );
        height = height.max(content);
        placed.push((cell, cell_x, cell_width));
        index = index.saturating_add(span);
    }

    for (cell, cell_x, cell_width) in placed {
        result.insert(cell.id.clone(), Rect::new(cell_x, y, cell_width, height));
    }
    result.insert(row.id.clone(), Rect::new(x, y, width, height));
    height
}
