//! Screen layout of the page hosting the dropdown.
//!
//! [`layout`] turns a [`SelectView`] into text runs to draw and a tree of
//! element rectangles to hit-test. It does no I/O.

use groupselect::{GroupView, ItemView, ListView, SelectView};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const PAGE_ID: &str = "page";
pub const HEADER_ID: &str = "header";
pub const STATUS_ID: &str = "status";

/// Left column of the dropdown.
pub const DROPDOWN_X: u16 = 2;
/// Row of the trigger.
pub const DROPDOWN_Y: u16 = 2;
pub const DROPDOWN_WIDTH: u16 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && x < self.x.saturating_add(self.width)
            && y >= self.y
            && y < self.y.saturating_add(self.height)
    }
}

/// A laid-out element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub rect: Rect,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
            children: Vec::new(),
        }
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }
}

/// Ids of the elements under `(x, y)`, outermost first.
///
/// Children are checked in reverse order (last laid out = on top).
pub fn hit_path(root: &Node, x: u16, y: u16) -> Vec<String> {
    let mut path = Vec::new();
    hit_path_into(root, x, y, &mut path);
    path
}

fn hit_path_into(node: &Node, x: u16, y: u16, path: &mut Vec<String>) -> bool {
    if !node.rect.contains(x, y) {
        return false;
    }
    path.push(node.id.clone());
    for child in node.children.iter().rev() {
        if hit_path_into(child, x, y, path) {
            break;
        }
    }
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStyle {
    pub bold: bool,
    pub dim: bool,
    pub reverse: bool,
}

/// Text drawn at a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub x: u16,
    pub y: u16,
    pub text: String,
    pub style: RunStyle,
}

impl TextRun {
    fn new(x: u16, y: u16, text: String) -> Self {
        Self {
            x,
            y,
            text,
            style: RunStyle::default(),
        }
    }

    fn bold(mut self) -> Self {
        self.style.bold = true;
        self
    }

    fn dim(mut self) -> Self {
        self.style.dim = true;
        self
    }

    fn reverse(mut self) -> Self {
        self.style.reverse = true;
        self
    }
}

/// One laid-out screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub root: Node,
    pub runs: Vec<TextRun>,
}

/// Truncate or pad `text` to exactly `width` columns.
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        let mut out = text.to_string();
        out.push_str(&" ".repeat(width - text.width()));
        return out;
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    if width > 0 {
        out.push('…');
        used += 1;
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// One row of the open list.
enum Row<'a> {
    Header(&'a GroupView),
    Item(&'a ItemView),
    Divider,
}

fn list_rows(list: &ListView) -> Vec<Row<'_>> {
    let mut rows = Vec::new();
    for group in &list.groups {
        rows.push(Row::Header(group));
        rows.extend(group.items.iter().map(Row::Item));
        if group.divider_after {
            rows.push(Row::Divider);
        }
    }
    rows
}

/// First row to draw so that the highlighted row fits in `visible` rows.
pub fn scroll_offset(highlighted: Option<usize>, total: usize, visible: usize) -> usize {
    if visible == 0 || total <= visible {
        return 0;
    }
    match highlighted {
        Some(row) if row >= visible => (row + 1 - visible).min(total - visible),
        _ => 0,
    }
}

/// Lay out the page: header, the dropdown and a status line.
///
/// The open list is clipped to the rows above the status line and scrolled
/// so the highlighted option stays visible. Only drawn rows get a node.
pub fn layout(view: &SelectView, status: &str, width: u16, height: u16) -> Frame {
    let mut runs = Vec::new();
    let inner = DROPDOWN_WIDTH as usize - 2;
    let status_y = height.saturating_sub(1);

    runs.push(TextRun::new(DROPDOWN_X, 0, "Pick a food".to_string()).bold());
    let header = Node::new(HEADER_ID, Rect::new(0, 0, width, 1));

    // Trigger: "[label     ▼]"
    let label_width = inner - 2;
    let trigger_text = format!(
        "[{} {}]",
        fit(&view.trigger.label, label_width),
        view.trigger.indicator
    );
    let mut trigger_run = TextRun::new(DROPDOWN_X, DROPDOWN_Y, trigger_text);
    if view.trigger.is_placeholder {
        trigger_run = trigger_run.dim();
    }
    runs.push(trigger_run);
    let trigger = Node::new(
        &view.trigger.id,
        Rect::new(DROPDOWN_X, DROPDOWN_Y, DROPDOWN_WIDTH, 1),
    );

    let mut dropdown_height = 1;
    let mut dropdown_children = vec![trigger];

    if let Some(list) = &view.list {
        let top = DROPDOWN_Y + 1;
        let visible = status_y.saturating_sub(top) as usize;
        let rows = list_rows(list);
        let highlighted = rows
            .iter()
            .position(|row| matches!(row, Row::Item(item) if item.highlighted));
        let offset = scroll_offset(highlighted, rows.len(), visible);

        let mut list_node = Node::new(&list.id, Rect::default());
        let mut y = top;
        for row in rows.iter().skip(offset).take(visible) {
            match row {
                Row::Header(group) => {
                    let text = fit(&format!("   {}", group.label), DROPDOWN_WIDTH as usize);
                    runs.push(TextRun::new(DROPDOWN_X, y, text).bold());
                    list_node = list_node.child(Node::new(&group.id, Rect::new(DROPDOWN_X, y, DROPDOWN_WIDTH, 1)));
                }
                Row::Item(item) => {
                    let marker = if item.highlighted { '›' } else { ' ' };
                    let check = if item.selected { '✓' } else { ' ' };
                    let text = fit(&format!("{}{} {}", marker, check, item.label), DROPDOWN_WIDTH as usize);
                    let mut run = TextRun::new(DROPDOWN_X, y, text);
                    if item.disabled {
                        run = run.dim();
                    }
                    if item.highlighted {
                        run = run.reverse();
                    }
                    runs.push(run);
                    list_node = list_node.child(Node::new(&item.id, Rect::new(DROPDOWN_X, y, DROPDOWN_WIDTH, 1)));
                }
                Row::Divider => {
                    runs.push(TextRun::new(DROPDOWN_X, y, "─".repeat(DROPDOWN_WIDTH as usize)).dim());
                }
            }
            y += 1;
        }

        list_node.rect = Rect::new(DROPDOWN_X, top, DROPDOWN_WIDTH, y - top);
        dropdown_height += y - top;
        dropdown_children.push(list_node);
    }

    let mut dropdown = Node::new(
        &view.id,
        Rect::new(DROPDOWN_X, DROPDOWN_Y, DROPDOWN_WIDTH, dropdown_height),
    );
    dropdown.children = dropdown_children;

    runs.push(TextRun::new(0, status_y, fit(status, width as usize)).dim());
    let status_node = Node::new(STATUS_ID, Rect::new(0, status_y, width, 1));

    // Nothing but the status line is drawn on its row or below
    runs.retain(|run| run.y < status_y || (run.y == status_y && run.x == 0));

    // Status last so it is hit before anything overlapping it
    let root = Node::new(PAGE_ID, Rect::new(0, 0, width, height))
        .child(header)
        .child(dropdown)
        .child(status_node);

    Frame { root, runs }
}
