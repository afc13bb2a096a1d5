use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;
use crate::types::{Display, Style, Tag, Visibility};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Prefix marking ids the tree generated itself. These are never rendered.
pub(crate) const GENERATED_PREFIX: &str = "__";

/// Largest column span honoured, matching what browsers accept.
pub const MAX_COLSPAN: usize = 1000;

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{GENERATED_PREFIX}{prefix}-{id}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: Tag,
    pub classes: Vec<String>,
    /// Remaining attributes (`colspan`, `data-*`, `href`, ...).
    pub attrs: BTreeMap<String, String>,

    // Content
    pub content: Content,

    // Visual
    pub style: Style,

    // Interaction
    pub clickable: bool,
    pub draggable: bool,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        let prefix = match &tag {
            Tag::Text => "text",
            other => other.name(),
        };
        Self {
            id: generate_id(prefix),
            tag,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            content: Content::None,
            style: Style::default(),
            clickable: false,
            draggable: false,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Content::Text(content.into()),
            ..Self::new(Tag::Text)
        }
    }

    pub fn div() -> Self {
        Self::new(Tag::Div)
    }

    pub fn table() -> Self {
        Self::new(Tag::Table)
    }

    pub fn tr() -> Self {
        Self::new(Tag::Tr)
    }

    pub fn th() -> Self {
        Self::new(Tag::Th)
    }

    pub fn td() -> Self {
        Self::new(Tag::Td)
    }

    pub fn col() -> Self {
        Self::new(Tag::Col)
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Deep clone that gives every generated id in the copy a new value, so
    /// the copy can live in the same tree as the original.
    pub fn clone_fresh(&self) -> Self {
        let mut copy = self.clone();
        copy.refresh_generated_ids();
        copy
    }

    fn refresh_generated_ids(&mut self) {
        if !self.has_explicit_id() {
            let prefix = match &self.tag {
                Tag::Text => "text",
                other => other.name(),
            };
            self.id = generate_id(prefix);
        }
        if let Content::Children(children) = &mut self.content {
            for child in children {
                child.refresh_generated_ids();
            }
        }
    }

    /// Whether the id was assigned by the markup rather than generated.
    pub fn has_explicit_id(&self) -> bool {
        !self.id.starts_with(GENERATED_PREFIX)
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Column span of a table cell. Missing or invalid values count as one;
    /// spans above [`MAX_COLSPAN`] are clamped.
    pub fn colspan(&self) -> usize {
        self.get_attr("colspan")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .map(|n| n.min(MAX_COLSPAN))
            .unwrap_or(1)
    }

    // Visual
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn width(mut self, width: i32) -> Self {
        self.style.width = Some(width);
        self
    }

    pub fn height(mut self, height: i32) -> Self {
        self.style.height = Some(height);
        self
    }

    pub fn display(mut self, display: Display) -> Self {
        self.style.display = display;
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.style.visibility = visibility;
        self
    }

    // Interaction
    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => self.content = Content::Children(new_children.into_iter().collect()),
        }
        self
    }

    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    pub fn child_elements_mut(&mut self) -> &mut [Element] {
        match &mut self.content {
            Content::Children(children) => children,
            _ => &mut [],
        }
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        crate::text::collapse_whitespace(&out)
    }

    fn collect_text(&self, out: &mut String) {
        match &self.content {
            Content::None => {}
            Content::Text(text) => {
                out.push(' ');
                out.push_str(text);
            }
            Content::Children(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    // Queries

    /// Depth-first search including `self`.
    pub fn find(&self, pred: &impl Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.child_elements().iter().find_map(|c| c.find(pred))
    }

    pub fn find_mut(&mut self, pred: &impl Fn(&Element) -> bool) -> Option<&mut Element> {
        if pred(self) {
            return Some(self);
        }
        match &mut self.content {
            Content::Children(children) => children.iter_mut().find_map(|c| c.find_mut(pred)),
            _ => None,
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.find(&|e: &Element| e.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.find_mut(&|e: &Element| e.id == id)
    }

    /// First descendant (or self) with the given tag and class.
    pub fn find_tag_class(&self, tag: &Tag, class: &str) -> Option<&Element> {
        self.find(&|e: &Element| &e.tag == tag && e.has_class(class))
    }

    /// All descendants (not self) matching `pred`, in document order.
    pub fn descendants_where(&self, pred: &impl Fn(&Element) -> bool) -> Vec<&Element> {
        let mut out = Vec::new();
        for child in self.child_elements() {
            if pred(child) {
                out.push(child);
            }
            out.extend(child.descendants_where(pred));
        }
        out
    }

    /// Rows of a table, looking through `thead`/`tbody`/`tfoot`.
    pub fn table_rows(&self) -> Vec<&Element> {
        let mut rows = Vec::new();
        for child in self.child_elements() {
            if child.tag == Tag::Tr {
                rows.push(child);
            } else if child.tag.is_row_group() {
                rows.extend(child.child_elements().iter().filter(|r| r.tag == Tag::Tr));
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique_and_implicit() {
        let a = Element::div();
        let b = Element::div();
        assert_ne!(a.id, b.id);
        assert!(!a.has_explicit_id());
        assert!(Element::div().id("grid").has_explicit_id());
    }

    #[test]
    fn test_clone_fresh_keeps_explicit_ids() {
        let original = Element::tr().id("row").child(Element::td());
        let copy = original.clone_fresh();
        assert_eq!(copy.id, "row");
        assert_ne!(copy.child_elements()[0].id, original.child_elements()[0].id);
    }

    #[test]
    fn test_colspan_defaults_to_one() {
        assert_eq!(Element::td().colspan(), 1);
        assert_eq!(Element::td().attr("colspan", "3").colspan(), 3);
        assert_eq!(Element::td().attr("colspan", "0").colspan(), 1);
        assert_eq!(Element::td().attr("colspan", "x").colspan(), 1);
        assert_eq!(
            Element::td().attr("colspan", "3000000000").colspan(),
            MAX_COLSPAN
        );
    }

    #[test]
    fn test_table_rows_through_sections() {
        let table = Element::table()
            .child(Element::new(Tag::Thead).child(Element::tr().id("h")))
            .child(
                Element::new(Tag::Tbody)
                    .child(Element::tr().id("r1"))
                    .child(Element::tr().id("r2")),
            );
        let ids: Vec<_> = table.table_rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["h", "r1", "r2"]);
    }

    #[test]
    fn test_text_content_collapses() {
        let el = Element::td()
            .child(Element::text("  Fix "))
            .child(Element::new(Tag::A).child(Element::text("crash\n")));
        assert_eq!(el.text_content(), "Fix crash");
    }
}
