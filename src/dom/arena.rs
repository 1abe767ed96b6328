//! Element arena - the document as thread-local parallel state.
//!
//! Elements are indices into an arena owned by a thread-local `Document`,
//! accessed through free functions. Handlers capture `ElementId`s (plain
//! copyable indices) rather than references, so they can mutate the document
//! freely from inside an event dispatch.
//!
//! # API
//!
//! - `reset_document` - Fresh document with an empty `body`
//! - `create_element` / `append_child` - Tree construction
//! - `add_class` / `remove_class` / `toggle_class` / `has_class` - Class list
//! - `set_attribute` / `get_attribute` - Attributes (including `data-*`)
//! - `set_offset` / `offset_top` / `offset_height` - Host-supplied geometry
//! - `insert_style` / `remove_style` / `style` / `is_visible` - Style flags
//! - `query` / `query_all` / `query_within` / `element_by_id` - Lookups
//! - `ready_state` / `set_ready_state` / `on_ready` - Load lifecycle
//!
//! # Example
//!
//! ```ignore
//! use page_behavior::dom;
//!
//! dom::reset_document();
//! let nav = dom::create_element("nav");
//! dom::add_class(nav, "offcanvas");
//! dom::append_child(dom::body(), nav);
//!
//! assert_eq!(dom::query(".offcanvas"), Some(nav));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use spark_signals::{Signal, signal};

use crate::types::{ReadyState, StyleFlags};
use super::selector::{AttrMatcher, AttrOp, Compound, Selector};

// =============================================================================
// TYPES
// =============================================================================

/// Handle to an element in the document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

/// One element's record in the arena.
#[derive(Debug, Default)]
struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: HashMap<String, String>,
    parent: Option<usize>,
    children: Vec<usize>,
    /// Document-absolute top, in the host's units.
    offset_top: f32,
    offset_height: f32,
    style: StyleFlags,
}

#[derive(Default)]
struct Document {
    elements: Vec<Element>,
}

impl Document {
    fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }
}

// =============================================================================
// STATE
// =============================================================================

// Index 0 is always the body, created on reset.
const BODY_INDEX: usize = 0;

thread_local! {
    static DOCUMENT: RefCell<Document> = RefCell::new(new_document());

    static READY_STATE: Signal<ReadyState> = signal(ReadyState::Loading);

    /// Callbacks waiting for the document to leave `Loading`.
    static READY_QUEUE: RefCell<Vec<Box<dyn FnOnce()>>> = RefCell::new(Vec::new());
}

fn new_document() -> Document {
    let mut doc = Document::default();
    doc.elements.push(Element { tag: "body".to_string(), ..Element::default() });
    doc
}

/// Reset to a fresh document (empty body, `Loading` state). For testing.
pub fn reset_document() {
    DOCUMENT.with(|doc| *doc.borrow_mut() = new_document());
    READY_STATE.with(|s| s.set(ReadyState::Loading));
    READY_QUEUE.with(|q| q.borrow_mut().clear());
}

/// The document body. Always present.
pub fn body() -> ElementId {
    ElementId(BODY_INDEX)
}

// =============================================================================
// TREE CONSTRUCTION
// =============================================================================

/// Create a detached element. Attach it with [`append_child`];
/// detached elements are invisible to queries.
pub fn create_element(tag: &str) -> ElementId {
    DOCUMENT.with(|doc| {
        let mut doc = doc.borrow_mut();
        let index = doc.elements.len();
        doc.elements.push(Element { tag: tag.to_string(), ..Element::default() });
        ElementId(index)
    })
}

/// Attach `child` under `parent`, after any existing children.
pub fn append_child(parent: ElementId, child: ElementId) {
    DOCUMENT.with(|doc| {
        let mut doc = doc.borrow_mut();
        doc.element_mut(child).parent = Some(parent.0);
        doc.element_mut(parent).children.push(child.0);
    })
}

/// The element's tag name.
pub fn tag(id: ElementId) -> String {
    DOCUMENT.with(|doc| doc.borrow().element(id).tag.clone())
}

/// The element's parent, if attached.
pub fn parent(id: ElementId) -> Option<ElementId> {
    DOCUMENT.with(|doc| doc.borrow().element(id).parent.map(ElementId))
}

// =============================================================================
// CLASS LIST
// =============================================================================

/// Add a class (no-op if already present).
pub fn add_class(id: ElementId, class: &str) {
    DOCUMENT.with(|doc| {
        let mut doc = doc.borrow_mut();
        let classes = &mut doc.element_mut(id).classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    })
}

/// Remove a class (no-op if absent).
pub fn remove_class(id: ElementId, class: &str) {
    DOCUMENT.with(|doc| {
        doc.borrow_mut().element_mut(id).classes.retain(|c| c != class);
    })
}

/// Flip class membership. Returns `true` if the class is now present.
pub fn toggle_class(id: ElementId, class: &str) -> bool {
    if has_class(id, class) {
        remove_class(id, class);
        false
    } else {
        add_class(id, class);
        true
    }
}

/// Check class membership.
pub fn has_class(id: ElementId, class: &str) -> bool {
    DOCUMENT.with(|doc| doc.borrow().element(id).classes.iter().any(|c| c == class))
}

// =============================================================================
// ATTRIBUTES
// =============================================================================

/// Set an attribute, replacing any existing value.
pub fn set_attribute(id: ElementId, name: &str, value: &str) {
    DOCUMENT.with(|doc| {
        doc.borrow_mut()
            .element_mut(id)
            .attributes
            .insert(name.to_string(), value.to_string());
    })
}

/// Read an attribute value.
pub fn get_attribute(id: ElementId, name: &str) -> Option<String> {
    DOCUMENT.with(|doc| doc.borrow().element(id).attributes.get(name).cloned())
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// Set host-supplied geometry: document-absolute top and height.
pub fn set_offset(id: ElementId, top: f32, height: f32) {
    DOCUMENT.with(|doc| {
        let mut doc = doc.borrow_mut();
        let el = doc.element_mut(id);
        el.offset_top = top;
        el.offset_height = height;
    })
}

/// Document-absolute top of the element.
pub fn offset_top(id: ElementId) -> f32 {
    DOCUMENT.with(|doc| doc.borrow().element(id).offset_top)
}

/// Rendered height of the element.
pub fn offset_height(id: ElementId) -> f32 {
    DOCUMENT.with(|doc| doc.borrow().element(id).offset_height)
}

// =============================================================================
// STYLE FLAGS
// =============================================================================

/// Turn the given presentation flags on.
pub fn insert_style(id: ElementId, flags: StyleFlags) {
    DOCUMENT.with(|doc| doc.borrow_mut().element_mut(id).style.insert(flags))
}

/// Turn the given presentation flags off.
pub fn remove_style(id: ElementId, flags: StyleFlags) {
    DOCUMENT.with(|doc| doc.borrow_mut().element_mut(id).style.remove(flags))
}

/// Current presentation flags.
pub fn style(id: ElementId) -> StyleFlags {
    DOCUMENT.with(|doc| doc.borrow().element(id).style)
}

/// Whether the element participates in the visual flow.
pub fn is_visible(id: ElementId) -> bool {
    !style(id).contains(StyleFlags::HIDDEN)
}

// =============================================================================
// QUERIES
// =============================================================================

/// First element matching the selector, in document order.
/// Invalid selector text matches nothing.
pub fn query(selector: &str) -> Option<ElementId> {
    query_within(body(), selector)
}

/// All elements matching the selector, in document order.
pub fn query_all(selector: &str) -> Vec<ElementId> {
    query_all_within(body(), selector)
}

/// First match inside `scope`'s subtree (the scope itself is excluded).
pub fn query_within(scope: ElementId, selector: &str) -> Option<ElementId> {
    let Some(sel) = Selector::parse(selector) else { return None };
    DOCUMENT.with(|doc| {
        let doc = doc.borrow();
        let mut found = None;
        visit_subtree(&doc, scope.0, &mut |index| {
            if found.is_none() && selector_matches(&doc, &sel, index, scope.0) {
                found = Some(ElementId(index));
            }
        });
        found
    })
}

/// All matches inside `scope`'s subtree, in document order.
pub fn query_all_within(scope: ElementId, selector: &str) -> Vec<ElementId> {
    let Some(sel) = Selector::parse(selector) else { return Vec::new() };
    DOCUMENT.with(|doc| {
        let doc = doc.borrow();
        let mut found = Vec::new();
        visit_subtree(&doc, scope.0, &mut |index| {
            if selector_matches(&doc, &sel, index, scope.0) {
                found.push(ElementId(index));
            }
        });
        found
    })
}

/// Element with the given `id` attribute, in document order.
pub fn element_by_id(id_value: &str) -> Option<ElementId> {
    DOCUMENT.with(|doc| {
        let doc = doc.borrow();
        let mut found = None;
        visit_subtree(&doc, BODY_INDEX, &mut |index| {
            if found.is_none()
                && doc.elements[index].attributes.get("id").is_some_and(|v| v == id_value)
            {
                found = Some(ElementId(index));
            }
        });
        found
    })
}

/// Pre-order walk of `root`'s descendants (root itself excluded).
fn visit_subtree(doc: &Document, root: usize, visit: &mut impl FnMut(usize)) {
    for &child in &doc.elements[root].children {
        visit(child);
        visit_subtree(doc, child, visit);
    }
}

// =============================================================================
// SELECTOR MATCHING
// =============================================================================

fn selector_matches(doc: &Document, sel: &Selector, index: usize, scope: usize) -> bool {
    if !compound_matches(&doc.elements[index], sel.subject()) {
        return false;
    }

    // Walk ancestors (up to the scope) against the remaining compounds,
    // innermost ancestor compound first.
    let mut remaining = sel.ancestors().iter().rev();
    let mut next = remaining.next();
    let mut current = doc.elements[index].parent;

    while let Some(compound) = next {
        let Some(ancestor) = current else { return false };
        if compound_matches(&doc.elements[ancestor], compound) {
            next = remaining.next();
        }
        if ancestor == scope {
            break;
        }
        current = doc.elements[ancestor].parent;
    }

    next.is_none()
}

fn compound_matches(el: &Element, compound: &Compound) -> bool {
    if compound.tag.as_ref().is_some_and(|t| *t != el.tag) {
        return false;
    }
    if let Some(id) = &compound.id {
        if el.attributes.get("id") != Some(id) {
            return false;
        }
    }
    if !compound.classes.iter().all(|c| el.classes.iter().any(|have| have == c)) {
        return false;
    }
    compound.attrs.iter().all(|m| attr_matches(el, m))
}

fn attr_matches(el: &Element, matcher: &AttrMatcher) -> bool {
    let Some(value) = el.attributes.get(&matcher.name) else { return false };
    match &matcher.op {
        AttrOp::Present => true,
        AttrOp::Equals(expected) => value == expected,
        AttrOp::Prefix(prefix) => value.starts_with(prefix.as_str()),
    }
}

// =============================================================================
// READINESS
// =============================================================================

/// Current document readiness.
pub fn ready_state() -> ReadyState {
    READY_STATE.with(|s| s.get())
}

/// Advance the document readiness. Leaving `Loading` drains the ready
/// queue; later transitions (`Interactive` -> `Complete`) fire nothing.
pub fn set_ready_state(state: ReadyState) {
    let was_ready = ready_state().is_ready();
    READY_STATE.with(|s| s.set(state));

    if !was_ready && state.is_ready() {
        let queued = READY_QUEUE.with(|q| std::mem::take(&mut *q.borrow_mut()));
        for callback in queued {
            callback();
        }
    }
}

/// Run `callback` once the document is ready. Runs immediately if the
/// document has already left `Loading`.
pub fn on_ready(callback: impl FnOnce() + 'static) {
    if ready_state().is_ready() {
        callback();
    } else {
        READY_QUEUE.with(|q| q.borrow_mut().push(Box::new(callback)));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() {
        reset_document();
    }

    #[test]
    fn test_body_always_present() {
        setup();
        assert_eq!(tag(body()), "body");
        assert_eq!(parent(body()), None);
    }

    #[test]
    fn test_class_list() {
        setup();
        let el = create_element("div");

        assert!(!has_class(el, "active"));
        add_class(el, "active");
        assert!(has_class(el, "active"));

        // Adding twice keeps a single entry
        add_class(el, "active");
        remove_class(el, "active");
        assert!(!has_class(el, "active"));

        assert!(toggle_class(el, "active"));
        assert!(has_class(el, "active"));
        assert!(!toggle_class(el, "active"));
        assert!(!has_class(el, "active"));
    }

    #[test]
    fn test_attributes() {
        setup();
        let el = create_element("button");

        assert_eq!(get_attribute(el, "data-category"), None);
        set_attribute(el, "data-category", "design");
        assert_eq!(get_attribute(el, "data-category"), Some("design".to_string()));
        set_attribute(el, "data-category", "growth");
        assert_eq!(get_attribute(el, "data-category"), Some("growth".to_string()));
    }

    #[test]
    fn test_geometry() {
        setup();
        let el = create_element("section");
        assert_eq!(offset_top(el), 0.0);

        set_offset(el, 840.0, 320.0);
        assert_eq!(offset_top(el), 840.0);
        assert_eq!(offset_height(el), 320.0);
    }

    #[test]
    fn test_style_flags() {
        setup();
        let el = create_element("article");

        assert!(is_visible(el));
        insert_style(el, StyleFlags::HIDDEN | StyleFlags::DROP_SHADOW);
        assert!(!is_visible(el));
        assert!(style(el).contains(StyleFlags::DROP_SHADOW));

        remove_style(el, StyleFlags::HIDDEN);
        assert!(is_visible(el));
        assert!(style(el).contains(StyleFlags::DROP_SHADOW));
    }

    #[test]
    fn test_query_document_order() {
        setup();
        let first = create_element("div");
        let second = create_element("div");
        add_class(first, "card");
        add_class(second, "card");
        append_child(body(), first);
        append_child(body(), second);

        assert_eq!(query(".card"), Some(first));
        assert_eq!(query_all(".card"), vec![first, second]);
        assert_eq!(query(".missing"), None);
    }

    #[test]
    fn test_detached_elements_not_queryable() {
        setup();
        let el = create_element("div");
        add_class(el, "card");

        assert_eq!(query(".card"), None);
        append_child(body(), el);
        assert_eq!(query(".card"), Some(el));
    }

    #[test]
    fn test_descendant_selector() {
        setup();
        let filter = create_element("div");
        add_class(filter, "category-filter");
        let inside = create_element("button");
        let outside = create_element("button");
        append_child(body(), filter);
        append_child(filter, inside);
        append_child(body(), outside);

        assert_eq!(query_all(".category-filter button"), vec![inside]);
    }

    #[test]
    fn test_query_within_scope() {
        setup();
        let item_a = create_element("div");
        let item_b = create_element("div");
        let question_a = create_element("h3");
        let question_b = create_element("h3");
        add_class(question_a, "faq-question");
        add_class(question_b, "faq-question");
        append_child(body(), item_a);
        append_child(body(), item_b);
        append_child(item_a, question_a);
        append_child(item_b, question_b);

        assert_eq!(query_within(item_a, ".faq-question"), Some(question_a));
        assert_eq!(query_within(item_b, ".faq-question"), Some(question_b));
    }

    #[test]
    fn test_element_by_id() {
        setup();
        let section = create_element("section");
        set_attribute(section, "id", "pricing");
        append_child(body(), section);

        assert_eq!(element_by_id("pricing"), Some(section));
        assert_eq!(element_by_id("missing"), None);
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        setup();
        let el = create_element("div");
        append_child(body(), el);

        assert_eq!(query("div > p"), None);
        assert!(query_all("[broken").is_empty());
    }

    #[test]
    fn test_ready_queue_fires_once() {
        setup();
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        on_ready(move || count_clone.set(count_clone.get() + 1));
        assert_eq!(count.get(), 0);

        set_ready_state(ReadyState::Interactive);
        assert_eq!(count.get(), 1);

        // Later transitions fire nothing further
        set_ready_state(ReadyState::Complete);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_on_ready_immediate_when_interactive() {
        setup();
        set_ready_state(ReadyState::Interactive);

        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();
        on_ready(move || fired_clone.set(true));
        assert!(fired.get());
    }
}
