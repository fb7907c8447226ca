//! Small lookup and mutation helpers. Every lookup returns `Option` so callers
//! can bail out quietly when the markup is missing a piece.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, Node};

pub fn by_id(document: &Document, id: &str) -> Option<Element> {
    document.get_element_by_id(id)
}

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        log::debug!("invalid selector {selector}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let _ = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}

pub fn set_overflow(element: &HtmlElement, hidden: bool) {
    let style = element.style();
    let _ = if hidden {
        style.set_property("overflow", "hidden")
    } else {
        style.remove_property("overflow").map(|_| ())
    };
}

pub fn focus(element: &Element) {
    if let Some(el) = element.dyn_ref::<HtmlElement>() {
        let _ = el.focus();
    }
}

pub fn target_node(target: Option<EventTarget>) -> Option<Node> {
    target.and_then(|t| t.dyn_into::<Node>().ok())
}

/// True when `node` is `container` itself or one of its descendants.
pub fn contains(container: &Element, node: &Node) -> bool {
    container.contains(Some(node))
}
