use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Window};
use yew::NodeRef;

use crate::engine::{Capability, Rect, StyleSink, Viewport};

/// Milliseconds on the page's monotonic clock.
pub fn now() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub fn viewport(window: &Window) -> Option<Viewport> {
    let scroll_y = window.scroll_y().ok()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Viewport::new(scroll_y, width, height))
}

/// Document rect of the node behind `node`, or `None` once it is unmounted.
pub fn document_rect(node: &NodeRef, viewport: &Viewport) -> Option<Rect> {
    let element = node.cast::<Element>()?;
    let client = element.get_bounding_client_rect();
    Some(Rect::from_client(client.top(), client.bottom(), viewport.scroll_y))
}

fn media_matches(window: &Window, query: &str) -> bool {
    window
        .match_media(query)
        .ok()
        .flatten()
        .map(|list| list.matches())
        .unwrap_or(false)
}

pub fn detect_capability(window: &Window) -> Capability {
    Capability::from_media(
        media_matches(window, "(hover: none)"),
        media_matches(window, "(pointer: coarse)"),
    )
}

/// Capability of the current window; fine pointer when there is none.
pub fn current_capability() -> Capability {
    web_sys::window()
        .map(|window| detect_capability(&window))
        .unwrap_or(Capability::FinePointer)
}

/// Writes straight onto the `style` of already-rendered segment nodes.
pub struct NodeStyleSink {
    nodes: Vec<NodeRef>,
}

impl NodeStyleSink {
    pub fn new(nodes: Vec<NodeRef>) -> Self {
        Self { nodes }
    }
}

impl StyleSink for NodeStyleSink {
    fn write(&self, index: usize, property: &str, value: &str) -> bool {
        let Some(element) = self
            .nodes
            .get(index)
            .and_then(|node| node.get())
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            return false;
        };
        element.style().set_property(property, value).is_ok()
    }
}
