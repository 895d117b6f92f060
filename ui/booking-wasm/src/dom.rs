//! DOM helpers and page-level bindings.
//!
//! Elements are resolved once at startup. Pages differ (booking, thread, login), so most
//! lookups are optional and each controller skips itself when its markup is absent.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, HtmlOptionElement, Window};

// ── Helpers ──

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn by_id(id: &str) -> Option<Element> {
    document().ok()?.get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    document().ok()?.query_selector(selector).ok()?
}

pub fn query_typed<T: JsCast>(selector: &str) -> Option<T> {
    query(selector).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query_in(parent: &Element, selector: &str) -> Option<Element> {
    parent.query_selector(selector).ok()?
}

pub fn query_typed_in<T: JsCast>(parent: &Element, selector: &str) -> Option<T> {
    query_in(parent, selector).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query_all(selector: &str) -> Vec<Element> {
    match document().and_then(|d| d.query_selector_all(selector)) {
        Ok(nl) => collect_nodes(&nl),
        Err(_) => Vec::new(),
    }
}

/// Query all matching elements within a parent element.
pub fn query_all_in(parent: &Element, selector: &str) -> Vec<Element> {
    match parent.query_selector_all(selector) {
        Ok(nl) => collect_nodes(&nl),
        Err(_) => Vec::new(),
    }
}

fn collect_nodes(nl: &web_sys::NodeList) -> Vec<Element> {
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()?.create_element(tag)
}

pub fn create_html(tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = create_element(tag)?.dyn_into()?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

pub fn create_option(value: &str, text: &str, selected: bool) -> Result<HtmlOptionElement, JsValue> {
    let opt: HtmlOptionElement = create_element("option")?.dyn_into()?;
    opt.set_value(value);
    opt.set_text_content(Some(text));
    opt.set_selected(selected);
    Ok(opt)
}

/// `data-*` attribute by dataset name (`historyUrl` for `data-history-url`).
pub fn data(el: &HtmlElement, key: &str) -> Option<String> {
    el.dataset().get(key)
}

/// Like [`data`], treating an empty attribute as absent.
pub fn data_non_empty(el: &HtmlElement, key: &str) -> Option<String> {
    data(el, key).filter(|v| !v.trim().is_empty())
}

/// The element an event was dispatched on, if it is one.
pub fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Nearest ancestor-or-self of the event target matching `selector`.
pub fn event_closest(event: &Event, selector: &str) -> Option<Element> {
    event_element(event)?.closest(selector).ok()?
}

/// Attach a listener for the page's lifetime.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

// ── Page ──

/// Bindings shared by every controller on the page.
#[derive(Clone)]
pub struct Page {
    pub window: Window,
    pub document: Document,
    pub body: Option<HtmlElement>,
    pub path: String,
    pub client_authenticated: bool,
}

impl Page {
    pub fn bind() -> Result<Page, JsValue> {
        let window = window()?;
        let document = document()?;
        let body = document.body();
        let path = window.location().pathname().unwrap_or_default();
        let client_authenticated = body
            .as_ref()
            .and_then(|b| data(b, "clientAuthenticated"))
            .as_deref()
            == Some("true");

        Ok(Page {
            window,
            document,
            body,
            path,
            client_authenticated,
        })
    }

    /// Toggles the body class that freezes background scrolling under an overlay.
    pub fn set_modal_open(&self, open: bool) {
        if let Some(body) = &self.body {
            toggle_class(body, "modal-open", open);
        }
    }
}
