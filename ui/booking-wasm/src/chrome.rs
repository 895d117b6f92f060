//! Client gate overlay and policy modal.

use crate::dom::{self, Page};
use crate::state;
use bip_booking_core::chrome::{self, Overlay};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, KeyboardEvent};

const GATE_DISMISS: &str = "[data-client-gate-dismiss], [data-admin-gate-dismiss]";

fn set_gate(page: &Page, gate: &HtmlElement, target: Overlay, source: &str) {
    let open = target.is_open();
    gloo_console::debug!(format!(
        "[client-gate] {} via {source}",
        if open { "opening" } else { "closing" }
    ));
    gate.set_hidden(!open);
    let _ = gate
        .style()
        .set_property("display", if open { "grid" } else { "none" });
    page.set_modal_open(open);
    state::with_mut(|s| s.gate = target);
}

/// Wire the sign-in gate for anonymous visitors; keep it shut on admin pages.
pub fn bind_gate(page: &Page) -> Result<(), JsValue> {
    let Some(gate) = dom::query_typed::<HtmlElement>("[data-client-gate-root]") else {
        return Ok(());
    };

    if chrome::is_admin_path(&page.path) {
        gate.set_hidden(true);
        let _ = gate.style().set_property("display", "none");
        return Ok(());
    }
    if !chrome::gate_enabled(page.client_authenticated, &page.path) {
        return Ok(());
    }
    state::with_mut(|s| s.gate = Overlay::from_hidden(gate.hidden()));

    {
        let page2 = page.clone();
        let gate2 = gate.clone();
        dom::listen(&page.document, "click", move |event: Event| {
            if let Some(dismiss) = dom::event_closest(&event, GATE_DISMISS) {
                event.prevent_default();
                let source = dismiss
                    .get_attribute("data-client-gate-dismiss")
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| "dismiss-control".to_owned());
                set_gate(&page2, &gate2, Overlay::Closed, &source);
                return;
            }
            if let Some(trigger) = dom::event_closest(&event, "[data-client-gate-trigger]") {
                event.prevent_default();
                let source = trigger
                    .get_attribute("data-client-gate-trigger")
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| "trigger-control".to_owned());
                set_gate(&page2, &gate2, Overlay::Open, &source);
            }
        })?;
    }

    {
        let page2 = page.clone();
        let gate2 = gate.clone();
        dom::listen(&gate, "click", move |event: Event| {
            if is_self_target(&event, &gate2) {
                set_gate(&page2, &gate2, Overlay::Closed, "scrim");
            }
        })?;
    }

    {
        let page2 = page.clone();
        dom::listen(&page.document, "keydown", move |event: Event| {
            if !is_escape(&event) {
                return;
            }
            if let Some(next) = state::with(|s| s.gate.on_escape()) {
                set_gate(&page2, &gate, next, "escape-key");
            }
        })?;
    }

    Ok(())
}

fn is_escape(event: &Event) -> bool {
    event
        .dyn_ref::<KeyboardEvent>()
        .is_some_and(|k| k.key() == "Escape")
}

fn is_self_target(event: &Event, el: &HtmlElement) -> bool {
    let node: &web_sys::Node = el;
    dom::event_element(event).is_some_and(|t| t.is_same_node(Some(node)))
}

// ── Policy modal ──

struct PolicyModal {
    layer: HtmlElement,
    content: web_sys::Element,
    library: web_sys::Element,
}

impl PolicyModal {
    fn bind() -> Option<PolicyModal> {
        let layer = dom::query_typed::<HtmlElement>("[data-policy-modal-layer]")?;
        let content = dom::query_in(&layer, "[data-policy-modal-content]")?;
        let library = dom::by_id("policy-modal-library")?;
        Some(PolicyModal {
            layer,
            content,
            library,
        })
    }

    fn open(&self, page: &Page, policy: &str) {
        if policy.is_empty() {
            return;
        }
        let template = dom::query_all_in(&self.library, "template[data-policy]")
            .into_iter()
            .find(|t| t.get_attribute("data-policy").as_deref() == Some(policy));
        let Some(template) = template else {
            return;
        };
        self.content.set_inner_html(&template.inner_html());
        self.layer.set_hidden(false);
        dom::add_class(&self.layer, "policy-modal-layer--open");
        page.set_modal_open(true);
        state::with_mut(|s| s.policy_modal = Overlay::Open);
        gloo_console::debug!(format!("[policy-modal] opened {policy}"));
    }

    fn close(&self, page: &Page, source: &str) {
        self.layer.set_hidden(true);
        dom::remove_class(&self.layer, "policy-modal-layer--open");
        page.set_modal_open(false);
        state::with_mut(|s| s.policy_modal = Overlay::Closed);
        gloo_console::debug!(format!("[policy-modal] closed via {source}"));
    }
}

/// Policy links open the matching `<template>` from the modal library.
pub fn bind_policy_modal(page: &Page) -> Result<(), JsValue> {
    let Some(modal) = PolicyModal::bind() else {
        return Ok(());
    };
    state::with_mut(|s| s.policy_modal = Overlay::from_hidden(modal.layer.hidden()));
    let modal = std::rc::Rc::new(modal);

    {
        let page2 = page.clone();
        let modal = modal.clone();
        dom::listen(&page.document, "click", move |event: Event| {
            if let Some(trigger) = dom::event_closest(&event, "[data-policy-modal-trigger]") {
                event.prevent_default();
                event.stop_propagation();
                let policy = trigger.get_attribute("data-policy").unwrap_or_default();
                modal.open(&page2, &policy);
                return;
            }
            if dom::event_closest(&event, "[data-policy-modal-close]").is_some() {
                event.prevent_default();
                modal.close(&page2, "button");
            }
        })?;
    }

    {
        let page2 = page.clone();
        let modal2 = modal.clone();
        dom::listen(&modal.layer, "click", move |event: Event| {
            if is_self_target(&event, &modal2.layer) {
                modal2.close(&page2, "scrim");
            }
        })?;
    }

    {
        let page2 = page.clone();
        dom::listen(&page.document, "keydown", move |event: Event| {
            if is_escape(&event) && state::with(|s| s.policy_modal.on_escape()).is_some() {
                modal.close(&page2, "escape");
            }
        })?;
    }

    Ok(())
}
