//! Disclaimer and install banners, both remembered in `localStorage`.

use crate::dom::{self, Page};
use crate::state::{self, WebStorage};
use bip_booking_core::chrome;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Event, HtmlElement};

/// Drop banners the visitor already acknowledged; wire the dismiss button on the rest.
pub fn bind_disclaimers(page: &Page) -> Result<(), JsValue> {
    if page.client_authenticated {
        return Ok(());
    }
    let store = WebStorage::open();

    for banner in dom::query_all("[data-disclaimer-banner]") {
        let Ok(banner) = banner.dyn_into::<HtmlElement>() else {
            continue;
        };
        let key = chrome::disclaimer_key(dom::data(&banner, "disclaimerKey").as_deref()).to_owned();
        if chrome::disclaimer_acknowledged(store.as_ref(), &key) {
            banner.remove();
            continue;
        }
        let Some(dismiss) = dom::query_in(&banner, "[data-disclaimer-dismiss]") else {
            continue;
        };
        dom::listen(&dismiss, "click", move |_| {
            chrome::acknowledge_disclaimer(WebStorage::open().as_ref(), &key);
            banner.remove();
        })?;
    }
    Ok(())
}

fn hide_install(banner: &HtmlElement) {
    dom::remove_class(banner, "install-banner--visible");
    banner.set_hidden(true);
}

/// Offer "add to home screen" on phones once the browser says it can.
pub fn bind_install_banner(page: &Page) -> Result<(), JsValue> {
    let Some(banner) = dom::query_typed::<HtmlElement>("[data-install-banner]") else {
        return Ok(());
    };
    let user_agent = page.window.navigator().user_agent().unwrap_or_default();
    if !chrome::is_mobile_user_agent(&user_agent) {
        return Ok(());
    }

    if let Some(copy) = dom::query_in(&banner, "[data-install-copy]") {
        let label = dom::data_non_empty(&banner, "installAppLabel");
        dom::set_text(&copy, &chrome::install_copy(label.as_deref()));
    }

    if let Some(dismiss) = dom::query_in(&banner, "[data-install-dismiss]") {
        let banner2 = banner.clone();
        dom::listen(&dismiss, "click", move |_| {
            hide_install(&banner2);
            chrome::dismiss_install(WebStorage::open().as_ref());
        })?;
    }

    {
        let banner2 = banner.clone();
        let window = page.window.clone();
        dom::listen(&page.window, "beforeinstallprompt", move |event: Event| {
            event.prevent_default();
            if chrome::install_dismissed(WebStorage::open().as_ref()) {
                return;
            }
            state::with_mut(|s| s.install_prompt = Some(event));
            banner2.set_hidden(false);
            let banner3 = banner2.clone();
            let reveal = Closure::once_into_js(move || {
                dom::add_class(&banner3, "install-banner--visible");
            });
            let _ = window.request_animation_frame(reveal.unchecked_ref());
        })?;
    }

    if let Some(trigger) = dom::query_in(&banner, "[data-install-trigger]") {
        dom::listen(&trigger, "click", move |_| {
            let Some(prompt) = state::with_mut(|s| s.install_prompt.take()) else {
                return;
            };
            let banner = banner.clone();
            spawn_local(async move {
                match replay_install_prompt(&prompt).await {
                    Ok(true) => {
                        chrome::dismiss_install(WebStorage::open().as_ref());
                        hide_install(&banner);
                    }
                    Ok(false) => {}
                    Err(e) => gloo_console::error!("[install] prompt failed", e),
                }
            });
        })?;
    }

    Ok(())
}

/// Calls `prompt()` on the captured event and waits for `userChoice`. True when accepted.
async fn replay_install_prompt(event: &Event) -> Result<bool, JsValue> {
    let prompt: Function = Reflect::get(event, &JsValue::from_str("prompt"))?.dyn_into()?;
    prompt.call0(event)?;

    let choice: Promise = Reflect::get(event, &JsValue::from_str("userChoice"))?.dyn_into()?;
    let result = JsFuture::from(choice).await?;
    let outcome = Reflect::get(&result, &JsValue::from_str("outcome"))?;
    Ok(outcome.as_string().as_deref() == Some("accepted"))
}
