//! Password visibility toggles and the live Manila clock.

use crate::dom;
use crate::state;
use bip_booking_core::chrome::PasswordMask;
use gloo_timers::callback::Interval;
use js_sys::{Array, Date, Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlButtonElement, HtmlElement, HtmlInputElement, Node};

const CLOCK_LOCALE: &str = "en-PH";
const CLOCK_TIME_ZONE: &str = "Asia/Manila";
const CLOCK_PERIOD_MS: u32 = 1_000;

/// Wrap every password input once with a Show/Hide button.
pub fn enhance_password_fields() -> Result<(), JsValue> {
    for input in dom::query_all("input[type=\"password\"]") {
        let Ok(input) = input.dyn_into::<HtmlInputElement>() else {
            continue;
        };
        if dom::data(&input, "passwordEnhanced").as_deref() == Some("true") {
            continue;
        }
        let Some(parent) = input.parent_element() else {
            continue;
        };

        let mut mask = PasswordMask::default();
        let wrapper = dom::create_html("div", "password-wrapper")?;
        let toggle: HtmlButtonElement = dom::create_element("button")?.dyn_into()?;
        toggle.set_type("button");
        toggle.set_class_name("password-toggle ghost");
        toggle.set_attribute("aria-label", mask.aria_label())?;
        toggle.set_text_content(Some(mask.button_text()));

        let anchor: &Node = &input;
        parent.insert_before(&wrapper, Some(anchor))?;
        wrapper.append_child(&input)?;
        wrapper.append_child(&toggle)?;
        input.dataset().set("passwordEnhanced", "true")?;

        let button = toggle.clone();
        dom::listen(&toggle, "click", move |_| {
            mask.toggle();
            input.set_type(mask.input_type());
            button.set_text_content(Some(mask.button_text()));
            let _ = button.set_attribute("aria-label", mask.aria_label());
        })?;
    }
    Ok(())
}

fn manila_formatter() -> Result<Function, JsValue> {
    let locales = Array::of1(&JsValue::from_str(CLOCK_LOCALE));
    let options = Object::new();
    Reflect::set(&options, &"timeZone".into(), &CLOCK_TIME_ZONE.into())?;
    Reflect::set(&options, &"dateStyle".into(), &"medium".into())?;
    Reflect::set(&options, &"timeStyle".into(), &"medium".into())?;
    Ok(js_sys::Intl::DateTimeFormat::new(&locales, &options).format())
}

fn render_clock(targets: &[HtmlElement], format: &Function) {
    let now = format
        .call1(&JsValue::NULL, &Date::new_0())
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    for target in targets {
        target.set_text_content(Some(&now));
        // Reading layout between remove and add restarts the CSS animation.
        dom::remove_class(target, "clock-tick");
        let _ = target.offset_width();
        dom::add_class(target, "clock-tick");
    }
}

pub fn start_live_clock() -> Result<(), JsValue> {
    let targets: Vec<HtmlElement> = dom::query_all("[data-live-clock]")
        .into_iter()
        .filter_map(|e| e.dyn_into().ok())
        .collect();
    if targets.is_empty() {
        return Ok(());
    }

    let format = manila_formatter()?;
    render_clock(&targets, &format);
    let interval = Interval::new(CLOCK_PERIOD_MS, move || render_clock(&targets, &format));
    state::with_mut(|s| s.clock = Some(interval));
    Ok(())
}
