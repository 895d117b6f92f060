//! BiP Repair browser frontend.
//!
//! Binds the booking form, the support thread and the page chrome to the DOM. All
//! decisions are made by `bip-booking-core` and `bip-thread-sync`; this crate reads the
//! page, forwards events and paints results.

pub mod api;
pub mod banners;
pub mod booking_form;
pub mod chrome;
pub mod dom;
pub mod state;
pub mod thread_view;
pub mod widgets;

use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init()
}

fn init() -> Result<(), JsValue> {
    let page = dom::Page::bind()?;

    chrome::bind_gate(&page)?;
    banners::bind_disclaimers(&page)?;
    banners::bind_install_banner(&page)?;
    widgets::start_live_clock()?;
    widgets::enhance_password_fields()?;
    chrome::bind_policy_modal(&page)?;

    if let Some(form) = booking_form::BookingForm::bind()? {
        form.mount()?;
        booking_form::bind_events(&form)?;
    }

    if let Some(thread) = thread_view::ThreadPage::bind() {
        thread_view::start(&page, thread)?;
    }

    Ok(())
}
