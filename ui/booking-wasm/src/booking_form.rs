//! Appointment form controller.
//!
//! Feeds DOM events into the [`SelectionEngine`] and paints what it derives: the service
//! list, brand lock, suggestion dropdowns, price panel, warning, payment note and the
//! consent-gated submit button.

use crate::dom;
use bip_api_types::{ChoiceOption, PaymentMethod};
use bip_booking_core::consent::SubmitGate;
use bip_booking_core::deferred::{BLUR_HIDE_DELAY, HideTicket};
use bip_booking_core::payment;
use bip_booking_core::suggest::SuggestionBox;
use bip_booking_core::{BrandLock, Catalog, CatalogSources, FormFields, SelectionEngine};
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlAnchorElement, HtmlButtonElement, HtmlElement, HtmlFormElement,
    HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
};

/// Configuration carried on `#appointment-form` as data attributes.
pub struct FormDataset {
    pub sources: CatalogSources,
    pub gcash_contact: Option<String>,
}

impl FormDataset {
    pub fn read(form: &HtmlElement) -> FormDataset {
        FormDataset {
            sources: CatalogSources {
                service_map: dom::data(form, "serviceMap"),
                brand_map: dom::data(form, "brandMap"),
                model_map: dom::data(form, "modelMap"),
                service_pricing: dom::data(form, "servicePricing"),
            },
            gcash_contact: dom::data_non_empty(form, "gcashContact"),
        }
    }
}

/// Form controls. Device and service selects are required; the rest are painted when
/// present.
pub struct FormElements {
    pub form: HtmlFormElement,
    pub device: HtmlSelectElement,
    pub service: HtmlSelectElement,
    pub brand: Option<HtmlInputElement>,
    pub model: Option<HtmlInputElement>,
    pub brand_box: Option<HtmlElement>,
    pub model_box: Option<HtmlElement>,
    pub issue: Option<Element>,
    pub warning_box: Option<HtmlElement>,
    pub warning_text: Option<Element>,
    pub price_value: Option<Element>,
    pub payment_note: Option<Element>,
    pub price_field: HtmlInputElement,
    pub gcash_link: Option<HtmlAnchorElement>,
    pub payment_radios: Vec<HtmlInputElement>,
    pub consent: Option<HtmlInputElement>,
    pub submit: Option<HtmlButtonElement>,
}

macro_rules! field {
    ($form:expr, $name:expr) => {
        dom::query_typed_in($form, &format!("[name=\"{}\"]", $name))
    };
}

impl FormElements {
    /// `Ok(None)` when the page has no booking form.
    pub fn bind() -> Result<Option<FormElements>, JsValue> {
        let Some(form) = dom::by_id_typed::<HtmlFormElement>("appointment-form") else {
            return Ok(None);
        };
        let (Some(device), Some(service)): (Option<HtmlSelectElement>, Option<HtmlSelectElement>) = (
            field!(&form, "device_type"),
            field!(&form, "service_type"),
        ) else {
            gloo_console::warn!("appointment form is missing its device or service select");
            return Ok(None);
        };

        let price_field = match field!(&form, "service_price") {
            Some(input) => input,
            None => {
                let input: HtmlInputElement = dom::create_element("input")?.dyn_into()?;
                input.set_type("hidden");
                input.set_name("service_price");
                form.append_child(&input)?;
                input
            }
        };

        let warning_box = dom::by_id_typed::<HtmlElement>("service-warning");
        let warning_text = warning_box.as_ref().and_then(|b| dom::query_in(b, "span"));

        let payment_radios = dom::query_all_in(&form, "input[name=\"payment_method\"]")
            .into_iter()
            .filter_map(|e| e.dyn_into::<HtmlInputElement>().ok())
            .collect();

        let consent = dom::query_typed_in(
            &form,
            "input[type=\"checkbox\"][name=\"accept_booking_policies\"]",
        )
        .or_else(|| dom::query_typed_in(&form, ".policy-checkbox-input"));

        Ok(Some(FormElements {
            brand: field!(&form, "device_brand"),
            model: field!(&form, "brand_model"),
            brand_box: dom::by_id_typed("brand-suggestions"),
            model_box: dom::by_id_typed("model-suggestions"),
            issue: dom::query_in(&form, "[name=\"issue_description\"]"),
            warning_box,
            warning_text,
            price_value: dom::by_id("service-price-value"),
            payment_note: dom::by_id("service-payment-note"),
            price_field,
            gcash_link: dom::by_id_typed("gcash-contact-link"),
            payment_radios,
            consent,
            submit: dom::query_typed_in(&form, "[data-policy-submit]"),
            device,
            service,
            form,
        }))
    }

    fn issue_text(&self) -> String {
        let Some(issue) = &self.issue else {
            return String::new();
        };
        if let Some(area) = issue.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(input) = issue.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else {
            String::new()
        }
    }

    fn checked_payment(&self) -> Option<String> {
        self.payment_radios
            .iter()
            .find(|radio| radio.checked())
            .map(|radio| radio.value())
    }
}

pub struct BookingForm {
    els: FormElements,
    engine: RefCell<SelectionEngine>,
    gcash_contact: Option<String>,
    brand_hide: RefCell<Option<Timeout>>,
    model_hide: RefCell<Option<Timeout>>,
}

impl BookingForm {
    pub fn bind() -> Result<Option<Rc<BookingForm>>, JsValue> {
        let Some(els) = FormElements::bind()? else {
            return Ok(None);
        };

        let dataset = FormDataset::read(&els.form);
        let (catalog, issues) = Catalog::load(&dataset.sources);
        for issue in &issues {
            gloo_console::warn!(format!("booking catalog: {issue}"));
        }

        Ok(Some(Rc::new(BookingForm {
            els,
            engine: RefCell::new(SelectionEngine::new(catalog, BrandLock::default())),
            gcash_contact: dataset.gcash_contact,
            brand_hide: RefCell::new(None),
            model_hide: RefCell::new(None),
        })))
    }

    /// First paint from whatever the server rendered into the fields.
    pub fn mount(&self) -> Result<(), JsValue> {
        let service = self.els.service.value();
        let fields = FormFields {
            device: self.els.device.value(),
            service: (!service.is_empty()).then_some(service),
            brand_text: self.els.brand.as_ref().map(|b| b.value()).unwrap_or_default(),
            model_text: self.els.model.as_ref().map(|m| m.value()).unwrap_or_default(),
        };
        self.engine.borrow_mut().mount(fields);

        self.paint_services()?;
        self.paint_brand_field();
        self.paint_suggestions()?;
        self.paint_price();
        self.paint_payment();
        self.paint_warning();
        self.paint_submit_gate();
        Ok(())
    }

    // ── Painting ──

    fn paint_services(&self) -> Result<(), JsValue> {
        let engine = self.engine.borrow();
        let select = &self.els.service;
        select.set_inner_html("");
        let selected = engine.state().service.as_deref();
        for option in engine.service_options() {
            let el = dom::create_option(
                &option.value,
                &option.label,
                selected == Some(option.value.as_str()),
            )?;
            select.append_child(&el)?;
        }
        if let Some(value) = selected {
            select.set_value(value);
        }
        Ok(())
    }

    fn paint_brand_field(&self) {
        let Some(brand) = &self.els.brand else {
            return;
        };
        let engine = self.engine.borrow();
        let state = engine.state();
        if state.brand_locked {
            brand.set_value(&state.brand_text);
        }
        brand.set_read_only(state.brand_locked);
    }

    fn paint_suggestions(&self) -> Result<(), JsValue> {
        let engine = self.engine.borrow();
        if let Some(el) = &self.els.brand_box {
            paint_box(el, engine.brand_suggestions(), "slug")?;
        }
        if let Some(el) = &self.els.model_box {
            paint_box(el, engine.model_suggestion_box(), "value")?;
        }
        Ok(())
    }

    fn paint_price(&self) {
        let engine = self.engine.borrow();
        let price = engine.price();
        if let Some(el) = &self.els.price_value {
            dom::set_text(el, &price.value_text);
        }
        if let Some(el) = &self.els.payment_note {
            dom::set_text(el, &price.payment_note);
        }
        self.els.price_field.set_value(&price.field_value);
    }

    fn paint_payment(&self) {
        let method = PaymentMethod::from_form_value(self.els.checked_payment().as_deref());
        let widget = payment::payment_widget(method, self.gcash_contact.as_deref());
        if let Some(el) = &self.els.payment_note {
            dom::set_text(el, widget.note);
        }
        if let Some(link) = &self.els.gcash_link {
            link.set_hidden(!widget.contact_link_visible);
            if let Some(href) = &widget.contact_href {
                link.set_href(href);
            }
        }
    }

    fn paint_warning(&self) {
        let Some(warning_box) = &self.els.warning_box else {
            return;
        };
        let warning = self.engine.borrow().evaluate_warning(&self.els.issue_text());
        match warning {
            Some(warning) => {
                if let Some(text) = &self.els.warning_text {
                    dom::set_text(text, warning.message());
                }
                warning_box.set_hidden(false);
            }
            None => warning_box.set_hidden(true),
        }
    }

    fn paint_submit_gate(&self) {
        let Some(button) = &self.els.submit else {
            return;
        };
        let checked = self.els.consent.as_ref().is_some_and(|c| c.checked());
        let gate = SubmitGate::from_consent(checked);

        button.set_disabled(gate.disabled());
        let _ = if gate.disabled() {
            button.set_attribute("disabled", "disabled")
        } else {
            button.remove_attribute("disabled")
        };
        let _ = button.set_attribute("aria-disabled", gate.aria_disabled());
        for (class, present) in gate.classes() {
            dom::toggle_class(button, class, present);
        }
    }

    // ── Blur timers ──

    fn schedule_hide(
        self: &Rc<Self>,
        slot: fn(&BookingForm) -> &RefCell<Option<Timeout>>,
        ticket: HideTicket,
        commit: fn(&mut SelectionEngine, HideTicket) -> bool,
    ) {
        let form = Rc::clone(self);
        let timeout = Timeout::new(BLUR_HIDE_DELAY.as_millis() as u32, move || {
            let due = commit(&mut form.engine.borrow_mut(), ticket);
            if due {
                if let Err(e) = form.paint_suggestions() {
                    gloo_console::error!("suggestion hide failed", e);
                }
            }
        });
        // Replacing the slot drops, and so cancels, an older pending hide.
        *slot(self).borrow_mut() = Some(timeout);
    }
}

fn paint_box(el: &HtmlElement, suggestions: &SuggestionBox, data_key: &str) -> Result<(), JsValue> {
    el.set_inner_html("");
    if !suggestions.is_visible() {
        el.set_hidden(true);
        return Ok(());
    }
    for ChoiceOption { value, label } in suggestions.items() {
        let button: HtmlButtonElement = dom::create_element("button")?.dyn_into()?;
        button.set_type("button");
        button.set_class_name("suggestion-pill");
        button.set_text_content(Some(label.as_str()));
        button.dataset().set(data_key, value)?;
        el.append_child(&button)?;
    }
    el.set_hidden(false);
    Ok(())
}

/// Clicked suggestion button, if the event landed on one.
fn picked_button(event: &Event) -> Option<HtmlButtonElement> {
    dom::event_closest(event, "button.suggestion-pill")?
        .dyn_into::<HtmlButtonElement>()
        .ok()
}

fn report(result: Result<(), JsValue>) {
    if let Err(e) = result {
        gloo_console::error!("booking form paint failed", e);
    }
}

/// Bind all booking form listeners. Call once after [`BookingForm::mount`].
pub fn bind_events(form: &Rc<BookingForm>) -> Result<(), JsValue> {
    let els = &form.els;

    // ── Device / service ──
    {
        let f = Rc::clone(form);
        dom::listen(&els.device, "change", move |_| {
            f.engine.borrow_mut().on_device_change(&f.els.device.value());
            report(f.paint_services());
            f.paint_brand_field();
            report(f.paint_suggestions());
            f.paint_price();
            f.paint_warning();
        })?;
    }
    {
        let f = Rc::clone(form);
        dom::listen(&els.service, "change", move |_| {
            f.engine.borrow_mut().on_service_change(&f.els.service.value());
            f.paint_price();
        })?;
    }

    // ── Brand autocomplete ──
    if let Some(brand) = &els.brand {
        let f = Rc::clone(form);
        let input = brand.clone();
        dom::listen(brand, "input", move |_| {
            f.engine.borrow_mut().on_brand_input(&input.value());
            report(f.paint_suggestions());
        })?;

        let f = Rc::clone(form);
        dom::listen(brand, "focus", move |_| {
            f.brand_hide.borrow_mut().take();
            f.engine.borrow_mut().on_brand_focus();
            report(f.paint_suggestions());
        })?;

        let f = Rc::clone(form);
        dom::listen(brand, "blur", move |_| {
            let ticket = f.engine.borrow_mut().on_brand_blur();
            f.schedule_hide(|b| &b.brand_hide, ticket, SelectionEngine::commit_brand_hide);
        })?;
    }
    if let Some(brand_box) = &els.brand_box {
        let f = Rc::clone(form);
        dom::listen(brand_box, "pointerdown", move |event| {
            let Some(button) = picked_button(&event) else {
                return;
            };
            let Some(label) = button.text_content().filter(|l| !l.is_empty()) else {
                return;
            };
            // Keeps focus in the field, so no blur races the pick.
            event.prevent_default();
            f.brand_hide.borrow_mut().take();
            f.engine.borrow_mut().on_brand_suggestion_pick(&label);
            if let Some(input) = &f.els.brand {
                input.set_value(&f.engine.borrow().state().brand_text);
            }
            report(f.paint_suggestions());
        })?;
    }

    // ── Model autocomplete ──
    if let Some(model) = &els.model {
        let f = Rc::clone(form);
        let input = model.clone();
        dom::listen(model, "input", move |_| {
            f.engine.borrow_mut().on_model_input(&input.value());
            report(f.paint_suggestions());
        })?;

        let f = Rc::clone(form);
        dom::listen(model, "focus", move |_| {
            f.model_hide.borrow_mut().take();
            f.engine.borrow_mut().on_model_focus();
            report(f.paint_suggestions());
        })?;

        let f = Rc::clone(form);
        dom::listen(model, "blur", move |_| {
            let ticket = f.engine.borrow_mut().on_model_blur();
            f.schedule_hide(|b| &b.model_hide, ticket, SelectionEngine::commit_model_hide);
        })?;
    }
    if let Some(model_box) = &els.model_box {
        let f = Rc::clone(form);
        dom::listen(model_box, "pointerdown", move |event| {
            let Some(value) = picked_button(&event).and_then(|b| b.dataset().get("value")) else {
                return;
            };
            event.prevent_default();
            f.model_hide.borrow_mut().take();
            f.engine.borrow_mut().on_model_suggestion_pick(&value);
            if let Some(input) = &f.els.model {
                input.set_value(&value);
            }
            report(f.paint_suggestions());
        })?;
    }

    // ── Warning, payment, consent ──
    if let Some(issue) = &els.issue {
        let f = Rc::clone(form);
        dom::listen(issue, "input", move |_| f.paint_warning())?;
    }
    for radio in &els.payment_radios {
        let f = Rc::clone(form);
        dom::listen(radio, "change", move |_| f.paint_payment())?;
    }
    if let Some(consent) = &els.consent {
        let f = Rc::clone(form);
        dom::listen(consent, "change", move |_| f.paint_submit_gate())?;
    }

    Ok(())
}
