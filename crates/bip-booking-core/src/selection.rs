//! Cascading selection over the booking form.
//!
//! Device drives the service list and the brand options, the brand drives the model
//! suggestions, device + service drive the price. The engine owns the form state and
//! recomputes every derived field deterministically from it; the host only forwards
//! events and paints whatever the getters return.

use crate::catalog::{Catalog, Price};
use crate::deferred::{DeferredHide, HideTicket};
use crate::suggest::{self, SuggestionBox};
use crate::warnings::{self, ServiceWarning};
use bip_api_types::ChoiceOption;
use tracing::debug;

pub const PRICE_PLACEHOLDER: &str = "Select a service to preview cost";
pub const PAYMENT_NOTE_BASE: &str = "Payment through cash or GCash after onsite diagnostics.";

/// Device type whose brand is fixed, and what it is fixed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandLock {
    pub device: String,
    pub slug: String,
    pub label: String,
}

impl Default for BrandLock {
    fn default() -> Self {
        Self {
            device: "iphone".to_owned(),
            slug: "apple".to_owned(),
            label: "Apple".to_owned(),
        }
    }
}

impl BrandLock {
    pub fn applies_to(&self, device: &str) -> bool {
        self.device == device
    }
}

/// Field values present in the form when the page loads.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pub device: String,
    pub service: Option<String>,
    pub brand_text: String,
    pub model_text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub device: String,
    pub service: Option<String>,
    pub brand_text: String,
    pub model_text: String,
    pub brand_locked: bool,
    brand_options: Vec<ChoiceOption>,
    model_suggestions: Vec<String>,
}

impl FormState {
    /// Cached `BrandMap[device]`.
    pub fn brand_options(&self) -> &[ChoiceOption] {
        &self.brand_options
    }

    /// Cached `ModelMap[device][resolved brand]`.
    pub fn model_suggestions(&self) -> &[String] {
        &self.model_suggestions
    }
}

/// What the price panel, payment note and hidden `service_price` field show.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceDisplay {
    pub amount: Option<Price>,
    pub value_text: String,
    pub payment_note: String,
    pub field_value: String,
}

impl PriceDisplay {
    fn unset() -> Self {
        Self {
            amount: None,
            value_text: PRICE_PLACEHOLDER.to_owned(),
            payment_note: PAYMENT_NOTE_BASE.to_owned(),
            field_value: String::new(),
        }
    }

    fn priced(price: Price) -> Self {
        let formatted = price.display();
        Self {
            amount: Some(price),
            payment_note: format!("{PAYMENT_NOTE_BASE} Estimated total: {formatted}."),
            value_text: formatted,
            field_value: price.field_value(),
        }
    }
}

#[derive(Debug)]
pub struct SelectionEngine {
    catalog: Catalog,
    lock: BrandLock,
    state: FormState,
    service_options: Vec<ChoiceOption>,
    price: PriceDisplay,
    brand_box: SuggestionBox,
    model_box: SuggestionBox,
    brand_hide: DeferredHide,
    model_hide: DeferredHide,
}

impl SelectionEngine {
    pub fn new(catalog: Catalog, lock: BrandLock) -> Self {
        Self {
            catalog,
            lock,
            state: FormState::default(),
            service_options: Vec::new(),
            price: PriceDisplay::unset(),
            brand_box: SuggestionBox::default(),
            model_box: SuggestionBox::default(),
            brand_hide: DeferredHide::default(),
            model_hide: DeferredHide::default(),
        }
    }

    /// Initial render from the server-rendered field values. Unlike a device change, a
    /// pre-selected service survives when it belongs to the device's list, so a form
    /// bounced back by validation keeps the visitor's choice.
    pub fn mount(&mut self, fields: FormFields) {
        self.state.brand_text = fields.brand_text;
        self.state.model_text = fields.model_text;
        self.on_device_change(&fields.device);
        if let Some(service) = fields.service {
            if self.service_options.iter().any(|option| option.value == service) {
                self.state.service = Some(service);
                self.recompute_price();
            }
        }
    }

    pub fn on_device_change(&mut self, device: &str) {
        debug!(device, "device changed");
        self.state.device = device.to_owned();

        self.service_options = self.catalog.services_for(device).to_vec();
        self.state.service = self.service_options.first().map(|option| option.value.clone());
        self.recompute_price();

        self.state.brand_locked = self.lock.applies_to(device);
        if self.state.brand_locked {
            self.state.brand_text = self.lock.label.clone();
            self.brand_box.hide();
        }
        self.state.brand_options = self.catalog.brands_for(device).to_vec();
        self.refresh_brand_box();
        self.resolve_model_suggestions();
    }

    /// Select `value` if the current device offers it, then reprice.
    pub fn on_service_change(&mut self, value: &str) {
        if self.service_options.iter().any(|option| option.value == value) {
            self.state.service = Some(value.to_owned());
        } else {
            debug!(service = value, device = %self.state.device, "ignoring service outside current list");
        }
        self.recompute_price();
    }

    pub fn recompute_price(&mut self) {
        let price = self
            .state
            .service
            .as_deref()
            .and_then(|service| self.catalog.price_for(&self.state.device, service))
            .filter(|price| price.is_set());

        self.price = match price {
            Some(price) => PriceDisplay::priced(price),
            None => PriceDisplay::unset(),
        };
    }

    pub fn resolve_brand_slug(&self, text: &str) -> Option<&str> {
        suggest::resolve_brand(&self.state.brand_options, text).map(|option| option.value.as_str())
    }

    pub fn on_brand_input(&mut self, text: &str) {
        if self.state.brand_locked {
            return;
        }
        self.state.brand_text = text.to_owned();
        self.refresh_brand_box();
        self.resolve_model_suggestions();
    }

    pub fn on_brand_focus(&mut self) {
        self.brand_hide.revoke();
        self.refresh_brand_box();
    }

    pub fn on_brand_suggestion_pick(&mut self, label: &str) {
        self.brand_hide.revoke();
        self.brand_box.hide();
        if self.state.brand_locked {
            return;
        }
        self.state.brand_text = label.to_owned();
        self.resolve_model_suggestions();
    }

    pub fn on_brand_blur(&mut self) -> HideTicket {
        self.brand_hide.arm()
    }

    /// Deferred half of the blur hide. False when a pick or refocus got there first.
    pub fn commit_brand_hide(&mut self, ticket: HideTicket) -> bool {
        let due = self.brand_hide.commit(ticket);
        if due {
            self.brand_box.hide();
        }
        due
    }

    /// Brand slug used for model suggestions: the lock, then the typed brand, then the
    /// first brand the device offers.
    pub fn model_brand_slug(&self) -> Option<&str> {
        if self.state.brand_locked {
            return Some(self.lock.slug.as_str());
        }
        self.resolve_brand_slug(&self.state.brand_text).or_else(|| {
            self.state
                .brand_options
                .first()
                .map(|option| option.value.as_str())
        })
    }

    pub fn resolve_model_suggestions(&mut self) {
        let suggestions = match self.model_brand_slug() {
            Some(slug) => self.catalog.models_for(&self.state.device, slug).to_vec(),
            None => Vec::new(),
        };
        self.state.model_suggestions = suggestions;
        self.refresh_model_box();
    }

    pub fn on_model_input(&mut self, text: &str) {
        self.state.model_text = text.to_owned();
        self.refresh_model_box();
    }

    pub fn on_model_focus(&mut self) {
        self.model_hide.revoke();
        self.refresh_model_box();
    }

    pub fn on_model_suggestion_pick(&mut self, value: &str) {
        self.model_hide.revoke();
        self.state.model_text = value.to_owned();
        self.model_box.hide();
    }

    pub fn on_model_blur(&mut self) -> HideTicket {
        self.model_hide.arm()
    }

    pub fn commit_model_hide(&mut self, ticket: HideTicket) -> bool {
        let due = self.model_hide.commit(ticket);
        if due {
            self.model_box.hide();
        }
        due
    }

    pub fn evaluate_warning(&self, issue_description: &str) -> Option<ServiceWarning> {
        warnings::evaluate(&self.state.device, issue_description, &self.lock)
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn service_options(&self) -> &[ChoiceOption] {
        &self.service_options
    }

    pub fn price(&self) -> &PriceDisplay {
        &self.price
    }

    pub fn brand_suggestions(&self) -> &SuggestionBox {
        &self.brand_box
    }

    pub fn model_suggestion_box(&self) -> &SuggestionBox {
        &self.model_box
    }

    fn refresh_brand_box(&mut self) {
        if self.state.brand_locked {
            self.brand_box.hide();
            return;
        }
        let filtered = suggest::filter_brands(&self.state.brand_options, &self.state.brand_text);
        self.brand_box.show(filtered);
    }

    fn refresh_model_box(&mut self) {
        let filtered = suggest::filter_models(&self.state.model_suggestions, &self.state.model_text)
            .into_iter()
            .map(|model| ChoiceOption::new(model.clone(), model))
            .collect();
        self.model_box.show(filtered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSources;

    fn engine() -> SelectionEngine {
        let sources = CatalogSources {
            service_map: Some(
                r#"{
                    "android": [{"value": "screen_repair", "label": "Screen repair"},
                                {"value": "back_cover", "label": "Back cover replacement"}],
                    "iphone": [{"value": "lcd", "label": "LCD replacement"}],
                    "laptop": [{"value": "fan", "label": "Fan replacement"}]
                }"#
                .to_owned(),
            ),
            brand_map: Some(
                r#"{
                    "android": [{"value": "samsung", "label": "Samsung"},
                                {"value": "google", "label": "Google Pixel"}],
                    "iphone": [{"value": "apple", "label": "Apple"}],
                    "laptop": [{"value": "acer", "label": "Acer"}]
                }"#
                .to_owned(),
            ),
            model_map: Some(
                r#"{
                    "android": {"samsung": ["Galaxy S24", "Galaxy A55"], "google": ["Pixel 8", "Pixel 8a"]},
                    "iphone": {"apple": ["iPhone 15", "iPhone 13 mini"]},
                    "laptop": {"acer": ["Aspire 5"]}
                }"#
                .to_owned(),
            ),
            service_pricing: Some(
                r#"{
                    "android": {"screen_repair": 1500, "back_cover": 0},
                    "iphone": {"lcd": 800},
                    "laptop": {}
                }"#
                .to_owned(),
            ),
        };
        let (catalog, issues) = Catalog::load(&sources);
        assert!(issues.is_empty(), "fixture should load cleanly: {issues:?}");
        SelectionEngine::new(catalog, BrandLock::default())
    }

    fn labels(suggestions: &SuggestionBox) -> Vec<&str> {
        suggestions.items().iter().map(|item| item.label.as_str()).collect()
    }

    #[test]
    fn android_screen_repair_price() {
        let mut engine = engine();
        engine.on_device_change("android");

        assert_eq!(engine.state().service.as_deref(), Some("screen_repair"));
        let price = engine.price();
        assert_eq!(price.value_text, "\u{20b1}1,500");
        assert_eq!(price.field_value, "1500");
        assert_eq!(
            price.payment_note,
            "Payment through cash or GCash after onsite diagnostics. Estimated total: \u{20b1}1,500."
        );
    }

    #[test]
    fn zero_or_missing_price_shows_placeholder() {
        let mut engine = engine();
        engine.on_device_change("android");
        engine.on_service_change("back_cover");
        assert_eq!(engine.price().amount, None);
        assert_eq!(engine.price().value_text, PRICE_PLACEHOLDER);
        assert_eq!(engine.price().field_value, "");

        engine.on_device_change("laptop");
        assert_eq!(engine.state().service.as_deref(), Some("fan"));
        assert_eq!(engine.price().field_value, "");
    }

    #[test]
    fn device_change_resets_service_to_new_list() {
        let mut engine = engine();
        engine.on_device_change("android");
        engine.on_service_change("back_cover");
        engine.on_device_change("iphone");

        assert_eq!(engine.state().service.as_deref(), Some("lcd"));
        let values: Vec<&str> = engine
            .service_options()
            .iter()
            .map(|option| option.value.as_str())
            .collect();
        assert_eq!(values, vec!["lcd"]);

        engine.on_service_change("back_cover");
        assert_eq!(engine.state().service.as_deref(), Some("lcd"));
    }

    #[test]
    fn unknown_device_degrades_to_empty_lists() {
        let mut engine = engine();
        engine.on_device_change("tablet");
        assert!(engine.service_options().is_empty());
        assert_eq!(engine.state().service, None);
        assert!(engine.state().brand_options().is_empty());
        assert!(engine.state().model_suggestions().is_empty());
        assert!(!engine.brand_suggestions().is_visible());
        assert_eq!(engine.price().value_text, PRICE_PLACEHOLDER);
    }

    #[test]
    fn iphone_locks_brand_and_uses_apple_models() {
        let mut engine = engine();
        engine.on_device_change("iphone");

        assert!(engine.state().brand_locked);
        assert_eq!(engine.state().brand_text, "Apple");
        assert!(!engine.brand_suggestions().is_visible());
        assert_eq!(engine.model_brand_slug(), Some("apple"));
        assert_eq!(engine.state().model_suggestions(), ["iPhone 15", "iPhone 13 mini"]);

        engine.on_brand_input("Samsung");
        assert_eq!(engine.state().brand_text, "Apple");
        engine.on_brand_focus();
        assert!(!engine.brand_suggestions().is_visible());

        engine.on_device_change("android");
        assert!(!engine.state().brand_locked);
    }

    #[test]
    fn brand_text_drives_model_suggestions() {
        let mut engine = engine();
        engine.on_device_change("android");
        assert_eq!(engine.model_brand_slug(), Some("samsung"));

        engine.on_brand_input("pixel");
        assert_eq!(engine.model_brand_slug(), Some("google"));
        assert_eq!(labels(engine.brand_suggestions()), vec!["Google Pixel"]);
        assert_eq!(labels(engine.model_suggestion_box()), vec!["Pixel 8", "Pixel 8a"]);

        engine.on_model_input("8A");
        assert_eq!(labels(engine.model_suggestion_box()), vec!["Pixel 8a"]);

        engine.on_model_input("galaxy");
        assert!(!engine.model_suggestion_box().is_visible());

        engine.on_brand_input("nokia");
        assert!(!engine.brand_suggestions().is_visible());
        assert_eq!(engine.model_brand_slug(), Some("samsung"));
    }

    #[test]
    fn brand_pick_commits_label_and_hides() {
        let mut engine = engine();
        engine.on_device_change("android");
        engine.on_brand_input("g");
        assert!(engine.brand_suggestions().is_visible());

        engine.on_brand_suggestion_pick("Google Pixel");
        assert_eq!(engine.state().brand_text, "Google Pixel");
        assert!(!engine.brand_suggestions().is_visible());
        assert_eq!(engine.state().model_suggestions(), ["Pixel 8", "Pixel 8a"]);
    }

    #[test]
    fn pick_beats_pending_blur_hide() {
        let mut engine = engine();
        engine.on_device_change("android");
        engine.on_model_focus();
        assert!(engine.model_suggestion_box().is_visible());

        let ticket = engine.on_model_blur();
        engine.on_model_suggestion_pick("Galaxy A55");
        assert!(!engine.commit_model_hide(ticket));
        assert_eq!(engine.state().model_text, "Galaxy A55");

        engine.on_brand_focus();
        assert!(engine.brand_suggestions().is_visible());
        let ticket = engine.on_brand_blur();
        assert!(engine.commit_brand_hide(ticket));
        assert!(!engine.brand_suggestions().is_visible());
    }

    #[test]
    fn refocus_revokes_pending_hide() {
        let mut engine = engine();
        engine.on_device_change("android");
        let ticket = engine.on_brand_blur();
        engine.on_brand_focus();
        assert!(!engine.commit_brand_hide(ticket));
        assert!(engine.brand_suggestions().is_visible());
    }

    #[test]
    fn mount_keeps_valid_preselected_service() {
        let mut engine = engine();
        engine.mount(FormFields {
            device: "android".to_owned(),
            service: Some("back_cover".to_owned()),
            brand_text: "Google Pixel".to_owned(),
            model_text: "Pixel".to_owned(),
        });
        assert_eq!(engine.state().service.as_deref(), Some("back_cover"));
        assert_eq!(engine.model_brand_slug(), Some("google"));

        let mut engine = self::engine();
        engine.mount(FormFields {
            device: "iphone".to_owned(),
            service: Some("screen_repair".to_owned()),
            ..FormFields::default()
        });
        assert_eq!(engine.state().service.as_deref(), Some("lcd"));
        assert_eq!(engine.price().field_value, "800");
    }

    #[test]
    fn warning_uses_current_device() {
        let mut engine = engine();
        engine.on_device_change("iphone");
        assert_eq!(
            engine.evaluate_warning("need battery replacement"),
            Some(ServiceWarning::BatteryDeclined)
        );
        engine.on_device_change("android");
        assert_eq!(engine.evaluate_warning("need battery replacement"), None);
    }
}
