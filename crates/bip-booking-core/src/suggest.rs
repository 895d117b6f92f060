//! Autocomplete filtering for the brand and model fields.

use crate::text::normalize;
use bip_api_types::ChoiceOption;

pub const BRAND_SUGGESTION_LIMIT: usize = 6;
pub const MODEL_SUGGESTION_LIMIT: usize = 8;

/// Rendered state of one suggestion dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionBox {
    items: Vec<ChoiceOption>,
    visible: bool,
}

impl SuggestionBox {
    /// Show `items`, or hide the box when there is nothing to offer.
    pub fn show(&mut self, items: Vec<ChoiceOption>) {
        self.visible = !items.is_empty();
        self.items = items;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn items(&self) -> &[ChoiceOption] {
        &self.items
    }
}

/// Brands whose normalized label or value contains the normalized query, in table order.
/// An empty query keeps every brand.
pub fn filter_brands(options: &[ChoiceOption], query: &str) -> Vec<ChoiceOption> {
    let needle = normalize(query);
    options
        .iter()
        .filter(|option| {
            needle.is_empty()
                || normalize(&option.label).contains(&needle)
                || normalize(&option.value).contains(&needle)
        })
        .take(BRAND_SUGGESTION_LIMIT)
        .cloned()
        .collect()
}

/// Case-insensitive substring match over model names, in source order.
pub fn filter_models(models: &[String], query: &str) -> Vec<String> {
    let needle = query.to_lowercase();
    models
        .iter()
        .filter(|model| model.to_lowercase().contains(&needle))
        .take(MODEL_SUGGESTION_LIMIT)
        .cloned()
        .collect()
}

/// Exact match on normalized value or label first, then substring containment.
pub fn resolve_brand<'a>(options: &'a [ChoiceOption], text: &str) -> Option<&'a ChoiceOption> {
    let needle = normalize(text);
    if needle.is_empty() {
        return None;
    }

    options
        .iter()
        .find(|option| normalize(&option.value) == needle || normalize(&option.label) == needle)
        .or_else(|| {
            options.iter().find(|option| {
                normalize(&option.label).contains(&needle) || normalize(&option.value).contains(&needle)
            })
        })
}
