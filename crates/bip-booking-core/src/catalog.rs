//! Lookup tables supplied by the host page.
//!
//! The four tables arrive as JSON strings in data attributes on the booking form. They
//! are parsed once here and every table fails closed on its own: a missing or broken
//! table becomes empty and the problem is reported back to the caller, the other tables
//! still load.

use crate::text;
use bip_api_types::ChoiceOption;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::warn;

pub type ServiceMap = HashMap<String, Vec<ChoiceOption>>;
pub type BrandMap = HashMap<String, Vec<ChoiceOption>>;
pub type ModelMap = HashMap<String, HashMap<String, Vec<String>>>;
pub type PricingMap = HashMap<String, HashMap<String, Price>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogTable {
    Services,
    Brands,
    Models,
    Pricing,
}

impl fmt::Display for CatalogTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CatalogTable::Services => "service map",
            CatalogTable::Brands => "brand map",
            CatalogTable::Models => "model map",
            CatalogTable::Pricing => "service pricing",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{table} not supplied by the host page")]
    Missing { table: CatalogTable },
    #[error("{table} is not valid JSON: {source}")]
    Parse {
        table: CatalogTable,
        #[source]
        source: serde_json::Error,
    },
    #[error("{table} entry {device}/{key} dropped: {reason}")]
    Rejected {
        table: CatalogTable,
        device: String,
        key: String,
        reason: &'static str,
    },
}

/// Price in pesos as published by the server. Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    pub fn new(amount: f64) -> Option<Self> {
        (amount.is_finite() && amount >= 0.0).then_some(Self(amount))
    }

    /// Zero counts as "no price", same as an absent entry.
    pub fn is_set(self) -> bool {
        self.0 > 0.0
    }

    /// `₱1,500`. Fractions round half away from zero.
    pub fn display(self) -> String {
        text::format_php(self.0.round())
    }

    /// Raw value for the hidden `service_price` field: `1500`, or `1499.5`.
    pub fn field_value(self) -> String {
        self.0.to_string()
    }
}

/// Raw JSON strings as read from the form's data attributes.
#[derive(Debug, Clone, Default)]
pub struct CatalogSources {
    pub service_map: Option<String>,
    pub brand_map: Option<String>,
    pub model_map: Option<String>,
    pub service_pricing: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    services: ServiceMap,
    brands: BrandMap,
    models: ModelMap,
    pricing: PricingMap,
}

impl Catalog {
    /// Parse and validate every table. Never fails: broken tables load empty and the
    /// reasons come back alongside the catalog.
    pub fn load(sources: &CatalogSources) -> (Self, Vec<CatalogError>) {
        let mut issues = Vec::new();

        let mut services: ServiceMap =
            parse_table(CatalogTable::Services, sources.service_map.as_deref(), &mut issues);
        dedupe_services(&mut services, &mut issues);

        let brands: BrandMap = parse_table(CatalogTable::Brands, sources.brand_map.as_deref(), &mut issues);
        let models: ModelMap = parse_table(CatalogTable::Models, sources.model_map.as_deref(), &mut issues);

        let raw_pricing: HashMap<String, HashMap<String, f64>> =
            parse_table(CatalogTable::Pricing, sources.service_pricing.as_deref(), &mut issues);
        let pricing = validate_pricing(raw_pricing, &mut issues);

        for issue in &issues {
            warn!("booking catalog: {issue}");
        }

        let catalog = Self {
            services,
            brands,
            models,
            pricing,
        };
        (catalog, issues)
    }

    pub fn services_for(&self, device: &str) -> &[ChoiceOption] {
        self.services.get(device).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn brands_for(&self, device: &str) -> &[ChoiceOption] {
        self.brands.get(device).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn models_for(&self, device: &str, brand_slug: &str) -> &[String] {
        self.models
            .get(device)
            .and_then(|brands| brands.get(brand_slug))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn price_for(&self, device: &str, service: &str) -> Option<Price> {
        self.pricing.get(device).and_then(|prices| prices.get(service)).copied()
    }

    /// Device keys known to every table.
    pub fn complete_devices(&self) -> Vec<&str> {
        let mut devices: Vec<&str> = self
            .services
            .keys()
            .filter(|device| {
                self.brands.contains_key(*device)
                    && self.models.contains_key(*device)
                    && self.pricing.contains_key(*device)
            })
            .map(String::as_str)
            .collect();
        devices.sort_unstable();
        devices
    }
}

fn parse_table<T>(table: CatalogTable, raw: Option<&str>, issues: &mut Vec<CatalogError>) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
        issues.push(CatalogError::Missing { table });
        return T::default();
    };

    match serde_json::from_str(raw) {
        Ok(parsed) => parsed,
        Err(source) => {
            issues.push(CatalogError::Parse { table, source });
            T::default()
        }
    }
}

fn dedupe_services(services: &mut ServiceMap, issues: &mut Vec<CatalogError>) {
    for (device, options) in services.iter_mut() {
        let mut seen = HashSet::new();
        options.retain(|option| {
            if seen.insert(option.value.clone()) {
                return true;
            }
            issues.push(CatalogError::Rejected {
                table: CatalogTable::Services,
                device: device.clone(),
                key: option.value.clone(),
                reason: "duplicate service value",
            });
            false
        });
    }
}

fn validate_pricing(
    raw: HashMap<String, HashMap<String, f64>>,
    issues: &mut Vec<CatalogError>,
) -> PricingMap {
    raw.into_iter()
        .map(|(device, prices)| {
            let valid = prices
                .into_iter()
                .filter_map(|(service, amount)| match Price::new(amount) {
                    Some(price) => Some((service, price)),
                    None => {
                        issues.push(CatalogError::Rejected {
                            table: CatalogTable::Pricing,
                            device: device.clone(),
                            key: service,
                            reason: "price must be a non-negative number",
                        });
                        None
                    }
                })
                .collect();
            (device, valid)
        })
        .collect()
}
