//! Booking form logic for the BiP Repair site.
//!
//! Everything here is host-independent: the browser crate feeds DOM events in and
//! paints the resulting state, tests drive the same engine directly.

pub mod catalog;
pub mod chrome;
pub mod consent;
pub mod deferred;
pub mod payment;
pub mod selection;
pub mod suggest;
pub mod text;
pub mod warnings;

pub use catalog::{Catalog, CatalogError, CatalogSources, Price};
pub use selection::{BrandLock, FormFields, FormState, PriceDisplay, SelectionEngine};
pub use warnings::ServiceWarning;
