//! Form drafts: in-memory, not-yet-persisted form state.
//!
//! - [`business`] - the business registration form
//! - [`customization`] - the storefront personalization settings

pub mod business;
pub mod customization;

pub use business::{BusinessDraft, BusinessField, CreateNegocioPayload, ValidationError};
pub use customization::{CustomizationDraft, CustomizationField, ImageSlot, OverlayReport};
