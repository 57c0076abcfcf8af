//! AcaClick admin library.
//!
//! Everything an operator needs to register a negocio and personalize its
//! storefront, independent of any rendered UI:
//!
//! - [`api`]: one client for the auth and negocios services
//! - [`drafts`]: registration and customization controllers
//! - [`map`]: map widget lifecycle behind the [`map::MapProvider`] capability
//! - [`media`]: image ingestion into data URLs
//! - [`ui`]: notification and confirmation capabilities
//! - [`routes`]: the preview server

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod drafts;
pub mod error;
pub mod map;
pub mod media;
pub mod routes;
pub mod state;
pub mod ui;
