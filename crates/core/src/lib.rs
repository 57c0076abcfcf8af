//! AcaClick Core - Shared domain types.
//!
//! This crate provides the types used across all AcaClick components:
//! - `admin` - API client, draft controllers and preview server
//! - `cli` - Command-line access to the same flows
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients. Anything that talks to the network or the filesystem lives in
//! `acaclick-admin`.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, contact data, locations, colors and images
//! - [`draft`] - The registration and storefront customization drafts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod draft;
pub mod types;

pub use draft::*;
pub use types::*;
