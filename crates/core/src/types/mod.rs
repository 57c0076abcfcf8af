//! Core types for AcaClick.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod contact;
pub mod id;
pub mod image;
pub mod location;
pub mod schedule;
pub mod style;

pub use category::{BusinessCategory, CategoryError};
pub use contact::{Email, EmailError};
pub use id::*;
pub use image::{EncodedImage, ImageError, ImageFormat};
pub use location::{Location, LocationError};
pub use schedule::{TimeOfDay, TimeOfDayError};
pub use style::{
    BACKGROUND_PALETTE, ColorError, FontFamily, HexColor, PRIMARY_PALETTE, TextSize,
};
