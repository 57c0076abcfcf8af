//! Draft controllers.
//!
//! Each controller owns one draft for as long as its form is open, applies
//! operator edits to it, and reports outcomes through the injected
//! [`NotificationSink`](crate::ui::NotificationSink).

mod customization;
mod preview;
mod registration;

pub use customization::*;
pub use preview::*;
pub use registration::*;
