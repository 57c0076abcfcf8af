//! Map interaction.
//!
//! The widget itself (Leaflet in the browser) is an external collaborator
//! reached through [`MapProvider`]. [`MapSession`] owns the lifecycle:
//!
//! ```text
//! begin() ──► initialize(container) ──► handle_event()* ──► teardown()
//!   │               │ waits for widget + laid-out container,
//!   │               │ abandons if the page was torn down
//!   └ injects missing CSS/JS
//! ```

mod provider;
mod session;

pub use provider::*;
pub use session::*;
