//! Millet Core
//!
//! Pure, synchronous logic behind the marketplace dashboards:
//! - localized UI strings with English fallback
//! - age-bracket millet recommendations
//! - keyword-based voice command replies in four languages
//! - derived dashboard views (reward totals, product search, cart)
//!
//! Nothing here performs I/O; the client layer feeds it rows it fetched.

pub mod cart;
pub mod dashboard;
pub mod health;
pub mod i18n;
pub mod voice;

pub use cart::{Cart, CartLine};
pub use dashboard::MilletFilter;
pub use health::Recommendation;
pub use voice::Intent;
