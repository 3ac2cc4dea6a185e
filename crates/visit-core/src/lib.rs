//! # visit-core
//!
//! Visit counting and discount math for restaurants and shops reached
//! through scanned QR codes.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────┐    ┌────────────────┐    ┌──────────────┐    ┌──────────────┐
//! │  QR scan │───▶│ Establishments │───▶│  VisitStore  │───▶│   Discount   │
//! │  (GET)   │    │  (allow-list)  │    │ (+1 visit)   │    │  (flat 5%)   │
//! └──────────┘    └────────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! ## Example: purchase of $100
//!
//! ```text
//! original  $100.00
//! discount  $  5.00  (5%)
//! total     $ 95.00
//! ```

pub mod error;
pub mod discount;
pub mod establishment;
pub mod store;

pub use discount::{DiscountResult, DISCOUNT_PERCENT};
pub use error::{ConfigError, Result, StoreError};
pub use establishment::Establishments;
pub use store::{JsonFileStore, StoreDocument, VisitRecord, VisitStore};
