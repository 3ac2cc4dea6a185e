//! # visit-qr
//!
//! QR code images for establishments.
//!
//! Each establishment gets `<id>.png` in the output directory. The encoded
//! URL depends on the [`QrTarget`]:
//!
//! ```text
//! StaticPage  →  https://example.com/descuento.html
//! Visit       →  https://example.com/rest_001
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use visit_qr::{QrGenerator, QrTarget};
//!
//! let generator = QrGenerator::new("qr_codes");
//! let path = generator.generate("rest_001", "https://example.com", QrTarget::Visit)?;
//! ```

mod error;
mod generator;
mod target;

pub use error::{QrError, Result};
pub use generator::QrGenerator;
pub use target::{QrTarget, DEFAULT_BASE_URL, STATIC_PAGE};
