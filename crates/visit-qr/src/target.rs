//! QR target URLs

use std::fmt;
use std::str::FromStr;

use crate::error::QrError;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Static discount page served next to the visit pages
pub const STATIC_PAGE: &str = "descuento.html";

/// What a generated QR code points at
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QrTarget {
    /// The shared static discount page (no visit is counted)
    #[default]
    StaticPage,

    /// The per-establishment visit page, which counts the scan
    Visit,
}

impl QrTarget {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StaticPage => "static",
            Self::Visit => "visit",
        }
    }

    /// URL encoded in the QR code for `id`
    pub fn url(self, id: &str, base_url: &str) -> String {
        let base = base_url.trim().trim_end_matches('/');

        match self {
            Self::StaticPage if base.is_empty() => format!("./{STATIC_PAGE}"),
            Self::StaticPage => format!("{base}/{STATIC_PAGE}"),
            Self::Visit if base.is_empty() => format!("{DEFAULT_BASE_URL}/{id}"),
            Self::Visit => format!("{base}/{id}"),
        }
    }
}

impl FromStr for QrTarget {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "static" | "static_page" | "html" => Ok(Self::StaticPage),
            "visit" | "dynamic" => Ok(Self::Visit),
            other => Err(QrError::UnknownTarget(other.to_string())),
        }
    }
}

impl fmt::Display for QrTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
