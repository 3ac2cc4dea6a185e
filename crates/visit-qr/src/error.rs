//! QR Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, QrError>;

/// QR generation errors
#[derive(Error, Debug)]
pub enum QrError {
    /// Data does not fit in a QR code
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    /// PNG encoding or writing failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown target name in configuration
    #[error("Unknown QR target: {0}")]
    UnknownTarget(String),
}
