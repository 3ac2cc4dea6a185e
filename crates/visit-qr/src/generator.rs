//! QR Generator
//!
//! Renders one PNG per establishment. Blocking (CPU + file I/O); async
//! callers should run it on a blocking thread.

use std::path::{Path, PathBuf};

use image::Luma;
use qrcode::{EcLevel, QrCode};
use visit_core::Establishments;

use crate::error::Result;
use crate::target::QrTarget;

/// Pixels per QR module
const MODULE_PX: u32 = 10;

/// Writes `<id>.png` QR images into an output directory
#[derive(Clone, Debug)]
pub struct QrGenerator {
    output_dir: PathBuf,
}

impl QrGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path the image for `id` is written to
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.output_dir.join(format!("{id}.png"))
    }

    /// Encode the target URL for `id` and write it as `<id>.png`.
    ///
    /// Overwrites any previous image for the same id.
    pub fn generate(&self, id: &str, base_url: &str, target: QrTarget) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let url = target.url(id, base_url);
        let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::L)?;

        let rendered = code
            .render::<Luma<u8>>()
            .dark_color(Luma([0]))
            .light_color(Luma([255]))
            .quiet_zone(true)
            .module_dimensions(MODULE_PX, MODULE_PX)
            .build();

        let path = self.path_for(id);
        rendered.save(&path)?;

        tracing::debug!(establishment = id, %url, path = %path.display(), "QR generated");
        Ok(path)
    }

    /// Generate a QR for every establishment.
    ///
    /// Failures are logged and skipped; the returned paths are the
    /// successful ones, in list order.
    pub fn generate_all(
        &self,
        establishments: &Establishments,
        base_url: &str,
        target: QrTarget,
    ) -> Vec<PathBuf> {
        let mut generated = Vec::with_capacity(establishments.len());

        for id in establishments.iter() {
            match self.generate(id, base_url, target) {
                Ok(path) => {
                    tracing::info!("✓ QR generated for {}: {}", id, path.display());
                    generated.push(path);
                }
                Err(e) => {
                    tracing::warn!("✗ QR generation failed for {}: {}", id, e);
                }
            }
        }

        generated
    }
}
