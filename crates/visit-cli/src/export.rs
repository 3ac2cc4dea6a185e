//! Static hosting export
//!
//! Builds a folder that can be pushed as-is to a static host (Vercel):
//!
//! ```text
//! <out_dir>/
//! ├── index.html    (copy of the discount page)
//! ├── vercel.json   (rewrite every path to /index.html)
//! └── README.md
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};

const README: &str = "# Calculadora de Descuento QR

HTML estático para calcular descuentos del 5%.

## Despliegue en Vercel

Sube el contenido de esta carpeta a un repositorio nuevo y conéctalo a Vercel.
Todas las rutas se reescriben a `index.html`.
";

/// Rewrite config sending every path to the single page
fn vercel_config() -> serde_json::Value {
    serde_json::json!({
        "rewrites": [
            { "source": "/(.*)", "destination": "/index.html" }
        ]
    })
}

/// Copy `source` into `out_dir` as a static bundle and return the written files.
///
/// With `clean`, a previous `out_dir` is removed first; otherwise existing
/// files are overwritten in place.
pub fn export_bundle(source: &Path, out_dir: &Path, clean: bool) -> anyhow::Result<Vec<PathBuf>> {
    if !source.is_file() {
        bail!("source page not found: {}", source.display());
    }

    if clean && out_dir.exists() {
        fs::remove_dir_all(out_dir)
            .with_context(|| format!("could not remove {}", out_dir.display()))?;
        tracing::info!("[OK] Removed previous export {}", out_dir.display());
    }

    fs::create_dir_all(out_dir)
        .with_context(|| format!("could not create {}", out_dir.display()))?;

    let index = out_dir.join("index.html");
    fs::copy(source, &index)
        .with_context(|| format!("could not copy {} to {}", source.display(), index.display()))?;
    tracing::info!("[OK] {} copied as index.html", source.display());

    let vercel = out_dir.join("vercel.json");
    fs::write(&vercel, serde_json::to_string_pretty(&vercel_config())?)
        .with_context(|| format!("could not write {}", vercel.display()))?;
    tracing::info!("[OK] vercel.json written");

    let readme = out_dir.join("README.md");
    fs::write(&readme, README).with_context(|| format!("could not write {}", readme.display()))?;
    tracing::info!("[OK] README.md written");

    Ok(vec![index, vercel, readme])
}
