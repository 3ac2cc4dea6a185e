//! Offline tooling for QR descuentos
//!
//! - `generate-qr`: write the QR image of every establishment
//! - `export`: build the static hosting bundle for the discount page

mod export;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use visit_core::Establishments;
use visit_qr::{QrGenerator, QrTarget, DEFAULT_BASE_URL};

#[derive(Parser)]
#[command(name = "visit-cli")]
#[command(about = "QR generation and static export for QR descuentos", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate QR images for every establishment
    GenerateQr {
        /// Public base URL encoded in the codes
        #[arg(long, env = "BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Output directory for the PNG files
        #[arg(short, long, env = "QR_CODES_DIR", default_value = "qr_codes")]
        out: PathBuf,

        /// What the codes point at: `static` or `visit`
        #[arg(long, env = "QR_TARGET", default_value = "static")]
        target: QrTarget,

        /// Comma-separated establishment ids (defaults to the built-in list)
        #[arg(long, env = "ESTABLISHMENTS")]
        establishments: Option<Establishments>,
    },

    /// Build a static hosting bundle (index.html, vercel.json, README.md)
    Export {
        /// Static discount page to publish
        #[arg(short, long, default_value = "static/descuento.html")]
        source: PathBuf,

        /// Bundle directory
        #[arg(short, long, default_value = "repo-vercel")]
        out: PathBuf,

        /// Remove a previous bundle first
        #[arg(long)]
        clean: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::GenerateQr {
            base_url,
            out,
            target,
            establishments,
        } => {
            let establishments = establishments.unwrap_or_default();
            let generator = QrGenerator::new(out);

            let paths = generator.generate_all(&establishments, &base_url, target);
            tracing::info!(
                "Generated {} of {} QR codes in {}",
                paths.len(),
                establishments.len(),
                generator.output_dir().display()
            );

            if paths.len() < establishments.len() {
                anyhow::bail!("{} QR codes failed", establishments.len() - paths.len());
            }
        }
        Commands::Export { source, out, clean } => {
            let files = export::export_bundle(&source, &out, clean)?;
            tracing::info!("Bundle ready: {}", out.display());
            for file in files {
                tracing::info!("  - {}", file.display());
            }
        }
    }

    Ok(())
}
