//! fieldmap: fetch a field description and render its map.
//!
//! Loads the field once (from the field server or the built-in fixture),
//! renders the grid, parking zone and boxes, prints the descriptor text to
//! stdout, and optionally writes the map as SVG and PNG.
//!
//! # Usage
//!
//! ```text
//! cargo run --bin fieldmap -- [OPTIONS]
//! RUST_LOG=fieldmap_layout=debug cargo run --bin fieldmap -- --mock --svg field.svg
//! ```

#![allow(clippy::print_stdout)]

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use fieldmap_layout::{
    EncodedDescriptor, Field, LayoutConfig, RandomDiagonal, Scene, SceneRenderer,
    encode_descriptor,
};
use fieldmap_source::{
    DEFAULT_FIELD_URL, FieldCache, FieldSource, HttpSource, MockSource, SourceError,
};

/// Render a competition field map and its descriptor text.
#[derive(Parser)]
#[command(name = "fieldmap", version)]
struct Cli {
    /// Field server endpoint.
    #[arg(long, default_value = DEFAULT_FIELD_URL)]
    url: String,

    /// Use the built-in fixture field instead of the field server.
    #[arg(long, conflicts_with = "url")]
    mock: bool,

    /// Encoded descriptor string. Generated from the field when omitted.
    #[arg(long)]
    descriptor: Option<String>,

    /// Seed for the diagonal choice of unchained boxes.
    ///
    /// A random seed is drawn (and logged) when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the map as SVG to this path.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write the map as PNG to this path.
    #[arg(long)]
    png: Option<PathBuf>,

    /// Canvas geometry as a JSON string.
    ///
    /// Missing fields keep their defaults. The JSON must be a valid
    /// `LayoutConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,
}

/// Build the canvas geometry from `--config-json`, or the defaults.
///
/// The parsed config is validated here so a bad value is reported as a
/// flag error before the field is fetched.
fn config_from_cli(cli: &Cli) -> Result<LayoutConfig, String> {
    let Some(ref json) = cli.config_json else {
        return Ok(LayoutConfig::default());
    };
    let config: LayoutConfig =
        serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"))?;
    config
        .validate()
        .map_err(|e| format!("Error in --config-json: {e}"))?;
    Ok(config)
}

async fn load<S: FieldSource>(source: S) -> Result<Arc<Field>, SourceError> {
    FieldCache::new(source).get().await
}

fn write_output(path: &Path, bytes: &[u8], kind: &str) -> Result<(), Box<dyn Error>> {
    std::fs::write(path, bytes)
        .map_err(|e| format!("Error writing {kind} to {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "{kind} written");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let renderer = SceneRenderer::new(config_from_cli(&cli)?)?;

    let field = if cli.mock {
        tracing::info!("using the built-in fixture field");
        load(MockSource::default()).await?
    } else {
        load(HttpSource::new(cli.url.as_str())).await?
    };

    let seed = cli.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "diagonal chooser seeded");
    let mut chooser = RandomDiagonal::new(ChaCha8Rng::seed_from_u64(seed));

    let descriptor = cli.descriptor.clone().map_or_else(
        || encode_descriptor(&field, &mut chooser),
        EncodedDescriptor::new,
    );
    tracing::debug!(descriptor = descriptor.as_str(), "descriptor");

    let mut scene = Scene::new();
    let mut panel = Vec::new();
    renderer.render(&field, &descriptor, &mut scene, &mut panel, &mut chooser)?;
    for line in &panel {
        println!("{line}");
    }

    if let Some(ref svg_path) = cli.svg {
        let description = panel.join("\n");
        let metadata = fieldmap_export::SvgMetadata {
            title: Some("fieldmap"),
            description: Some(&description),
        };
        let svg = fieldmap_export::to_svg(&scene, &metadata)?;
        write_output(svg_path, svg.as_bytes(), "SVG")?;
    }
    if let Some(ref png_path) = cli.png {
        let png = fieldmap_export::to_png(&scene)?;
        write_output(png_path, &png, "PNG")?;
    }

    Ok(())
}
