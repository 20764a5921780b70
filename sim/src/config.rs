use std::{fs, path::Path};

use anyhow::{Context, Result};
use scratchoff_core::{CardConfig, Coord, OpacityBuffer, PrizeTable};
use serde::Deserialize;

/// Everything tunable about a simulated card, read from a TOML file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct SimConfig {
    pub(crate) card: CardConfig,
    pub(crate) prizes: PrizeTable,
}

pub(crate) fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("invalid config {}", path.display()))
}

pub(crate) fn parse_config(text: &str) -> Result<SimConfig> {
    let config: SimConfig = toml::from_str(text)?;
    config.prizes.validate()?;
    Ok(config)
}

/// Decodes an overlay image and keeps only its alpha channel.
pub(crate) fn load_overlay(path: &Path) -> Result<OpacityBuffer> {
    let image = image::open(path)
        .with_context(|| format!("could not open overlay {}", path.display()))?
        .to_rgba8();

    let (width, height) = image.dimensions();
    let width = Coord::try_from(width).context("overlay is too wide")?;
    let height = Coord::try_from(height).context("overlay is too tall")?;
    let alpha: Vec<u8> = image.pixels().map(|pixel| pixel.0[3]).collect();

    Ok(OpacityBuffer::from_alpha(width, height, &alpha)?)
}
