//! Run configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all)
//! reproduces the classic 150-point page with a blue triangle and
//! papayawhip cut-outs.

use std::fs;
use std::path::Path;

use pdf_core::{colors, Color};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SierpinskiError};
use crate::fractal::{expected_count, RESOLUTION_LIMIT};

/// Upper bound on the cut-outs a config may ask for. The whole shape
/// is held in memory until the page is written.
pub const MAX_CUT_OUTS: u64 = 5_000_000;

/// A color given either by name or as `[r, g, b]` in 0.0–1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Rgb([f64; 3]),
    Named(String),
}

impl ColorSpec {
    pub fn resolve(&self) -> Result<Color> {
        match self {
            ColorSpec::Rgb([r, g, b]) => {
                let color = Color::rgb(*r, *g, *b);
                if color.is_valid() {
                    Ok(color)
                } else {
                    Err(SierpinskiError::InvalidColor(*r, *g, *b))
                }
            }
            ColorSpec::Named(name) => {
                colors::lookup(name).ok_or_else(|| SierpinskiError::UnknownColor(name.clone()))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Page width in points. The page height makes the start
    /// triangle equilateral.
    pub page_width: f64,
    /// Inset of the start triangle's base corners from the page's
    /// bottom corners.
    pub margin: f64,
    /// Size below which subdivision stops.
    pub resolution: f64,
    /// Fill of the start triangle.
    pub outer_color: ColorSpec,
    /// Fill of every cut-out triangle.
    pub cut_out_color: ColorSpec,
    /// Deflate the page content stream.
    pub compress: bool,
    pub author: Option<String>,
    pub subject: String,
    pub keywords: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            page_width: 150.0,
            margin: 5.0,
            resolution: RESOLUTION_LIMIT,
            outer_color: ColorSpec::Rgb([0.0, 0.0, 1.0]),
            cut_out_color: ColorSpec::Named("papayawhip".to_string()),
            compress: true,
            author: None,
            subject: "Demonstration of pdf-core vector drawing".to_string(),
            keywords: "PDF, fractal, Sierpinski, triangle".to_string(),
        }
    }
}

impl Config {
    /// Read and validate a TOML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SierpinskiError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the config as TOML, e.g. as a starting point for a file.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check ranges and colors, and that the fractal stays within
    /// [`MAX_CUT_OUTS`].
    pub fn validate(&self) -> Result<()> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(SierpinskiError::InvalidResolution(self.resolution));
        }
        let page_ok = self.page_width.is_finite()
            && self.margin.is_finite()
            && self.margin >= 0.0
            && 2.0 * self.margin < self.page_width;
        if !page_ok {
            return Err(SierpinskiError::InvalidPage {
                width: self.page_width,
                margin: self.margin,
            });
        }
        let size = self.base_length();
        match expected_count(size, self.resolution) {
            Some(n) if n <= MAX_CUT_OUTS => {}
            _ => {
                return Err(SierpinskiError::TooManyCutOuts {
                    size,
                    resolution: self.resolution,
                })
            }
        }
        self.outer_color.resolve()?;
        self.cut_out_color.resolve()?;
        Ok(())
    }

    /// Page height that makes a triangle spanning the page width
    /// equilateral.
    pub fn page_height(&self) -> f64 {
        0.5 * 3f64.sqrt() * self.page_width
    }

    /// Length of the start triangle's base, which is also its L1 size.
    pub fn base_length(&self) -> f64 {
        self.page_width - 2.0 * self.margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_height_is_equilateral() {
        let config = Config::default();
        assert!((config.page_height() - 129.903_810_567_665_8).abs() < 1e-9);
    }

    #[test]
    fn default_fits_under_cut_out_cap() {
        let config = Config::default();
        assert_eq!(config.base_length(), 140.0);
        assert_eq!(expected_count(config.base_length(), config.resolution), Some(3280));
    }

    #[test]
    fn default_round_trips_through_toml() {
        let config = Config::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }
}
