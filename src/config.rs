use std::path::{Path, PathBuf};

use crate::error::{RoundelError, RoundelResult};
use crate::geometry::ShapeKind;

/// Extent decrement between steps, in pixels.
pub const DEFAULT_GAP: u32 = 50;

/// Minimum extent at which stepping stops. The loop runs while the extent
/// is strictly greater than this.
pub const DEFAULT_FLOOR: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Pdf,
}

impl OutputFormat {
    /// Picks the output encoder from the path extension. Anything other
    /// than `.svg` or `.pdf` (case-insensitive) is fatal, before any
    /// drawing happens.
    pub fn from_path(path: &Path) -> RoundelResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("svg") => Ok(Self::Svg),
            Some("pdf") => Ok(Self::Pdf),
            _ => Err(RoundelError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Everything a run needs, resolved once at startup and immutable after.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub out: PathBuf,
    pub format: OutputFormat,
    pub gap: u32,
    pub shape: ShapeKind,
    pub floor: f64,
    pub inputs: Vec<PathBuf>,
}

impl RunConfig {
    pub fn new(
        out: PathBuf,
        gap: u32,
        shape: ShapeKind,
        inputs: Vec<PathBuf>,
    ) -> RoundelResult<Self> {
        let format = OutputFormat::from_path(&out)?;
        let config = Self {
            out,
            format,
            gap,
            shape,
            floor: DEFAULT_FLOOR,
            inputs,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RoundelResult<()> {
        if self.inputs.is_empty() {
            return Err(RoundelError::config(
                "at least one input image must be specified",
            ));
        }
        if self.gap == 0 {
            return Err(RoundelError::config("gap must be a positive pixel count"));
        }
        if !self.floor.is_finite() || self.floor < 0.0 {
            return Err(RoundelError::config("floor must be finite and >= 0"));
        }
        Ok(())
    }
}
