use crate::core::broadening::{self, Smearing};
use thiserror::Error;

pub const DEFAULT_NPTS: usize = 1000;
pub const DEFAULT_PADDING: f64 = 3.0;
pub const DEFAULT_WIDTH: f64 = 0.1;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

/// Parameters for sampling DOS data onto an evenly spaced energy grid.
///
/// `xmin`/`xmax` left as `None` are derived from the data range, padded by
/// `padding * width` so that broadened peaks are not cut off.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGridConfig {
    pub npts: usize,
    pub xmin: Option<f64>,
    pub xmax: Option<f64>,
    pub padding: f64,
    pub width: f64,
    pub smearing: Smearing,
}

impl Default for SampleGridConfig {
    fn default() -> Self {
        Self {
            npts: DEFAULT_NPTS,
            xmin: None,
            xmax: None,
            padding: DEFAULT_PADDING,
            width: DEFAULT_WIDTH,
            smearing: Smearing::Gauss,
        }
    }
}

impl SampleGridConfig {
    pub fn new(npts: usize) -> Self {
        Self {
            npts,
            ..Self::default()
        }
    }

    pub fn builder() -> SampleGridConfigBuilder {
        SampleGridConfigBuilder::new()
    }

    /// Resolves the grid bounds against the given data range.
    pub(crate) fn bounds(&self, data_min: f64, data_max: f64) -> (f64, f64) {
        let pad = self.padding * self.width;
        (
            self.xmin.unwrap_or(data_min - pad),
            self.xmax.unwrap_or(data_max + pad),
        )
    }
}

#[derive(Default)]
pub struct SampleGridConfigBuilder {
    npts: Option<usize>,
    xmin: Option<f64>,
    xmax: Option<f64>,
    padding: Option<f64>,
    width: Option<f64>,
    smearing: Option<Smearing>,
}

impl SampleGridConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn npts(mut self, npts: usize) -> Self {
        self.npts = Some(npts);
        self
    }
    pub fn xmin(mut self, xmin: f64) -> Self {
        self.xmin = Some(xmin);
        self
    }
    pub fn xmax(mut self, xmax: f64) -> Self {
        self.xmax = Some(xmax);
        self
    }
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = Some(padding);
        self
    }
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
    pub fn smearing(mut self, smearing: Smearing) -> Self {
        self.smearing = Some(smearing);
        self
    }

    pub fn build(self) -> Result<SampleGridConfig, ConfigError> {
        let defaults = SampleGridConfig::default();
        let width = self.width.unwrap_or(defaults.width);
        broadening::check_positive_width(width).map_err(|e| ConfigError::InvalidParameter {
            parameter: "width",
            reason: e.to_string(),
        })?;

        let npts = self.npts.unwrap_or(defaults.npts);
        if npts == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "npts",
                reason: "at least one sampling point is required".to_string(),
            });
        }

        if let (Some(lo), Some(hi)) = (self.xmin, self.xmax) {
            if lo > hi {
                return Err(ConfigError::InvalidParameter {
                    parameter: "xmin",
                    reason: format!("xmin ({lo}) is greater than xmax ({hi})"),
                });
            }
        }

        Ok(SampleGridConfig {
            npts,
            xmin: self.xmin,
            xmax: self.xmax,
            padding: self.padding.unwrap_or(defaults.padding),
            width,
            smearing: self.smearing.unwrap_or(defaults.smearing),
        })
    }
}

/// Options for handing DOS data to a plotting backend.
///
/// `npts` and `width` are interpreted together, see
/// [`PlotConfig::resolve_smearing`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotConfig {
    pub npts: Option<usize>,
    pub xmin: Option<f64>,
    pub xmax: Option<f64>,
    pub width: Option<f64>,
    pub smearing: Smearing,
    /// Overrides the label generated from the series info.
    pub label: Option<String>,
}

impl PlotConfig {
    /// Figures out whether resampling was requested.
    ///
    /// - width given: resample with `npts` (or the default count if unset);
    /// - only `npts` given: resample with the default width;
    /// - neither: `None`, the data is drawn as stored.
    pub fn resolve_smearing(&self) -> Option<(usize, f64)> {
        let npts = self.npts.filter(|&n| n > 0);
        match (npts, self.width) {
            (Some(n), Some(w)) => Some((n, w)),
            (None, Some(w)) => Some((DEFAULT_NPTS, w)),
            (Some(n), None) => Some((n, DEFAULT_WIDTH)),
            (None, None) => None,
        }
    }

    /// Resampling parameters for data that always has to be broadened.
    pub fn resolve_or_default(&self) -> (usize, f64) {
        self.resolve_smearing()
            .unwrap_or((DEFAULT_NPTS, DEFAULT_WIDTH))
    }

    pub(crate) fn grid_config(&self, npts: usize, width: f64) -> SampleGridConfig {
        SampleGridConfig {
            npts,
            xmin: self.xmin,
            xmax: self.xmax,
            padding: DEFAULT_PADDING,
            width,
            smearing: self.smearing,
        }
    }
}
