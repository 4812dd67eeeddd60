//! Boundary between DOS data and an external plotting layer.
//!
//! Nothing here renders anything. Data is resampled as needed and handed to a
//! [`PlotBackend`] as plain arrays plus a label; the backend decides what a
//! "line" means and returns whatever handle it likes.

use super::collection::DosCollection;
use super::data::{DosData, GridDosData, RawDosData};
use super::info;
use crate::config::PlotConfig;
use crate::error::DosError;
use serde::Serialize;

/// One drawable series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSeries {
    pub energies: Vec<f64>,
    pub weights: Vec<f64>,
    pub label: String,
}

pub trait PlotBackend {
    /// Identifies where a series was drawn.
    type Handle;

    /// Draws a continuous line.
    fn line(&mut self, series: &PlotSeries) -> Self::Handle;

    /// Draws vertical lines from zero up to each weight.
    fn deltas(&mut self, series: &PlotSeries) -> Self::Handle;

    fn set_xlim(&mut self, _xmin: Option<f64>, _xmax: Option<f64>) {}

    fn set_ylim_bottom(&mut self, _bottom: f64) {}

    fn legend(&mut self) {}
}

/// Backend that keeps every series in memory, in drawing order.
///
/// Handles are indices into [`SeriesRecorder::lines`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesRecorder {
    pub lines: Vec<PlotSeries>,
    pub deltas: Vec<PlotSeries>,
    pub xlim: (Option<f64>, Option<f64>),
    pub ylim_bottom: Option<f64>,
    pub legend: bool,
}

impl SeriesRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlotBackend for SeriesRecorder {
    type Handle = usize;

    fn line(&mut self, series: &PlotSeries) -> usize {
        self.lines.push(series.clone());
        self.lines.len() - 1
    }

    fn deltas(&mut self, series: &PlotSeries) -> usize {
        self.deltas.push(series.clone());
        self.deltas.len() - 1
    }

    fn set_xlim(&mut self, xmin: Option<f64>, xmax: Option<f64>) {
        self.xlim = (xmin, xmax);
    }

    fn set_ylim_bottom(&mut self, bottom: f64) {
        self.ylim_bottom = Some(bottom);
    }

    fn legend(&mut self) {
        self.legend = true;
    }
}

fn label_for(config: &PlotConfig, info: &info::Info) -> String {
    config
        .label
        .clone()
        .unwrap_or_else(|| info::label_from_info(info))
}

impl RawDosData {
    /// Resamples onto a grid and draws the result as a line.
    ///
    /// Raw data always needs broadening, so unset `npts`/`width` fall back
    /// to the defaults.
    pub fn plot<B: PlotBackend>(
        &self,
        backend: &mut B,
        config: &PlotConfig,
    ) -> Result<B::Handle, DosError> {
        let (npts, width) = config.resolve_or_default();
        let sampled = self.sample_grid(&config.grid_config(npts, width))?;
        let handle = backend.line(&PlotSeries {
            energies: sampled.get_energies(),
            weights: sampled.get_weights(),
            label: label_for(config, &self.info),
        });
        backend.set_xlim(config.xmin, config.xmax);
        Ok(handle)
    }

    /// Draws the stored points as delta lines without any broadening.
    ///
    /// Points at the same energy overlap rather than being summed.
    pub fn plot_deltas<B: PlotBackend>(&self, backend: &mut B, config: &PlotConfig) -> B::Handle {
        backend.deltas(&PlotSeries {
            energies: self.get_energies(),
            weights: self.get_weights(),
            label: label_for(config, &self.info),
        })
    }
}

impl GridDosData {
    /// Draws the grid, resampling only when `npts` or `width` is set.
    ///
    /// Without resampling, `xmin`/`xmax` only set the axis limits.
    pub fn plot<B: PlotBackend>(
        &self,
        backend: &mut B,
        config: &PlotConfig,
    ) -> Result<B::Handle, DosError> {
        let series = match config.resolve_smearing() {
            Some((npts, width)) => {
                let sampled = self.sample_grid(&config.grid_config(npts, width))?;
                PlotSeries {
                    energies: sampled.get_energies(),
                    weights: sampled.get_weights(),
                    label: label_for(config, &self.info),
                }
            }
            None => PlotSeries {
                energies: self.get_energies(),
                weights: self.get_weights(),
                label: label_for(config, &self.info),
            },
        };
        let handle = backend.line(&series);
        backend.set_xlim(config.xmin, config.xmax);
        Ok(handle)
    }
}

impl DosData {
    pub fn plot<B: PlotBackend>(
        &self,
        backend: &mut B,
        config: &PlotConfig,
    ) -> Result<B::Handle, DosError> {
        match self {
            DosData::Raw(d) => d.plot(backend, config),
            DosData::Grid(d) => d.plot(backend, config),
        }
    }
}

impl DosCollection {
    /// Resamples every series onto one grid and draws one labelled line each.
    ///
    /// `label` in the config is ignored; each line is labelled from its info.
    pub fn plot<B: PlotBackend>(
        &self,
        backend: &mut B,
        config: &PlotConfig,
    ) -> Result<Vec<B::Handle>, DosError> {
        let (npts, width) = config.resolve_or_default();
        let (energies, weights) = self.sample_grid(&config.grid_config(npts, width))?;

        let handles = self
            .labels()
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                backend.line(&PlotSeries {
                    energies: energies.clone(),
                    weights: weights.row(i).iter().copied().collect(),
                    label,
                })
            })
            .collect();
        backend.legend();

        let first = energies.first().copied();
        let last = energies.last().copied();
        backend.set_xlim(first, last);
        backend.set_ylim_bottom(0.0);
        Ok(handles)
    }
}
