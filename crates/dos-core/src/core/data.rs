use super::broadening::{self, Smearing};
use super::info::{self, Info};
use crate::config::SampleGridConfig;
use crate::error::DosError;
use std::ops::Add;
use tracing::warn;

/// Sums broadened kernels centred on every stored point.
///
/// No correction is made for the sampling bin width; total intensity varies
/// with sampling density.
fn broaden(
    raw_energies: &[f64],
    raw_weights: &[f64],
    targets: &[f64],
    width: f64,
    smearing: Smearing,
) -> Result<Vec<f64>, DosError> {
    broadening::check_positive_width(width)?;
    let mut grid = vec![0.0; targets.len()];
    for (&raw_energy, &weight) in raw_energies.iter().zip(raw_weights) {
        smearing.accumulate(targets, raw_energy, width, weight, &mut grid);
    }
    Ok(grid)
}

fn check_lengths(energies: &[f64], weights: &[f64]) -> Result<(), DosError> {
    if energies.len() != weights.len() {
        return Err(DosError::LengthMismatch {
            energies: energies.len(),
            weights: weights.len(),
        });
    }
    Ok(())
}

fn data_range(energies: &[f64]) -> Option<(f64, f64)> {
    energies.iter().fold(None, |range, &e| match range {
        None => Some((e, e)),
        Some((lo, hi)) => Some((lo.min(e), hi.max(e))),
    })
}

pub(crate) fn warn_undersampled(width: f64, spacing: f64) {
    warn!(
        width,
        spacing,
        "The broadening width is small compared to the original sampling density. The results are unlikely to be smooth."
    );
}

fn grid_axis(energies: &[f64], config: &SampleGridConfig) -> Result<Vec<f64>, DosError> {
    let (xmin, xmax) = match (config.xmin, config.xmax) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => {
            let (lo, hi) = data_range(energies).ok_or_else(|| {
                DosError::InvalidGrid("cannot derive grid bounds from empty data".to_string())
            })?;
            config.bounds(lo, hi)
        }
    };
    Ok(broadening::linspace(xmin, xmax, config.npts))
}

/// A set of weighted delta functions which sum to form a DOS.
///
/// Suitable for spectral data whose energies do not form a regular grid.
/// Weights at the same energy are only combined in sampled output; the stored
/// points are never resampled.
#[derive(Debug, Clone)]
pub struct RawDosData {
    energies: Vec<f64>,
    weights: Vec<f64>,
    /// Free-form metadata; the only field that may change after construction.
    pub info: Info,
}

impl RawDosData {
    pub fn new(
        energies: impl Into<Vec<f64>>,
        weights: impl Into<Vec<f64>>,
        info: Option<Info>,
    ) -> Result<Self, DosError> {
        let energies = energies.into();
        let weights = weights.into();
        check_lengths(&energies, &weights)?;
        Ok(Self {
            energies,
            weights,
            info: info.unwrap_or_default(),
        })
    }

    pub fn get_energies(&self) -> Vec<f64> {
        self.energies.clone()
    }

    pub fn get_weights(&self) -> Vec<f64> {
        self.weights.clone()
    }

    pub(crate) fn energies(&self) -> &[f64] {
        &self.energies
    }

    pub(crate) fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// Samples the broadened data at the given energies.
    pub fn sample(
        &self,
        energies: &[f64],
        width: f64,
        smearing: Smearing,
    ) -> Result<Vec<f64>, DosError> {
        broaden(&self.energies, &self.weights, energies, width, smearing)
    }

    pub fn sample_grid(&self, config: &SampleGridConfig) -> Result<GridDosData, DosError> {
        let axis = grid_axis(&self.energies, config)?;
        let weights = self.sample(&axis, config.width, config.smearing)?;
        Ok(GridDosData::from_parts(axis, weights, self.info.clone()))
    }

    /// Concatenates the points of both series; info becomes the intersection.
    pub fn concat(&self, other: &RawDosData) -> RawDosData {
        let mut energies = Vec::with_capacity(self.len() + other.len());
        energies.extend_from_slice(&self.energies);
        energies.extend_from_slice(&other.energies);
        let mut weights = Vec::with_capacity(self.len() + other.len());
        weights.extend_from_slice(&self.weights);
        weights.extend_from_slice(&other.weights);
        RawDosData {
            energies,
            weights,
            info: info::intersection(&self.info, &other.info),
        }
    }

    pub fn almost_equals(&self, other: &RawDosData) -> bool {
        self.info == other.info
            && broadening::all_close(&self.weights, &other.weights)
            && broadening::all_close(&self.energies, &other.energies)
    }
}

impl<'a> Add<&'a RawDosData> for &'a RawDosData {
    type Output = RawDosData;

    fn add(self, other: &'a RawDosData) -> RawDosData {
        self.concat(other)
    }
}

impl Add for RawDosData {
    type Output = RawDosData;

    fn add(self, other: RawDosData) -> RawDosData {
        self.concat(&other)
    }
}

/// Regularly sampled data representing a DOS.
///
/// Usually the result of sampling or of integrating into discrete bins, so
/// each weight is an integrated bin intensity rather than a delta weight.
#[derive(Debug, Clone)]
pub struct GridDosData {
    energies: Vec<f64>,
    weights: Vec<f64>,
    pub info: Info,
}

impl GridDosData {
    pub fn new(
        energies: impl Into<Vec<f64>>,
        weights: impl Into<Vec<f64>>,
        info: Option<Info>,
    ) -> Result<Self, DosError> {
        let energies = energies.into();
        let weights = weights.into();
        if !broadening::is_evenly_spaced(&energies) {
            return Err(DosError::UnevenGrid);
        }
        check_lengths(&energies, &weights)?;
        Ok(Self {
            energies,
            weights,
            info: info.unwrap_or_default(),
        })
    }

    /// Builds a grid from parts whose invariants the caller already holds.
    pub(crate) fn from_parts(energies: Vec<f64>, weights: Vec<f64>, info: Info) -> Self {
        debug_assert_eq!(energies.len(), weights.len());
        Self {
            energies,
            weights,
            info,
        }
    }

    pub fn get_energies(&self) -> Vec<f64> {
        self.energies.clone()
    }

    pub fn get_weights(&self) -> Vec<f64> {
        self.weights.clone()
    }

    pub(crate) fn energies(&self) -> &[f64] {
        &self.energies
    }

    pub(crate) fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// Bin width of the stored grid; `None` for fewer than two points.
    pub fn spacing(&self) -> Option<f64> {
        match self.energies.as_slice() {
            [first, second, ..] => Some(second - first),
            _ => None,
        }
    }

    fn required_spacing(&self) -> Result<f64, DosError> {
        self.spacing().ok_or_else(|| {
            DosError::InvalidGrid(
                "at least two grid points are needed to determine the bin width".to_string(),
            )
        })
    }

    /// True when `width` is too narrow to give a smooth curve from this grid.
    pub fn is_undersampled(&self, width: f64) -> bool {
        self.spacing().is_some_and(|spacing| width < 2.0 * spacing)
    }

    /// Samples the broadened data, scaled by the original bin width.
    pub fn sample(
        &self,
        energies: &[f64],
        width: f64,
        smearing: Smearing,
    ) -> Result<Vec<f64>, DosError> {
        broadening::check_positive_width(width)?;
        let spacing = self.required_spacing()?;
        if width < 2.0 * spacing {
            warn_undersampled(width, spacing);
        }
        self.sample_scaled(energies, width, smearing)
    }

    /// Same as [`GridDosData::sample`] without the undersampling warning.
    pub(crate) fn sample_scaled(
        &self,
        energies: &[f64],
        width: f64,
        smearing: Smearing,
    ) -> Result<Vec<f64>, DosError> {
        let spacing = self.required_spacing()?;
        let mut sampled = broaden(&self.energies, &self.weights, energies, width, smearing)?;
        sampled.iter_mut().for_each(|w| *w *= spacing);
        Ok(sampled)
    }

    pub fn sample_grid(&self, config: &SampleGridConfig) -> Result<GridDosData, DosError> {
        let axis = grid_axis(&self.energies, config)?;
        let weights = self.sample(&axis, config.width, config.smearing)?;
        Ok(GridDosData::from_parts(axis, weights, self.info.clone()))
    }

    /// Sums weights on a shared energy grid; info becomes the intersection.
    pub fn try_add(&self, other: &GridDosData) -> Result<GridDosData, DosError> {
        if self.len() != other.len() {
            return Err(DosError::EnergyAxisMismatch(
                "Cannot add GridDosData objects with different-length energy grids".to_string(),
            ));
        }
        if !broadening::all_close(&self.energies, &other.energies) {
            return Err(DosError::EnergyAxisMismatch(
                "Cannot add GridDosData objects with different energy grids".to_string(),
            ));
        }
        let weights = self
            .weights
            .iter()
            .zip(&other.weights)
            .map(|(a, b)| a + b)
            .collect();
        Ok(GridDosData::from_parts(
            self.energies.clone(),
            weights,
            info::intersection(&self.info, &other.info),
        ))
    }

    pub fn almost_equals(&self, other: &GridDosData) -> bool {
        self.info == other.info
            && broadening::all_close(&self.weights, &other.weights)
            && broadening::all_close(&self.energies, &other.energies)
    }
}

/// A single series of DOS-like data.
///
/// Only `info` is mutable; energies and weights are fixed at construction and
/// every accessor hands out a copy.
#[derive(Debug, Clone)]
pub enum DosData {
    Raw(RawDosData),
    Grid(GridDosData),
}

impl DosData {
    pub fn kind_name(&self) -> &'static str {
        match self {
            DosData::Raw(_) => "RawDosData",
            DosData::Grid(_) => "GridDosData",
        }
    }

    pub fn get_energies(&self) -> Vec<f64> {
        self.energies().to_vec()
    }

    pub fn get_weights(&self) -> Vec<f64> {
        self.weights().to_vec()
    }

    pub(crate) fn energies(&self) -> &[f64] {
        match self {
            DosData::Raw(d) => d.energies(),
            DosData::Grid(d) => d.energies(),
        }
    }

    pub(crate) fn weights(&self) -> &[f64] {
        match self {
            DosData::Raw(d) => d.weights(),
            DosData::Grid(d) => d.weights(),
        }
    }

    pub fn info(&self) -> &Info {
        match self {
            DosData::Raw(d) => &d.info,
            DosData::Grid(d) => &d.info,
        }
    }

    pub fn info_mut(&mut self) -> &mut Info {
        match self {
            DosData::Raw(d) => &mut d.info,
            DosData::Grid(d) => &mut d.info,
        }
    }

    pub fn len(&self) -> usize {
        self.energies().len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies().is_empty()
    }

    pub fn label(&self) -> String {
        info::label_from_info(self.info())
    }

    pub fn as_raw(&self) -> Option<&RawDosData> {
        match self {
            DosData::Raw(d) => Some(d),
            DosData::Grid(_) => None,
        }
    }

    pub fn as_grid(&self) -> Option<&GridDosData> {
        match self {
            DosData::Grid(d) => Some(d),
            DosData::Raw(_) => None,
        }
    }

    pub fn sample(
        &self,
        energies: &[f64],
        width: f64,
        smearing: Smearing,
    ) -> Result<Vec<f64>, DosError> {
        match self {
            DosData::Raw(d) => d.sample(energies, width, smearing),
            DosData::Grid(d) => d.sample(energies, width, smearing),
        }
    }

    /// Sampling used by collections, which report undersampling once per
    /// call on the calling thread instead of once per series.
    pub(crate) fn sample_quiet(
        &self,
        energies: &[f64],
        width: f64,
        smearing: Smearing,
    ) -> Result<Vec<f64>, DosError> {
        match self {
            DosData::Raw(d) => d.sample(energies, width, smearing),
            DosData::Grid(d) => d.sample_scaled(energies, width, smearing),
        }
    }

    pub fn sample_grid(&self, config: &SampleGridConfig) -> Result<GridDosData, DosError> {
        match self {
            DosData::Raw(d) => d.sample_grid(config),
            DosData::Grid(d) => d.sample_grid(config),
        }
    }

    /// Combines two series of the same kind.
    ///
    /// Raw data is concatenated, grid data summed on a shared axis; in both
    /// cases only the info pairs common to both operands survive.
    pub fn combine(&self, other: &DosData) -> Result<DosData, DosError> {
        match (self, other) {
            (DosData::Raw(a), DosData::Raw(b)) => Ok(DosData::Raw(a.concat(b))),
            (DosData::Grid(a), DosData::Grid(b)) => Ok(DosData::Grid(a.try_add(b)?)),
            (left, right) => Err(DosError::IncompatibleKinds {
                left: left.kind_name(),
                right: right.kind_name(),
            }),
        }
    }

    /// Tolerant comparison for testing: same variant, identical info and
    /// numerically close energies and weights.
    pub fn almost_equals(&self, other: &DosData) -> bool {
        match (self, other) {
            (DosData::Raw(a), DosData::Raw(b)) => a.almost_equals(b),
            (DosData::Grid(a), DosData::Grid(b)) => a.almost_equals(b),
            _ => false,
        }
    }
}

impl From<RawDosData> for DosData {
    fn from(data: RawDosData) -> Self {
        DosData::Raw(data)
    }
}

impl From<GridDosData> for DosData {
    fn from(data: GridDosData) -> Self {
        DosData::Grid(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::info::from_pairs;

    const TOLERANCE: f64 = 1e-6;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn sparse_dos() -> RawDosData {
        RawDosData::new(
            vec![1.2, 3.4, 5.0],
            vec![3.0, 2.1, 0.0],
            Some(from_pairs([("symbol", "H"), ("number", "1"), ("food", "egg")])),
        )
        .unwrap()
    }

    fn grid_dos() -> GridDosData {
        let energies: Vec<f64> = (0..10).map(|i| 1.0 + i as f64 * 0.1).collect();
        GridDosData::new(
            energies,
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0],
            Some(from_pairs([("symbol", "C"), ("orbital", "s")])),
        )
        .unwrap()
    }

    #[test]
    fn accessors_return_construction_inputs() {
        let dos = sparse_dos();
        assert_eq!(dos.get_energies(), vec![1.2, 3.4, 5.0]);
        assert_eq!(dos.get_weights(), vec![3.0, 2.1, 0.0]);
    }

    #[test]
    fn accessors_return_independent_copies() {
        let dos = sparse_dos();
        let mut energies = dos.get_energies();
        energies[0] = 100.0;
        let mut weights = dos.get_weights();
        weights.clear();
        assert_eq!(dos.get_energies(), vec![1.2, 3.4, 5.0]);
        assert_eq!(dos.get_weights(), vec![3.0, 2.1, 0.0]);
    }

    #[test]
    fn construction_fails_on_length_mismatch() {
        let result = RawDosData::new(vec![1.0, 2.0], vec![1.0], None);
        assert_eq!(
            result.unwrap_err(),
            DosError::LengthMismatch {
                energies: 2,
                weights: 1
            }
        );
        assert!(matches!(
            GridDosData::new(vec![0.0, 1.0, 2.0], vec![1.0], None),
            Err(DosError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn missing_info_defaults_to_empty() {
        let dos = RawDosData::new(vec![1.0], vec![1.0], None).unwrap();
        assert!(dos.info.is_empty());
    }

    #[test]
    fn clone_has_independent_info() {
        let dos = sparse_dos();
        let mut copy = dos.clone();
        assert!(copy.almost_equals(&dos));

        copy.info.insert("potato".into(), "rutabaga".into());
        assert!(!dos.info.contains_key("potato"));
        assert!(!copy.almost_equals(&dos));
    }

    #[test]
    fn grid_requires_even_spacing() {
        assert!(matches!(
            GridDosData::new(vec![0.0, 1.0, 3.0], vec![1.0, 2.0, 3.0], None),
            Err(DosError::UnevenGrid)
        ));
        assert!(GridDosData::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0], None).is_ok());
    }

    #[test]
    fn sampling_rejects_non_positive_width() {
        let dos = RawDosData::new(vec![1.0], vec![1.0], None).unwrap();
        assert_eq!(
            dos.sample(&[1.0], 0.0, Smearing::Gauss),
            Err(DosError::InvalidWidth(0.0))
        );
        assert_eq!(
            dos.sample(&[1.0], -0.1, Smearing::Gauss),
            Err(DosError::InvalidWidth(-0.1))
        );
    }

    #[test]
    fn raw_sampling_sums_gaussians() {
        let dos = RawDosData::new(vec![0.0, 1.0], vec![1.0, 2.0], None).unwrap();
        let sampled = dos.sample(&[0.0, 1.0], 0.5, Smearing::Gauss).unwrap();
        let g = |x: f64| Smearing::Gauss.delta(x, 0.0, 0.5);
        assert!(f64_approx_equal(sampled[0], g(0.0) + 2.0 * g(1.0)));
        assert!(f64_approx_equal(sampled[1], g(1.0) + 2.0 * g(0.0)));
    }

    #[test]
    fn gaussian_sampling_is_normalised() {
        let dos = RawDosData::new(vec![0.0], vec![1.0], None).unwrap();
        for width in [0.1, 0.5, 1.0] {
            let x = broadening::linspace(-10.0, 10.0, 4001);
            let y = dos.sample(&x, width, Smearing::Gauss).unwrap();
            assert!((broadening::trapezoid(&y, &x) - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn grid_sampling_is_scaled_by_bin_width() {
        let grid = grid_dos();
        let raw = RawDosData::new(grid.get_energies(), grid.get_weights(), None).unwrap();
        let targets = [1.0, 1.5, 2.0];
        let from_grid = grid.sample(&targets, 0.5, Smearing::Gauss).unwrap();
        let from_raw = raw.sample(&targets, 0.5, Smearing::Gauss).unwrap();
        for (g, r) in from_grid.iter().zip(&from_raw) {
            assert!(f64_approx_equal(*g, r * 0.1));
        }
    }

    #[test]
    fn grid_sampling_with_small_width_still_succeeds() {
        let grid = grid_dos();
        let result = grid.sample(&[1.0, 1.1], 0.05, Smearing::Gauss);
        assert!(result.is_ok());
    }

    #[test]
    fn single_point_grid_cannot_be_sampled() {
        let grid = GridDosData::new(vec![1.0], vec![1.0], None).unwrap();
        assert!(matches!(
            grid.sample(&[1.0], 0.1, Smearing::Gauss),
            Err(DosError::InvalidGrid(_))
        ));
    }

    #[test]
    fn sample_grid_pads_default_range() {
        let dos = sparse_dos();
        let config = SampleGridConfig {
            npts: 11,
            padding: 2.0,
            width: 0.5,
            ..SampleGridConfig::default()
        };
        let grid = dos.sample_grid(&config).unwrap();
        let energies = grid.get_energies();
        assert_eq!(energies.len(), 11);
        assert!(f64_approx_equal(energies[0], 0.2));
        assert!(f64_approx_equal(energies[10], 6.0));
        assert_eq!(grid.info, dos.info);

        let expected = dos.sample(&energies, 0.5, Smearing::Gauss).unwrap();
        assert!(broadening::all_close(&grid.get_weights(), &expected));
    }

    #[test]
    fn sample_grid_respects_explicit_bounds() {
        let dos = sparse_dos();
        let config = SampleGridConfig {
            npts: 5,
            xmin: Some(-1.0),
            xmax: Some(1.0),
            ..SampleGridConfig::default()
        };
        let grid = dos.sample_grid(&config).unwrap();
        assert_eq!(grid.get_energies(), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn sample_grid_on_empty_data_needs_explicit_bounds() {
        let dos = RawDosData::new(Vec::new(), Vec::new(), None).unwrap();
        assert!(matches!(
            dos.sample_grid(&SampleGridConfig::default()),
            Err(DosError::InvalidGrid(_))
        ));
    }

    #[test]
    fn raw_addition_concatenates_and_intersects_info() {
        let a = RawDosData::new(vec![1.0], vec![2.0], Some(from_pairs([("a", "1"), ("b", "1")])))
            .unwrap();
        let b = RawDosData::new(vec![3.0], vec![4.0], Some(from_pairs([("a", "2"), ("b", "1")])))
            .unwrap();
        let sum = &a + &b;
        assert_eq!(sum.get_energies(), vec![1.0, 3.0]);
        assert_eq!(sum.get_weights(), vec![2.0, 4.0]);
        assert_eq!(sum.info, from_pairs([("b", "1")]));
    }

    #[test]
    fn raw_addition_does_not_sort_or_merge() {
        let a = RawDosData::new(vec![5.0, 1.0], vec![1.0, 1.0], None).unwrap();
        let b = RawDosData::new(vec![1.0], vec![3.0], None).unwrap();
        let sum = a + b;
        assert_eq!(sum.get_energies(), vec![5.0, 1.0, 1.0]);
        assert_eq!(sum.get_weights(), vec![1.0, 1.0, 3.0]);
    }

    #[test]
    fn grid_addition_sums_weights() {
        let a = GridDosData::new(
            vec![0.0, 1.0, 2.0],
            vec![1.0, 2.0, 3.0],
            Some(from_pairs([("a", "1"), ("b", "1")])),
        )
        .unwrap();
        let b = GridDosData::new(
            vec![0.0, 1.0, 2.0],
            vec![4.0, 5.0, 6.0],
            Some(from_pairs([("a", "2"), ("b", "1")])),
        )
        .unwrap();
        let sum = a.try_add(&b).unwrap();
        assert_eq!(sum.get_energies(), vec![0.0, 1.0, 2.0]);
        assert_eq!(sum.get_weights(), vec![5.0, 7.0, 9.0]);
        assert_eq!(sum.info, from_pairs([("b", "1")]));
    }

    #[test]
    fn grid_addition_rejects_mismatched_axes() {
        let a = GridDosData::new(vec![0.0, 1.0, 2.0], vec![1.0; 3], None).unwrap();
        let b = GridDosData::new(vec![0.0, 1.5, 3.0], vec![1.0; 3], None).unwrap();
        let c = GridDosData::new(vec![0.0, 1.0], vec![1.0; 2], None).unwrap();
        assert!(matches!(a.try_add(&b), Err(DosError::EnergyAxisMismatch(_))));
        assert!(matches!(a.try_add(&c), Err(DosError::EnergyAxisMismatch(_))));
    }

    #[test]
    fn combine_rejects_mixed_kinds() {
        let raw: DosData = sparse_dos().into();
        let grid: DosData = grid_dos().into();
        assert_eq!(
            raw.combine(&grid).unwrap_err(),
            DosError::IncompatibleKinds {
                left: "RawDosData",
                right: "GridDosData"
            }
        );
        assert!(matches!(
            grid.combine(&raw),
            Err(DosError::IncompatibleKinds {
                left: "GridDosData",
                ..
            })
        ));
    }

    #[test]
    fn combine_dispatches_on_variant() {
        let raw: DosData = sparse_dos().into();
        let combined = raw.combine(&raw).unwrap();
        assert_eq!(combined.len(), 6);
        assert_eq!(combined.info(), raw.info());

        let grid: DosData = grid_dos().into();
        let doubled = grid.combine(&grid).unwrap();
        assert_eq!(doubled.len(), 10);
        assert!(f64_approx_equal(doubled.get_weights()[9], 20.0));
    }

    #[test]
    fn almost_equals_distinguishes_variants() {
        let raw = RawDosData::new(vec![0.0, 1.0], vec![1.0, 1.0], None).unwrap();
        let grid = GridDosData::new(vec![0.0, 1.0], vec![1.0, 1.0], None).unwrap();
        assert!(!DosData::from(raw.clone()).almost_equals(&DosData::from(grid)));
        assert!(DosData::from(raw.clone()).almost_equals(&DosData::from(raw)));
    }

    #[test]
    fn info_mut_edits_metadata_in_place() {
        let mut dos: DosData = sparse_dos().into();
        dos.info_mut().insert("label".into(), "Hydrogen".into());
        assert_eq!(dos.label(), "Hydrogen");
    }
}
