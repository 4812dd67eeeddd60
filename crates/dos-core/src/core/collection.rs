use super::broadening::{self, Smearing};
use super::data::{self, DosData, GridDosData, RawDosData};
use super::info::{self, Info};
use crate::config::SampleGridConfig;
use crate::error::DosError;
use itertools::Itertools;
use nalgebra::DMatrix;
use std::fmt;
use std::ops::{Bound, RangeBounds};
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Which entities a [`DosCollection`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Any mix of raw and grid data.
    Generic,
    /// Raw data only.
    Raw,
    /// Grid data sharing one energy axis.
    Grid,
}

impl CollectionKind {
    pub fn name(&self) -> &'static str {
        match self {
            CollectionKind::Generic => "DosCollection",
            CollectionKind::Raw => "RawDosCollection",
            CollectionKind::Grid => "GridDosCollection",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
enum Storage {
    Series(Vec<DosData>),
    Raw(Vec<RawDosData>),
    /// Shared axis plus one weights row per series.
    Grid {
        energies: Vec<f64>,
        weights: DMatrix<f64>,
        info: Vec<Info>,
    },
}

/// The right-hand side of [`DosCollection::join`].
#[derive(Debug, Clone)]
pub enum Addend {
    Collection(DosCollection),
    Data(DosData),
    /// A failed selection; joining it is a no-op.
    Nothing,
}

impl From<DosCollection> for Addend {
    fn from(collection: DosCollection) -> Self {
        Addend::Collection(collection)
    }
}

impl From<Option<DosCollection>> for Addend {
    fn from(selection: Option<DosCollection>) -> Self {
        selection.map_or(Addend::Nothing, Addend::Collection)
    }
}

impl From<DosData> for Addend {
    fn from(data: DosData) -> Self {
        Addend::Data(data)
    }
}

impl From<RawDosData> for Addend {
    fn from(data: RawDosData) -> Self {
        Addend::Data(data.into())
    }
}

impl From<GridDosData> for Addend {
    fn from(data: GridDosData) -> Self {
        Addend::Data(data.into())
    }
}

/// An ordered collection of DOS series supporting selection, summation and
/// batch sampling.
///
/// The kind fixes which entities may be stored. Grid collections keep a single
/// energy axis and a weights matrix; indexing them builds a fresh
/// [`GridDosData`], so edits to the returned info never write back.
#[derive(Debug, Clone)]
pub struct DosCollection {
    storage: Storage,
}

impl DosCollection {
    /// Creates a generic collection accepting any DOS data.
    pub fn new(series: impl IntoIterator<Item = DosData>) -> Self {
        Self {
            storage: Storage::Series(series.into_iter().collect()),
        }
    }

    /// Creates a collection that only stores raw data.
    pub fn raw(series: impl IntoIterator<Item = DosData>) -> Result<Self, DosError> {
        Self::with_kind(CollectionKind::Raw, series)
    }

    /// Creates a collection of grid data sharing one energy axis.
    pub fn grid(series: impl IntoIterator<Item = DosData>) -> Result<Self, DosError> {
        Self::with_kind(CollectionKind::Grid, series)
    }

    pub fn with_kind(
        kind: CollectionKind,
        series: impl IntoIterator<Item = DosData>,
    ) -> Result<Self, DosError> {
        let storage = match kind {
            CollectionKind::Generic => Storage::Series(series.into_iter().collect()),
            CollectionKind::Raw => Storage::Raw(
                series
                    .into_iter()
                    .map(|data| match data {
                        DosData::Raw(raw) => Ok(raw),
                        other => Err(unsupported(kind, &other)),
                    })
                    .collect::<Result<_, _>>()?,
            ),
            CollectionKind::Grid => Self::grid_storage(series)?,
        };
        Ok(Self { storage })
    }

    fn grid_storage(series: impl IntoIterator<Item = DosData>) -> Result<Storage, DosError> {
        let mut grids = Vec::new();
        for data in series {
            match data {
                DosData::Grid(grid) => grids.push(grid),
                other => return Err(unsupported(CollectionKind::Grid, &other)),
            }
        }

        let energies = grids
            .first()
            .map(|g| g.get_energies())
            .unwrap_or_default();
        for grid in &grids {
            if grid.len() != energies.len() || !broadening::all_close(grid.energies(), &energies) {
                return Err(DosError::EnergyAxisMismatch(
                    "All GridDosData objects in GridDosCollection must have the same energy axis"
                        .to_string(),
                ));
            }
        }

        let weights =
            DMatrix::from_fn(grids.len(), energies.len(), |i, j| grids[i].weights()[j]);
        let info = grids.into_iter().map(|g| g.info).collect();
        Ok(Storage::Grid {
            energies,
            weights,
            info,
        })
    }

    /// Builds a collection from data sharing a common energy axis.
    ///
    /// `weights` holds one row per series. Generic and raw collections store
    /// each row as [`RawDosData`]; grid collections keep the rows as a matrix.
    pub fn from_data(
        kind: CollectionKind,
        energies: &[f64],
        weights: &[Vec<f64>],
        info: Option<Vec<Info>>,
    ) -> Result<Self, DosError> {
        if weights.is_empty() {
            return Err(DosError::Shape("Weights cannot be empty".to_string()));
        }
        if let Some(row) = weights.iter().find(|row| row.len() != energies.len()) {
            return Err(DosError::Shape(format!(
                "Length of weights rows ({}) must equal size of energies ({})",
                row.len(),
                energies.len()
            )));
        }
        let info = match info {
            None => vec![Info::new(); weights.len()],
            Some(info) if info.len() != weights.len() => {
                return Err(DosError::InfoLengthMismatch {
                    info: info.len(),
                    rows: weights.len(),
                });
            }
            Some(info) => info,
        };

        match kind {
            CollectionKind::Grid => {
                if !broadening::is_evenly_spaced(energies) {
                    return Err(DosError::UnevenGrid);
                }
                let matrix = DMatrix::from_fn(weights.len(), energies.len(), |i, j| weights[i][j]);
                Ok(Self {
                    storage: Storage::Grid {
                        energies: energies.to_vec(),
                        weights: matrix,
                        info,
                    },
                })
            }
            CollectionKind::Generic | CollectionKind::Raw => {
                let series = weights
                    .iter()
                    .zip(info)
                    .map(|(row, row_info)| {
                        RawDosData::new(energies.to_vec(), row.clone(), Some(row_info))
                            .map(DosData::from)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Self::with_kind(kind, series)
            }
        }
    }

    pub fn kind(&self) -> CollectionKind {
        match self.storage {
            Storage::Series(_) => CollectionKind::Generic,
            Storage::Raw(_) => CollectionKind::Raw,
            Storage::Grid { .. } => CollectionKind::Grid,
        }
    }

    pub fn len(&self) -> usize {
        match &self.storage {
            Storage::Series(series) => series.len(),
            Storage::Raw(series) => series.len(),
            Storage::Grid { info, .. } => info.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The shared energy axis of a grid collection.
    pub fn grid_energies(&self) -> Option<Vec<f64>> {
        match &self.storage {
            Storage::Grid { energies, .. } => Some(energies.clone()),
            _ => None,
        }
    }

    fn entry(&self, index: usize) -> DosData {
        match &self.storage {
            Storage::Series(series) => series[index].clone(),
            Storage::Raw(series) => DosData::Raw(series[index].clone()),
            Storage::Grid {
                energies,
                weights,
                info,
            } => DosData::Grid(GridDosData::from_parts(
                energies.clone(),
                weights.row(index).iter().copied().collect(),
                info[index].clone(),
            )),
        }
    }

    fn info_at(&self, index: usize) -> &Info {
        match &self.storage {
            Storage::Series(series) => series[index].info(),
            Storage::Raw(series) => &series[index].info,
            Storage::Grid { info, .. } => &info[index],
        }
    }

    /// Returns the entry at `index` as an independent value.
    pub fn get(&self, index: usize) -> Result<DosData, DosError> {
        if index >= self.len() {
            return Err(DosError::IndexOutOfRange {
                index: index as isize,
                len: self.len(),
            });
        }
        Ok(self.entry(index))
    }

    /// Like [`get`](Self::get), with negative indices counting from the end.
    pub fn get_signed(&self, index: isize) -> Result<DosData, DosError> {
        let len = self.len() as isize;
        let resolved = if index < 0 { index + len } else { index };
        if resolved < 0 || resolved >= len {
            return Err(DosError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(self.entry(resolved as usize))
    }

    /// Returns the entries in `range`, clamped to the collection bounds.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Vec<DosData> {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        }
        .min(len);
        (start..end.max(start)).map(|i| self.entry(i)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = DosData> + '_ {
        (0..self.len()).map(move |i| self.entry(i))
    }

    pub fn to_vec(&self) -> Vec<DosData> {
        self.iter().collect()
    }

    pub fn labels(&self) -> Vec<String> {
        (0..self.len())
            .map(|i| info::label_from_info(self.info_at(i)))
            .collect()
    }

    fn subset(&self, indices: &[usize]) -> DosCollection {
        let storage = match &self.storage {
            Storage::Series(series) => {
                Storage::Series(indices.iter().map(|&i| series[i].clone()).collect())
            }
            Storage::Raw(series) => {
                Storage::Raw(indices.iter().map(|&i| series[i].clone()).collect())
            }
            Storage::Grid {
                energies,
                weights,
                info,
            } => Storage::Grid {
                energies: energies.clone(),
                weights: weights.select_rows(indices),
                info: indices.iter().map(|&i| info[i].clone()).collect(),
            },
        };
        DosCollection { storage }
    }

    /// Samples every series at the given energies.
    ///
    /// Returns a matrix with one row per series and one column per energy.
    #[instrument(level = "debug", skip_all, fields(kind = %self.kind(), series = self.len(), points = energies.len()))]
    pub fn sample(
        &self,
        energies: &[f64],
        width: f64,
        smearing: Smearing,
    ) -> Result<DMatrix<f64>, DosError> {
        broadening::check_positive_width(width)?;
        let series = self.to_vec();

        // Undersampling is reported once, on the calling thread.
        let undersampled = series
            .iter()
            .filter_map(DosData::as_grid)
            .find(|grid| grid.is_undersampled(width))
            .and_then(GridDosData::spacing);
        if let Some(spacing) = undersampled {
            data::warn_undersampled(width, spacing);
        }

        #[cfg(not(feature = "parallel"))]
        let iterator = series.iter();

        #[cfg(feature = "parallel")]
        let iterator = series.par_iter();

        let rows: Vec<Vec<f64>> = iterator
            .map(|data| data.sample_quiet(energies, width, smearing))
            .collect::<Result<_, _>>()?;

        Ok(DMatrix::from_fn(rows.len(), energies.len(), |i, j| {
            rows[i][j]
        }))
    }

    /// Samples every series on a common evenly spaced grid spanning all data.
    pub fn sample_grid(
        &self,
        config: &SampleGridConfig,
    ) -> Result<(Vec<f64>, DMatrix<f64>), DosError> {
        let (xmin, xmax) = match (config.xmin, config.xmax) {
            (Some(lo), Some(hi)) => (lo, hi),
            _ => {
                let (lo, hi) = self.energy_range().ok_or_else(|| {
                    DosError::InvalidGrid(
                        "cannot derive grid bounds from an empty collection".to_string(),
                    )
                })?;
                config.bounds(lo, hi)
            }
        };
        let energies = broadening::linspace(xmin, xmax, config.npts);
        let weights = self.sample(&energies, config.width, config.smearing)?;
        Ok((energies, weights))
    }

    /// Minimum and maximum energy over all contained series.
    pub fn energy_range(&self) -> Option<(f64, f64)> {
        let values: Box<dyn Iterator<Item = f64> + '_> = match &self.storage {
            Storage::Series(series) => {
                Box::new(series.iter().flat_map(|d| d.energies().iter().copied()))
            }
            Storage::Raw(series) => {
                Box::new(series.iter().flat_map(|d| d.energies().iter().copied()))
            }
            Storage::Grid { energies, info, .. } if !info.is_empty() => {
                Box::new(energies.iter().copied())
            }
            Storage::Grid { .. } => Box::new(std::iter::empty()),
        };
        values.fold(None, |range, e| match range {
            None => Some((e, e)),
            Some((lo, hi)) => Some((f64::min(lo, e), f64::max(hi, e))),
        })
    }

    /// Sums all series and labels the result `Total`.
    pub fn total(&self) -> Result<DosData, DosError> {
        let mut data = self.sum_all()?;
        info::set_label(data.info_mut(), "Total");
        Ok(data)
    }

    /// Sums all series, keeping only the info common to every entry.
    pub fn sum_all(&self) -> Result<DosData, DosError> {
        match &self.storage {
            Storage::Grid {
                energies,
                weights,
                info,
            } if !info.is_empty() => {
                let summed = weights.row_sum();
                let common = info
                    .iter()
                    .skip(1)
                    .fold(info[0].clone(), |acc, i| info::intersection(&acc, i));
                Ok(DosData::Grid(GridDosData::from_parts(
                    energies.clone(),
                    summed.iter().copied().collect(),
                    common,
                )))
            }
            _ => {
                let mut series = self.iter();
                let first = series.next().ok_or(DosError::EmptyCollection)?;
                series.try_fold(first, |acc, data| acc.combine(&data))
            }
        }
    }

    /// Narrows the collection to entries whose info contains every pair in
    /// `criteria`; `None` when nothing matches.
    pub fn select(&self, criteria: &Info) -> Option<DosCollection> {
        self.filter_by(|info| info::matches(info, criteria))
    }

    /// Narrows the collection to entries whose info does not contain every
    /// pair in `criteria`; `None` when nothing remains.
    pub fn select_not(&self, criteria: &Info) -> Option<DosCollection> {
        self.filter_by(|info| !info::matches(info, criteria))
    }

    fn filter_by(&self, predicate: impl Fn(&Info) -> bool) -> Option<DosCollection> {
        let indices: Vec<usize> = (0..self.len())
            .filter(|&i| predicate(self.info_at(i)))
            .collect();
        if indices.is_empty() {
            None
        } else {
            Some(self.subset(&indices))
        }
    }

    /// Sums entries sharing the same values for `keys`.
    ///
    /// Entries are grouped by their info restricted to `keys`; an entry lacking
    /// some keys groups with others restricted to the same remaining pairs.
    /// Groups are ordered by their sorted key/value pairs.
    #[instrument(level = "debug", skip_all, fields(kind = %self.kind(), series = self.len()))]
    pub fn sum_by<S: AsRef<str>>(&self, keys: &[S]) -> Result<DosCollection, DosError> {
        let groups: Vec<Info> = (0..self.len())
            .map(|i| info::restrict(self.info_at(i), keys))
            .sorted()
            .dedup()
            .collect();
        debug!(groups = groups.len(), "Grouped series for summation.");

        let summed = groups
            .iter()
            .map(|group| {
                self.select(group)
                    .ok_or_else(|| {
                        DosError::Internal("Something went wrong assembling sum groups".to_string())
                    })?
                    .sum_all()
            })
            .collect::<Result<Vec<_>, _>>()?;
        DosCollection::with_kind(self.kind(), summed)
    }

    /// Joins another collection, a single series, or nothing.
    ///
    /// Collections must be of the same kind, except that a generic collection
    /// accepts any other collection.
    pub fn join(&self, other: impl Into<Addend>) -> Result<DosCollection, DosError> {
        match other.into() {
            Addend::Nothing => Ok(self.clone()),
            Addend::Data(data) => {
                DosCollection::with_kind(self.kind(), self.iter().chain(std::iter::once(data)))
            }
            Addend::Collection(collection) => {
                let kind = self.kind();
                if kind != CollectionKind::Generic && collection.kind() != kind {
                    return Err(DosError::IncompatibleKinds {
                        left: kind.name(),
                        right: collection.kind().name(),
                    });
                }
                DosCollection::with_kind(kind, self.iter().chain(collection.iter()))
            }
        }
    }
}

fn unsupported(kind: CollectionKind, data: &DosData) -> DosError {
    let expected = match kind {
        CollectionKind::Raw => "RawDosData",
        CollectionKind::Grid => "GridDosData",
        CollectionKind::Generic => "DosData",
    };
    DosError::UnsupportedEntity {
        collection: kind.name(),
        expected,
        found: data.kind_name(),
    }
}

impl PartialEq for DosCollection {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind()
            && self.len() == other.len()
            && self.iter().zip(other.iter()).all(|(a, b)| a.almost_equals(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::info::from_pairs;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn raw_series() -> Vec<DosData> {
        vec![
            RawDosData::new(
                vec![1.0, 2.0, 3.0],
                vec![1.0, 1.0, 1.0],
                Some(from_pairs([("a", "1"), ("b", "1")])),
            )
            .unwrap()
            .into(),
            RawDosData::new(
                vec![2.0, 4.0],
                vec![2.0, 2.0],
                Some(from_pairs([("a", "2"), ("b", "1")])),
            )
            .unwrap()
            .into(),
            RawDosData::new(
                vec![0.5],
                vec![3.0],
                Some(from_pairs([("a", "2"), ("b", "2")])),
            )
            .unwrap()
            .into(),
        ]
    }

    fn grid_series() -> Vec<DosData> {
        let energies = vec![0.0, 0.5, 1.0, 1.5];
        vec![
            GridDosData::new(
                energies.clone(),
                vec![1.0, 2.0, 3.0, 4.0],
                Some(from_pairs([("a", "1"), ("b", "1")])),
            )
            .unwrap()
            .into(),
            GridDosData::new(
                energies.clone(),
                vec![0.5, 0.5, 0.5, 0.5],
                Some(from_pairs([("a", "2"), ("b", "1")])),
            )
            .unwrap()
            .into(),
            GridDosData::new(
                energies,
                vec![2.0, 0.0, 2.0, 0.0],
                Some(from_pairs([("a", "2"), ("b", "2")])),
            )
            .unwrap()
            .into(),
        ]
    }

    #[test]
    fn raw_collection_rejects_grid_data() {
        let mut series = raw_series();
        series.push(grid_series().remove(0));
        let err = DosCollection::raw(series).unwrap_err();
        assert_eq!(
            err,
            DosError::UnsupportedEntity {
                collection: "RawDosCollection",
                expected: "RawDosData",
                found: "GridDosData"
            }
        );
    }

    #[test]
    fn grid_collection_rejects_raw_data_and_mismatched_axes() {
        assert!(matches!(
            DosCollection::grid(raw_series()),
            Err(DosError::UnsupportedEntity { .. })
        ));

        let mut series = grid_series();
        series.push(
            GridDosData::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0; 4], None)
                .unwrap()
                .into(),
        );
        assert!(matches!(
            DosCollection::grid(series),
            Err(DosError::EnergyAxisMismatch(_))
        ));

        let mut short = grid_series();
        short.push(
            GridDosData::new(vec![0.0, 0.5], vec![0.0; 2], None)
                .unwrap()
                .into(),
        );
        assert!(matches!(
            DosCollection::grid(short),
            Err(DosError::EnergyAxisMismatch(_))
        ));
    }

    #[test]
    fn indexing_returns_entries_in_order() {
        let collection = DosCollection::new(raw_series());
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.get(1).unwrap().get_energies(), vec![2.0, 4.0]);
        assert_eq!(
            collection.get_signed(-1).unwrap().get_energies(),
            vec![0.5]
        );
        assert!(matches!(
            collection.get(3),
            Err(DosError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(matches!(
            collection.get_signed(-4),
            Err(DosError::IndexOutOfRange { index: -4, len: 3 })
        ));
    }

    #[test]
    fn slicing_clamps_to_bounds() {
        let collection = DosCollection::new(raw_series());
        assert_eq!(collection.slice(1..).len(), 2);
        assert_eq!(collection.slice(..=0).len(), 1);
        assert_eq!(collection.slice(2..10).len(), 1);
        assert!(collection.slice(5..).is_empty());
    }

    #[test]
    fn grid_indexing_builds_fresh_entries() {
        let collection = DosCollection::grid(grid_series()).unwrap();
        let mut entry = collection.get(0).unwrap();
        assert_eq!(entry.get_weights(), vec![1.0, 2.0, 3.0, 4.0]);
        assert!(entry.as_grid().is_some());

        entry.info_mut().insert("a".into(), "changed".into());
        assert_eq!(collection.get(0).unwrap().info()["a"], "1");
    }

    #[test]
    fn equality_is_tolerant_and_kind_aware() {
        let a = DosCollection::new(raw_series());
        let b = DosCollection::new(raw_series());
        assert_eq!(a, b);

        let raw_kind = DosCollection::raw(raw_series()).unwrap();
        assert_ne!(a, raw_kind);

        let shorter = DosCollection::new(raw_series().into_iter().take(2));
        assert_ne!(a, shorter);

        let mut changed = raw_series();
        changed[0].info_mut().insert("c".into(), "3".into());
        assert_ne!(a, DosCollection::new(changed));
    }

    #[test]
    fn sample_returns_one_row_per_series() {
        let collection = DosCollection::new(raw_series());
        let energies = [0.0, 1.0, 2.0, 3.0, 4.0];
        let sampled = collection.sample(&energies, 0.3, Smearing::Gauss).unwrap();
        assert_eq!(sampled.shape(), (3, 5));
        for (i, data) in collection.iter().enumerate() {
            let row = data.sample(&energies, 0.3, Smearing::Gauss).unwrap();
            for (j, value) in row.iter().enumerate() {
                assert!(f64_approx_equal(sampled[(i, j)], *value));
            }
        }
    }

    #[test]
    fn sample_rejects_bad_width_even_when_empty() {
        let empty = DosCollection::new(Vec::new());
        assert!(matches!(
            empty.sample(&[0.0], 0.0, Smearing::Gauss),
            Err(DosError::InvalidWidth(_))
        ));
        assert_eq!(
            empty.sample(&[0.0], 0.1, Smearing::Gauss).unwrap().shape(),
            (0, 1)
        );
    }

    #[test]
    fn sample_grid_spans_union_of_ranges() {
        let collection = DosCollection::new(raw_series());
        let config = SampleGridConfig {
            npts: 10,
            padding: 1.0,
            width: 0.5,
            ..SampleGridConfig::default()
        };
        let (energies, weights) = collection.sample_grid(&config).unwrap();
        assert_eq!(energies.len(), 10);
        assert!(f64_approx_equal(energies[0], 0.0));
        assert!(f64_approx_equal(energies[9], 4.5));
        assert_eq!(weights.shape(), (3, 10));
    }

    #[test]
    fn sum_all_of_empty_collection_fails() {
        assert_eq!(
            DosCollection::new(Vec::new()).sum_all().unwrap_err(),
            DosError::EmptyCollection
        );
        assert_eq!(
            DosCollection::new(Vec::new()).total().unwrap_err(),
            DosError::EmptyCollection
        );
    }

    #[test]
    fn sum_all_of_single_entry_is_a_copy() {
        let series = raw_series();
        let collection = DosCollection::new(series[..1].to_vec());
        assert!(collection.sum_all().unwrap().almost_equals(&series[0]));
    }

    #[test]
    fn sum_all_folds_through_combination() {
        let collection = DosCollection::new(raw_series());
        let summed = collection.sum_all().unwrap();
        assert_eq!(summed.get_energies(), vec![1.0, 2.0, 3.0, 2.0, 4.0, 0.5]);
        assert!(summed.info().is_empty());

        let subset = DosCollection::new(raw_series().into_iter().take(2));
        assert_eq!(subset.sum_all().unwrap().info(), &from_pairs([("b", "1")]));
    }

    #[test]
    fn total_sets_label() {
        let collection = DosCollection::new(raw_series());
        let total = collection.total().unwrap();
        assert_eq!(total.info(), &from_pairs([("label", "Total")]));
    }

    #[test]
    fn total_keeps_shared_info_alongside_label() {
        let raw = DosCollection::raw(raw_series().into_iter().take(2)).unwrap();
        assert_eq!(
            raw.total().unwrap().info(),
            &from_pairs([("b", "1"), ("label", "Total")])
        );

        let grid = DosCollection::grid(grid_series().into_iter().take(2)).unwrap();
        let total = grid.total().unwrap();
        assert_eq!(total.info(), &from_pairs([("b", "1"), ("label", "Total")]));
        assert_eq!(total.label(), "Total");
    }

    #[test]
    fn sampling_undersampled_grid_collection_still_scales_by_spacing() {
        let collection = DosCollection::grid(grid_series()).unwrap();
        let sampled = collection.sample(&[0.5], 0.1, Smearing::Gauss).unwrap();
        let direct = grid_series()[0].sample(&[0.5], 0.1, Smearing::Gauss).unwrap();
        assert!(f64_approx_equal(sampled[(0, 0)], direct[0]));
    }

    #[test]
    fn grid_sum_all_matches_pairwise_combination() {
        let collection = DosCollection::grid(grid_series()).unwrap();
        let summed = collection.sum_all().unwrap();
        assert_eq!(summed.get_weights(), vec![3.5, 2.5, 5.5, 4.5]);
        assert!(summed.info().is_empty());

        let folded = grid_series()
            .into_iter()
            .reduce(|a, b| a.combine(&b).unwrap())
            .unwrap();
        assert!(summed.almost_equals(&folded));
    }

    #[test]
    fn mixed_generic_collection_cannot_be_summed() {
        let mut series = raw_series();
        series.push(grid_series().remove(0));
        let collection = DosCollection::new(series);
        assert!(matches!(
            collection.sum_all(),
            Err(DosError::IncompatibleKinds { .. })
        ));
    }

    #[test]
    fn select_keeps_matching_entries() {
        let collection = DosCollection::new(raw_series());
        let selected = collection.select(&from_pairs([("a", "2")])).unwrap();
        assert_eq!(selected.len(), 2);
        assert_eq!(selected.kind(), CollectionKind::Generic);

        let both = collection
            .select(&from_pairs([("a", "2"), ("b", "1")]))
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both.get(0).unwrap().get_energies(), vec![2.0, 4.0]);

        assert_eq!(collection.select(&from_pairs([("b", "1")])).unwrap().len(), 2);
    }

    #[test]
    fn select_without_match_returns_none() {
        let collection = DosCollection::new(raw_series());
        assert!(collection.select(&from_pairs([("a", "3")])).is_none());
        assert!(collection.select_not(&Info::new()).is_none());
    }

    #[test]
    fn select_not_is_the_complement() {
        let collection = DosCollection::raw(raw_series()).unwrap();
        let criteria = from_pairs([("a", "1")]);
        let kept = collection.select_not(&criteria).unwrap();
        assert_eq!(kept.len(), 2);
        assert_eq!(kept.kind(), CollectionKind::Raw);

        let rejoined = collection
            .select(&criteria)
            .unwrap()
            .join(collection.select_not(&criteria))
            .unwrap();
        assert_eq!(rejoined, collection);
    }

    #[test]
    fn grid_selection_keeps_shared_axis() {
        let collection = DosCollection::grid(grid_series()).unwrap();
        let selected = collection.select(&from_pairs([("b", "1")])).unwrap();
        assert_eq!(selected.kind(), CollectionKind::Grid);
        assert_eq!(selected.len(), 2);
        assert_eq!(
            selected.get(1).unwrap().get_weights(),
            vec![0.5, 0.5, 0.5, 0.5]
        );
        assert_eq!(selected.grid_energies(), collection.grid_energies());
    }

    #[test]
    fn sum_by_groups_on_restricted_info() {
        let collection = DosCollection::new(raw_series());
        let grouped = collection.sum_by(&["b"]).unwrap();
        assert_eq!(grouped.len(), 2);

        let first = grouped.get(0).unwrap();
        assert_eq!(first.info(), &from_pairs([("b", "1")]));
        assert_eq!(first.get_energies(), vec![1.0, 2.0, 3.0, 2.0, 4.0]);

        let second = grouped.get(1).unwrap();
        assert_eq!(second.info(), &from_pairs([("a", "2"), ("b", "2")]));
        assert_eq!(second.get_energies(), vec![0.5]);
    }

    #[test]
    fn sum_by_all_distinct_keys_keeps_every_entry() {
        let collection = DosCollection::new(raw_series());
        let grouped = collection.sum_by(&["a", "b"]).unwrap();
        assert_eq!(grouped, collection);
    }

    #[test]
    fn sum_by_merges_entries_missing_every_key() {
        let collection = DosCollection::new(raw_series());
        let grouped = collection.sum_by(&["missing"]).unwrap();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped.get(0).unwrap().len(), 6);
    }

    #[test]
    fn sum_by_on_grid_collection_stays_grid() {
        let collection = DosCollection::grid(grid_series()).unwrap();
        let grouped = collection.sum_by(&["b"]).unwrap();
        assert_eq!(grouped.kind(), CollectionKind::Grid);
        assert_eq!(
            grouped.get(0).unwrap().get_weights(),
            vec![1.5, 2.5, 3.5, 4.5]
        );
    }

    #[test]
    fn join_appends_single_series() {
        let collection = DosCollection::new(raw_series()[..2].to_vec());
        let joined = collection.join(raw_series().remove(2)).unwrap();
        assert_eq!(joined, DosCollection::new(raw_series()));
    }

    #[test]
    fn join_with_nothing_is_a_no_op() {
        let collection = DosCollection::new(raw_series());
        assert_eq!(collection.join(None::<DosCollection>).unwrap(), collection);
        assert_eq!(collection.join(Addend::Nothing).unwrap(), collection);
    }

    #[test]
    fn join_requires_matching_kinds() {
        let raw = DosCollection::raw(raw_series()).unwrap();
        let generic = DosCollection::new(raw_series());
        let grid = DosCollection::grid(grid_series()).unwrap();

        assert_eq!(
            raw.join(generic.clone()).unwrap_err(),
            DosError::IncompatibleKinds {
                left: "RawDosCollection",
                right: "DosCollection"
            }
        );
        assert!(matches!(
            grid.join(raw.clone()),
            Err(DosError::IncompatibleKinds { .. })
        ));

        let widened = generic.join(raw).unwrap();
        assert_eq!(widened.kind(), CollectionKind::Generic);
        assert_eq!(widened.len(), 6);
    }

    #[test]
    fn join_validates_appended_series() {
        let raw = DosCollection::raw(raw_series()).unwrap();
        assert!(matches!(
            raw.join(grid_series().remove(0)),
            Err(DosError::UnsupportedEntity { .. })
        ));
    }

    #[test]
    fn labels_follow_info() {
        let mut series = raw_series();
        series[0].info_mut().insert("label".into(), "first".into());
        let collection = DosCollection::new(series);
        assert_eq!(
            collection.labels(),
            vec!["first", "a: 2; b: 1", "a: 2; b: 2"]
        );
    }
}
