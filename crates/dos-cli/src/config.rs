use crate::cli::SampleArgs;
use crate::error::{CliError, Result};
use dosdata::config::SampleGridConfig;
use dosdata::core::broadening::Smearing;
use dosdata::core::collection::{CollectionKind, DosCollection};
use dosdata::core::data::{DosData, GridDosData, RawDosData};
use dosdata::core::info::{self, Info};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum CollectionChoice {
    #[default]
    Generic,
    Raw,
    Grid,
}

impl From<CollectionChoice> for CollectionKind {
    fn from(c: CollectionChoice) -> Self {
        match c {
            CollectionChoice::Generic => CollectionKind::Generic,
            CollectionChoice::Raw => CollectionKind::Raw,
            CollectionChoice::Grid => CollectionKind::Grid,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum SeriesKind {
    #[default]
    Raw,
    Grid,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialSamplingConfig {
    npts: Option<usize>,
    width: Option<f64>,
    padding: Option<f64>,
    xmin: Option<f64>,
    xmax: Option<f64>,
    smearing: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct SeriesEntry {
    #[serde(default)]
    kind: SeriesKind,
    energies: Vec<f64>,
    weights: Vec<f64>,
    #[serde(default)]
    info: toml::Table,
}

impl SeriesEntry {
    fn into_data(self) -> Result<DosData> {
        let info = parse_info(self.info)?;
        let data: DosData = match self.kind {
            SeriesKind::Raw => RawDosData::new(self.energies, self.weights, Some(info))?.into(),
            SeriesKind::Grid => GridDosData::new(self.energies, self.weights, Some(info))?.into(),
        };
        Ok(data)
    }
}

/// Info tables may only hold strings; anything else is rejected by the core.
fn parse_info(table: toml::Table) -> Result<Info> {
    let pairs = table
        .into_iter()
        .map(|(key, value)| (key, value.as_str().map(str::to_string)));
    Ok(info::try_from_pairs(pairs)?)
}

/// Contents of a series input file.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct InputFile {
    #[serde(default)]
    collection: CollectionChoice,
    sampling: Option<PartialSamplingConfig>,
    #[serde(default)]
    series: Vec<SeriesEntry>,
}

impl InputFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading series from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn collection_kind(&self) -> CollectionKind {
        self.collection.into()
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Builds the collection described by the file.
    ///
    /// Kind restrictions of the collection are enforced by the core, so a grid
    /// collection holding raw entries fails here rather than when sampling.
    pub fn build_collection(&self) -> Result<DosCollection> {
        let series = self
            .series
            .iter()
            .cloned()
            .map(SeriesEntry::into_data)
            .collect::<Result<Vec<_>>>()?;
        debug!(
            "Parsed {} series for a {} collection.",
            series.len(),
            self.collection_kind()
        );
        Ok(DosCollection::with_kind(self.collection_kind(), series)?)
    }

    /// Resolves the final sampling parameters.
    ///
    /// Precedence from highest to lowest: `--set` values, dedicated CLI flags,
    /// the `[sampling]` table, built-in defaults.
    pub fn merge_with_cli(&self, args: &SampleArgs) -> Result<SampleGridConfig> {
        let mut file_config = self.sampling.clone().unwrap_or_default();
        file_config.apply_set_values(&args.set_values)?;
        let has_set = |key: &str| {
            args.set_values
                .iter()
                .any(|kv| kv.split_once('=').map(|(k, _)| k) == Some(key))
        };
        let pick = |key: &str, cli: Option<f64>, file: Option<f64>| {
            if has_set(key) { file } else { cli.or(file) }
        };

        let npts = if has_set("sampling.npts") {
            file_config.npts
        } else {
            args.npts.or(file_config.npts)
        };
        let width = pick("sampling.width", args.width, file_config.width);
        let padding = pick("sampling.padding", args.padding, file_config.padding);
        let xmin = pick("sampling.xmin", args.xmin, file_config.xmin);
        let xmax = pick("sampling.xmax", args.xmax, file_config.xmax);
        let smearing = if has_set("sampling.smearing") {
            file_config.smearing.as_ref()
        } else {
            args.smearing.as_ref().or(file_config.smearing.as_ref())
        };

        let mut builder = SampleGridConfig::builder();
        if let Some(npts) = npts {
            builder = builder.npts(npts);
        }
        if let Some(width) = width {
            builder = builder.width(width);
        }
        if let Some(padding) = padding {
            builder = builder.padding(padding);
        }
        if let Some(xmin) = xmin {
            builder = builder.xmin(xmin);
        }
        if let Some(xmax) = xmax {
            builder = builder.xmax(xmax);
        }
        if let Some(name) = smearing {
            builder = builder.smearing(Smearing::from_str(name)?);
        }

        let config = builder.build()?;
        debug!("Resolved sampling configuration: {:?}", config);
        Ok(config)
    }
}

impl PartialSamplingConfig {
    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;

            let float = |v: &str| -> Result<f64> {
                v.parse().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, v))
                })
            };

            match key {
                "sampling.npts" => {
                    self.npts = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid integer value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                "sampling.width" => self.width = Some(float(value_str)?),
                "sampling.padding" => self.padding = Some(float(value_str)?),
                "sampling.xmin" => self.xmin = Some(float(value_str)?),
                "sampling.xmax" => self.xmax = Some(float(value_str)?),
                "sampling.smearing" => self.smearing = Some(value_str.to_string()),
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
