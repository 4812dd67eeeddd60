use crate::cli::SampleArgs;
use crate::config::InputFile;
use crate::error::{CliError, Result};
use crate::utils::parser;
use dosdata::config::SampleGridConfig;
use dosdata::core::collection::DosCollection;
use nalgebra::DMatrix;
use std::fs::File;
use std::io::{self, Write};
use tracing::{debug, info};

/// Broadened series ready to be written as columns.
#[derive(Debug)]
struct SampledTable {
    energies: Vec<f64>,
    labels: Vec<String>,
    columns: Vec<Vec<f64>>,
}

pub fn run(args: SampleArgs) -> Result<()> {
    info!("Reading series from {:?}", args.input);
    let input = InputFile::from_file(&args.input)?;
    let config = input.merge_with_cli(&args)?;
    let collection = input.build_collection()?;

    let collection = reduce(collection, &args)?;
    let table = sample(&collection, &config, args.total)?;

    match &args.output {
        Some(path) => {
            info!("Writing {} columns to {:?}", table.columns.len(), path);
            write_csv(&table, File::create(path)?)?;
        }
        None => write_csv(&table, io::stdout().lock())?,
    }
    Ok(())
}

/// Applies selection, exclusion and grouping in that order.
fn reduce(collection: DosCollection, args: &SampleArgs) -> Result<DosCollection> {
    let mut collection = collection;

    if !args.select.is_empty() {
        let criteria = parser::parse_criteria(&args.select)
            .map_err(|e| CliError::Argument(e.to_string()))?;
        collection = collection.select(&criteria).ok_or_else(|| {
            CliError::Selection(format!("no series match {:?}", args.select))
        })?;
        debug!("{} series left after --select", collection.len());
    }

    if !args.exclude.is_empty() {
        let criteria = parser::parse_criteria(&args.exclude)
            .map_err(|e| CliError::Argument(e.to_string()))?;
        collection = collection.select_not(&criteria).ok_or_else(|| {
            CliError::Selection(format!("every series matches {:?}", args.exclude))
        })?;
        debug!("{} series left after --exclude", collection.len());
    }

    if !args.sum_by.is_empty() {
        collection = collection.sum_by(args.sum_by.as_slice())?;
        debug!("{} groups after --sum-by", collection.len());
    }

    Ok(collection)
}

fn sample(
    collection: &DosCollection,
    config: &SampleGridConfig,
    with_total: bool,
) -> Result<SampledTable> {
    let (energies, weights) = collection.sample_grid(config)?;
    let mut labels = collection.labels();
    let mut columns = matrix_rows(&weights);

    if with_total {
        let total = collection.total()?;
        columns.push(total.sample(&energies, config.width, config.smearing)?);
        labels.push(total.label());
    }

    Ok(SampledTable {
        energies,
        labels,
        columns,
    })
}

fn matrix_rows(weights: &DMatrix<f64>) -> Vec<Vec<f64>> {
    weights
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}

fn write_csv<W: Write>(table: &SampledTable, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut header = vec!["energy".to_string()];
    header.extend(table.labels.iter().cloned());
    writer.write_record(&header)?;

    for (j, energy) in table.energies.iter().enumerate() {
        let mut record = vec![energy.to_string()];
        record.extend(table.columns.iter().map(|col| col[j].to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
