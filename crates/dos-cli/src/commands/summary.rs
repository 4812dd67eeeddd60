use crate::cli::SummaryArgs;
use crate::config::InputFile;
use crate::error::Result;
use dosdata::core::collection::DosCollection;
use std::fmt::Write;
use tracing::info;

pub fn run(args: SummaryArgs) -> Result<()> {
    info!("Reading series from {:?}", args.input);
    let input = InputFile::from_file(&args.input)?;
    let collection = input.build_collection()?;
    print!("{}", render(&collection));
    Ok(())
}

/// One header line plus one line per series.
fn render(collection: &DosCollection) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} with {} series",
        collection.kind(),
        collection.len()
    );
    for (i, data) in collection.iter().enumerate() {
        let range = match energy_range(&data.get_energies()) {
            Some((lo, hi)) => format!("[{lo}, {hi}]"),
            None => "[]".to_string(),
        };
        let _ = writeln!(
            out,
            "{:>4}  {:<12} {:>6} pts  {:<24} {}",
            i,
            data.kind_name(),
            data.len(),
            range,
            data.label()
        );
    }
    out
}

/// Raw energies are unordered.
fn energy_range(energies: &[f64]) -> Option<(f64, f64)> {
    energies.iter().fold(None, |range, &e| match range {
        None => Some((e, e)),
        Some((lo, hi)) => Some((lo.min(e), hi.max(e))),
    })
}
