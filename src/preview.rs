//! First-rows preview of a parsed survey file.

use anyhow::{Context, Result};
use log::info;

use crate::{cli::PreviewArgs, ingest, io_utils, table};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let (parsed, _format) = ingest::load_table(&args.input, encoding)
        .with_context(|| format!("Loading survey from {:?}", args.input))?;

    let rows: Vec<Vec<String>> = parsed
        .rows()
        .iter()
        .take(args.rows)
        .map(|row| row.cells().to_vec())
        .collect();
    table::print_table(parsed.headers(), &rows);
    info!(
        "Displayed {} of {} row(s) from {:?}",
        rows.len(),
        parsed.row_count(),
        args.input
    );
    Ok(())
}
