//! Column classification report.

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::{cli::InspectArgs, io_utils, session::Session, table};

#[derive(Debug, Serialize)]
struct ClassificationReport<'a> {
    headers: &'a [String],
    role_column: &'a str,
    school_column: &'a str,
    question_columns: &'a [String],
    row_count: usize,
    dropped_rows: usize,
}

pub fn execute(args: &InspectArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let session = Session::load(&args.input, encoding)
        .with_context(|| format!("Loading survey from {:?}", args.input))?;
    let data = session.data();

    if args.json {
        let report = ClassificationReport {
            headers: data.table.headers(),
            role_column: &data.role_column,
            school_column: &data.school_column,
            question_columns: &data.question_columns,
            row_count: data.table.row_count(),
            dropped_rows: data.table.dropped_rows(),
        };
        serde_json::to_writer_pretty(std::io::stdout().lock(), &report)
            .context("Writing classification JSON")?;
        println!();
        return Ok(());
    }

    let mut rows = Vec::with_capacity(data.table.headers().len());
    for (idx, header) in data.table.headers().iter().enumerate() {
        rows.push(vec![
            (idx + 1).to_string(),
            header.clone(),
            data.facet_of(header).label().to_string(),
        ]);
    }
    let headers = vec!["#".to_string(), "column".to_string(), "facet".to_string()];
    table::print_table(&headers, &rows);
    info!(
        "Classified {} column(s) from {:?}",
        data.table.headers().len(),
        args.input
    );
    Ok(())
}
