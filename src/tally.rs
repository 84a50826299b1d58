//! Per-question frequency tallies with percentages.

use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;
use serde::Serialize;

use crate::{
    aggregate,
    cli::TallyArgs,
    dataset::ClassifiedTable,
    filter::Facet,
    io_utils,
    session::Session,
    table,
};

#[derive(Debug, Serialize)]
pub struct TallyEntry {
    pub column: String,
    pub value: String,
    pub count: u64,
    pub percentage: f64,
}

pub fn execute(args: &TallyArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let mut session = Session::load(&args.input, encoding)
        .with_context(|| format!("Loading survey from {:?}", args.input))?;
    session.replace_filter(Facet::Role, args.roles.iter().cloned());
    session.replace_filter(Facet::School, args.schools.iter().cloned());

    let columns = resolve_columns(session.data(), &args.columns)?;
    let row_count = session.filtered_rows().len();

    let mut entries = Vec::new();
    for column in &columns {
        let frequencies = session.tally(column);
        let total = frequencies.total();
        if total == 0 {
            continue;
        }
        let mut sorted = frequencies.sorted_entries();
        if args.top > 0 && sorted.len() > args.top {
            sorted.truncate(args.top);
        }
        for (value, count) in sorted {
            entries.push(TallyEntry {
                column: column.clone(),
                value,
                count,
                percentage: aggregate::percent(count, total),
            });
        }
    }

    if let Some(output) = &args.output {
        write_csv(output, &entries)?;
        info!("Wrote {} tally row(s) to {:?}", entries.len(), output);
        return Ok(());
    }

    if args.json {
        serde_json::to_writer_pretty(io::stdout().lock(), &entries)
            .context("Writing tally JSON")?;
        println!();
        return Ok(());
    }

    let headers = vec![
        "column".to_string(),
        "value".to_string(),
        "count".to_string(),
        "percent".to_string(),
    ];
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| {
            vec![
                entry.column.clone(),
                entry.value.clone(),
                entry.count.to_string(),
                format!("{:.1}%", entry.percentage),
            ]
        })
        .collect();
    table::print_table(&headers, &rows);
    info!(
        "Tallied {} column(s) across {} response(s)",
        columns.len(),
        row_count
    );
    Ok(())
}

fn resolve_columns(data: &ClassifiedTable, requested: &[String]) -> Result<Vec<String>> {
    if requested.is_empty() {
        return Ok(data.question_columns.clone());
    }
    let mut columns = Vec::new();
    for name in requested {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if data.table.column_index(name).is_none() {
            bail!("Column '{name}' not found in input");
        }
        columns.push(name.to_string());
    }
    Ok(columns)
}

fn write_csv(path: &Path, entries: &[TallyEntry]) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(Some(path))?;
    writer
        .write_record(["column", "value", "count", "percent"])
        .context("Writing tally header")?;
    for entry in entries {
        let count = entry.count.to_string();
        let percentage = format!("{:.1}", entry.percentage);
        writer
            .write_record([
                entry.column.as_str(),
                entry.value.as_str(),
                count.as_str(),
                percentage.as_str(),
            ])
            .with_context(|| format!("Writing tally row for '{}'", entry.column))?;
    }
    writer.flush().context("Flushing tally output")?;
    Ok(())
}
