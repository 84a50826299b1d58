//! Response totals and role/school distributions.

use anyhow::{Context, Result};
use log::info;

use crate::{
    aggregate::{self, FrequencyTable},
    cli::SummaryArgs,
    filter::Facet,
    io_utils,
    session::Session,
    table,
};

pub fn execute(args: &SummaryArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let mut session = Session::load(&args.input, encoding)
        .with_context(|| format!("Loading survey from {:?}", args.input))?;
    session.replace_filter(Facet::Role, args.roles.iter().cloned());
    session.replace_filter(Facet::School, args.schools.iter().cloned());

    let data = session.data();
    let filtered = session.filtered_rows().len();
    let roles = session.available_roles();
    let schools = session.available_schools();

    let headers = vec!["metric".to_string(), "value".to_string()];
    let rows = vec![
        metric("responses", filtered),
        metric("total parsed rows", data.table.row_count()),
        metric("dropped malformed rows", data.table.dropped_rows()),
        metric("distinct roles", roles.len()),
        metric("distinct schools", schools.len()),
        metric("question columns", data.question_columns.len()),
    ];
    table::print_table(&headers, &rows);

    if filtered > 0 {
        let role_column = data.role_column.clone();
        let school_column = data.school_column.clone();
        print_distribution("Distribution by role", &session.tally(&role_column));
        print_distribution("Distribution by school", &session.tally(&school_column));
    }

    info!(
        "Summarized {} of {} response(s) from {:?}",
        filtered,
        session.data().table.row_count(),
        args.input
    );
    Ok(())
}

fn metric(name: &str, value: usize) -> Vec<String> {
    vec![name.to_string(), value.to_string()]
}

fn print_distribution(title: &str, frequencies: &FrequencyTable) {
    let total = frequencies.total();
    if total == 0 {
        return;
    }
    println!("\n{title}");
    let headers = vec![
        "value".to_string(),
        "count".to_string(),
        "percent".to_string(),
    ];
    let rows: Vec<Vec<String>> = frequencies
        .sorted_entries()
        .into_iter()
        .map(|(value, count)| {
            vec![
                value,
                count.to_string(),
                format!("{:.1}%", aggregate::percent(count, total)),
            ]
        })
        .collect();
    table::print_table(&headers, &rows);
}
