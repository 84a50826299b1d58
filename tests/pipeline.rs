//! End-to-end pipeline properties: parse, classify, filter, tally.

use proptest::prelude::*;

use survey_tally::{
    aggregate::{self, NOT_INFORMED},
    classify::{DEFAULT_RULES, classify_table},
    dataset::{ClassifiedTable, Row},
    filter::{Facet, Selection},
    ingest::{SourceFormat, parse_delimited_text},
    session::Session,
};

const SAMPLE: &str = "Papel,Escola,Q1\nProfessor,EscolaA,Sim\nDiretor,EscolaB,Não\n";

fn classified(text: &str) -> ClassifiedTable {
    let table = parse_delimited_text(text).expect("parse");
    classify_table(table, SourceFormat::DelimitedText, &DEFAULT_RULES)
}

#[test]
fn sample_survey_parses_classifies_and_tallies() {
    let data = classified(SAMPLE);
    assert_eq!(data.table.headers(), ["Papel", "Escola", "Q1"]);
    assert_eq!(data.table.row_count(), 2);
    assert_eq!(data.role_column, "Papel");
    assert_eq!(data.school_column, "Escola");
    assert_eq!(data.question_columns, ["Q1"]);

    let rows: Vec<&Row> = data.table.rows().iter().collect();
    let frequencies = aggregate::count_values(&data.table, &rows, "Q1");
    assert_eq!(frequencies.count("Sim"), 1);
    assert_eq!(frequencies.count("Não"), 1);
    assert_eq!(frequencies.total(), 2);
}

#[test]
fn every_well_formed_line_becomes_a_row() {
    let mut text = String::from("a,b,c\n");
    for i in 0..25 {
        text.push_str(&format!("{i},{i},{i}\n"));
    }
    let table = parse_delimited_text(&text).expect("parse");
    assert_eq!(table.row_count(), 25);
    assert_eq!(table.dropped_rows(), 0);
}

#[test]
fn mismatched_line_is_dropped_not_an_error() {
    let table = parse_delimited_text("a,b,c\n1,2\n").expect("parse");
    assert_eq!(table.row_count(), 0);
    assert_eq!(table.dropped_rows(), 1);
}

#[test]
fn blank_answer_hits_sentinel_but_not_unique_values() {
    let data = classified("Papel,Escola,Q1\nProfessor,EscolaA,\n");
    let rows: Vec<&Row> = data.table.rows().iter().collect();
    let frequencies = aggregate::count_values(&data.table, &rows, "Q1");
    assert_eq!(frequencies.count(NOT_INFORMED), 1);
    assert!(aggregate::unique_values(&data.table, &rows, "Q1").is_empty());
}

#[test]
fn clear_reproduces_the_unfiltered_tally() {
    let mut session = Session::new(classified(SAMPLE));
    let unfiltered = session.tally("Q1");
    session.toggle_filter(Facet::Role, "Professor");
    assert_ne!(session.tally("Q1"), unfiltered);
    session.clear_filters();
    assert_eq!(session.tally("Q1"), unfiltered);
}

proptest! {
    #[test]
    fn facet_filters_commute_and_counts_sum(
        cells in proptest::collection::vec(("[ab]", "[xy]", "[pq]"), 1..40)
    ) {
        let mut text = String::from("Papel,Escola,Q1\n");
        for (role, school, answer) in &cells {
            text.push_str(&format!("{role},{school},{answer}\n"));
        }
        let data = classified(&text);

        let mut role_only = Selection::new();
        role_only.replace(Facet::Role, ["a"]);
        let mut school_only = Selection::new();
        school_only.replace(Facet::School, ["x"]);
        let mut both = Selection::new();
        both.replace(Facet::Role, ["a"]);
        both.replace(Facet::School, ["x"]);

        let roles_then_schools: Vec<&Row> = role_only
            .apply(&data)
            .into_iter()
            .filter(|row| school_only.matches(&data, row))
            .collect();
        let schools_then_roles: Vec<&Row> = school_only
            .apply(&data)
            .into_iter()
            .filter(|row| role_only.matches(&data, row))
            .collect();
        let combined = both.apply(&data);

        prop_assert_eq!(&roles_then_schools, &schools_then_roles);
        prop_assert_eq!(&roles_then_schools, &combined);

        let frequencies = aggregate::count_values(&data.table, &combined, "Q1");
        prop_assert_eq!(frequencies.total() as usize, combined.len());
    }
}
