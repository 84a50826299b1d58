fn main() {
    if let Err(err) = survey_tally::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
