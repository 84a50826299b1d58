//! Input reading, encoding resolution, and CSV output.
//!
//! The `-` path convention routes delimited-text input through stdin and
//! tally output through stdout. Input decoding goes through `encoding_rs`,
//! defaulting to UTF-8; CSV output always quotes for round-trip safety.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use csv::QuoteStyle;
use encoding_rs::{Encoding, UTF_8};

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

/// Whole input as bytes; `-` drains stdin.
pub fn read_input_bytes(path: &Path) -> io::Result<Vec<u8>> {
    if is_dash(path) {
        let mut buffer = Vec::new();
        io::stdin().lock().read_to_end(&mut buffer)?;
        Ok(buffer)
    } else {
        fs::read(path)
    }
}

pub fn open_csv_writer(path: Option<&Path>) -> Result<csv::Writer<Box<dyn Write>>> {
    let sink: Box<dyn Write> = match path {
        Some(p) if !is_dash(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Creating output file {p:?}"))?,
        )),
        _ => Box::new(io::stdout()),
    };
    let mut builder = csv::WriterBuilder::new();
    builder.quote_style(QuoteStyle::Always).double_quote(true);
    Ok(builder.from_writer(sink))
}
