//! I/O utilities for reading the dataset and writing CLI output.
//!
//! - **Dataset bytes**: the `-` path convention routes through stdin.
//! - **Encoding**: input decoding via `encoding_rs`, defaulting to UTF-8. A
//!   UTF-8 BOM is stripped; malformed input is an error, never replaced.
//! - **CSV reader construction**: used by the quote-aware tokenizer.
//! - **Output**: pretty JSON to stdout.

use std::{
    borrow::Cow,
    fs::File,
    io::{self, BufReader, Read, Write},
    path::Path,
};

use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_8};
use serde::Serialize;

use crate::error::LoadError;

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding, LoadError> {
    match label {
        Some(value) => Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| LoadError::UnknownEncoding(value.to_string())),
        None => Ok(UTF_8),
    }
}

pub fn open_csv_reader<R>(reader: R, delimiter: u8, has_headers: bool) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(has_headers)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn read_path_bytes(path: &Path) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if is_dash(path) {
        io::stdin().lock().read_to_end(&mut buf)?;
    } else {
        BufReader::new(File::open(path)?).read_to_end(&mut buf)?;
    }
    Ok(buf)
}

/// Decodes dataset bytes into text, stripping a leading BOM when present.
pub fn decode_dataset(bytes: &[u8], encoding: &'static Encoding) -> Result<String, LoadError> {
    if encoding == UTF_8 {
        let body = match Encoding::for_bom(bytes) {
            Some((bom, len)) if bom == UTF_8 => &bytes[len..],
            _ => bytes,
        };
        return UTF_8
            .decode_without_bom_handling_and_without_replacement(body)
            .map(Cow::into_owned)
            .ok_or_else(|| LoadError::Decode {
                encoding: encoding.name().to_string(),
            });
    }
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(LoadError::Decode {
            encoding: encoding.name().to_string(),
        })
    } else {
        Ok(text.into_owned())
    }
}

pub fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value).context("Writing JSON output")?;
    writeln!(handle).context("Writing JSON output")?;
    Ok(())
}
