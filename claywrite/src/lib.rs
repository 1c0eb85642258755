use std::{fs::File, io::BufWriter, path::Path};

pub use error::{ConfigError, WriteError};
use pdf::Document;
use writer::{DocumentWriter, Sink, WriterConfig};

mod error;
#[cfg(test)]
mod parse;
pub mod pdf;
pub mod simple_encode;
pub mod writer;

/// Write `document` to a new file at `file_path`.
///
/// An existing file is truncated.
pub fn write_file(document: &Document, file_path: &Path, config: WriterConfig) -> Result<(), WriteError> {
    let file = File::create(file_path)?;
    let mut sink = Sink::new(BufWriter::new(file))?;
    DocumentWriter::new(config).write(document, &mut sink)
}

/// Write `document` into memory.
pub fn write_to_vec(document: &Document, config: WriterConfig) -> Result<Vec<u8>, WriteError> {
    let mut out = Vec::new();
    DocumentWriter::new(config).write(document, &mut out)?;
    Ok(out)
}
