//! The structural parts of a PDF file around the objects.

use std::io;

use crate::{
    error::WriteError,
    pdf::{trailer::TRAILER, Dictionary, Xref, XrefEntry},
    simple_encode::SimpleEncoder,
    writer::{Encoder, Writer},
};

const XREF: &[u8] = b"xref\n";
const STARTXREF: &[u8] = b"startxref\n";
const EOF_MARKER: &[u8] = b"%%EOF\n";

/// Comment with bytes above 127 so that transfer tools treat the file as
/// binary.
const BINARY_MARKER: &[u8] = b"%\xE2\xE3\xCF\xD3\n";

/// Free entries are written as the head of the free list, the next free
/// object is not kept.
const FREE_ENTRY: &[u8] = b"0000000000 65535 f \n";

pub(crate) fn write_header(version: (u8, u8), writer: &mut dyn Writer) -> io::Result<()> {
    log::trace!("write header for version {}.{}", version.0, version.1);

    writer.write(format!("%PDF-{}.{}\n", version.0, version.1).as_bytes())?;
    writer.write(BINARY_MARKER)
}

/// Write the classic xref table.
///
/// Fails for compressed entries, they can only be stored in a xref stream.
pub(crate) fn write_xref_table(xref: &Xref, writer: &mut dyn Writer) -> Result<(), WriteError> {
    log::trace!("write XRef table with {} entries", xref.len());

    if let Some(compressed) = xref.compressed_objects().next() {
        return Err(WriteError::UnexpectedXrefEntry {
            number: compressed.number,
        });
    }

    writer.write(XREF)?;
    for subsection in xref.subsections() {
        writer.write(format!("{} {}\n", subsection.start, subsection.entries.len()).as_bytes())?;
        for entry in subsection.entries {
            match entry {
                XrefEntry::Used(used) => {
                    writer.write(format!("{:010} {:05} n \n", used.byte_offset, used.generation).as_bytes())?
                }
                XrefEntry::Free(_) => writer.write(FREE_ENTRY)?,
                XrefEntry::UsedCompressed(c) => return Err(WriteError::UnexpectedXrefEntry { number: c.number }),
            }
        }
    }
    Ok(())
}

pub(crate) fn write_trailer(trailer: &Dictionary, writer: &mut dyn Writer) -> io::Result<()> {
    log::trace!("write Trailer");

    writer.write(TRAILER)?;
    writer.write(b"\n")?;
    SimpleEncoder::write_to(trailer, writer)?;
    writer.write(b"\n")
}

pub(crate) fn write_startxref(xref_offset: usize, writer: &mut dyn Writer) -> io::Result<()> {
    writer.write(STARTXREF)?;
    writer.write(xref_offset.to_string().as_bytes())?;
    writer.write(b"\n")?;
    writer.write(EOF_MARKER)
}
