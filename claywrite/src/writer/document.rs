use crate::{error::WriteError, pdf::Document, simple_encode::section::write_header};

use super::{RevisionWriter, Writer, WriterConfig};

/// First PDF version that knows xref streams and object streams.
const XREF_STREAM_VERSION: (u8, u8) = (1, 5);

/// Writes a complete document, revision by revision.
#[derive(Debug, Default)]
pub struct DocumentWriter {
    config: WriterConfig,
}

impl DocumentWriter {
    pub fn new(config: WriterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Write the header followed by all revisions of `document`.
    ///
    /// Every revision points back to the xref section of its predecessor. If
    /// a revision fails, the bytes written so far stay in `writer`.
    pub fn write(&self, document: &Document, writer: &mut dyn Writer) -> Result<(), WriteError> {
        log::debug!(
            "write document with {} revisions, version {}.{}",
            document.revisions().len(),
            document.version.0,
            document.version.1
        );
        if document.version < XREF_STREAM_VERSION && uses_xref_streams(document) {
            log::warn!(
                "PDF {}.{} does not support xref streams",
                document.version.0,
                document.version.1
            );
        }

        write_header(document.version, writer)?;

        let mut revision_writer = RevisionWriter::new(&self.config);
        let last_xref = document
            .revisions()
            .iter()
            .enumerate()
            .try_fold(None, |previous, (number, revision)| {
                revision_writer
                    .write_revision(revision, number, previous, writer)
                    .map(Some)
            })?;
        log::debug!("last xref section at {:?}", last_xref);

        writer.flush()?;
        Ok(())
    }
}

fn uses_xref_streams(document: &Document) -> bool {
    document
        .revisions()
        .iter()
        .flat_map(|revision| revision.objects())
        .any(|object| matches!(object.body, crate::pdf::Body::XrefStream(_)))
}
