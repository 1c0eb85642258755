use std::borrow::Cow;

use crate::{
    error::WriteError,
    pdf::{
        trailer::{K_ENCRYPT, K_PREVIOUS, K_SIZE},
        usize_object, Body, Dictionary, Name, Object, PackedObjectStream, Reference, Revision, Xref,
    },
    simple_encode::{
        section::{write_startxref, write_trailer, write_xref_table},
        Indirect, SimpleEncoder,
    },
};

use super::{Encoder, Layout, Writer, WriterConfig};

/// Writes revisions one after another.
///
/// The only state kept between revisions is the `Size` of the trailer, which
/// never shrinks.
#[derive(Debug)]
pub struct RevisionWriter<'c> {
    config: &'c WriterConfig,
    size: u32,
}

impl<'c> RevisionWriter<'c> {
    pub fn new(config: &'c WriterConfig) -> Self {
        Self { config, size: 0 }
    }

    /// `Size` written to the trailer of the last revision.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Write the objects, the xref section and the trailer of `revision`.
    ///
    /// `previous` is the byte offset of the xref section of the preceding
    /// revision. Returns the byte offset of the xref section of this revision.
    pub fn write_revision(
        &mut self,
        revision: &Revision,
        revision_number: usize,
        previous: Option<usize>,
        writer: &mut dyn Writer,
    ) -> Result<usize, WriteError> {
        log::debug!(
            "write revision {} with {} objects at {}",
            revision_number,
            revision.len(),
            writer.position()
        );

        let layout = Layout::plan(revision)?;
        let packing = layout.pack(revision, self.config.compress_streams)?;

        let mut xref = if previous.is_none() && revision_number == 0 {
            Xref::with_free_head()
        } else {
            Xref::new()
        };

        let unencrypted = revision
            .trailer_ref()
            .get(K_ENCRYPT)
            .and_then(Object::reference)
            .map(Reference::id);

        for object in revision.objects() {
            let id = object.id;
            let value = match (&object.body, packing.location(id.number)) {
                (Body::Free, _) => {
                    xref.add_free(id.number, id.generation);
                    continue;
                }
                (_, Some((container, index))) => {
                    xref.add_compressed(id.number, container, index);
                    continue;
                }
                // written after the index, extra ones are dropped
                (Body::XrefStream(_), None) => continue,
                (Body::Value(value), None) => value,
                (Body::ObjectStream(_), None) => packing
                    .stream(id.number)
                    .map(PackedObjectStream::object)
                    .ok_or(WriteError::UnpackedObjectStream { number: id.number })?,
            };

            // the encryption dictionary itself is never encrypted
            let value = if Some(id) == unencrypted {
                Cow::Borrowed(value)
            } else {
                self.config.prepare(id, value)
            };

            xref.add_used(id.number, id.generation, writer.position());
            SimpleEncoder::write_to(&Indirect { id, value: &value }, writer)?;
        }

        let trailer = self.trailer(revision, previous)?;

        let xref_offset = writer.position();
        xref.link_free_list();
        match layout.xref_stream() {
            Some((object, xref_stream)) => {
                xref.add_used(object.id.number, object.id.generation, xref_offset);
                let stream = xref_stream.absorb(&xref, &trailer, self.config.compress_streams)?;
                SimpleEncoder::write_to(
                    &Indirect {
                        id: object.id,
                        value: &Object::Stream(stream),
                    },
                    writer,
                )?;
            }
            None => {
                write_xref_table(&xref, writer)?;
                write_trailer(&trailer, writer)?;
            }
        }
        write_startxref(xref_offset, writer)?;

        Ok(xref_offset)
    }

    /// Copy the trailer of `revision` and fill in `Size` and `Prev`.
    fn trailer(&mut self, revision: &Revision, previous: Option<usize>) -> Result<Dictionary, WriteError> {
        let mut trailer = revision.trailer();

        self.size = self.size.max(revision.next_free_number());
        trailer.insert(Name::from(K_SIZE), Object::from(self.size));

        match previous {
            Some(previous) => {
                trailer.insert(Name::from(K_PREVIOUS), usize_object(previous)?);
            }
            None => {
                trailer.shift_remove(K_PREVIOUS);
            }
        }
        Ok(trailer)
    }
}
