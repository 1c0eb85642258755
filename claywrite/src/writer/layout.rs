use fnv::FnvHashMap;

use crate::{
    error::{ConfigError, WriteError},
    pdf::{trailer::K_ENCRYPT, Body, IndirectObject, Object, ObjectStream, PackedObjectStream, Revision, XrefStream},
};

/// Placement of the objects of one revision.
///
/// Every object is either written inline, packed into one of the object
/// streams or is the xref stream of the revision.
#[derive(Debug)]
pub struct Layout<'r> {
    xref_stream: Option<(&'r IndirectObject, &'r XrefStream)>,
    object_streams: Vec<(&'r IndirectObject, &'r ObjectStream)>,
}

/// Object streams of a revision after packing, together with the owner of
/// every packed object.
#[derive(Debug, Default)]
pub struct Packing {
    streams: FnvHashMap<u32, PackedObjectStream>,
    owners: FnvHashMap<u32, u32>,
}

impl Packing {
    /// Container number and index of a packed object.
    pub fn location(&self, number: u32) -> Option<(u32, usize)> {
        let container = *self.owners.get(&number)?;
        let index = self.streams.get(&container)?.packed_index(number)?;
        Some((container, index))
    }

    pub fn stream(&self, container: u32) -> Option<&PackedObjectStream> {
        self.streams.get(&container)
    }

    /// Number of packed objects.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl<'r> Layout<'r> {
    /// Classify the objects of `revision`.
    ///
    /// Only the first xref stream is used, later ones are dropped. Object
    /// streams cannot be described by a classic xref table, so they require a
    /// xref stream.
    pub fn plan(revision: &'r Revision) -> Result<Self, ConfigError> {
        let mut xref_stream = None;
        let mut object_streams = Vec::new();

        for object in revision.objects() {
            match &object.body {
                Body::ObjectStream(stream) => object_streams.push((object, stream)),
                Body::XrefStream(stream) => {
                    if xref_stream.is_none() {
                        xref_stream = Some((object, stream));
                    } else {
                        log::warn!("Ignoring additional xref stream {}", object.id);
                    }
                }
                Body::Free | Body::Value(_) => {}
            }
        }

        if !object_streams.is_empty() && xref_stream.is_none() {
            return Err(ConfigError::ObjectStreamsWithoutXrefStream);
        }

        Ok(Self {
            xref_stream,
            object_streams,
        })
    }

    pub fn xref_stream(&self) -> Option<(&'r IndirectObject, &'r XrefStream)> {
        self.xref_stream
    }

    pub fn object_streams(&self) -> impl Iterator<Item = &'r IndirectObject> + '_ {
        self.object_streams.iter().map(|(object, _)| *object)
    }

    /// Encode the members of all object streams.
    ///
    /// The encryption dictionary named by the trailer must stay outside of
    /// object streams.
    pub fn pack(&self, revision: &Revision, compress: bool) -> Result<Packing, WriteError> {
        let mut packing = Packing::default();
        if self.object_streams.is_empty() {
            return Ok(packing);
        }

        let encrypt = revision
            .trailer_ref()
            .get(K_ENCRYPT)
            .and_then(Object::reference)
            .map(|r| r.number);
        let by_number: FnvHashMap<u32, &IndirectObject> = revision.objects().map(|o| (o.id.number, o)).collect();
        for (object, stream) in self.object_streams.iter() {
            if let Some(&member) = stream.members.iter().find(|&&m| Some(m) == encrypt) {
                return Err(ConfigError::InvalidMember {
                    container: object.id.number,
                    member,
                }
                .into());
            }
            let packed = stream.pack(object.id, &by_number, compress)?;
            for &member in stream.members.iter() {
                if let Some(first) = packing.owners.insert(member, object.id.number) {
                    return Err(ConfigError::DuplicateMember {
                        member,
                        first,
                        second: object.id.number,
                    }
                    .into());
                }
            }
            packing.streams.insert(object.id.number, packed);
        }

        log::debug!(
            "packed {} objects into {} object streams",
            packing.len(),
            packing.streams.len()
        );
        Ok(packing)
    }
}
