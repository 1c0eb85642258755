use fnv::FnvHashMap;

use crate::{
    error::{ConfigError, WriteError},
    simple_encode::SimpleEncoder,
    writer::Encoder,
};

use super::{
    dict_types::OBJECT_STREAM, usize_object, Body, Dictionary, IndirectObject, Name, Object, ObjectId, Stream,
    K_FILTER, K_FIRST, K_LENGTH, K_STREAM_OBJECT_COUNT, K_TYPE,
};

/// An object stream that packs other objects of its revision.
///
/// Only plain objects with generation 0 that are not streams themselves can be
/// packed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectStream {
    /// Additional dictionary entries, e.g. `Extends`.
    pub dictionary: Dictionary,
    /// Numbers of the packed objects, in packing order.
    pub members: Vec<u32>,
}

/// An object stream after its members were encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedObjectStream {
    pub id: ObjectId,
    object: Object,
    indices: FnvHashMap<u32, usize>,
}

impl PackedObjectStream {
    /// Position of the object inside this stream, `None` if it isn't packed
    /// here.
    pub fn packed_index(&self, number: u32) -> Option<usize> {
        self.indices.get(&number).copied()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The stream object that is written to the file.
    pub fn object(&self) -> &Object {
        &self.object
    }
}

impl ObjectStream {
    pub fn new(members: Vec<u32>) -> Self {
        Self {
            dictionary: Dictionary::default(),
            members,
        }
    }

    /// Encode all members into a single stream.
    ///
    /// `objects` maps the object numbers of the revision to their objects.
    pub fn pack(
        &self,
        id: ObjectId,
        objects: &FnvHashMap<u32, &IndirectObject>,
        compress: bool,
    ) -> Result<PackedObjectStream, WriteError> {
        log::trace!("pack object stream {} with {} members", id, self.members.len());

        let mut header = Vec::<u8>::new();
        let mut body = Vec::<u8>::new();
        let mut indices = FnvHashMap::default();

        for (index, &member) in self.members.iter().enumerate() {
            let object = objects.get(&member).ok_or(ConfigError::MissingMember {
                container: id.number,
                member,
            })?;
            let value = match &object.body {
                Body::Value(value) if object.id.generation == 0 && value.stream().is_none() => value,
                _ => {
                    return Err(ConfigError::InvalidMember {
                        container: id.number,
                        member,
                    }
                    .into())
                }
            };
            if indices.insert(member, index).is_some() {
                return Err(ConfigError::DuplicateMember {
                    member,
                    first: id.number,
                    second: id.number,
                }
                .into());
            }

            if index != 0 {
                header.push(b' ');
            }
            header.extend_from_slice(format!("{} {}", member, body.len()).as_bytes());
            SimpleEncoder::write_to(value, &mut body)?;
            body.push(b'\n');
        }
        header.push(b'\n');

        let mut dictionary = Dictionary::default();
        dictionary.insert(Name::from(K_TYPE), Object::from(Name::from(OBJECT_STREAM)));
        dictionary.insert(Name::from(K_STREAM_OBJECT_COUNT), usize_object(self.members.len())?);
        dictionary.insert(Name::from(K_FIRST), usize_object(header.len())?);
        for (key, value) in self.dictionary.iter() {
            if ![K_TYPE, K_STREAM_OBJECT_COUNT, K_FIRST, K_LENGTH, K_FILTER].contains(&&key[..]) {
                dictionary.insert(key.clone(), value.clone());
            }
        }

        header.append(&mut body);
        let stream = if compress {
            Stream::flate(dictionary, &header)?
        } else {
            Stream::new(dictionary, header)
        };

        Ok(PackedObjectStream {
            id,
            object: Object::Stream(stream),
            indices,
        })
    }
}
