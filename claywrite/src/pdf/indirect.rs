use std::fmt::Display;

use super::{Object, ObjectStream, XrefStream};

/// Object number and generation of an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    pub number: u32,
    pub generation: u16,
}

impl ObjectId {
    pub const fn new(number: u32, generation: u16) -> Self {
        Self { number, generation }
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.number, self.generation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reference {
    pub number: u32,
    pub generation: u16,
}

impl Reference {
    pub fn id(&self) -> ObjectId {
        ObjectId::new(self.number, self.generation)
    }
}

impl From<ObjectId> for Reference {
    fn from(id: ObjectId) -> Self {
        Self {
            number: id.number,
            generation: id.generation,
        }
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.number, self.generation)
    }
}

/// What an indirect object stands for inside its revision.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// The object number is deleted in this revision.
    ///
    /// The generation of the id is the generation a reused number has to
    /// carry.
    Free,
    Value(Object),
    /// Packs other objects of the same revision.
    ObjectStream(ObjectStream),
    /// Replaces the xref table and trailer of the revision.
    XrefStream(XrefStream),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndirectObject {
    pub id: ObjectId,
    pub body: Body,
}

impl IndirectObject {
    pub fn new(id: ObjectId, object: impl Into<Object>) -> Self {
        Self {
            id,
            body: Body::Value(object.into()),
        }
    }

    pub fn free(id: ObjectId) -> Self {
        Self { id, body: Body::Free }
    }

    pub fn object_stream(id: ObjectId, stream: ObjectStream) -> Self {
        Self {
            id,
            body: Body::ObjectStream(stream),
        }
    }

    pub fn xref_stream(id: ObjectId, stream: XrefStream) -> Self {
        Self {
            id,
            body: Body::XrefStream(stream),
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self.body, Body::Free)
    }

    pub fn value(&self) -> Option<&Object> {
        if let Body::Value(v) = &self.body {
            Some(v)
        } else {
            None
        }
    }

    pub fn reference(&self) -> Reference {
        self.id.into()
    }
}

impl Display for IndirectObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.body {
            Body::Free => write!(f, "Indirect {} free", self.id),
            Body::Value(object) => write!(f, "Indirect {} {{ {} }}", self.id, object),
            Body::ObjectStream(stream) => {
                write!(f, "Indirect {} ObjStm ({} members)", self.id, stream.members.len())
            }
            Body::XrefStream(_) => write!(f, "Indirect {} XRef", self.id),
        }
    }
}
