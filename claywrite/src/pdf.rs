use std::{fmt::Display, ops::Deref};

use fnv::FnvBuildHasher;
use indexmap::IndexMap;

use crate::error::WriteError;

pub use self::{
    array::Array,
    document::Document,
    indirect::{Body, IndirectObject, ObjectId, Reference},
    name::Name,
    object_stream::{ObjectStream, PackedObjectStream},
    revision::Revision,
    stream::Stream,
    string::PdfString,
    xref::{Subsection, Xref, XrefEntry},
    xref_stream::XrefStream,
};

mod array;
mod document;
mod indirect;
pub(crate) mod name;
mod object_stream;
mod revision;
pub(crate) mod stream;
mod string;
pub mod trailer;
pub mod xref;
mod xref_stream;

/// Dictionary type names
pub(crate) mod dict_types {
    pub const OBJECT_STREAM: &[u8] = b"ObjStm";
    pub const XREF_STREAM: &[u8] = b"XRef";
}

pub(crate) const K_TYPE: &[u8] = b"Type";
pub(crate) const K_LENGTH: &[u8] = b"Length";
pub(crate) const K_FILTER: &[u8] = b"Filter";
pub(crate) const K_DECODE_PARMS: &[u8] = b"DecodeParms";
pub(crate) const K_STREAM_OBJECT_COUNT: &[u8] = b"N";
pub(crate) const K_FIRST: &[u8] = b"First";
pub(crate) const K_WIDTHS: &[u8] = b"W";
pub(crate) const K_INDEX: &[u8] = b"Index";

pub(crate) const FLATE_DECODE: &[u8] = b"FlateDecode";

/// Key/value pairs of a PDF dictionary.
///
/// Entries keep their insertion order so that writing the same document twice
/// produces the same bytes.
pub type Dictionary = IndexMap<Name, Object, FnvBuildHasher>;

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    String(PdfString),
    HexString(Bytes),
    Float(f32),
    Integer(i64),
    Bool(bool),
    Name(Name),
    Array(Array),
    Dictionary(Dictionary),
    Stream(Stream),
    Null,
    Reference(Reference),
}

impl Object {
    pub fn integer(&self) -> Option<i64> {
        if let Object::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    pub fn name(&self) -> Option<&Name> {
        if let Object::Name(n) = self {
            Some(n)
        } else {
            None
        }
    }

    pub fn array(&self) -> Option<&Array> {
        if let Object::Array(a) = self {
            Some(a)
        } else {
            None
        }
    }

    pub fn dictionary(&self) -> Option<&Dictionary> {
        if let Object::Dictionary(d) = self {
            Some(d)
        } else {
            None
        }
    }

    pub fn stream(&self) -> Option<&Stream> {
        if let Object::Stream(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn reference(&self) -> Option<&Reference> {
        if let Object::Reference(r) = self {
            Some(r)
        } else {
            None
        }
    }

    pub fn string(&self) -> Option<&PdfString> {
        if let Object::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn hex_string(&self) -> Option<&Bytes> {
        if let Object::HexString(h) = self {
            Some(h)
        } else {
            None
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::String(obj) => obj.fmt(f),
            Object::HexString(obj) => obj.fmt(f),
            Object::Float(obj) => obj.fmt(f),
            Object::Integer(obj) => obj.fmt(f),
            Object::Bool(obj) => obj.fmt(f),
            Object::Name(obj) => obj.fmt(f),
            Object::Array(obj) => obj.fmt(f),
            Object::Dictionary(dict) => write!(f, "Dictionary ({} entries)", dict.len()),
            Object::Stream(stream) => write!(f, "Stream ({} bytes)", stream.data.len()),
            Object::Null => write!(f, "NULL"),
            Object::Reference(obj) => obj.fmt(f),
        }
    }
}

impl From<bool> for Object {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Object {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Object {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<u32> for Object {
    fn from(v: u32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f32> for Object {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<PdfString> for Object {
    fn from(v: PdfString) -> Self {
        Self::String(v)
    }
}

impl From<Name> for Object {
    fn from(n: Name) -> Self {
        Self::Name(n)
    }
}

impl From<Vec<Object>> for Object {
    fn from(a: Vec<Object>) -> Self {
        Self::Array(a.into())
    }
}

impl From<Array> for Object {
    fn from(a: Array) -> Self {
        Self::Array(a)
    }
}

impl From<Dictionary> for Object {
    fn from(d: Dictionary) -> Self {
        Self::Dictionary(d)
    }
}

impl From<Stream> for Object {
    fn from(s: Stream) -> Self {
        Self::Stream(s)
    }
}

impl From<Reference> for Object {
    fn from(r: Reference) -> Self {
        Self::Reference(r)
    }
}

/// Integer object for a size or byte offset.
pub(crate) fn usize_object(value: usize) -> Result<Object, WriteError> {
    i64::try_from(value)
        .map(Object::Integer)
        .map_err(|_| WriteError::IntegerOverflow(value))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bytes(Vec<u8>);

impl From<Vec<u8>> for Bytes {
    fn from(v: Vec<u8>) -> Self {
        Bytes(v)
    }
}

impl From<&[u8]> for Bytes {
    fn from(v: &[u8]) -> Self {
        Bytes(v.to_vec())
    }
}

impl Deref for Bytes {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for Bytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let limited_length = self.len().min(15);
        write!(f, "{}", &String::from_utf8_lossy(&self.0[..limited_length]))
    }
}
