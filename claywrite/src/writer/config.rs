use std::{borrow::Cow, fmt};

use crate::pdf::{Object, ObjectId, PdfString, Stream};

/// Rewrites string and stream bytes of an object before it is written,
/// e.g. to encrypt them with a key derived from the object id.
pub trait ObjectTransform {
    fn transform_bytes(&self, id: ObjectId, data: &[u8]) -> Vec<u8>;

    /// Apply [`Self::transform_bytes`] to every string and stream contained in
    /// `object`.
    fn apply(&self, id: ObjectId, object: &Object) -> Object {
        match object {
            Object::String(s) => Object::String(PdfString::from(self.transform_bytes(id, s))),
            Object::HexString(h) => Object::HexString(self.transform_bytes(id, h).into()),
            Object::Array(a) => Object::Array(a.iter().map(|o| self.apply(id, o)).collect()),
            Object::Dictionary(d) => Object::Dictionary(
                d.iter()
                    .map(|(k, v)| (k.clone(), self.apply(id, v)))
                    .collect(),
            ),
            Object::Stream(s) => Object::Stream(Stream {
                dictionary: s
                    .dictionary
                    .iter()
                    .map(|(k, v)| (k.clone(), self.apply(id, v)))
                    .collect(),
                data: self.transform_bytes(id, &s.data).into(),
            }),
            other => other.clone(),
        }
    }
}

/// Settings for one document write.
#[derive(Default)]
pub struct WriterConfig {
    /// Apply `FlateDecode` to object streams and xref streams.
    pub compress_streams: bool,
    pub(crate) transform: Option<Box<dyn ObjectTransform>>,
}

impl fmt::Debug for WriterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterConfig")
            .field("compress_streams", &self.compress_streams)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

impl WriterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compression(mut self, compress_streams: bool) -> Self {
        self.compress_streams = compress_streams;
        self
    }

    pub fn with_transform(mut self, transform: impl ObjectTransform + 'static) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    /// The object as it has to be written for `id`.
    pub(crate) fn prepare<'a>(&self, id: ObjectId, object: &'a Object) -> Cow<'a, Object> {
        match &self.transform {
            Some(transform) => Cow::Owned(transform.apply(id, object)),
            None => Cow::Borrowed(object),
        }
    }
}
