use std::io::{self, Write};

use flate2::{write::ZlibEncoder, Compression};

use super::{Bytes, Dictionary, Name, Object, FLATE_DECODE, K_FILTER};

#[derive(Clone, Debug, PartialEq)]
pub struct Stream {
    pub dictionary: Dictionary,
    pub data: Bytes,
}

impl Stream {
    pub fn new(dictionary: Dictionary, data: Vec<u8>) -> Self {
        Self {
            dictionary,
            data: data.into(),
        }
    }

    /// Create a stream with `FlateDecode` applied to `data`.
    ///
    /// The `Length` entry is not set here, it is computed when the stream is
    /// written.
    pub fn flate(mut dictionary: Dictionary, data: &[u8]) -> io::Result<Self> {
        dictionary.insert(Name::from(K_FILTER), Object::from(Name::from(FLATE_DECODE)));
        Ok(Self::new(dictionary, flate_encode(data)?))
    }
}

pub(crate) fn flate_encode(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
