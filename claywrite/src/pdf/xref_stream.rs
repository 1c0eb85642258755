use std::mem::size_of;

use crate::error::WriteError;

use super::{
    dict_types::XREF_STREAM,
    trailer::{K_PREVIOUS, K_SIZE},
    usize_object, Array, Dictionary, Name, Object, Stream, Xref, K_DECODE_PARMS, K_FILTER, K_INDEX, K_LENGTH,
    K_TYPE, K_WIDTHS,
};

/// Keys computed while encoding the stream.
const STREAM_KEYS: [&[u8]; 5] = [K_WIDTHS, K_INDEX, K_LENGTH, K_FILTER, K_DECODE_PARMS];
/// Keys only the revision's trailer may provide.
const TRAILER_KEYS: [&[u8]; 2] = [K_SIZE, K_PREVIOUS];

/// A cross-reference stream. It replaces the xref table and the trailer of its
/// revision.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XrefStream {
    /// Additional dictionary entries.
    pub dictionary: Dictionary,
}

impl XrefStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the stream from the finished xref index and trailer.
    ///
    /// The index must already contain the entry of this stream.
    pub fn absorb(&self, xref: &Xref, trailer: &Dictionary, compress: bool) -> Result<Stream, WriteError> {
        log::trace!("write XRef stream with {} entries", xref.len());

        let entries = xref.entries();
        let mut widths = [1usize; 3];
        for entry in entries.iter() {
            for (width, field) in widths.iter_mut().zip(entry.fields()) {
                *width = (*width).max(byte_width(field));
            }
        }

        let mut data = Vec::<u8>::with_capacity(entries.len() * widths.iter().sum::<usize>());
        let mut index = Array::new();
        for subsection in xref.subsections() {
            index.push(Object::from(subsection.start));
            index.push(usize_object(subsection.entries.len())?);
            for entry in subsection.entries {
                for (width, field) in widths.iter().zip(entry.fields()) {
                    data.extend_from_slice(&field.to_be_bytes()[size_of::<usize>() - width..]);
                }
            }
        }

        let mut dictionary = Dictionary::default();
        dictionary.insert(Name::from(K_TYPE), Object::from(Name::from(XREF_STREAM)));
        let own = self
            .dictionary
            .iter()
            .filter(|(key, _)| !TRAILER_KEYS.contains(&&key[..]));
        for (key, value) in trailer.iter().chain(own) {
            if !dictionary.contains_key(key) && !STREAM_KEYS.contains(&&key[..]) {
                dictionary.insert(key.clone(), value.clone());
            }
        }
        dictionary.insert(
            Name::from(K_WIDTHS),
            widths.iter().map(|&w| usize_object(w)).collect::<Result<Array, _>>()?.into(),
        );
        dictionary.insert(Name::from(K_INDEX), index.into());

        if compress {
            Ok(Stream::flate(dictionary, &data)?)
        } else {
            Ok(Stream::new(dictionary, data))
        }
    }
}

/// Number of bytes needed to store `value`, at least one.
fn byte_width(value: usize) -> usize {
    let bits = (usize::BITS - value.leading_zeros()) as usize;
    bits.div_ceil(8).max(1)
}
