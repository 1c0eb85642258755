//! A small reader for the files produced by the writer.
//!
//! It follows the xref sections from the end of the file and resolves the
//! objects that are alive in the newest revision.

use std::{collections::BTreeMap, io::Read};

use flate2::read::ZlibDecoder;
use fnv::FnvHashMap;
use nom::{
    bytes::complete::tag,
    character::complete::{char, u8 as version_number},
    sequence::tuple,
    IResult,
};
use thiserror::Error;

use crate::pdf::{trailer::K_PREVIOUS, Dictionary, Object, ObjectId, Stream, FLATE_DECODE, K_FILTER};

use self::xref::Entry;

mod xref;

#[derive(Error, Debug)]
pub(crate) enum ReadError {
    #[error("syntax error at byte {0}")]
    Syntax(usize),

    #[error("malformed file: {0}")]
    Malformed(&'static str),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turn a nom error into a byte position inside `whole`.
fn complete<'a, T>(whole: &[u8], result: IResult<&'a [u8], T>) -> Result<(&'a [u8], T), ReadError> {
    result.map_err(|err| match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => ReadError::Syntax(whole.len().saturating_sub(e.input.len())),
        nom::Err::Incomplete(_) => ReadError::Syntax(whole.len()),
    })
}

/// Stream data with `FlateDecode` undone.
fn decoded_data(stream: &Stream) -> Result<Vec<u8>, ReadError> {
    match stream.dictionary.get(K_FILTER).and_then(Object::name) {
        None => Ok(stream.data.to_vec()),
        Some(filter) if &filter[..] == FLATE_DECODE => {
            let mut data = Vec::new();
            ZlibDecoder::new(&stream.data[..]).read_to_end(&mut data)?;
            Ok(data)
        }
        Some(_) => Err(ReadError::Malformed("unsupported filter")),
    }
}

/// The entries of one xref section, split by kind and sorted by number.
#[derive(Debug, Default)]
pub(crate) struct Section {
    pub offset: usize,
    /// `(number, byte offset, generation)`
    pub used: Vec<(u32, usize, u16)>,
    /// `(number, container, index)`
    pub compressed: Vec<(u32, u32, usize)>,
    pub free: Vec<u32>,
    /// `(number, next free, generation)`
    pub free_chain: Vec<(u32, u32, u16)>,
    /// The trailer, or the dictionary of the xref stream.
    pub trailer: Dictionary,
}

impl Section {
    fn new(offset: usize, mut entries: Vec<Entry>, trailer: Dictionary) -> Self {
        entries.sort_by_key(|entry| match entry {
            Entry::Free { number, .. } | Entry::Used { number, .. } | Entry::Compressed { number, .. } => *number,
        });

        let mut section = Section {
            offset,
            trailer,
            ..Default::default()
        };
        for entry in entries {
            match entry {
                Entry::Free {
                    number,
                    next,
                    generation,
                } => {
                    section.free.push(number);
                    section.free_chain.push((number, next, generation));
                }
                Entry::Used {
                    number,
                    offset,
                    generation,
                } => section.used.push((number, offset, generation)),
                Entry::Compressed {
                    number,
                    container,
                    index,
                } => section.compressed.push((number, container, index)),
            }
        }
        section
    }
}

/// Read the xref table or xref stream at `offset`.
pub(crate) fn read_section(bytes: &[u8], offset: usize) -> Result<Section, ReadError> {
    let input = bytes.get(offset..).ok_or(ReadError::Malformed("xref offset beyond end of file"))?;

    let (entries, trailer) = if input.starts_with(b"xref") {
        complete(bytes, xref::table(input))?.1
    } else {
        match complete(bytes, object::indirect_object(input))?.1 {
            (_, Object::Stream(stream)) => (xref::stream_entries(&stream)?, stream.dictionary),
            _ => return Err(ReadError::Malformed("expected xref table or xref stream")),
        }
    };
    log::trace!("read xref section at {} with {} entries", offset, entries.len());

    Ok(Section::new(offset, entries, trailer))
}

#[derive(Debug)]
pub(crate) struct ReadDocument {
    pub version: (u8, u8),
    /// Newest section first.
    pub sections: Vec<Section>,
    /// Trailer of the newest section.
    pub trailer: Dictionary,
    /// Objects alive after the newest revision.
    pub objects: BTreeMap<u32, Object>,
}

fn header(input: &[u8]) -> IResult<&[u8], (u8, u8)> {
    let (rest, (_, major, _, minor)) = tuple((tag("%PDF-"), version_number, char('.'), version_number))(input)?;
    Ok((rest, (major, minor)))
}

fn object_at(bytes: &[u8], offset: usize) -> Result<(ObjectId, Object), ReadError> {
    let input = bytes.get(offset..).ok_or(ReadError::Malformed("object offset beyond end of file"))?;
    Ok(complete(bytes, object::indirect_object(input))?.1)
}

/// Read all revisions of a file, starting at the last `startxref`.
pub(crate) fn read_document(bytes: &[u8]) -> Result<ReadDocument, ReadError> {
    let (_, version) = complete(bytes, header(bytes))?;

    let mut sections: Vec<Section> = Vec::new();
    let mut next = Some(xref::last_startxref(bytes)?);
    while let Some(offset) = next {
        if sections.iter().any(|section| section.offset == offset) {
            return Err(ReadError::Malformed("Prev entries form a cycle"));
        }
        let section = read_section(bytes, offset)?;
        next = section
            .trailer
            .get(K_PREVIOUS)
            .and_then(Object::integer)
            .and_then(|prev| usize::try_from(prev).ok());
        sections.push(section);
    }

    let mut objects = BTreeMap::new();
    for section in sections.iter().rev() {
        for &(number, offset, generation) in section.used.iter() {
            let (id, obj) = object_at(bytes, offset)?;
            if id != ObjectId::new(number, generation) {
                return Err(ReadError::Malformed("xref entry points to the wrong object"));
            }
            objects.insert(number, obj);
        }
        for number in section.free.iter() {
            objects.remove(number);
        }

        let mut containers: FnvHashMap<u32, Vec<(u32, Object)>> = FnvHashMap::default();
        for &(number, container, index) in section.compressed.iter() {
            if !containers.contains_key(&container) {
                let stream = objects
                    .get(&container)
                    .and_then(Object::stream)
                    .ok_or(ReadError::Malformed("missing object stream"))?;
                containers.insert(container, object_stream::object_stream(stream)?);
            }
            let (member, obj) = containers
                .get(&container)
                .and_then(|members| members.get(index))
                .cloned()
                .ok_or(ReadError::Malformed("object stream index out of range"))?;
            if member != number {
                return Err(ReadError::Malformed("object stream holds a different object"));
            }
            objects.insert(number, obj);
        }
    }

    let trailer = sections.first().map(|s| s.trailer.clone()).unwrap_or_default();
    Ok(ReadDocument {
        version,
        sections,
        trailer,
        objects,
    })
}

#[cfg(test)]
mod tests {
    use crate::pdf::trailer::K_SIZE;

    use super::*;

    const SIMPLE: &[u8] = b"%PDF-1.4\n\
1 0 obj\n(one)\nendobj\n\
xref\n0 2\n0000000000 65535 f \n0000000009 00000 n \n\
trailer\n<</Size 2>>\nstartxref\n30\n%%EOF\n";

    #[test]
    fn simple_file() {
        let doc = read_document(SIMPLE).unwrap();
        assert_eq!(doc.version, (1, 4));
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].used, vec![(1, 9, 0)]);
        assert_eq!(doc.sections[0].free_chain, vec![(0, 0, 65535)]);
        assert_eq!(doc.trailer.get(K_SIZE), Some(&Object::Integer(2)));
        assert_eq!(doc.objects.len(), 1);
    }

    #[test]
    fn wrong_offset() {
        let mut broken = SIMPLE.to_vec();
        // point the entry of object 1 one byte too far
        let pos = broken.windows(10).position(|w| w == b"0000000009").unwrap();
        broken[pos + 8..pos + 10].copy_from_slice(b"10");
        assert!(read_document(&broken).is_err());
    }

    #[test]
    fn missing_header() {
        assert!(matches!(read_document(b"1 0 obj"), Err(ReadError::Syntax(0))));
    }
}
