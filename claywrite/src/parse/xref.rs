use nom::{
    bytes::complete::tag,
    character::complete::{char, one_of, u16 as generation, u32 as object_number, u64 as field},
    multi::many1,
    sequence::{pair, preceded, tuple},
    IResult,
};

use crate::pdf::{dict_types::XREF_STREAM, trailer::K_SIZE, Dictionary, Object, Stream, K_INDEX, K_TYPE, K_WIDTHS};

use super::{
    decoded_data,
    object::{dictionary, ws},
    ReadError,
};

const STARTXREF: &[u8] = b"startxref";

/// One entry of a xref section, no matter how it was stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Entry {
    Free { number: u32, next: u32, generation: u16 },
    Used { number: u32, offset: usize, generation: u16 },
    Compressed { number: u32, container: u32, index: usize },
}

fn subsection(input: &[u8]) -> IResult<&[u8], Vec<Entry>> {
    let (mut rest, (start, _, count, _)) = tuple((object_number, char(' '), object_number, ws))(input)?;

    let mut entries = Vec::new();
    for number in start..start.saturating_add(count) {
        let (tail, (offset, _, generation, _, kind, _)) =
            tuple((field, char(' '), generation, char(' '), one_of("nf"), ws))(rest)?;
        rest = tail;
        entries.push(if kind == 'n' {
            Entry::Used {
                number,
                offset: offset as usize,
                generation,
            }
        } else {
            Entry::Free {
                number,
                next: offset as u32,
                generation,
            }
        });
    }
    Ok((rest, entries))
}

/// `xref` keyword, subsections and the following trailer.
pub(crate) fn table(input: &[u8]) -> IResult<&[u8], (Vec<Entry>, Dictionary)> {
    let (rest, _) = pair(tag("xref"), ws)(input)?;
    let (rest, subsections) = many1(subsection)(rest)?;
    let (rest, trailer) = preceded(tuple((ws, tag("trailer"), ws)), dictionary)(rest)?;

    Ok((rest, (subsections.into_iter().flatten().collect(), trailer)))
}

fn integers(obj: Option<&Object>) -> Option<Vec<usize>> {
    obj?.array()?
        .iter()
        .map(|o| o.integer().and_then(|i| usize::try_from(i).ok()))
        .collect()
}

/// Entries stored in a xref stream.
pub(crate) fn stream_entries(stream: &Stream) -> Result<Vec<Entry>, ReadError> {
    let dict = &stream.dictionary;
    if dict.get(K_TYPE).and_then(Object::name).map(|n| &n[..]) != Some(XREF_STREAM) {
        return Err(ReadError::Malformed("expected a xref stream"));
    }
    let widths = integers(dict.get(K_WIDTHS))
        .filter(|w| w.len() == 3)
        .ok_or(ReadError::Malformed("invalid W entry"))?;
    let index = match dict.get(K_INDEX) {
        Some(index) => integers(Some(index)).ok_or(ReadError::Malformed("invalid Index entry"))?,
        None => {
            let size = dict
                .get(K_SIZE)
                .and_then(Object::integer)
                .and_then(|size| usize::try_from(size).ok())
                .ok_or(ReadError::Malformed("missing Size"))?;
            vec![0, size]
        }
    };

    let data = decoded_data(stream)?;
    let mut fields = data.chunks_exact(widths.iter().sum::<usize>().max(1));
    let mut entries = Vec::new();
    for range in index.chunks_exact(2) {
        for number in range[0]..range[0] + range[1] {
            let row = fields.next().ok_or(ReadError::Malformed("xref stream data too short"))?;
            let mut values = [0usize; 3];
            let mut pos = 0;
            for (value, &width) in values.iter_mut().zip(widths.iter()) {
                *value = row[pos..pos + width].iter().fold(0, |acc, &b| (acc << 8) | usize::from(b));
                pos += width;
            }
            // the type defaults to 1 if its field is omitted
            let kind = if widths[0] == 0 { 1 } else { values[0] };

            let number = number as u32;
            entries.push(match kind {
                0 => Entry::Free {
                    number,
                    next: values[1] as u32,
                    generation: values[2] as u16,
                },
                1 => Entry::Used {
                    number,
                    offset: values[1],
                    generation: values[2] as u16,
                },
                2 => Entry::Compressed {
                    number,
                    container: values[1] as u32,
                    index: values[2],
                },
                _ => return Err(ReadError::Malformed("unknown xref entry type")),
            });
        }
    }
    Ok(entries)
}

/// Offset behind the last `startxref` keyword.
pub(crate) fn last_startxref(bytes: &[u8]) -> Result<usize, ReadError> {
    let start = bytes
        .windows(STARTXREF.len())
        .rposition(|w| w == STARTXREF)
        .ok_or(ReadError::Malformed("startxref not found"))?;
    let (_, offset) = super::complete(bytes, preceded(ws, field)(&bytes[start + STARTXREF.len()..]))?;
    usize::try_from(offset).map_err(|_| ReadError::Malformed("startxref out of range"))
}

#[cfg(test)]
mod tests {
    use crate::pdf::Name;

    use super::*;

    #[test]
    fn classic_table() {
        let input = b"xref\n0 2\n0000000000 65535 f \n0000000015 00000 n \n7 1\n0000000099 00002 n \ntrailer\n<</Size 8>>\n";
        let (_, (entries, trailer)) = table(input).unwrap();
        assert_eq!(
            entries,
            vec![
                Entry::Free {
                    number: 0,
                    next: 0,
                    generation: 65535
                },
                Entry::Used {
                    number: 1,
                    offset: 15,
                    generation: 0
                },
                Entry::Used {
                    number: 7,
                    offset: 99,
                    generation: 2
                },
            ]
        );
        assert_eq!(trailer.get(K_SIZE), Some(&Object::Integer(8)));
    }

    #[test]
    fn stream_with_default_index() {
        let mut dict = Dictionary::default();
        dict.insert(Name::from(K_TYPE), Object::from(Name::from(XREF_STREAM)));
        dict.insert(Name::from(K_SIZE), Object::Integer(3));
        dict.insert(
            Name::from(K_WIDTHS),
            Object::from(vec![Object::Integer(1), Object::Integer(2), Object::Integer(1)]),
        );
        let data = vec![0, 0, 2, 255, 1, 1, 0, 0, 2, 0, 4, 3];
        let entries = stream_entries(&Stream::new(dict, data)).unwrap();
        assert_eq!(
            entries,
            vec![
                Entry::Free {
                    number: 0,
                    next: 2,
                    generation: 255
                },
                Entry::Used {
                    number: 1,
                    offset: 256,
                    generation: 0
                },
                Entry::Compressed {
                    number: 2,
                    container: 4,
                    index: 3
                },
            ]
        );
    }

    #[test]
    fn startxref_is_found_from_the_end() {
        let input = b"startxref\n1\n%%EOF\nstartxref\n2132\n%%EOF\n";
        assert_eq!(last_startxref(input).unwrap(), 2132);
        assert!(last_startxref(b"%%EOF").is_err());
    }
}
