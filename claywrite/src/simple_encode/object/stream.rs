use std::io;

use crate::{
    pdf::{usize_object, Name, Stream, K_LENGTH},
    simple_encode::SimpleEncoder,
    writer::{Encoder, Writer},
};

const START_STREAM: &[u8] = b"stream\n";
const END_STREAM: &[u8] = b"\nendstream";

impl Encoder<Stream> for SimpleEncoder {
    fn write_to(s: &Stream, writer: &mut dyn Writer) -> io::Result<()> {
        // update the dictionary to fit the new layout
        let mut updated_dict = s.dictionary.clone();
        let length = usize_object(s.data.len()).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        updated_dict.insert(Name::from(K_LENGTH), length);
        Self::write_to(&updated_dict, writer)?;
        writer.write(b" ")?;
        writer.write(START_STREAM)?;
        writer.write(&s.data)?;
        writer.write(END_STREAM)
    }
}
