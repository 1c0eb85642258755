use std::io;

use crate::{
    pdf::{name::is_regular, Name},
    simple_encode::SimpleEncoder,
    writer::{Encoder, Writer},
};

impl Encoder<Name> for SimpleEncoder {
    fn write_to(n: &Name, writer: &mut dyn Writer) -> io::Result<()> {
        let mut last_write = 0;
        writer.write(b"/")?;
        for (index, &c) in n.iter().enumerate() {
            if !is_regular(c) {
                writer.write(&n[last_write..index])?;
                last_write = index + 1;
                writer.write(b"#")?;
                writer.write(hex::encode([c]).as_bytes())?;
            }
        }
        writer.write(&n[last_write..])
    }
}
