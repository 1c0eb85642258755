use std::io;

use crate::{
    pdf::{Object, ObjectId},
    simple_encode::SimpleEncoder,
    writer::{Encoder, Writer},
};

/// An object written with its `N G obj` header.
pub struct Indirect<'a> {
    pub id: ObjectId,
    pub value: &'a Object,
}

impl Encoder<Indirect<'_>> for SimpleEncoder {
    fn write_to(o: &Indirect<'_>, writer: &mut dyn Writer) -> io::Result<()> {
        writer.write(format!("{} {} obj\n", o.id.number, o.id.generation).as_bytes())?;
        Self::write_to(o.value, writer)?;
        writer.write(b"\nendobj\n")
    }
}
