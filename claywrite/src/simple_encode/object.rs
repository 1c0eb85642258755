use std::io;

use crate::{
    pdf::Object,
    writer::{Encoder, Writer},
};

use super::SimpleEncoder;

pub(crate) mod array;
pub(crate) mod dictionary;
pub(crate) mod indirect;
pub(crate) mod name;
pub(crate) mod stream;
pub(crate) mod string;

pub(crate) const TRUE_OBJECT: &[u8] = b"true";
pub(crate) const FALSE_OBJECT: &[u8] = b"false";
pub(crate) const NULL_OBJECT: &[u8] = b"null";

impl Encoder<Object> for SimpleEncoder {
    fn write_to(obj: &Object, writer: &mut dyn Writer) -> io::Result<()> {
        match obj {
            Object::String(str) => Self::write_to(str, writer),
            Object::HexString(bytes) => {
                writer.write(b"<")?;
                writer.write(hex::encode(&bytes[..]).as_bytes())?;
                writer.write(b">")
            }
            Object::Float(f) if f.is_finite() => writer.write(f.to_string().as_bytes()),
            // there is no representation for NaN or infinity
            Object::Float(_) => writer.write(b"0"),
            Object::Integer(i) => writer.write(i.to_string().as_bytes()),
            Object::Bool(true) => writer.write(TRUE_OBJECT),
            Object::Bool(false) => writer.write(FALSE_OBJECT),
            Object::Name(n) => Self::write_to(n, writer),
            Object::Array(a) => Self::write_to(a, writer),
            Object::Dictionary(d) => Self::write_to(d, writer),
            Object::Stream(s) => Self::write_to(s, writer),
            Object::Null => writer.write(NULL_OBJECT),
            Object::Reference(r) => writer.write(r.to_string().as_bytes()),
        }
    }
}
