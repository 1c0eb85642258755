use std::io;

pub use self::{
    config::{ObjectTransform, WriterConfig},
    document::DocumentWriter,
    layout::{Layout, Packing},
    revision::RevisionWriter,
    sink::Sink,
};

mod config;
mod document;
mod layout;
mod revision;
mod sink;

/// Append-only byte sink that knows how many bytes were written to it.
pub trait Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<()>;

    /// Absolute byte position of the next write.
    fn position(&self) -> usize;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Writer for Vec<u8> {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn position(&self) -> usize {
        self.len()
    }
}

pub trait Encoder<T: ?Sized> {
    fn write_to(value: &T, writer: &mut dyn Writer) -> io::Result<()>;
}
