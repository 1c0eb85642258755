use std::io::{self, Seek, SeekFrom, Write};

use super::Writer;

/// Wraps a seekable output and counts the bytes written to it.
pub struct Sink<W> {
    inner: W,
    position: usize,
}

impl<W: Write + Seek> Sink<W> {
    /// Rewind `inner` to its start. All following writes are appended.
    pub fn new(mut inner: W) -> io::Result<Self> {
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self { inner, position: 0 })
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Writer for Sink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)?;
        self.position += buf.len();
        Ok(())
    }

    fn position(&self) -> usize {
        self.position
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
