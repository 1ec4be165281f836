//! Stream I/O plumbing
//!
//! The VM's boundary is two raw byte streams. This wrapper owns them and
//! provides the blocking single-byte and block transfers the I/O
//! primitives need; tests hand in in-memory buffers, the CLI hands in
//! locked stdin/stdout.

use std::io::{ErrorKind, Read, Write};

#[derive(Debug)]
pub struct Streams<R, W> {
    input: R,
    output: W,
}

impl<R: Read, W: Write> Streams<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Streams { input, output }
    }

    /// Blocking read of one byte. `None` at end of stream.
    pub fn read_byte(&mut self) -> std::io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }

    /// Read up to `buf.len()` bytes, stopping early only at end of stream.
    /// Returns the number of bytes read (the short-read contract of the
    /// original's `fread`).
    pub fn read_block(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.input.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(filled)
    }

    pub fn write_byte(&mut self, byte: u8) -> std::io::Result<()> {
        self.output.write_all(&[byte])
    }

    pub fn write_block(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.output.write_all(bytes)
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.output.flush()
    }

    /// Give the output stream back (to read captured bytes in tests)
    pub fn into_output(self) -> W {
        self.output
    }
}
