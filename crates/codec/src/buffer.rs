//! Byte cursors shared by every codec of one top-level call
//!
//! `WriteBuffer` appends; `ReadBuffer` consumes a borrowed slice and fails
//! with `UnexpectedEof` instead of returning short reads.

use podlayout_core::{Error, Result};
use std::io;

/// Growable output buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBuffer {
    bytes: Vec<u8>,
}

impl WriteBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with reserved capacity
    pub fn with_capacity(capacity: usize) -> Self {
        WriteBuffer {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Append bytes
    pub fn write(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    /// Append a single byte
    pub fn write_byte(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    /// Append `count` zero bytes
    pub fn write_zeros(&mut self, count: usize) {
        self.bytes.resize(self.bytes.len() + count, 0);
    }

    /// Bytes written so far
    pub fn position(&self) -> usize {
        self.bytes.len()
    }

    /// View the written bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Take the written bytes
    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }
}

impl io::Write for WriteBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Cursor over borrowed input
#[derive(Debug, Clone)]
pub struct ReadBuffer<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ReadBuffer<'a> {
    /// Start reading at the beginning of `bytes`
    pub fn new(bytes: &'a [u8]) -> Self {
        ReadBuffer { bytes, pos: 0 }
    }

    /// Consume exactly `n` bytes
    pub fn read(&mut self, n: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(Error::UnexpectedEof {
                needed: n,
                remaining,
            });
        }
        let bytes: &'a [u8] = self.bytes;
        let out = &bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    /// Consume one byte
    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.read(1)?[0])
    }

    /// Consume and discard exactly `n` bytes
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read(n).map(|_| ())
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Check if all input was consumed
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Length of the whole input
    pub fn total_len(&self) -> usize {
        self.bytes.len()
    }
}
