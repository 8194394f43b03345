//! Writer trait and associated implementations.

use crate::{Result, SshBuf};
use alloc::vec::Vec;

#[cfg(feature = "bytes")]
use bytes::{BufMut, BytesMut};

/// Writer trait which encodes the SSH binary format to various output
/// encodings.
pub trait Writer: Sized {
    /// Write the given bytes to the writer.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Check that `len` more bytes can be written.
    ///
    /// Encoders that write a value in several steps call this first, so a
    /// bounded writer rejects the value before any of it is written.
    fn check_capacity(&self, _len: usize) -> Result<()> {
        Ok(())
    }
}

impl Writer for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Writes append to the buffer, failing with
/// [`Error::NoBufferSpace`](crate::Error::NoBufferSpace) rather than growing
/// past its maximum size. The crate's own [`Encode`](crate::Encode) impls
/// check capacity up front, so a rejected value leaves no partial output.
impl Writer for SshBuf {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    fn check_capacity(&self, len: usize) -> Result<()> {
        self.check_reserve(len)
    }
}

#[cfg(feature = "bytes")]
impl Writer for BytesMut {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.put(bytes);
        Ok(())
    }
}
