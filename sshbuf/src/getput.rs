//! Typed accessors for reading and writing wire-format values directly on a
//! buffer.
//!
//! Getters are all-or-nothing like the [`Reader`] impl they build on, and
//! putters check the whole encoded length against [`SshBuf::avail`] before
//! writing anything.

use crate::{Decode, Encode, Error, Reader, Result, SshBuf, Writer, SIZE_MAX};
use alloc::{string::String, vec::Vec};
use core::{mem, str};

impl SshBuf {
    /// Borrow `len` bytes at `offset` into the data without consuming them.
    pub fn peek(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let end = offset.checked_add(len).ok_or(Error::MessageIncomplete)?;
        self.as_slice()
            .get(offset..end)
            .ok_or(Error::MessageIncomplete)
    }

    /// Overwrite bytes at `offset` into the data.
    ///
    /// Fails with [`Error::NoBufferSpace`] if the write would extend past the
    /// end of the data; use [`SshBuf::put`] to append.
    pub fn poke(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        let end = offset.checked_add(bytes.len()).ok_or(Error::NoBufferSpace)?;
        self.as_mut_slice()
            .get_mut(offset..end)
            .ok_or(Error::NoBufferSpace)?
            .copy_from_slice(bytes);
        Ok(())
    }

    /// Read exactly `out.len()` bytes from the front of the buffer.
    pub fn get(&mut self, out: &mut [u8]) -> Result<()> {
        self.read(out)?;
        Ok(())
    }

    /// Append raw bytes to the buffer.
    pub fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.write(bytes)
    }

    /// Append the data held in another buffer.
    pub fn putb(&mut self, other: &SshBuf) -> Result<()> {
        self.put(other.as_slice())
    }

    /// Read a `byte`.
    pub fn get_u8(&mut self) -> Result<u8> {
        u8::decode(self)
    }

    /// Read a big-endian `uint16`.
    pub fn get_u16(&mut self) -> Result<u16> {
        u16::decode(self)
    }

    /// Read a `uint32`.
    pub fn get_u32(&mut self) -> Result<u32> {
        u32::decode(self)
    }

    /// Read a `uint64`.
    pub fn get_u64(&mut self) -> Result<u64> {
        u64::decode(self)
    }

    /// Read a `boolean`. Any non-zero byte is `true`.
    pub fn get_bool(&mut self) -> Result<bool> {
        bool::decode(self)
    }

    /// Append a `byte`.
    pub fn put_u8(&mut self, value: u8) -> Result<()> {
        self.put_value(&value)
    }

    /// Append a big-endian `uint16`.
    pub fn put_u16(&mut self, value: u16) -> Result<()> {
        self.put_value(&value)
    }

    /// Append a `uint32`.
    pub fn put_u32(&mut self, value: u32) -> Result<()> {
        self.put_value(&value)
    }

    /// Append a `uint64`.
    pub fn put_u64(&mut self, value: u64) -> Result<()> {
        self.put_value(&value)
    }

    /// Append a `boolean`.
    pub fn put_bool(&mut self, value: bool) -> Result<()> {
        self.put_value(&value)
    }

    /// Read a length-prefixed `string` as raw bytes.
    pub fn get_string(&mut self) -> Result<Vec<u8>> {
        Vec::decode(self)
    }

    /// Read a length-prefixed `string` as text.
    ///
    /// A single trailing NUL is tolerated and stripped; any other NUL byte
    /// fails with [`Error::InvalidFormat`].
    pub fn get_cstring(&mut self) -> Result<String> {
        let body = self.peek_string_direct()?;
        let consumed = 4 + body.len();
        let text = String::from(str::from_utf8(strip_nul(body)?)?);
        self.consume(consumed)?;
        Ok(text)
    }

    /// Borrow the body of the length-prefixed `string` at the front of the
    /// buffer without consuming it.
    ///
    /// # Returns
    /// - `Ok(body)` on success
    /// - `Err(Error::StringTooLarge)` if the length prefix exceeds what any
    ///   buffer can hold
    /// - `Err(Error::MessageIncomplete)` if the string is truncated
    pub fn peek_string_direct(&self) -> Result<&[u8]> {
        let len = usize::try_from(self.peek_u32(0)?)?;

        if len > SIZE_MAX - 4 {
            return Err(Error::StringTooLarge);
        }

        self.peek(4, len)
    }

    /// Discard the length-prefixed `string` at the front of the buffer.
    pub fn skip_string(&mut self) -> Result<()> {
        let len = self.peek_string_direct()?.len();
        self.consume(4 + len)
    }

    /// Append bytes as a length-prefixed `string`.
    pub fn put_string(&mut self, bytes: &[u8]) -> Result<()> {
        self.put_value(bytes)
    }

    /// Append text as a length-prefixed `string`, without a terminating NUL.
    pub fn put_cstring(&mut self, text: &str) -> Result<()> {
        self.put_value(text)
    }

    /// Append the data held in another buffer as a length-prefixed `string`.
    pub fn put_stringb(&mut self, other: &SshBuf) -> Result<()> {
        self.put_value(other)
    }

    /// Read a length-prefixed `string` into a new buffer.
    pub fn froms(&mut self) -> Result<SshBuf> {
        SshBuf::decode(self)
    }

    /// Append any encodable value, checking its full length up front so a
    /// failed write leaves the buffer untouched.
    pub fn put_value<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.check_reserve(value.encoded_len()?)?;
        value.encode(self)
    }
}

/// Define non-consuming accessors for fixed-width big-endian integers.
macro_rules! impl_peek_poke {
    ($($ty:ty => $peek:ident, $poke:ident;)+) => {
        impl SshBuf {
            $(
                #[doc = concat!("Read a big-endian `", stringify!($ty), "` at `offset` without consuming it.")]
                pub fn $peek(&self, offset: usize) -> Result<$ty> {
                    let mut bytes = [0u8; mem::size_of::<$ty>()];
                    bytes.copy_from_slice(self.peek(offset, mem::size_of::<$ty>())?);
                    Ok(<$ty>::from_be_bytes(bytes))
                }

                #[doc = concat!("Overwrite a big-endian `", stringify!($ty), "` at `offset`.")]
                pub fn $poke(&mut self, offset: usize, value: $ty) -> Result<()> {
                    self.poke(offset, &value.to_be_bytes())
                }
            )+
        }
    };
}

impl_peek_poke!(
    u8 => peek_u8, poke_u8;
    u16 => peek_u16, poke_u16;
    u32 => peek_u32, poke_u32;
    u64 => peek_u64, poke_u64;
);

/// Strip a single trailing NUL, rejecting NULs anywhere else.
pub(crate) fn strip_nul(bytes: &[u8]) -> Result<&[u8]> {
    match bytes.iter().position(|&b| b == 0) {
        None => Ok(bytes),
        Some(pos) if pos + 1 == bytes.len() => Ok(&bytes[..pos]),
        Some(_) => Err(Error::InvalidFormat),
    }
}
