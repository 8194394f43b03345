//! Searching, comparison, and text encodings of buffer contents.

use crate::{getput::strip_nul, Error, Result, SshBuf};
use alloc::string::String;
use core::{fmt, str};

#[cfg(feature = "base64")]
use {
    crate::{buffer::scrub, BASE64_LINE_WIDTH},
    base64ct::{Base64, Base64UrlUnpadded, Encoding},
};

#[cfg(feature = "bytes")]
use bytes::Bytes;

impl SshBuf {
    /// Check whether the data at `offset` starts with `needle`.
    ///
    /// Fails with [`Error::MessageIncomplete`] if the buffer holds fewer than
    /// `offset + needle.len()` bytes.
    pub fn cmp(&self, offset: usize, needle: &[u8]) -> Result<bool> {
        Ok(self.peek(offset, needle.len())? == needle)
    }

    /// Find the first occurrence of `needle` at or after `start`, returning
    /// its offset into the data.
    ///
    /// Fails with [`Error::InvalidArgument`] if `needle` is empty or `start`
    /// is past the end of the data.
    pub fn find(&self, start: usize, needle: &[u8]) -> Result<Option<usize>> {
        if needle.is_empty() {
            return Err(Error::InvalidArgument);
        }

        let haystack = self.as_slice().get(start..).ok_or(Error::InvalidArgument)?;

        Ok(haystack
            .windows(needle.len())
            .position(|window| window == needle)
            .map(|pos| start + pos))
    }

    /// Copy the data out as text.
    ///
    /// A single trailing NUL is stripped; any other NUL byte fails with
    /// [`Error::InvalidFormat`].
    pub fn dup_string(&self) -> Result<String> {
        let text = str::from_utf8(strip_nul(self.as_slice())?)?;
        Ok(String::from(text))
    }

    /// Lowercase hexadecimal rendering of the data.
    pub fn dtob16(&self) -> String {
        format!("{self:x}")
    }

    /// Append the data, Base64-encoded, to `out`.
    ///
    /// With `wrap` set, the output is broken into newline-terminated lines of
    /// at most 70 characters.
    #[cfg(feature = "base64")]
    pub fn dtob64(&self, out: &mut SshBuf, wrap: bool) -> Result<()> {
        put_base64::<Base64>(self.as_slice(), out, wrap)
    }

    /// Append the data, encoded as unpadded URL-safe Base64, to `out`.
    #[cfg(feature = "base64")]
    pub fn dtourlb64(&self, out: &mut SshBuf, wrap: bool) -> Result<()> {
        put_base64::<Base64UrlUnpadded>(self.as_slice(), out, wrap)
    }

    /// Base64 rendering of the data.
    #[cfg(feature = "base64")]
    pub fn to_base64(&self) -> String {
        Base64::encode_string(self.as_slice())
    }

    /// Decode Base64 text and append the result. Whitespace in `b64` is
    /// ignored.
    #[cfg(feature = "base64")]
    pub fn b64tod(&mut self, b64: &str) -> Result<()> {
        let compact: String = b64.split_ascii_whitespace().collect();
        let mut decoded = Base64::decode_vec(&compact)?;
        let ret = self.put(&decoded);
        scrub(&mut decoded);
        ret
    }

    /// Copy the data into a new [`Bytes`].
    #[cfg(feature = "bytes")]
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_slice())
    }
}

#[cfg(feature = "base64")]
fn put_base64<E: Encoding>(data: &[u8], out: &mut SshBuf, wrap: bool) -> Result<()> {
    let encoded = E::encode_string(data);

    if !wrap {
        return out.put(encoded.as_bytes());
    }

    let lines = encoded.len().div_ceil(BASE64_LINE_WIDTH);
    out.check_reserve(encoded.len() + lines)?;

    for line in encoded.as_bytes().chunks(BASE64_LINE_WIDTH) {
        out.put(line)?;
        out.put(b"\n")?;
    }

    Ok(())
}

/// Buffers compare equal when they hold the same data, regardless of
/// capacity, bounds, or provenance.
impl PartialEq for SshBuf {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for SshBuf {}

/// With the `zeroize` feature enabled the contents are treated as secret and
/// left out.
impl fmt::Debug for SshBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("SshBuf");
        debug
            .field("len", &self.len())
            .field("active_len", &self.active_len())
            .field("alloc", &self.alloc())
            .field("max_size", &self.max_size());

        if cfg!(feature = "zeroize") {
            debug.finish_non_exhaustive()
        } else {
            debug.field("data", &format_args!("{self:x}")).finish()
        }
    }
}

impl fmt::LowerHex for SshBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.as_slice() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::UpperHex for SshBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.as_slice() {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}
