//! Error types.

use core::fmt;

/// Result type with `sshbuf` crate's [`Error`] as the error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Memory allocation failed.
    AllocFail,

    /// Base64-related errors.
    #[cfg(feature = "base64")]
    Base64(base64ct::Error),

    /// Character encoding-related errors.
    CharacterEncoding,

    /// Buffers passed to an operation are not in the required relationship,
    /// or an argument is out of range for the buffer.
    InvalidArgument,

    /// Data is not in the expected format.
    InvalidFormat,

    /// Not enough data in the buffer to satisfy the request.
    ///
    /// Streaming parsers treat this as "wait for more input".
    MessageIncomplete,

    /// Request would grow the buffer beyond its maximum size.
    NoBufferSpace,

    /// Overflow errors.
    Overflow,

    /// Length prefix exceeds [`SIZE_MAX`](crate::SIZE_MAX).
    StringTooLarge,

    /// Unexpected trailing data at end of message.
    TrailingData {
        /// Number of bytes of remaining data at end of message.
        remaining: usize,
    },
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            #[cfg(feature = "base64")]
            Self::Base64(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AllocFail => write!(f, "memory allocation failed"),
            #[cfg(feature = "base64")]
            Error::Base64(err) => write!(f, "Base64 encoding error: {err}"),
            Error::CharacterEncoding => write!(f, "character encoding invalid"),
            Error::InvalidArgument => write!(f, "invalid argument"),
            Error::InvalidFormat => write!(f, "invalid format"),
            Error::MessageIncomplete => write!(f, "message incomplete"),
            Error::NoBufferSpace => write!(f, "no buffer space"),
            Error::Overflow => write!(f, "internal overflow error"),
            Error::StringTooLarge => write!(f, "string too large"),
            Error::TrailingData { remaining } => write!(
                f,
                "unexpected trailing data at end of message ({remaining} bytes)",
            ),
        }
    }
}

impl From<core::num::TryFromIntError> for Error {
    fn from(_: core::num::TryFromIntError) -> Error {
        Error::Overflow
    }
}

impl From<core::str::Utf8Error> for Error {
    fn from(_: core::str::Utf8Error) -> Error {
        Error::CharacterEncoding
    }
}

impl From<alloc::string::FromUtf8Error> for Error {
    fn from(_: alloc::string::FromUtf8Error) -> Error {
        Error::CharacterEncoding
    }
}

impl From<alloc::collections::TryReserveError> for Error {
    fn from(_: alloc::collections::TryReserveError) -> Error {
        Error::AllocFail
    }
}

#[cfg(feature = "base64")]
impl From<base64ct::Error> for Error {
    fn from(err: base64ct::Error) -> Error {
        Error::Base64(err)
    }
}
