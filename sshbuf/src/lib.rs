#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/media/6ee8e381/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/media/6ee8e381/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod trace;

mod buffer;
mod checked;
mod decode;
mod encode;
mod error;
mod getput;
mod lineage;
mod misc;
mod reader;
mod writer;

pub use crate::{
    buffer::SshBuf,
    checked::CheckedSum,
    decode::Decode,
    encode::{Encode, Rfc4251String},
    error::{Error, Result},
    reader::Reader,
    writer::Writer,
};

#[cfg(feature = "base64")]
pub use base64ct as base64;

/// Hard upper bound on the size of any buffer, and the default
/// [`SshBuf::max_size`].
pub const SIZE_MAX: usize = 0x800_0000;

/// Granularity of the physical allocation backing a buffer.
///
/// [`SshBuf::alloc`] is always a multiple of this value.
pub const SIZE_INC: usize = 256;

/// Smallest allocation kept when a buffer is shrunk by
/// [`SshBuf::set_max_size`].
pub const SIZE_INIT: usize = 256;

/// Consumed bytes at the front of a buffer are reclaimed eagerly once there
/// are at least this many of them.
pub const PACK_MIN: usize = 8192;

/// Line width used when wrapping Base64 output.
#[cfg(feature = "base64")]
const BASE64_LINE_WIDTH: usize = 70;
