//! Bounded growable byte buffer.

use crate::{lineage::Lineage, Error, Result, PACK_MIN, SIZE_INC, SIZE_INIT, SIZE_MAX};
use alloc::vec::Vec;
use core::mem;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Growable byte buffer with a configurable upper bound on its length.
///
/// The backing storage is split into three regions:
///
/// ```text
///   0          off                    size            alloc
///   | consumed | used (readable) data | spare capacity |
/// ```
///
/// Writes append to the used region through [`SshBuf::reserve`], reads
/// remove bytes from its front through [`SshBuf::consume`]. Bytes in front
/// of `off` are logically gone and are reclaimed by compacting the used
/// region down to offset zero, which happens on demand before the storage
/// is grown.
///
/// The logical length ([`SshBuf::len`]) never exceeds [`SshBuf::max_size`],
/// and the physical allocation ([`SshBuf::alloc`]) is always a multiple of
/// [`SIZE_INC`]. Every fallible operation either succeeds completely or
/// leaves the buffer untouched.
///
/// Slices handed out by the buffer borrow it, so they cannot outlive the
/// next mutating call.
pub struct SshBuf {
    /// Physical storage. Its length is the allocation size.
    data: Vec<u8>,

    /// Start of the used region.
    off: usize,

    /// End of the used region.
    size: usize,

    /// Length of the active window, measured from `off`. `None` means the
    /// whole used region is active.
    active: Option<usize>,

    max_size: usize,

    lineage: Lineage,
}

impl SshBuf {
    /// Create a new empty buffer bounded by [`SIZE_MAX`].
    ///
    /// No storage is allocated until data is first reserved.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            off: 0,
            size: 0,
            active: None,
            max_size: SIZE_MAX,
            lineage: Lineage::root(),
        }
    }

    /// Create a new empty buffer bounded by `max_size`.
    pub fn with_max_size(max_size: usize) -> Result<Self> {
        let mut buf = Self::new();
        buf.set_max_size(max_size)?;
        Ok(buf)
    }

    /// Create a new buffer holding a copy of `bytes`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let mut buf = Self::new();
        buf.reserve(bytes.len())?.copy_from_slice(bytes);
        Ok(buf)
    }

    /// Release the buffer and its storage.
    ///
    /// Equivalent to dropping it.
    pub fn free(self) {
        drop(self);
    }

    /// Maximum length this buffer may grow to.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Change the maximum length of this buffer.
    ///
    /// Fails with [`Error::NoBufferSpace`] if `max_size` is smaller than the
    /// data currently held or larger than [`SIZE_MAX`]. If the current
    /// allocation is larger than the new bound it is trimmed down to what the
    /// held data needs.
    pub fn set_max_size(&mut self, max_size: usize) -> Result<()> {
        if max_size == self.max_size {
            return Ok(());
        }

        if max_size > SIZE_MAX || max_size < self.len() {
            return Err(Error::NoBufferSpace);
        }

        if max_size < self.alloc() {
            let alloc = round_up(self.len())?.max(SIZE_INIT);

            if alloc < self.alloc() {
                self.realloc(alloc)?;
            }
        }

        trace!(from = self.max_size, to = max_size, "max size changed");
        self.max_size = max_size;
        Ok(())
    }

    /// Number of bytes of data held in the buffer.
    pub fn len(&self) -> usize {
        self.size - self.off
    }

    /// Is the buffer empty?
    pub fn is_empty(&self) -> bool {
        self.size == self.off
    }

    /// Number of bytes that can still be appended before reaching
    /// [`SshBuf::max_size`].
    pub fn avail(&self) -> usize {
        self.max_size - self.len()
    }

    /// Size of the physical allocation backing the buffer.
    ///
    /// Always a multiple of [`SIZE_INC`].
    pub fn alloc(&self) -> usize {
        self.data.len()
    }

    /// Borrow the data held in the buffer.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[self.off..self.size]
    }

    /// Mutably borrow the data held in the buffer.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data[self.off..self.size]
    }

    /// Check whether `len` more bytes could be appended, without changing
    /// anything.
    pub fn check_reserve(&self, len: usize) -> Result<()> {
        if len > self.avail() {
            Err(Error::NoBufferSpace)
        } else {
            Ok(())
        }
    }

    /// Make room for `len` more bytes after the used region without
    /// appending them.
    ///
    /// Consumed space at the front of the buffer is reclaimed before the
    /// allocation is grown.
    pub fn allocate(&mut self, len: usize) -> Result<()> {
        self.check_reserve(len)?;

        if len == 0 {
            return Ok(());
        }

        self.maybe_pack();

        if self.alloc() - self.size >= len {
            return Ok(());
        }

        let needed = self.len() + len;

        if needed <= self.alloc() {
            self.pack();
            Ok(())
        } else {
            self.realloc(round_up(needed)?)
        }
    }

    /// Append `len` bytes to the used region and return them for the caller
    /// to fill in.
    ///
    /// The bytes count towards [`SshBuf::len`] as soon as this returns. Their
    /// initial contents are unspecified.
    ///
    /// # Returns
    /// - `Ok(bytes)` with `bytes.len() == len` on success
    /// - `Err(Error::NoBufferSpace)` if `len` exceeds [`SshBuf::avail`]
    pub fn reserve(&mut self, len: usize) -> Result<&mut [u8]> {
        self.allocate(len)?;

        let start = self.size;
        self.size += len;
        Ok(&mut self.data[start..self.size])
    }

    /// Discard `len` bytes from the front of the buffer.
    ///
    /// Fails with [`Error::MessageIncomplete`] if fewer than `len` bytes are
    /// held.
    pub fn consume(&mut self, len: usize) -> Result<()> {
        if len == 0 {
            return Ok(());
        }

        if len > self.len() {
            return Err(Error::MessageIncomplete);
        }

        self.off += len;
        self.lineage.advance(len);
        self.active = self.active.map(|active| active.saturating_sub(len));

        if self.off == self.size {
            self.off = 0;
            self.size = 0;
        }

        Ok(())
    }

    /// Discard `len` bytes from the back of the buffer.
    ///
    /// Fails with [`Error::MessageIncomplete`] if fewer than `len` bytes are
    /// held.
    pub fn consume_end(&mut self, len: usize) -> Result<()> {
        if len == 0 {
            return Ok(());
        }

        if len > self.len() {
            return Err(Error::MessageIncomplete);
        }

        self.size -= len;
        let remaining = self.len();
        self.active = self.active.map(|active| active.min(remaining));
        Ok(())
    }

    /// Empty the buffer, keeping its allocation and maximum size.
    ///
    /// Snapshots taken before the reset are no longer related to it.
    pub fn reset(&mut self) {
        scrub(&mut self.data[..self.size]);
        self.off = 0;
        self.size = 0;
        self.active = None;
        self.lineage = Lineage::root();
    }

    /// Take a snapshot: a new, independently owned buffer holding a copy of
    /// the data currently in `self`.
    ///
    /// The snapshot inherits the maximum size of `self`. It can later be
    /// passed to [`SshBuf::consume_upto_child`] to advance `self` by however
    /// much was consumed from the snapshot.
    pub fn fromb(&self) -> Result<Self> {
        let mut child = Self::new();
        child.max_size = self.max_size;
        child.lineage = self.lineage.snapshot();
        child.reserve(self.len())?.copy_from_slice(self.as_slice());
        Ok(child)
    }

    /// Consume data from `self` up to the point `child` has been consumed to.
    ///
    /// `child` must be a snapshot of `self` taken with [`SshBuf::fromb`],
    /// and the data remaining in `child` must be exactly the tail of the data
    /// in `self`. On success both buffers hold the same bytes.
    ///
    /// Nothing else may consume from `self` between taking the snapshot and
    /// this call; the relationship is checked, not synchronised.
    ///
    /// # Returns
    /// - `Ok(())` on success
    /// - `Err(Error::InvalidArgument)` if `child` is not a snapshot of
    ///   `self`, if `self` has already been consumed past the start of
    ///   `child`, or if the remaining data no longer coincides
    pub fn consume_upto_child(&mut self, child: &SshBuf) -> Result<()> {
        let skip = self
            .lineage
            .distance_to(&child.lineage)
            .and_then(|distance| usize::try_from(distance).ok())
            .ok_or(Error::InvalidArgument)?;

        match self.as_slice().get(skip..) {
            Some(tail) if tail == child.as_slice() => self.consume(skip),
            _ => Err(Error::InvalidArgument),
        }
    }

    /// Declare the first `len` bytes of the used region as the active
    /// window.
    ///
    /// The window shrinks along with the data when bytes are consumed from
    /// either end. Fails with [`Error::InvalidArgument`] if `len` exceeds
    /// [`SshBuf::len`].
    pub fn set_active(&mut self, len: usize) -> Result<()> {
        if len > self.len() {
            return Err(Error::InvalidArgument);
        }

        self.active = Some(len);
        Ok(())
    }

    /// Make the whole used region active again.
    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Length of the active window.
    pub fn active_len(&self) -> usize {
        self.active.unwrap_or_else(|| self.len())
    }

    /// Borrow the data in the active window.
    pub fn active(&self) -> &[u8] {
        &self.data[self.off..self.off + self.active_len()]
    }

    /// Compact eagerly once the consumed prefix is large.
    fn maybe_pack(&mut self) {
        if self.off >= PACK_MIN && self.off >= self.size / 2 {
            self.pack();
        }
    }

    /// Move the used region down to offset zero.
    fn pack(&mut self) {
        if self.off == 0 {
            return;
        }

        trace!(off = self.off, len = self.len(), "compacting buffer");

        let len = self.len();
        let old_size = self.size;
        self.data.copy_within(self.off..self.size, 0);
        scrub(&mut self.data[len..old_size]);
        self.off = 0;
        self.size = len;
    }

    /// Move the used region into a fresh allocation of `alloc` bytes.
    fn realloc(&mut self, alloc: usize) -> Result<()> {
        debug_assert_eq!(alloc % SIZE_INC, 0);
        debug_assert!(alloc >= self.len());

        trace!(from = self.alloc(), to = alloc, len = self.len(), "reallocating buffer");

        let mut data = Vec::new();
        data.try_reserve_exact(alloc)?;
        data.extend_from_slice(self.as_slice());
        data.resize(alloc, 0);

        let len = self.len();
        let mut old = mem::replace(&mut self.data, data);
        scrub(&mut old);
        self.off = 0;
        self.size = len;
        Ok(())
    }
}

impl Default for SshBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<[u8]> for SshBuf {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsMut<[u8]> for SshBuf {
    fn as_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl TryFrom<&[u8]> for SshBuf {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }
}

#[cfg(feature = "zeroize")]
impl Drop for SshBuf {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::ZeroizeOnDrop for SshBuf {}

/// Round `len` up to the next multiple of [`SIZE_INC`].
fn round_up(len: usize) -> Result<usize> {
    len.checked_next_multiple_of(SIZE_INC)
        .ok_or(Error::Overflow)
}

/// Wipe bytes that are being released or left behind.
#[cfg(feature = "zeroize")]
pub(crate) fn scrub(bytes: &mut [u8]) {
    bytes.zeroize();
}

#[cfg(not(feature = "zeroize"))]
pub(crate) fn scrub(_bytes: &mut [u8]) {}

#[cfg(test)]
mod tests {
    use super::SshBuf;
    use crate::{Error, PACK_MIN, SIZE_INC, SIZE_INIT};

    fn assert_invariants(buf: &SshBuf) {
        assert!(buf.off <= buf.off + buf.active_len());
        assert!(buf.off + buf.active_len() <= buf.size);
        assert!(buf.size <= buf.alloc());
        assert_eq!(buf.alloc() % SIZE_INC, 0);
        assert!(buf.len() <= buf.max_size());
    }

    #[test]
    fn growth_is_rounded() {
        let mut buf = SshBuf::new();
        assert_eq!(buf.alloc(), 0);

        buf.reserve(1).unwrap();
        assert_eq!(buf.alloc(), SIZE_INC);
        assert_invariants(&buf);

        buf.reserve(SIZE_INC).unwrap();
        assert_eq!(buf.alloc(), 2 * SIZE_INC);
        assert_invariants(&buf);
    }

    #[test]
    fn allocation_prefers_compaction() {
        let mut buf = SshBuf::new();
        buf.reserve(SIZE_INC).unwrap().fill(0xaa);
        buf.consume(SIZE_INC - 1).unwrap();
        assert_eq!(buf.off, SIZE_INC - 1);

        buf.reserve(10).unwrap().fill(0xbb);
        assert_eq!(buf.off, 0);
        assert_eq!(buf.alloc(), SIZE_INC);
        assert_eq!(buf.as_slice()[0], 0xaa);
        assert!(buf.as_slice()[1..].iter().all(|&b| b == 0xbb));
        assert_invariants(&buf);
    }

    #[test]
    fn large_consumed_prefix_is_packed_eagerly() {
        let mut buf = SshBuf::new();
        buf.reserve(PACK_MIN + 16).unwrap().fill(0x55);
        buf.consume(PACK_MIN).unwrap();
        assert_eq!(buf.off, PACK_MIN);

        // Fits in the spare capacity, but the prefix is reclaimed anyway.
        buf.reserve(1).unwrap()[0] = 0x66;
        assert_eq!(buf.off, 0);
        assert_eq!(buf.len(), 17);
        assert_eq!(buf.as_slice()[16], 0x66);
        assert_invariants(&buf);
    }

    #[test]
    fn consuming_everything_rewinds() {
        let mut buf = SshBuf::new();
        buf.reserve(8).unwrap();
        buf.consume(8).unwrap();
        assert_eq!((buf.off, buf.size), (0, 0));
        assert_eq!(buf.alloc(), SIZE_INC);
    }

    #[test]
    fn shrinking_max_size_trims_allocation() {
        let mut buf = SshBuf::new();
        buf.reserve(4000).unwrap();
        buf.consume(3900).unwrap();
        assert_eq!(buf.alloc(), 4096);

        buf.set_max_size(1024).unwrap();
        assert_eq!(buf.alloc(), SIZE_INIT);
        assert_eq!(buf.off, 0);
        assert_eq!(buf.len(), 100);
        assert_invariants(&buf);
    }

    #[test]
    fn active_window_follows_consumption() {
        let mut buf = SshBuf::from_slice(b"0123456789").unwrap();
        assert_eq!(buf.active(), b"0123456789");

        buf.set_active(6).unwrap();
        assert_eq!(buf.active(), b"012345");
        assert_eq!(buf.set_active(11), Err(Error::InvalidArgument));

        buf.consume(2).unwrap();
        assert_eq!(buf.active(), b"2345");
        assert_invariants(&buf);

        buf.consume_end(5).unwrap();
        assert_eq!(buf.active(), b"234");
        assert_invariants(&buf);

        buf.reserve(1).unwrap()[0] = b'x';
        assert_eq!(buf.active(), b"234");

        buf.clear_active();
        assert_eq!(buf.active(), b"234x");

        buf.set_active(0).unwrap();
        buf.reset();
        assert_eq!(buf.active_len(), 0);
        assert_invariants(&buf);
    }
}
