//! Provenance of buffers created with [`SshBuf::fromb`](crate::SshBuf::fromb).
//!
//! Every buffer carries an identity and a running count of the bytes it has
//! consumed from its front. A snapshot additionally remembers which buffer it
//! was taken from and how far that buffer had been consumed at the time, which
//! is enough to translate the snapshot's read position back into its parent's.
//!
//! Identities come from a single counter shared by all buffers. It is the only
//! global state in the crate and holds no data. On targets without atomic
//! read-modify-write (e.g. `thumbv6m`) it is advanced with a plain load and
//! store, so buffers created concurrently from interrupt context may share an
//! identity; `consume_upto_child` still compares contents in that case.

use core::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

#[cfg(target_has_atomic = "ptr")]
fn next_id() -> usize {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

#[cfg(not(target_has_atomic = "ptr"))]
fn next_id() -> usize {
    let id = NEXT_ID.load(Ordering::Relaxed);
    NEXT_ID.store(id.wrapping_add(1), Ordering::Relaxed);
    id
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Lineage {
    id: usize,

    /// Bytes consumed from the front since this lineage began.
    consumed: u64,

    /// Set on snapshots.
    origin: Option<Origin>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Origin {
    /// Identity of the buffer the snapshot was taken from.
    parent: usize,

    /// Parent's consumed count when the snapshot was taken.
    position: u64,
}

impl Lineage {
    /// Start a new lineage unrelated to any other buffer.
    pub(crate) fn root() -> Self {
        Self {
            id: next_id(),
            consumed: 0,
            origin: None,
        }
    }

    /// Start a lineage for a snapshot of the buffer owning `self`.
    pub(crate) fn snapshot(&self) -> Self {
        Self {
            origin: Some(Origin {
                parent: self.id,
                position: self.consumed,
            }),
            ..Self::root()
        }
    }

    /// Record that `n` bytes were consumed from the front.
    pub(crate) fn advance(&mut self, n: usize) {
        self.consumed = self.consumed.wrapping_add(n as u64);
    }

    /// Number of bytes the owner of `self` has to consume so that its read
    /// position lines up with the read position of `child`.
    ///
    /// Returns `None` if `child` is not a snapshot of this lineage or if this
    /// lineage has already been consumed past the child's read position.
    pub(crate) fn distance_to(&self, child: &Lineage) -> Option<u64> {
        let origin = child.origin.filter(|origin| origin.parent == self.id)?;

        origin
            .position
            .checked_add(child.consumed)?
            .checked_sub(self.consumed)
    }
}

#[cfg(test)]
mod tests {
    use super::Lineage;

    #[test]
    fn distance_tracks_child_progress() {
        let mut parent = Lineage::root();
        parent.advance(3);

        let mut child = parent.snapshot();
        assert_eq!(parent.distance_to(&child), Some(0));

        child.advance(5);
        assert_eq!(parent.distance_to(&child), Some(5));

        parent.advance(5);
        assert_eq!(parent.distance_to(&child), Some(0));

        parent.advance(1);
        assert_eq!(parent.distance_to(&child), None);
    }

    #[test]
    fn unrelated_lineages_have_no_distance() {
        let a = Lineage::root();
        let b = Lineage::root();
        assert_eq!(a.distance_to(&b), None);
        assert_eq!(a.distance_to(&a), None);

        let grandchild = b.snapshot().snapshot();
        assert_eq!(b.distance_to(&grandchild), None);
    }

    #[test]
    fn identities_are_distinct() {
        let ids = [(); 8].map(|()| super::next_id());

        for (i, a) in ids.iter().enumerate() {
            assert!(ids[i + 1..].iter().all(|b| a != b));
        }
    }
}
