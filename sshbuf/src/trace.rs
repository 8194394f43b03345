//! Diagnostic events for buffer reallocation and compaction.
//!
//! Events are emitted at `TRACE` level through [`tracing`] when the
//! `tracing` feature is enabled, and compile to nothing otherwise.

#[cfg(feature = "tracing")]
macro_rules! trace {
    ($($arg:tt)+) => {
        tracing::trace!(target: "sshbuf", $($arg)+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)+) => {};
}
