//! Logging shims over `tracing`.
//!
//! Every event in the crate goes through these macros so that building without the
//! `tracing` feature removes the events entirely instead of sprinkling `#[cfg]` over
//! every call site.

macro_rules! trace_event {
    ($($arg:tt)+) => {{
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)+);
    }};
}

macro_rules! debug_event {
    ($($arg:tt)+) => {{
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)+);
    }};
}

macro_rules! warn_event {
    ($($arg:tt)+) => {{
        #[cfg(feature = "tracing")]
        ::tracing::warn!($($arg)+);
    }};
}

pub(crate) use debug_event;
pub(crate) use trace_event;
pub(crate) use warn_event;
