//! Profiling support via Tracy.
//!
//! Enable the `profiling` feature to record spans:
//!
//! ```bash
//! cargo run --features profiling
//! ```
//!
//! ```ignore
//! use umbra_graphics::profiling::{profile_function, profile_scope};
//!
//! fn compile_all() {
//!     profile_function!();
//!
//!     {
//!         profile_scope!("parse");
//!         // ... do work ...
//!     }
//! }
//! ```
//!
//! When profiling is disabled (the default), all macros compile to no-ops.

#[cfg(feature = "profiling")]
pub use tracy_client::{self, span};

/// Create a profiling span for the current scope.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_scope {
    ($name:expr) => {
        let _profile_span = $crate::profiling::span!($name);
    };
}

/// Create a profiling span (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_scope {
    ($name:expr) => {};
}

/// Create a profiling span for the entire function.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_function {
    () => {
        let _profile_span = $crate::profiling::span!();
    };
}

/// Create a profiling span for function (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_function {
    () => {};
}

/// Start the Tracy client.
///
/// Must run before the first span is recorded; a no-op without the
/// `profiling` feature.
pub fn start() {
    #[cfg(feature = "profiling")]
    {
        let _client = tracy_client::Client::start();
    }
}

pub use profile_function;
pub use profile_scope;
