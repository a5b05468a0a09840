//! Arity-indexed C-ABI fixture functions (`func0` .. `func6`) and a probe
//! that calls them back through `libloading`.

pub mod entry;
pub mod error;
pub mod fixture;
pub mod probe;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod logger;

pub use entry::{Entry, MAX_ARITY};
pub use error::{ProbeError, Result};
pub use fixture::{func0, func1, func2, func3, func4, func5, func6};
pub use probe::{CallTarget, FixtureLibrary, InProcess, Outcome, Scenario};
