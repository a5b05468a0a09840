use std::ffi::c_int;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("cannot load library '{name}' (resolved to '{}'): {source}", .path.display())]
    LibraryLoad {
        name: String,
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("symbol '{symbol}' not found: {source}")]
    MissingSymbol {
        symbol: String,
        #[source]
        source: libloading::Error,
    },

    #[error("no fixture function takes {0} arguments (max 6)")]
    UnsupportedArity(usize),

    #[error("entry point takes {expected} args, got {got}")]
    ArityMismatch { expected: usize, got: usize },

    #[error("{function} returned {actual}, expected {expected}")]
    Mismatch {
        function: String,
        expected: c_int,
        actual: c_int,
    },
}

pub type Result<T> = std::result::Result<T, ProbeError>;
