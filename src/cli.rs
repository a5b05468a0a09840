use crate::error::Result;
use crate::probe::{CallTarget, FixtureLibrary, InProcess};
use clap::{Parser, Subcommand};
use std::ffi::c_int;
use std::path::PathBuf;

pub const DEFAULT_LIBRARY: &str = "funcall";

#[derive(Parser, Debug)]
#[command(
    name = "funcall-probe",
    version,
    about = "Calls the arity-indexed fixture functions through the C ABI and checks their results"
)]
pub struct CliConfig {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Fixture library to load: a bare name like `funcall` or a path
    #[arg(long, global = true, value_name = "NAME|PATH")]
    pub lib: Option<String>,

    /// Call the fixture linked into this binary instead of loading a library
    #[arg(long, global = true, conflicts_with = "lib")]
    pub in_process: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one scenario per arity and report each result
    Check,
    /// Call func<N> where N is the number of ARGS
    Call {
        #[arg(allow_negative_numbers = true)]
        args: Vec<c_int>,
    },
}

impl CliConfig {
    /// Builds the call target. A bare library name is searched for next to
    /// the running executable, where cargo places the cdylib.
    pub fn target(&self) -> Result<Box<dyn CallTarget>> {
        if self.in_process {
            return Ok(Box::new(InProcess));
        }
        let name = self.lib.as_deref().unwrap_or(DEFAULT_LIBRARY);
        let search_dir = exe_dir();
        let library = FixtureLibrary::open(name, search_dir.as_deref())?;
        tracing::info!(path = %library.path().display(), "fixture library loaded");
        Ok(Box::new(library))
    }
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()))
}
