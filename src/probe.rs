/// Caller side of the fixture: loads it, calls each entry point through a
/// typed C function pointer and compares the result with the expected one.

use crate::entry::Entry;
use crate::error::{ProbeError, Result};
use crate::fixture;
use std::ffi::c_int;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Call targets
// ---------------------------------------------------------------------------

pub trait CallTarget {
    /// Human-readable name for logs.
    fn label(&self) -> String;

    /// Calls `func<arity>` with `args`.
    fn call(&self, arity: usize, args: &[c_int]) -> Result<c_int>;
}

/// The fixture linked into the current binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct InProcess;

impl CallTarget for InProcess {
    fn label(&self) -> String {
        "in-process".to_string()
    }

    fn call(&self, arity: usize, args: &[c_int]) -> Result<c_int> {
        let entry = fixture::entry(arity)?;
        // Statically linked, so the pointer outlives the call.
        unsafe { entry.invoke(args) }
    }
}

/// A fixture loaded from a shared library at runtime.
pub struct FixtureLibrary {
    path: PathBuf,
    library: libloading::Library,
}

impl FixtureLibrary {
    pub fn open(name: &str, search_dir: Option<&Path>) -> Result<Self> {
        let resolved = resolve_library_path(name, search_dir);
        tracing::debug!(name, path = %resolved.display(), "loading fixture library");

        let library = unsafe { libloading::Library::new(&resolved) }.map_err(|source| {
            ProbeError::LibraryLoad {
                name: name.to_string(),
                path: resolved.clone(),
                source,
            }
        })?;

        Ok(FixtureLibrary {
            path: resolved,
            library,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // The copied pointer is only valid while `self.library` stays loaded.
    fn symbol<T: Copy>(&self, name: &str) -> Result<T> {
        let sym: libloading::Symbol<T> = unsafe { self.library.get(name.as_bytes()) }
            .map_err(|source| ProbeError::MissingSymbol {
                symbol: name.to_string(),
                source,
            })?;
        Ok(*sym)
    }
}

impl CallTarget for FixtureLibrary {
    fn label(&self) -> String {
        self.path.display().to_string()
    }

    fn call(&self, arity: usize, args: &[c_int]) -> Result<c_int> {
        let name = fixture::function_name(arity)?;
        let entry = match arity {
            0 => Entry::Arity0(self.symbol(&name)?),
            1 => Entry::Arity1(self.symbol(&name)?),
            2 => Entry::Arity2(self.symbol(&name)?),
            3 => Entry::Arity3(self.symbol(&name)?),
            4 => Entry::Arity4(self.symbol(&name)?),
            5 => Entry::Arity5(self.symbol(&name)?),
            6 => Entry::Arity6(self.symbol(&name)?),
            n => return Err(ProbeError::UnsupportedArity(n)),
        };
        // The library is borrowed for the whole call; the symbol is assumed
        // to have the C signature `int func<n>(int, ...)`.
        unsafe { entry.invoke(args) }
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub args: Vec<c_int>,
}

impl Scenario {
    pub fn new(args: Vec<c_int>) -> Self {
        Scenario { args }
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn expected(&self) -> c_int {
        fixture::sum_plus_one(&self.args)
    }
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub function: String,
    pub args: Vec<c_int>,
    pub expected: c_int,
    pub actual: c_int,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }

    pub fn into_result(self) -> Result<c_int> {
        if self.passed() {
            Ok(self.actual)
        } else {
            Err(ProbeError::Mismatch {
                function: self.function,
                expected: self.expected,
                actual: self.actual,
            })
        }
    }
}

/// One scenario per arity, plus a negative-input case.
pub fn standard_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(vec![]),
        Scenario::new(vec![5]),
        Scenario::new(vec![2, 3]),
        Scenario::new(vec![1, 2, 3]),
        Scenario::new(vec![1, 2, 3, 4]),
        Scenario::new(vec![1, 2, 3, 4, 5]),
        Scenario::new(vec![1, 2, 3, 4, 5, 6]),
        Scenario::new(vec![-1, -2, -3]),
    ]
}

pub fn run_scenario<T: CallTarget + ?Sized>(target: &T, scenario: &Scenario) -> Result<Outcome> {
    let function = fixture::function_name(scenario.arity())?;
    let actual = target.call(scenario.arity(), &scenario.args)?;
    let outcome = Outcome {
        function,
        args: scenario.args.clone(),
        expected: scenario.expected(),
        actual,
    };
    if !outcome.passed() {
        tracing::warn!(
            function = %outcome.function,
            expected = outcome.expected,
            actual = outcome.actual,
            "unexpected return value"
        );
    }
    Ok(outcome)
}

pub fn check<T: CallTarget + ?Sized>(target: &T, scenarios: &[Scenario]) -> Result<Vec<Outcome>> {
    tracing::info!(fixture = %target.label(), scenarios = scenarios.len(), "running scenarios");
    scenarios.iter().map(|s| run_scenario(target, s)).collect()
}

// ---------------------------------------------------------------------------
// Library path resolution
// ---------------------------------------------------------------------------

/// Picks the file to hand to the OS loader. A name with an extension, or an
/// absolute path, is used as given (joined onto `search_dir` if only found
/// there). A bare name is expanded to the platform's library file names and
/// looked up in the current directory, then in `search_dir`.
pub fn resolve_library_path(name: &str, search_dir: Option<&Path>) -> PathBuf {
    let path = Path::new(name);
    let explicit = path.is_absolute() || path.extension().is_some();

    let candidates = if explicit {
        vec![name.to_string()]
    } else if cfg!(target_os = "windows") {
        vec![format!("{}.dll", name), format!("lib{}.dll", name)]
    } else if cfg!(target_os = "macos") {
        vec![format!("lib{}.dylib", name), format!("{}.dylib", name)]
    } else {
        vec![format!("lib{}.so", name), format!("{}.so", name)]
    };

    let dirs = std::iter::once(Path::new("")).chain(search_dir);
    for dir in dirs {
        if let Some(found) = candidates.iter().map(|c| dir.join(c)).find(|p| p.exists()) {
            return found;
        }
    }

    // Not found locally; let the OS loader search LD_LIBRARY_PATH / PATH.
    PathBuf::from(&candidates[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(c_int);

    impl CallTarget for Constant {
        fn label(&self) -> String {
            "constant".to_string()
        }

        fn call(&self, _arity: usize, _args: &[c_int]) -> Result<c_int> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_scenario_expected() {
        assert_eq!(Scenario::new(vec![]).expected(), 1);
        assert_eq!(Scenario::new(vec![1, 2, 3, 4, 5, 6]).expected(), 22);
    }

    #[test]
    fn test_in_process_passes_standard_scenarios() {
        let outcomes = check(&InProcess, &standard_scenarios()).unwrap();
        assert_eq!(outcomes.len(), 8);
        assert!(outcomes.iter().all(Outcome::passed));
        assert_eq!(outcomes[6].function, "func6");
        assert_eq!(outcomes[6].actual, 22);
    }

    #[test]
    fn test_in_process_rejects_arity_seven() {
        let err = InProcess.call(7, &[0; 7]).unwrap_err();
        assert!(matches!(err, ProbeError::UnsupportedArity(7)));
    }

    #[test]
    fn test_wrong_result_is_reported_as_mismatch() {
        let outcome = run_scenario(&Constant(0), &Scenario::new(vec![2, 3])).unwrap();
        assert!(!outcome.passed());
        let err = outcome.into_result().unwrap_err();
        assert!(matches!(
            err,
            ProbeError::Mismatch {
                expected: 6,
                actual: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_resolve_library_path_with_extension() {
        let path = resolve_library_path("does-not-exist.so", None);
        assert_eq!(path, PathBuf::from("does-not-exist.so"));
    }

    #[test]
    fn test_resolve_library_path_bare_name_falls_back_to_platform_name() {
        let path = resolve_library_path("no_such_fixture", None);
        let file = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file.contains("no_such_fixture"));
        assert!(path.extension().is_some());
    }

    #[test]
    fn test_resolve_library_path_finds_file_in_search_dir() {
        let dir = std::env::temp_dir().join(format!("funcall-resolve-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = if cfg!(target_os = "windows") {
            "fixture_in_dir.dll"
        } else if cfg!(target_os = "macos") {
            "libfixture_in_dir.dylib"
        } else {
            "libfixture_in_dir.so"
        };
        std::fs::write(dir.join(file), b"").unwrap();

        let path = resolve_library_path("fixture_in_dir", Some(&dir));
        assert_eq!(path, dir.join(file));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_library_without_fixture_symbols_reports_missing_symbol() {
        let system_lib = if cfg!(target_os = "windows") {
            "msvcrt.dll"
        } else if cfg!(target_os = "macos") {
            "/usr/lib/libSystem.B.dylib"
        } else {
            "libc.so.6"
        };
        let lib = FixtureLibrary::open(system_lib, None).unwrap();
        let err = lib.call(0, &[]).unwrap_err();
        match err {
            ProbeError::MissingSymbol { symbol, .. } => assert_eq!(symbol, "func0"),
            other => panic!("expected MissingSymbol, got {:?}", other),
        }
    }

    #[test]
    fn test_open_missing_library_fails() {
        let result = FixtureLibrary::open("/nonexistent/dir/libno_such_fixture.so", None);
        assert!(matches!(result, Err(ProbeError::LibraryLoad { .. })));
    }
}
