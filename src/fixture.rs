/// The fixture proper: `func0` .. `func6`, exported with C linkage.
///
/// Every function writes one diagnostic line to stdout and returns the sum
/// of its arguments plus one. Addition wraps on overflow.

use crate::entry::{Entry, MAX_ARITY};
use crate::error::{ProbeError, Result};
use std::ffi::c_int;
use std::io::{self, Write};

/// Formats the diagnostic line for a call, without the trailing newline.
pub fn call_line(name: &str, args: &[c_int]) -> String {
    if args.is_empty() {
        return format!("{} called", name);
    }
    format!("{}({}) called", name, arg_list(args))
}

/// Comma-separated arguments, as they appear between the parentheses.
pub fn arg_list(args: &[c_int]) -> String {
    let list: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    list.join(", ")
}

/// Writes the diagnostic line in a single write, so lines from concurrent
/// callers sharing a locked stream never interleave.
pub fn write_call_line<W: Write>(out: &mut W, name: &str, args: &[c_int]) -> io::Result<()> {
    let mut line = call_line(name, args);
    line.push('\n');
    out.write_all(line.as_bytes())?;
    out.flush()
}

pub fn sum_plus_one(args: &[c_int]) -> c_int {
    args.iter().fold(1, |acc: c_int, &a| acc.wrapping_add(a))
}

pub fn function_name(arity: usize) -> Result<String> {
    if arity > MAX_ARITY {
        return Err(ProbeError::UnsupportedArity(arity));
    }
    Ok(format!("func{}", arity))
}

/// The statically linked entry point for `func<arity>`.
pub fn entry(arity: usize) -> Result<Entry> {
    let entry = match arity {
        0 => Entry::Arity0(func0),
        1 => Entry::Arity1(func1),
        2 => Entry::Arity2(func2),
        3 => Entry::Arity3(func3),
        4 => Entry::Arity4(func4),
        5 => Entry::Arity5(func5),
        6 => Entry::Arity6(func6),
        n => return Err(ProbeError::UnsupportedArity(n)),
    };
    Ok(entry)
}

// Never panics: an unwind out of an extern "C" fn aborts the caller.
fn report(name: &str, args: &[c_int]) -> c_int {
    tracing::trace!(function = name, ?args, "fixture called");
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = write_call_line(&mut out, name, args) {
        tracing::warn!(function = name, error = %e, "could not write diagnostic line");
    }
    sum_plus_one(args)
}

macro_rules! fixture_functions {
    ($($name:ident($($arg:ident),*);)*) => {
        $(
            #[unsafe(no_mangle)]
            pub extern "C" fn $name($($arg: c_int),*) -> c_int {
                report(stringify!($name), &[$($arg),*])
            }
        )*
    };
}

fixture_functions! {
    func0();
    func1(a);
    func2(a, b);
    func3(a, b, c);
    func4(a, b, c, d);
    func5(a, b, c, d, e);
    func6(a, b, c, d, e, f);
}
