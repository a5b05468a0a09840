/// Typed C function pointers for the fixture entry points, one per arity.

use crate::error::{ProbeError, Result};
use std::ffi::c_int;

pub const MAX_ARITY: usize = 6;

pub type Fn0 = unsafe extern "C" fn() -> c_int;
pub type Fn1 = unsafe extern "C" fn(c_int) -> c_int;
pub type Fn2 = unsafe extern "C" fn(c_int, c_int) -> c_int;
pub type Fn3 = unsafe extern "C" fn(c_int, c_int, c_int) -> c_int;
pub type Fn4 = unsafe extern "C" fn(c_int, c_int, c_int, c_int) -> c_int;
pub type Fn5 = unsafe extern "C" fn(c_int, c_int, c_int, c_int, c_int) -> c_int;
pub type Fn6 = unsafe extern "C" fn(c_int, c_int, c_int, c_int, c_int, c_int) -> c_int;

#[derive(Debug, Clone, Copy)]
pub enum Entry {
    Arity0(Fn0),
    Arity1(Fn1),
    Arity2(Fn2),
    Arity3(Fn3),
    Arity4(Fn4),
    Arity5(Fn5),
    Arity6(Fn6),
}

impl Entry {
    pub fn arity(&self) -> usize {
        match self {
            Entry::Arity0(_) => 0,
            Entry::Arity1(_) => 1,
            Entry::Arity2(_) => 2,
            Entry::Arity3(_) => 3,
            Entry::Arity4(_) => 4,
            Entry::Arity5(_) => 5,
            Entry::Arity6(_) => 6,
        }
    }

    /// Calls the pointer with `args` in order.
    ///
    /// # Safety
    ///
    /// The pointer must still be live (its library not unloaded) and the
    /// function behind it must really have the C signature of this variant.
    pub unsafe fn invoke(&self, args: &[c_int]) -> Result<c_int> {
        let result = match (*self, args) {
            (Entry::Arity0(f), []) => unsafe { f() },
            (Entry::Arity1(f), &[a]) => unsafe { f(a) },
            (Entry::Arity2(f), &[a, b]) => unsafe { f(a, b) },
            (Entry::Arity3(f), &[a, b, c]) => unsafe { f(a, b, c) },
            (Entry::Arity4(f), &[a, b, c, d]) => unsafe { f(a, b, c, d) },
            (Entry::Arity5(f), &[a, b, c, d, e]) => unsafe { f(a, b, c, d, e) },
            (Entry::Arity6(f), &[a, b, c, d, e, g]) => unsafe { f(a, b, c, d, e, g) },
            _ => {
                return Err(ProbeError::ArityMismatch {
                    expected: self.arity(),
                    got: args.len(),
                });
            }
        };
        Ok(result)
    }
}
