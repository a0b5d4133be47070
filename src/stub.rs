use core::ptr;
use core::ffi::c_void;

use error_code::PosixError;

use crate::{Backend, Semaphore};

///No-op Semaphore
///
///Neither allocates nor blocks, raw handle is always null.
pub struct Sem {
    _priv: (),
}

impl Sem {
    ///Backend of this implementation
    pub const BACKEND: Backend = Backend::Stub;

    #[inline(always)]
    ///Returns null.
    pub fn into_raw(self) -> *mut c_void {
        ptr::null_mut()
    }

    #[inline(always)]
    ///Creates instance out of any handle, including null.
    ///
    ///# Safety
    ///
    ///Always safe, but kept `unsafe` to match other backends.
    pub unsafe fn from_raw(_: *mut c_void) -> Self {
        Self {
            _priv: ()
        }
    }
}

impl Semaphore for Sem {
    #[inline]
    fn new() -> Result<Self, PosixError> {
        tracing::debug!("semaphore is not supported on this target, using no-op stub");
        Ok(Self {
            _priv: ()
        })
    }

    #[inline(always)]
    fn wait(&self) {
    }

    #[inline(always)]
    fn post(&self) {
    }
}
