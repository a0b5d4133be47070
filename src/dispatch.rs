use core::mem;
use core::ptr::NonNull;
use core::ffi::c_void;

use error_code::PosixError;

use crate::{unlikely, Backend, Semaphore};

const DISPATCH_TIME_FOREVER: u64 = !0;

extern "C" {
    //typedef struct dispatch_semaphore_s *dispatch_semaphore_t;
    //typedef uint64_t dispatch_time_t;
    fn dispatch_semaphore_create(value: libc::c_long) -> *mut c_void;
    fn dispatch_semaphore_wait(semaphore: *mut c_void, timeout: u64) -> libc::c_long;
    fn dispatch_semaphore_signal(semaphore: *mut c_void) -> libc::c_long;
    fn dispatch_release(object: *mut c_void);
}

///MacOS semaphore based on dispatch API
pub struct Sem {
    handle: NonNull<c_void>,
}

impl Sem {
    ///Backend of this implementation
    pub const BACKEND: Backend = Backend::Dispatch;

    ///Releases ownership, returning underlying `dispatch_semaphore_t`.
    ///
    ///It must be passed to `from_raw` exactly once in order to free semaphore.
    pub fn into_raw(self) -> *mut c_void {
        let handle = self.handle.as_ptr();
        mem::forget(self);
        handle
    }

    ///Restores ownership over pointer returned by `into_raw`.
    ///
    ///# Safety
    ///
    ///`handle` must come from `into_raw` and ownership must not be restored twice.
    pub unsafe fn from_raw(handle: *mut c_void) -> Self {
        debug_assert!(!handle.is_null(), "null semaphore handle");
        Self {
            handle: NonNull::new_unchecked(handle),
        }
    }
}

impl Semaphore for Sem {
    fn new() -> Result<Self, PosixError> {
        let handle = unsafe {
            dispatch_semaphore_create(0)
        };

        match NonNull::new(handle) {
            Some(handle) => {
                tracing::trace!("dispatch_semaphore_create({:p})", handle);
                Ok(Self {
                    handle
                })
            },
            None => unlikely(Err(PosixError::new(libc::ENOMEM))),
        }
    }

    fn wait(&self) {
        //With DISPATCH_TIME_FOREVER it neither times out nor gets interrupted, so single iteration.
        loop {
            let result = unsafe {
                dispatch_semaphore_wait(self.handle.as_ptr(), DISPATCH_TIME_FOREVER)
            };

            match result {
                0 => break,
                other => panic!("dispatch_semaphore_wait() failed: {}", other),
            }
        }
    }

    fn post(&self) {
        //Returns non-zero when thread is woken, which is not an error
        unsafe {
            dispatch_semaphore_signal(self.handle.as_ptr());
        }
    }
}

impl Drop for Sem {
    fn drop(&mut self) {
        let handle = self.handle.as_ptr();
        unsafe {
            dispatch_release(handle);
        }
        tracing::trace!("dispatch_release({:p})", handle);
    }
}

unsafe impl Send for Sem {}
unsafe impl Sync for Sem {}
