use core::mem;
use core::ptr::NonNull;
use core::ffi::c_void;

use alloc::alloc::{alloc_zeroed, dealloc, Layout};
use error_code::PosixError;

use crate::{unlikely, Backend, Semaphore};

const LAYOUT: Layout = Layout::new::<libc::sem_t>();

#[inline(always)]
///Returns whether `sem_wait` failed due to signal and should be retried.
fn is_interrupted(errno: libc::c_int) -> bool {
    errno == libc::EINTR
}

///POSIX implementation of Semaphore
///
///`sem_t` must not be moved after `sem_init`, so it is kept in its own zeroed allocation.
pub struct Sem {
    handle: NonNull<libc::sem_t>,
}

impl Sem {
    ///Backend of this implementation
    pub const BACKEND: Backend = Backend::Posix;

    ///Releases ownership, returning pointer to underlying `sem_t`.
    ///
    ///It must be passed to `from_raw` exactly once in order to free semaphore.
    pub fn into_raw(self) -> *mut c_void {
        let handle = self.handle.as_ptr();
        mem::forget(self);
        handle as _
    }

    ///Restores ownership over pointer returned by `into_raw`.
    ///
    ///# Safety
    ///
    ///`handle` must come from `into_raw` and ownership must not be restored twice.
    pub unsafe fn from_raw(handle: *mut c_void) -> Self {
        debug_assert!(!handle.is_null(), "null semaphore handle");
        Self {
            handle: NonNull::new_unchecked(handle as *mut libc::sem_t),
        }
    }
}

impl Semaphore for Sem {
    fn new() -> Result<Self, PosixError> {
        let handle = unsafe {
            alloc_zeroed(LAYOUT) as *mut libc::sem_t
        };

        let handle = match NonNull::new(handle) {
            Some(handle) => handle,
            None => return unlikely(Err(PosixError::new(libc::ENOMEM))),
        };

        let res = unsafe {
            libc::sem_init(handle.as_ptr(), 0, 0)
        };

        if res == -1 {
            let error = PosixError::last();
            unsafe {
                dealloc(handle.as_ptr() as *mut u8, LAYOUT);
            }
            return unlikely(Err(error));
        }

        tracing::trace!("sem_init({:p})", handle);
        Ok(Self {
            handle
        })
    }

    fn wait(&self) {
        loop {
            let res = unsafe {
                libc::sem_wait(self.handle.as_ptr())
            };

            if res == -1 {
                let errno = PosixError::last();
                if is_interrupted(errno.raw_code()) {
                    tracing::trace!("sem_wait({:p}) interrupted: {}", self.handle, errno);
                    continue;
                }

                panic!("sem_wait() failed: {}", errno);
            }

            break
        }
    }

    fn post(&self) {
        let res = unsafe {
            libc::sem_post(self.handle.as_ptr())
        };
        debug_assert_eq!(res, 0, "sem_post() failed");
    }
}

impl Drop for Sem {
    fn drop(&mut self) {
        let handle = self.handle.as_ptr();
        unsafe {
            let res = libc::sem_destroy(handle);
            debug_assert_eq!(res, 0, "sem_destroy() failed");
            dealloc(handle as *mut u8, LAYOUT);
        }
        tracing::trace!("sem_destroy({:p})", handle);
    }
}

unsafe impl Send for Sem {}
unsafe impl Sync for Sem {}

#[cfg(test)]
mod tests {
    use super::is_interrupted;

    #[test]
    fn should_retry_only_interruption() {
        assert!(is_interrupted(libc::EINTR));
        assert!(!is_interrupted(libc::EINVAL));
        assert!(!is_interrupted(libc::EAGAIN));
        assert!(!is_interrupted(0));
    }
}
