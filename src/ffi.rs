//!C entry points for the host runtime.
//!
//!Handle is an opaque pointer owned by whoever called `platsem_create`.
//!
//!Null handle is accepted by every function and makes it no-op, regardless of backend.
//!With stub backend handle is always null, with native backends it is null only when creation failed.

use core::mem::ManuallyDrop;
use core::ffi::c_void;
use core::ptr;

use crate::{unlikely, Sem, Semaphore};

#[inline(always)]
unsafe fn borrow(sem: *mut c_void) -> Option<ManuallyDrop<Sem>> {
    if sem.is_null() {
        return None;
    }

    Some(ManuallyDrop::new(Sem::from_raw(sem)))
}

///Creates new semaphore with count of zero.
///
///# Returns
///
///* Null with stub backend
///* Null if semaphore cannot be created
///* Owned handle otherwise, which must be released with `platsem_free`
#[no_mangle]
pub extern "C" fn platsem_create() -> *mut c_void {
    match Sem::new() {
        Ok(sem) => sem.into_raw(),
        Err(error) => {
            tracing::error!("Failed to create semaphore: {}", error);
            unlikely(ptr::null_mut())
        }
    }
}

///Decrements semaphore's counter, blocking until `platsem_post` if it is zero.
///
///Interruption by signal is retried, so it returns only once permit is acquired.
///
///Returns immediately if `sem` is null.
///
///# Safety
///
///`sem` must be null or returned by `platsem_create` and not yet freed.
#[no_mangle]
pub unsafe extern "C" fn platsem_wait(sem: *mut c_void) {
    if let Some(sem) = borrow(sem) {
        sem.wait()
    }
}

///Increments semaphore's counter, waking at most one waiting thread.
///
///Does nothing if `sem` is null.
///
///# Safety
///
///`sem` must be null or returned by `platsem_create` and not yet freed.
#[no_mangle]
pub unsafe extern "C" fn platsem_post(sem: *mut c_void) {
    if let Some(sem) = borrow(sem) {
        sem.post()
    }
}

///Destroys semaphore.
///
///Does nothing if `sem` is null.
///
///# Safety
///
///`sem` must be null or returned by `platsem_create`.
///Freeing it twice, or while another thread is still inside `platsem_wait` or `platsem_post`,
///is undefined behaviour.
#[no_mangle]
pub unsafe extern "C" fn platsem_free(sem: *mut c_void) {
    if sem.is_null() {
        return;
    }

    drop(Sem::from_raw(sem))
}
