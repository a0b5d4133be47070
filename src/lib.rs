//!Signal semaphore for host runtimes
//!
//!Every semaphore starts with count of zero, so the first `wait` blocks until someone calls `post`.
//!Exactly one backend is selected at build time and exported as [Sem](struct.Sem.html).
//!
//!## Platform implementation
//!
//!#### Stub
//!
//!Used on `android`, `ios`, `wasm32`, `msvc` targets or when `stub` feature is enabled.
//!
//!All operations are no-op and raw handle is always null.
//!Callers must not rely on `wait` to actually block on these targets.
//!
//!#### POSIX
//!
//!All POSIX-compliant systems uses `sem_init` on heap allocated `sem_t`
//!But it must be noted that awaiting can be interrupted by the signal, in which case
//!implementation retries until permit is actually acquired.
//!
//!POSIX implementation relies on [libc](https://github.com/rust-lang/libc)
//!
//!This includes all `unix` targets and `fuchsia`
//!
//!#### Mac
//!
//!Uses `dispatch_semaphore_create`.
//!
//!## Ordering
//!
//!`post` releases at most one blocked waiter, chosen by OS scheduler.
//!No fairness is guaranteed.
//!
//!## Features
//!
//!- `stub` - Forces stub backend on any target.
//!- `ffi` - Exports `platsem_create`, `platsem_wait`, `platsem_post` and `platsem_free` C functions.

#![no_std]
#![warn(missing_docs)]

#[cfg(platsem_posix)]
extern crate alloc;

#[cfg(not(any(platsem_stub, platsem_dispatch, platsem_posix)))]
compile_error!("Semaphore is not available for your target");

pub use error_code::PosixError;

#[cfg(platsem_stub)]
mod stub;
#[cfg(platsem_stub)]
pub use stub::Sem;

#[cfg(platsem_dispatch)]
mod dispatch;
#[cfg(platsem_dispatch)]
pub use dispatch::Sem;

#[cfg(platsem_posix)]
mod posix;
#[cfg(platsem_posix)]
pub use posix::Sem;

#[cfg(feature = "ffi")]
pub mod ffi;

#[allow(unused)]
#[cold]
#[inline(never)]
pub(crate) fn unlikely<T>(result: T) -> T {
    result
}

///Semaphore interface shared by all backends.
///
///Deinitialization happens on `Drop`, which must not race with any in-flight `wait` or `post`.
pub trait Semaphore: Sized + Send + Sync {
    ///Creates new instance with count of zero.
    fn new() -> Result<Self, PosixError>;

    ///Decrements self, returning immediately if it was signaled.
    ///
    ///Otherwise awaits for signal.
    fn wait(&self);

    ///Increments self, waking at most one awaiting thread as result.
    fn post(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
///Backend implementation selected at build time.
pub enum Backend {
    ///No-op implementation
    Stub,
    ///Apple's `dispatch_semaphore_t`
    Dispatch,
    ///POSIX `sem_t`
    Posix,
}

impl Backend {
    #[inline]
    ///Returns short name of the backend
    pub const fn name(self) -> &'static str {
        match self {
            Backend::Stub => "stub",
            Backend::Dispatch => "dispatch",
            Backend::Posix => "posix",
        }
    }

    #[inline]
    ///Returns whether `wait` actually blocks with this backend.
    pub const fn is_blocking(self) -> bool {
        match self {
            Backend::Stub => false,
            Backend::Dispatch | Backend::Posix => true,
        }
    }
}

impl core::fmt::Display for Backend {
    #[inline(always)]
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fmt.write_str(self.name())
    }
}

///Backend used by [Sem](struct.Sem.html)
pub const BACKEND: Backend = Sem::BACKEND;

#[cfg(test)]
mod tests {
    use super::{Backend, BACKEND};

    #[test]
    fn should_name_backends() {
        assert_eq!(Backend::Stub.name(), "stub");
        assert_eq!(Backend::Dispatch.name(), "dispatch");
        assert_eq!(Backend::Posix.name(), "posix");
    }

    #[test]
    fn should_select_backend_for_target() {
        let is_stub = cfg!(feature = "stub") || cfg!(target_os = "android") || cfg!(target_os = "ios") || cfg!(target_arch = "wasm32") || cfg!(target_env = "msvc");

        if is_stub {
            assert_eq!(BACKEND, Backend::Stub);
            assert!(!BACKEND.is_blocking());
        } else if cfg!(target_os = "macos") {
            assert_eq!(BACKEND, Backend::Dispatch);
            assert!(BACKEND.is_blocking());
        } else {
            assert_eq!(BACKEND, Backend::Posix);
            assert!(BACKEND.is_blocking());
        }

        let selected = [cfg!(platsem_stub), cfg!(platsem_dispatch), cfg!(platsem_posix)];
        assert_eq!(selected.iter().filter(|selected| **selected).count(), 1);
    }
}
