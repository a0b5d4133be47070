#![cfg(platsem_stub)]

use platsem::{Backend, Sem, Semaphore};

#[test]
fn should_degrade_to_no_op() {
    assert_eq!(platsem::BACKEND, Backend::Stub);
    assert!(!platsem::BACKEND.is_blocking());

    let sem = Sem::new().unwrap();
    //Nothing posted, yet it must not block
    sem.wait();
    sem.post();
    sem.post();
    sem.wait();
    sem.wait();
    sem.wait();
}

#[test]
fn should_use_null_handle() {
    let raw = Sem::new().unwrap().into_raw();
    assert!(raw.is_null());

    let sem = unsafe {
        Sem::from_raw(raw)
    };
    sem.wait();
    sem.post();
}
