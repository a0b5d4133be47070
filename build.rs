//! Selects semaphore backend for the target.
//!
//! Emits exactly one of `platsem_stub`, `platsem_dispatch` or `platsem_posix`,
//! or nothing when target has no backend.

use std::env;

fn target_cfg(name: &str) -> String {
    env::var(name).unwrap_or_default()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-check-cfg=cfg(platsem_stub)");
    println!("cargo:rustc-check-cfg=cfg(platsem_dispatch)");
    println!("cargo:rustc-check-cfg=cfg(platsem_posix)");

    let os = target_cfg("CARGO_CFG_TARGET_OS");
    let arch = target_cfg("CARGO_CFG_TARGET_ARCH");
    let target_env = target_cfg("CARGO_CFG_TARGET_ENV");
    let is_unix = target_cfg("CARGO_CFG_TARGET_FAMILY").split(',').any(|family| family == "unix");

    //Mobile and managed runtimes, plus toolchain whose host signals elsewhere
    let is_stub = env::var_os("CARGO_FEATURE_STUB").is_some()
        || os == "android"
        || os == "ios"
        || arch == "wasm32"
        || target_env == "msvc";

    let backend = if is_stub {
        Some("platsem_stub")
    } else if os == "macos" {
        Some("platsem_dispatch")
    } else if is_unix || os == "fuchsia" {
        Some("platsem_posix")
    } else {
        None
    };

    if let Some(backend) = backend {
        println!("cargo:rustc-cfg={}", backend);
    }
}
