//! Thin platform shims. Everything above this module is platform neutral.

#[cfg(unix)]
pub(crate) mod unix;
#[cfg(unix)]
pub(crate) use unix::{is_executable, is_writable, kernel_name, set_mode};

#[cfg(windows)]
pub(crate) mod windows;
#[cfg(windows)]
pub(crate) use windows::{is_executable, is_writable, kernel_name, set_mode};
