//! Atomic side effects for the runtime patcher

mod install;

pub use install::install_binding;
