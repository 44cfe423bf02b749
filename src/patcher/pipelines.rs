//! High-level orchestration for the runtime patcher

mod apply;

pub use apply::Patcher;
