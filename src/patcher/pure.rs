//! Pure functions for the runtime patcher
//!
//! Spec building and target resolution only read; nothing here mutates the
//! host or installs hooks.

mod member_dump;
mod resolve;
mod spec_model;

pub use member_dump::describe_type_members;
pub use resolve::Resolver;
pub use spec_model::build_patch_specs;
