//! Declarative runtime patching for Facepunch.Steamworks games
//!
//! Loaded into every game instance splitux launches. Reads the per-instance
//! `splitux.cfg`, then intercepts Steam and Photon calls so each instance
//! presents its own identity and skips the checks that would stop a second
//! copy of the game on one account.
//!
//! ## Module Structure
//! - `host`: Object model and interception seam, plus an in-memory host
//! - `config`: splitux.cfg parsing and identity derivation
//! - `patcher`: Patch specs, target resolution, apply orchestration
//! - `actions`: Library of reusable hook actions
//! - `presets`: Built-in patch sets behind the `[Facepunch]` switches
//! - `plugin`: Load/unload lifecycle

pub mod actions;
pub mod config;
pub mod host;
pub mod patcher;
pub mod plugin;
pub mod presets;

pub use plugin::Plugin;
