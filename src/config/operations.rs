//! Config operations - atomic side effects

mod io;

pub use io::{config_path, load_config};
