mod cfg;
mod cli;
mod config_file;

pub use cfg::*;
pub use cli::*;
pub use config_file::*;
