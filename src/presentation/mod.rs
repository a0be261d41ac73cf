pub mod cli;
pub mod config;

pub use cli::{Cli, Command, FinalizeArgs, ResynthesizeArgs, RunArgs};
pub use config::Settings;
