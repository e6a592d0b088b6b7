mod complete;
mod root;

pub use root::Cli;
