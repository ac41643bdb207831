// crates/gbtx-cli/src/cmd/mod.rs

pub mod args;
pub mod util;

pub mod generate;
pub mod parse;
pub mod shifts;
pub mod verify;
