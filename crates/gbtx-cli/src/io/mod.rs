// crates/gbtx-cli/src/io/mod.rs

pub mod csv;
pub mod dump;
pub mod layout_file;
pub mod output;
pub mod pattern_file;
