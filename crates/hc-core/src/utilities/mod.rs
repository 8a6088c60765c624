//! Miscellaneous helpers shared by the other crates.

pub mod data_parsers;
