#![allow(non_camel_case_types)]
#![allow(non_upper_case_globals)]
#![allow(unknown_lints)]
#![allow(clippy::uninlined_format_args)]

pub const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod common;

pub mod flog;
pub mod getopt;
pub mod print_help;

#[cfg(test)]
mod tests;
