//! Terminal-facing pieces of the binary: logging setup and printing.
//! Nothing here is part of the library API.

pub mod logging;
pub mod print;
