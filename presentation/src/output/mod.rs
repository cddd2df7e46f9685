//! Output formatting for generated duas

pub mod console;
