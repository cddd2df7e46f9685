//! Progress reporting for dua generation

pub mod reporter;
