#![forbid(unsafe_code)]

pub mod config;
pub mod datamodel;
pub mod diagnostics;
pub mod error;
pub mod exporters;
pub mod importers;
pub mod parsing;
pub mod store;
