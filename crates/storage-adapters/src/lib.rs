//! # storage-adapters
//!
//! Persistence implementations of the `domains` ports.

pub mod json_file;

pub use json_file::JsonFileEntryRepository;
