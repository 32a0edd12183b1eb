// livetail - core/mod.rs
//
// Core business logic layer: data model and search.
// Must NOT depend on: ui, platform, app, or any I/O crate directly.

pub mod filter;
pub mod model;
