// livetail - app/mod.rs
//
// Application layer: stream orchestration and state management.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod state;
pub mod stream;
