// livetail - platform/mod.rs
//
// Platform layer: config directory resolution and config.toml loading.

pub mod config;
