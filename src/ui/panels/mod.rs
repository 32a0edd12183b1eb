// livetail - ui/panels/mod.rs

pub mod log_view;
pub mod search;
