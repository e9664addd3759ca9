// ShopGuide - lib.rs
//
// Library entry point, exposing every layer for integration testing.
//
// The eframe::App implementation (`gui`) lives in `main.rs` and is not part of the
// library surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
