// ShopGuide - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library plus serialisation crates.
// Must NOT depend on: ui, platform, app, or any filesystem access.

pub mod document;
pub mod grid;
pub mod interaction;
pub mod model;
pub mod presets;
pub mod report;
pub mod stats;
pub mod tools;
