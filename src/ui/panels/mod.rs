// ShopGuide - ui/panels/mod.rs

pub mod about;
pub mod canvas;
pub mod cloud;
pub mod export_dialog;
pub mod import_summary;
pub mod palette;
pub mod saved_layouts;
pub mod stats;
