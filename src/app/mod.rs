// ShopGuide - app/mod.rs
//
// Application layer: orchestration, state management, tool loading,
// session and named layout persistence.
// Dependencies: core layer, platform::fs for atomic writes.
// Must NOT depend on: ui.

pub mod session;
pub mod state;
pub mod store;
pub mod tool_mgr;
