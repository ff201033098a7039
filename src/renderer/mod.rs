//! Scene rendering
//!
//! Emits immediate-mode drawing calls against a host `Canvas`. Rendering only
//! reads simulation state.

pub mod scene;

pub use scene::draw;
