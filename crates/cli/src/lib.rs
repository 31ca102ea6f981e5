//! Interactive command surface for the stockroom catalog.
//!
//! The interpreter is plain synchronous code over generic reader/writer
//! endpoints, so whole sessions can be scripted in tests.

pub mod interpreter;

pub use interpreter::Session;
