// src/editor/mod.rs
pub mod buffer;

pub use buffer::InputBuffer;
