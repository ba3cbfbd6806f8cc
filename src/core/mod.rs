// src/core/mod.rs
pub mod dom;
pub mod sanitize;
