// src/filter/mod.rs
pub mod engine;
pub mod page;
pub mod watch;
