// src/scrape/mod.rs
pub mod board;
pub mod convo;
