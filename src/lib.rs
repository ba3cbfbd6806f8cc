// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod core;
pub mod log;
pub mod params;

pub mod filter;
pub mod report;
pub mod runner;
pub mod scrape;
