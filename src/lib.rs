// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;

pub mod collect;
pub mod csv;
pub mod extract;
pub mod file;
pub mod gui;
pub mod host;
pub mod loader;
pub mod progress;
pub mod record;
pub mod store;
