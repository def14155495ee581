// src/config/mod.rs
pub mod consts;
pub mod options;
pub mod provider;

pub use provider::Config;
