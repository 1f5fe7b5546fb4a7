//! Public website and website-manager backend for the Nazim school platform.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
