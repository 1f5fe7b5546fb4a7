//! Application services layer.

pub mod access;
pub mod admin;
pub mod error;
pub mod pagination;
pub mod public_site;
pub mod repos;
pub mod sitemap;
