//! Domain layer types and invariants.

pub mod contact;
pub mod entities;
pub mod error;
pub mod events;
pub mod inbox;
pub mod search;
pub mod seo;
pub mod storage;
pub mod types;
