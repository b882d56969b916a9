// flux-common/src/lib.rs
// Value objects shared by the flux engine and its upstream adapters

pub mod dto;
pub mod entity;

pub use dto::*;
pub use entity::Entity;
