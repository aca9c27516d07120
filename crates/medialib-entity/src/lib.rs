//! # medialib-entity
//!
//! Domain entity models for the media library. Every struct in this crate
//! represents a stored document or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and rows read
//! straight from PostgreSQL additionally derive `sqlx::FromRow`.

pub mod article;
pub mod asset;
pub mod credit;
