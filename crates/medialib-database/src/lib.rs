//! # medialib-database
//!
//! Metadata repository contracts for the media library, with PostgreSQL
//! and in-memory implementations, connection management, migrations, and
//! the broadcast change feed that drives live subscriptions.

pub mod backend;
pub mod connection;
pub mod feed;
pub mod migration;
pub mod repositories;

pub use backend::Repositories;
pub use connection::DatabasePool;
pub use feed::ChangeFeed;
