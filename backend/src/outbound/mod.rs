//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed recipe store using Diesel ORM
//! - **cache**: Redis-backed list cache plus a no-op fallback
//! - **memory**: in-process store and cache for running without either
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod cache;
pub mod memory;
pub mod persistence;
