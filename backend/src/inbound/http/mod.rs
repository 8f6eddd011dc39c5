//! HTTP inbound adapter exposing the recipe REST endpoints.

pub mod error;
pub mod health;
pub mod recipes;
pub mod schemas;
pub mod state;

pub use error::ApiResult;
