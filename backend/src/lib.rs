//! Recipes backend library modules.
//!
//! Hexagonal layout: `domain` holds the recipe aggregate, the service and its
//! ports; `inbound` adapts HTTP onto the driving ports; `outbound` implements
//! the driven ports over PostgreSQL, Redis, or memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod seeding;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
