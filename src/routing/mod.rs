//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (route lookup, configuration order)
//!     → matcher.rs (segment-aware prefix match)
//!     → Return: matched Route or None
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → Parse upstream into scheme + authority
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same path always matches same route
//! - First match wins

pub mod matcher;
pub mod router;

pub use router::{Route, Router};
