//! Gateway CORS normalization.
//!
//! # Data Flow
//! ```text
//! Client request (Origin: http://localhost:3000)
//!     → middleware.rs (capture RequestContext, answer preflights)
//!     → chain.rs request phase
//!         → stripper.rs (drop Origin from forwarded request)
//!     → [forwarding / fallback]
//!     → chain.rs response phase
//!         → stripper.rs (drop backend CORS headers)
//!         → injector.rs (write gateway CORS set from policy.rs)
//!     → Client response
//! ```
//!
//! # Design Decisions
//! - Only the gateway decides the client-visible CORS grant
//! - The original Origin travels in request-scoped state, not in headers
//! - The CORS header set is present in full or not at all

pub mod allow_list;
pub mod chain;
pub mod context;
pub mod headers;
pub mod injector;
pub mod middleware;
pub mod policy;
pub mod stripper;

pub use allow_list::AllowList;
pub use chain::{FilterChain, GatewayFilter};
pub use context::RequestContext;
pub use injector::GatewayCorsInjector;
pub use middleware::{cors_filter_middleware, CorsFilterState};
pub use policy::{CorsPolicy, OriginDecision};
pub use stripper::DownstreamCorsStripper;
