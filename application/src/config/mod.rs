//! Application-level configuration.
//!
//! - [`SessionParams`]: session lifetime control (idle timeout, sweep interval, cap)
//!
//! Engine thresholds live in the domain as [`ScoringPolicy`](medassist_domain::ScoringPolicy).

pub mod session_params;

pub use session_params::SessionParams;
