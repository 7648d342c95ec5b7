//! Diagnosis subdomain: answers, sessions, scoring engine and finalizer.

pub mod answer;
pub mod engine;
pub mod finalizer;
pub mod policy;
pub mod question;
pub mod result;
pub mod session;
