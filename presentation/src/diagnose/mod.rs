//! Interactive terminal diagnosis

mod repl;

pub use repl::{DiagnosisRepl, parse_shorthand};
