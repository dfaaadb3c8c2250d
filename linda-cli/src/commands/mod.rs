//! CLI command implementations.

pub mod run;
pub mod sieve;

pub use run::run_script;
pub use sieve::run_sieve;
