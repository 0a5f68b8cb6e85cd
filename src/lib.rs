//! macross: moving-average crossover signal and trade-simulation engine.
//!
//! Hexagonal architecture: the pure pipeline and its types live in [`domain`],
//! collaborator traits in [`ports`], file-backed implementations in
//! [`adapters`], and argument parsing/orchestration in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
