//! Per-stream splitting and recombination state machines.

/// Splitter and combiner settings.
pub mod config;
/// Left/right recombination.
pub mod combiner;
/// Left/right extraction.
pub mod splitter;
