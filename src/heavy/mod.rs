//! Heavy Payload Module
//!
//! Producers that fan one function out over many arguments submit the large
//! shared blob once, keyed by a producer-chosen string, and reference it from
//! each task. The blob is resolved and attached when a task is delivered to a
//! worker.
//!
//! The store is a flat key -> blob map with last-write-wins semantics and no
//! eviction. It lives inside the dispatch service's single lock alongside the
//! task registry.

pub mod store;

#[cfg(test)]
mod tests;
