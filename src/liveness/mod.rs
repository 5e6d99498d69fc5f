//! Worker Liveness Module
//!
//! Tracks the last heartbeat per worker and drives the periodic sweep that
//! reclaims tasks from workers presumed dead.
//!
//! Loss of a worker is not an error surfaced to any caller: the sweep is an
//! autonomous transition of the worker's tasks to `lost`, discoverable only
//! through subsequent status queries.
//!
//! ## Submodules
//! - **`monitor`**: The heartbeat table and the background sweep loop.

pub mod monitor;

#[cfg(test)]
mod tests;
