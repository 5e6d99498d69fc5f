//! HQ Dispatch Server Library
//!
//! This library crate defines the core modules of the headquarters ("HQ")
//! dispatch server: a central point that accepts work items from producers,
//! hands them out to remote workers on request, tracks each task's lifecycle,
//! and reclaims work from workers that stop sending heartbeats.
//!
//! ## Architecture Modules
//! The system is composed of four subsystems:
//!
//! - **`dispatch`**: The task lifecycle core. Owns task identity, the queued
//!   pool, per-task status, worker assignments, and the facade that ties them
//!   together under a single lock.
//! - **`heavy`**: The heavy-payload store. A flat key -> blob map for large
//!   out-of-band payloads referenced by tasks and resolved at delivery time.
//! - **`liveness`**: Worker heartbeat tracking and the periodic sweep that
//!   marks tasks of silent workers as `lost`.
//! - **`config`**: Service configuration (bind address, heartbeat timeout).

pub mod config;
pub mod dispatch;
pub mod heavy;
pub mod liveness;
