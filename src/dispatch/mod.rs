//! Task Dispatch Module
//!
//! The task lifecycle core of the HQ server. Producers submit tasks, workers
//! pull batches and report outcomes, and the liveness sweep reclaims tasks
//! from workers that went silent.
//!
//! ## Architecture Overview
//! The dispatcher follows a **pull-based** model:
//! 1. **Submission**: Producers post batches of tasks. Each task gets a
//!    sequential, never-reused id and enters the queued pool.
//! 2. **Delivery**: Workers fetch up to `n` tasks. Each delivered task moves
//!    from the pool into exactly one worker's assignment set and becomes
//!    `running`. Heavy payload references are resolved at this point.
//! 3. **Completion**: Workers report `success`, `error`, or `lost` for a
//!    running task, which releases the assignment and makes the status
//!    terminal. Terminal statuses never transition again.
//!
//! ## Submodules
//! - **`registry`**: Task identity, the queued pool, and the status state
//!   machine.
//! - **`ledger`**: Which worker currently holds which tasks.
//! - **`service`**: The facade combining registry, ledger, heavy store, and
//!   heartbeat table under a single lock.
//! - **`protocol`**: HTTP API contracts (request/response DTOs).
//! - **`handlers`**: axum handlers translating HTTP to facade calls.

pub mod handlers;
pub mod ledger;
pub mod protocol;
pub mod registry;
pub mod service;
pub mod types;
