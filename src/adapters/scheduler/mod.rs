//! In-process expiry scheduling.
//!
//! `TokioExpiryScheduler` is the port handed to the engine; it only queues
//! triggers. `ExpiryWorker` owns the queue, sleeps until each trigger is due
//! and then runs it through the dispatcher.

mod expiry_worker;
mod tokio_expiry_scheduler;

pub use expiry_worker::ExpiryWorker;
pub use tokio_expiry_scheduler::TokioExpiryScheduler;
