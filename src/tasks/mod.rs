//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Auto-close: Moves auctions whose window has elapsed to Completed

mod auto_close;

pub use auto_close::{spawn_auto_close_task, AutoCloseHandle, AutoCloseTrigger, SchedulerState};
