//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod sprint;

pub use sprint::{
    // Entry points
    ChatDispatcher,
    InboundMessage,
    SprintEngine,
    SprintSettings,
    UnknownCommandPolicy,
    GroupLocks,
    // Commands, handlers and results
    EndSprintCommand, EndSprintHandler, EndSprintResult,
    JoinSprintCommand, JoinSprintHandler, JoinSprintResult,
    LeaveSprintCommand, LeaveSprintHandler, LeaveSprintResult,
    ReportWordsCommand, ReportWordsHandler, ReportWordsResult,
    StartSprintCommand, StartSprintHandler, StartSprintResult,
    SessionAccess,
};
