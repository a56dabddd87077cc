//! Sprint command handlers.
//!
//! One handler per chat command, each doing get, mutate, put against the
//! session store. `SprintEngine` routes parsed commands to them and
//! `ChatDispatcher` posts the resulting replies.

mod dispatcher;
mod end_sprint;
mod group_locks;
mod inbound;
mod join_sprint;
mod leave_sprint;
mod report_words;
mod session_access;
mod sprint_engine;
mod start_sprint;

pub use dispatcher::ChatDispatcher;
pub use end_sprint::{EndSprintCommand, EndSprintHandler, EndSprintResult};
pub use group_locks::{GroupGuard, GroupLocks};
pub use inbound::InboundMessage;
pub use join_sprint::{JoinSprintCommand, JoinSprintHandler, JoinSprintResult};
pub use leave_sprint::{LeaveSprintCommand, LeaveSprintHandler, LeaveSprintResult};
pub use report_words::{ReportWordsCommand, ReportWordsHandler, ReportWordsResult};
pub use session_access::SessionAccess;
pub use sprint_engine::{SprintEngine, SprintSettings, UnknownCommandPolicy};
pub use start_sprint::{StartSprintCommand, StartSprintHandler, StartSprintResult};
