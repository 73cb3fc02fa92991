//! Outbound integrations and background schedulers.
//!
//! - [`gateway`]: the `WhatsAppGateway` seam the reminder pass sends through
//! - [`twilio`]: the production gateway (Twilio Messages API)
//! - [`reminder`]: the idempotent aligner-change reminder tick
//! - [`todoist`]: Todoist task client for appointment mirroring
//! - [`sync`]: the Todoist pull-sync scheduler

pub mod gateway;
pub mod reminder;
pub mod sync;
pub mod todoist;
pub mod twilio;

pub use gateway::{GatewayError, SentMessage, WhatsAppGateway};
pub use reminder::{ReminderService, ReminderTickSummary};
pub use sync::TodoistSyncScheduler;
pub use todoist::{TodoistClient, TodoistConfig};
pub use twilio::{TwilioConfig, TwilioGateway};
