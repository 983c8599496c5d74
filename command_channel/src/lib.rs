//! # Command Channel
//!
//! Envelope types exchanged over a command/response channel and the
//! [`CommandHandler`] capability implemented by whatever serves them.
//! Transport and dispatch belong to the embedding application.

pub mod handler;
pub mod packet;

pub use handler::{handler_fn, CommandHandler, FnHandler};
pub use packet::{CommandPacket, CommandResponse};
