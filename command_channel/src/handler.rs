//! Handler capability

use std::sync::Arc;

use crate::packet::{CommandPacket, CommandResponse};

/// Serves one command packet
///
/// Implementations are shared across threads by the channel that drives them.
pub trait CommandHandler: Send + Sync {
    fn handle(&self, packet: &CommandPacket) -> CommandResponse;
}

impl<H: CommandHandler + ?Sized> CommandHandler for Box<H> {
    fn handle(&self, packet: &CommandPacket) -> CommandResponse {
        (**self).handle(packet)
    }
}

impl<H: CommandHandler + ?Sized> CommandHandler for Arc<H> {
    fn handle(&self, packet: &CommandPacket) -> CommandResponse {
        (**self).handle(packet)
    }
}

impl<H: CommandHandler + ?Sized> CommandHandler for &H {
    fn handle(&self, packet: &CommandPacket) -> CommandResponse {
        (**self).handle(packet)
    }
}

/// Closure adapter returned by [`handler_fn`]
#[derive(Clone, Copy)]
pub struct FnHandler<F> {
    f: F,
}

impl<F> std::fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHandler").finish_non_exhaustive()
    }
}

impl<F> CommandHandler for FnHandler<F>
where
    F: Fn(&CommandPacket) -> CommandResponse + Send + Sync,
{
    fn handle(&self, packet: &CommandPacket) -> CommandResponse {
        (self.f)(packet)
    }
}

/// Use a closure as a [`CommandHandler`]
pub fn handler_fn<F>(f: F) -> FnHandler<F>
where
    F: Fn(&CommandPacket) -> CommandResponse + Send + Sync,
{
    FnHandler { f }
}
