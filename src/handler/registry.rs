//! Handler registry.
//!
//! Holds one slot per [`BuiltInKind`], an ordered list of custom intent
//! handlers and an ordered list of error handlers. [`HandlerRegistry::request_handlers`]
//! flattens them into the order a first-match dispatcher expects:
//!
//! ```text
//! Launch, <custom intents in registration order>,
//! Help, Cancel, Stop, CancelAndStop, Fallback, SessionEnded
//! ```

use std::sync::Arc;

use super::{BuiltInHandler, ErrorHandler, HandlerInput, RequestHandler};
use crate::request::{
    is_cancel_and_stop_intent, is_cancel_intent, is_fallback_intent, is_help_intent,
    is_launch_request, is_session_ended_request, is_stop_intent,
};

/// The closed set of built-in request kinds with a dedicated slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltInKind {
    Launch,
    Help,
    Cancel,
    Stop,
    CancelAndStop,
    Fallback,
    SessionEnded,
}

impl BuiltInKind {
    /// All kinds, in declaration order.
    pub const ALL: [BuiltInKind; 7] = [
        BuiltInKind::Launch,
        BuiltInKind::Help,
        BuiltInKind::Cancel,
        BuiltInKind::Stop,
        BuiltInKind::CancelAndStop,
        BuiltInKind::Fallback,
        BuiltInKind::SessionEnded,
    ];

    /// Check whether a request belongs to this kind.
    pub fn matches(self, input: &HandlerInput) -> bool {
        match self {
            BuiltInKind::Launch => is_launch_request(input),
            BuiltInKind::Help => is_help_intent(input),
            BuiltInKind::Cancel => is_cancel_intent(input),
            BuiltInKind::Stop => is_stop_intent(input),
            BuiltInKind::CancelAndStop => is_cancel_and_stop_intent(input),
            BuiltInKind::Fallback => is_fallback_intent(input),
            BuiltInKind::SessionEnded => is_session_ended_request(input),
        }
    }

    /// Slot name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            BuiltInKind::Launch => "launchRequest",
            BuiltInKind::Help => "helpIntent",
            BuiltInKind::Cancel => "cancelIntent",
            BuiltInKind::Stop => "stopIntent",
            BuiltInKind::CancelAndStop => "cancelAndStopIntent",
            BuiltInKind::Fallback => "fallbackIntent",
            BuiltInKind::SessionEnded => "sessionEndedRequest",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// One handler per built-in kind.
pub struct DefaultHandlers {
    slots: [Arc<dyn RequestHandler>; 7],
}

impl DefaultHandlers {
    /// Create slots that all hold placeholders.
    pub fn new() -> Self {
        Self {
            slots: BuiltInKind::ALL
                .map(|kind| Arc::new(BuiltInHandler::placeholder(kind)) as Arc<dyn RequestHandler>),
        }
    }

    /// Replace the handler for `kind`.
    pub fn set(&mut self, kind: BuiltInKind, handler: Arc<dyn RequestHandler>) {
        self.slots[kind.index()] = handler;
    }

    /// Get the handler for `kind`.
    pub fn get(&self, kind: BuiltInKind) -> &Arc<dyn RequestHandler> {
        &self.slots[kind.index()]
    }
}

impl Default for DefaultHandlers {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of default, custom-intent and error handlers.
#[derive(Default)]
pub struct HandlerRegistry {
    /// One slot per built-in kind.
    defaults: DefaultHandlers,
    /// Custom intents in registration order.
    custom: Vec<Arc<dyn RequestHandler>>,
    /// Error handlers in registration order.
    errors: Vec<Arc<dyn ErrorHandler>>,
}

impl HandlerRegistry {
    /// Create a registry with placeholder defaults and no custom handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default handler for a built-in kind.
    pub fn set_default(&mut self, kind: BuiltInKind, handler: Arc<dyn RequestHandler>) {
        tracing::debug!("Registering handler for {}", kind.as_str());
        self.defaults.set(kind, handler);
    }

    /// Append a custom intent handler. Duplicates are kept; the earlier one wins.
    pub fn add_custom(&mut self, handler: Arc<dyn RequestHandler>) {
        self.custom.push(handler);
    }

    /// Append an error handler.
    pub fn add_error(&mut self, handler: Arc<dyn ErrorHandler>) {
        self.errors.push(handler);
    }

    /// Get the default handler for a built-in kind.
    pub fn default_handler(&self, kind: BuiltInKind) -> &Arc<dyn RequestHandler> {
        self.defaults.get(kind)
    }

    /// Flatten into the ordered request handler list.
    pub fn request_handlers(&self) -> Vec<Arc<dyn RequestHandler>> {
        let mut handlers = Vec::with_capacity(BuiltInKind::ALL.len() + self.custom.len());

        handlers.push(self.defaults.get(BuiltInKind::Launch).clone());
        handlers.extend(self.custom.iter().cloned());
        handlers.extend(
            BuiltInKind::ALL
                .iter()
                .filter(|kind| **kind != BuiltInKind::Launch)
                .map(|kind| self.defaults.get(*kind).clone()),
        );

        handlers
    }

    /// Ordered error handler list.
    pub fn error_handlers(&self) -> Vec<Arc<dyn ErrorHandler>> {
        self.errors.clone()
    }
}
