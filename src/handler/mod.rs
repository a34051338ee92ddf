//! Handler module - handler traits, constructors and the registry.
//!
//! Provides:
//! - [`RequestHandler`] / [`ErrorHandler`] - the records a first-match runtime iterates
//! - [`HandlerInput`] - the per-request context handed to every callback
//! - [`HandlerRegistry`] - default, custom-intent and error handler slots
//!
//! # Example
//!
//! ```ignore
//! use skill_kit::handler::{create_custom_intent_handler, CustomIntentOptions};
//!
//! let handler = create_custom_intent_handler(
//!     "BookFlight",
//!     |_input, res| async move { Ok(res.speak("Booked.").get_response()) },
//!     CustomIntentOptions::default(),
//! );
//! ```

mod context;
mod creators;
mod registry;

use std::future::Future;
use std::pin::Pin;

pub use context::HandlerInput;
pub use creators::{
    create_custom_intent_handler, create_empty_request_handler, create_error_handler,
    create_request_handler, BuiltInHandler, CustomIntentHandler, CustomIntentOptions,
    EmptyRequestHandler, NamedErrorHandler, PredicateHandler,
};
pub use registry::{BuiltInKind, DefaultHandlers, HandlerRegistry};

use crate::error::HandlerError;
use crate::response::Response;

/// Result type for handler callbacks.
pub type HandlerResult = std::result::Result<Response, HandlerError>;

/// Boxed future for handler results.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A request handler record: a match predicate plus a response producer.
pub trait RequestHandler: Send + Sync + 'static {
    /// Check whether this handler applies to the request.
    fn can_handle(&self, input: &HandlerInput) -> bool;

    /// Produce the response for a request this handler accepted.
    fn handle(&self, input: HandlerInput) -> BoxFuture<'static, HandlerResult>;
}

/// An error handler record, consulted after a failure during dispatch.
pub trait ErrorHandler: Send + Sync + 'static {
    /// Check whether this handler applies to the error.
    fn can_handle(&self, input: &HandlerInput, error: &HandlerError) -> bool;

    /// Produce the response for an error this handler accepted.
    fn handle(&self, input: HandlerInput, error: HandlerError) -> BoxFuture<'static, HandlerResult>;
}
