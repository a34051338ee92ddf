//! Handler constructors.
//!
//! Callbacks are plain async closures. They are erased into boxed-future
//! function objects once, at construction time, so the assembled handler
//! list is a homogeneous `Vec<Arc<dyn RequestHandler>>`.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::{BoxFuture, BuiltInKind, ErrorHandler, HandlerInput, HandlerResult, RequestHandler};
use crate::error::HandlerError;
use crate::request::check_intent_name;
use crate::response::ResponseBuilder;

/// Type-erased match predicate.
pub(crate) type Predicate = Arc<dyn Fn(&HandlerInput) -> bool + Send + Sync>;

/// Type-erased request callback.
pub(crate) type HandleFn =
    Arc<dyn Fn(HandlerInput, ResponseBuilder) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// Type-erased error callback.
pub(crate) type ErrorHandleFn = Arc<
    dyn Fn(HandlerInput, ResponseBuilder, HandlerError) -> BoxFuture<'static, HandlerResult>
        + Send
        + Sync,
>;

pub(crate) fn erase_handle<F, Fut>(callback: F) -> HandleFn
where
    F: Fn(HandlerInput, ResponseBuilder) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(
        move |input: HandlerInput, res: ResponseBuilder| -> BoxFuture<'static, HandlerResult> {
            Box::pin(callback(input, res))
        },
    )
}

fn call_handle(callback: &HandleFn, input: HandlerInput) -> BoxFuture<'static, HandlerResult> {
    let res = input.response_builder();
    callback(input, res)
}

/// Handler built from an arbitrary predicate and callback.
pub struct PredicateHandler {
    predicate: Predicate,
    callback: HandleFn,
}

impl PredicateHandler {
    /// Create a new predicate handler.
    pub fn new<P, F, Fut>(predicate: P, callback: F) -> Self
    where
        P: Fn(&HandlerInput) -> bool + Send + Sync + 'static,
        F: Fn(HandlerInput, ResponseBuilder) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            callback: erase_handle(callback),
        }
    }
}

impl RequestHandler for PredicateHandler {
    fn can_handle(&self, input: &HandlerInput) -> bool {
        (self.predicate)(input)
    }

    fn handle(&self, input: HandlerInput) -> BoxFuture<'static, HandlerResult> {
        call_handle(&self.callback, input)
    }
}

/// Handler that accepts every request and returns the empty response.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyRequestHandler;

impl RequestHandler for EmptyRequestHandler {
    fn can_handle(&self, _input: &HandlerInput) -> bool {
        true
    }

    fn handle(&self, input: HandlerInput) -> BoxFuture<'static, HandlerResult> {
        let response = input.response_builder().get_response();
        Box::pin(async move { Ok(response) })
    }
}

/// Handler occupying one built-in slot.
///
/// Without a callback it is a placeholder: it still matches its own kind
/// but answers with the empty response.
pub struct BuiltInHandler {
    kind: BuiltInKind,
    callback: Option<HandleFn>,
}

impl BuiltInHandler {
    /// Create a handler for `kind` with the given callback.
    pub fn new<F, Fut>(kind: BuiltInKind, callback: F) -> Self
    where
        F: Fn(HandlerInput, ResponseBuilder) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self {
            kind,
            callback: Some(erase_handle(callback)),
        }
    }

    /// Create the no-op handler a slot holds until something is registered.
    pub fn placeholder(kind: BuiltInKind) -> Self {
        Self {
            kind,
            callback: None,
        }
    }

    /// Get the slot this handler belongs to.
    #[inline]
    pub fn kind(&self) -> BuiltInKind {
        self.kind
    }

    /// Check if this is a placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.callback.is_none()
    }
}

impl fmt::Debug for BuiltInHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltInHandler")
            .field("kind", &self.kind)
            .field("placeholder", &self.is_placeholder())
            .finish()
    }
}

impl RequestHandler for BuiltInHandler {
    fn can_handle(&self, input: &HandlerInput) -> bool {
        self.kind.matches(input)
    }

    fn handle(&self, input: HandlerInput) -> BoxFuture<'static, HandlerResult> {
        match &self.callback {
            Some(callback) => call_handle(callback, input),
            None => EmptyRequestHandler.handle(input),
        }
    }
}

/// Extra options for custom intent handlers.
#[derive(Clone, Default)]
pub struct CustomIntentOptions {
    can_handle: Option<Predicate>,
}

impl CustomIntentOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a guard checked after the intent name matches.
    pub fn can_handle<P>(mut self, guard: P) -> Self
    where
        P: Fn(&HandlerInput) -> bool + Send + Sync + 'static,
    {
        self.can_handle = Some(Arc::new(guard));
        self
    }
}

/// Handler for a custom intent name, with an optional extra guard.
pub struct CustomIntentHandler {
    intent_name: String,
    guard: Option<Predicate>,
    callback: HandleFn,
}

impl CustomIntentHandler {
    /// Get the intent name this handler is registered under.
    #[inline]
    pub fn intent_name(&self) -> &str {
        &self.intent_name
    }
}

impl RequestHandler for CustomIntentHandler {
    fn can_handle(&self, input: &HandlerInput) -> bool {
        check_intent_name(input, &self.intent_name)
            && self.guard.as_ref().map_or(true, |guard| guard(input))
    }

    fn handle(&self, input: HandlerInput) -> BoxFuture<'static, HandlerResult> {
        call_handle(&self.callback, input)
    }
}

/// Error handler matching by error name, or every error when unnamed.
pub struct NamedErrorHandler {
    error_name: Option<String>,
    callback: ErrorHandleFn,
}

impl NamedErrorHandler {
    /// Get the error name this handler matches, `None` for catch-all.
    pub fn error_name(&self) -> Option<&str> {
        self.error_name.as_deref()
    }
}

impl ErrorHandler for NamedErrorHandler {
    fn can_handle(&self, _input: &HandlerInput, error: &HandlerError) -> bool {
        match &self.error_name {
            Some(name) => error.name() == name,
            None => true,
        }
    }

    fn handle(&self, input: HandlerInput, error: HandlerError) -> BoxFuture<'static, HandlerResult> {
        let res = input.response_builder();
        (self.callback)(input, res, error)
    }
}

/// Create a handler from a predicate and a callback.
pub fn create_request_handler<P, F, Fut>(predicate: P, callback: F) -> PredicateHandler
where
    P: Fn(&HandlerInput) -> bool + Send + Sync + 'static,
    F: Fn(HandlerInput, ResponseBuilder) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    PredicateHandler::new(predicate, callback)
}

/// Create a handler that accepts everything and responds with nothing.
pub fn create_empty_request_handler() -> EmptyRequestHandler {
    EmptyRequestHandler
}

/// Create a handler for a custom intent name.
pub fn create_custom_intent_handler<F, Fut>(
    intent_name: &str,
    callback: F,
    options: CustomIntentOptions,
) -> CustomIntentHandler
where
    F: Fn(HandlerInput, ResponseBuilder) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    CustomIntentHandler {
        intent_name: intent_name.to_string(),
        guard: options.can_handle,
        callback: erase_handle(callback),
    }
}

/// Create an error handler. `None` or an empty name matches every error.
pub fn create_error_handler<F, Fut>(error_name: Option<&str>, callback: F) -> NamedErrorHandler
where
    F: Fn(HandlerInput, ResponseBuilder, HandlerError) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    NamedErrorHandler {
        error_name: error_name.filter(|name| !name.is_empty()).map(str::to_string),
        callback: Arc::new(
            move |input: HandlerInput,
                  res: ResponseBuilder,
                  err: HandlerError|
                  -> BoxFuture<'static, HandlerResult> {
                Box::pin(callback(input, res, err))
            },
        ),
    }
}
