//! Skill builder and dispatcher.
//!
//! The [`SkillBuilder`] provides a fluent API for registering handlers and
//! interceptors. [`SkillBuilder::build`] consumes it and produces an
//! immutable [`Skill`], which dispatches each request:
//! 1. Verify the skill ID (when configured)
//! 2. Run request interceptors
//! 3. Run the first request handler whose predicate matches
//! 4. Run response interceptors
//! 5. On any failure in 2-4, run the first matching error handler
//!
//! # Example
//!
//! ```ignore
//! use skill_kit::Skill;
//!
//! let skill = Skill::builder()
//!     .on_launch(|_req, res| async move {
//!         Ok(res.speak("Welcome!").reprompt("Where to?").get_response())
//!     })
//!     .on_custom_intent("BookFlight", |req, res| async move {
//!         let city = req.slot_value("city").unwrap_or("somewhere");
//!         Ok(res.speak(&format!("Booking a flight to {}", city)).get_response())
//!     })
//!     .on_error(None, |_req, res, err| async move {
//!         Ok(res.speak(&format!("Sorry: {}", err.message())).get_response())
//!     })
//!     .build();
//!
//! let response = skill.invoke_json(request_json).await?;
//! ```

use std::future::Future;
use std::sync::Arc;

use crate::error::{HandlerError, Result, SkillError};
use crate::handler::{
    create_custom_intent_handler, create_error_handler, BuiltInHandler, BuiltInKind,
    CustomIntentOptions, ErrorHandler, HandlerInput, HandlerRegistry, HandlerResult,
    RequestHandler,
};
use crate::interceptor::{
    create_request_interceptor, create_response_interceptor, InterceptorResult,
    RequestInterceptor, ResponseInterceptor,
};
use crate::request::RequestEnvelope;
use crate::response::{Response, ResponseBuilder, ResponseEnvelope};

/// Skill-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillConfig {
    /// Expected application ID. Requests addressed elsewhere are rejected.
    pub skill_id: Option<String>,
}

/// Builder for registering handlers and assembling a [`Skill`].
pub struct SkillBuilder {
    registry: HandlerRegistry,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
    config: SkillConfig,
}

impl SkillBuilder {
    /// Create a new skill builder.
    pub fn new() -> Self {
        Self {
            registry: HandlerRegistry::new(),
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
            config: SkillConfig::default(),
        }
    }

    /// Register the handler for a built-in kind, replacing any earlier one.
    pub fn on_built_in<F, Fut>(mut self, kind: BuiltInKind, callback: F) -> Self
    where
        F: Fn(HandlerInput, ResponseBuilder) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.registry
            .set_default(kind, Arc::new(BuiltInHandler::new(kind, callback)));
        self
    }

    /// Handle `LaunchRequest`. Checked before everything else.
    pub fn on_launch<F, Fut>(self, callback: F) -> Self
    where
        F: Fn(HandlerInput, ResponseBuilder) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on_built_in(BuiltInKind::Launch, callback)
    }

    /// Handle `AMAZON.HelpIntent`.
    pub fn on_help<F, Fut>(self, callback: F) -> Self
    where
        F: Fn(HandlerInput, ResponseBuilder) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on_built_in(BuiltInKind::Help, callback)
    }

    /// Handle `AMAZON.CancelIntent`.
    pub fn on_cancel<F, Fut>(self, callback: F) -> Self
    where
        F: Fn(HandlerInput, ResponseBuilder) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on_built_in(BuiltInKind::Cancel, callback)
    }

    /// Handle `AMAZON.StopIntent`.
    pub fn on_stop<F, Fut>(self, callback: F) -> Self
    where
        F: Fn(HandlerInput, ResponseBuilder) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on_built_in(BuiltInKind::Stop, callback)
    }

    /// Register the cancel-and-stop slot.
    ///
    /// The slot's predicate requires the request to be a cancel intent and
    /// a stop intent at once, which no request is, so this handler never
    /// runs. Register `on_cancel` and `on_stop` instead.
    pub fn on_cancel_and_stop<F, Fut>(self, callback: F) -> Self
    where
        F: Fn(HandlerInput, ResponseBuilder) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on_built_in(BuiltInKind::CancelAndStop, callback)
    }

    /// Handle `AMAZON.FallbackIntent`.
    pub fn on_fallback<F, Fut>(self, callback: F) -> Self
    where
        F: Fn(HandlerInput, ResponseBuilder) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on_built_in(BuiltInKind::Fallback, callback)
    }

    /// Handle `SessionEndedRequest`.
    pub fn on_session_ended<F, Fut>(self, callback: F) -> Self
    where
        F: Fn(HandlerInput, ResponseBuilder) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on_built_in(BuiltInKind::SessionEnded, callback)
    }

    /// Handle a custom intent by name.
    ///
    /// Custom intents are checked after launch and before the other
    /// built-ins, in registration order. Registering the same name twice
    /// keeps both; the first one wins.
    pub fn on_custom_intent<F, Fut>(self, intent_name: &str, callback: F) -> Self
    where
        F: Fn(HandlerInput, ResponseBuilder) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on_custom_intent_with(intent_name, CustomIntentOptions::default(), callback)
    }

    /// Handle a custom intent by name, gated by extra options.
    pub fn on_custom_intent_with<F, Fut>(
        mut self,
        intent_name: &str,
        options: CustomIntentOptions,
        callback: F,
    ) -> Self
    where
        F: Fn(HandlerInput, ResponseBuilder) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        let handler = create_custom_intent_handler(intent_name, callback, options);
        self.registry.add_custom(Arc::new(handler));
        self
    }

    /// Handle errors by name. `None` catches every error.
    pub fn on_error<F, Fut>(mut self, error_name: Option<&str>, callback: F) -> Self
    where
        F: Fn(HandlerInput, ResponseBuilder, HandlerError) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        let handler = create_error_handler(error_name, callback);
        self.registry.add_error(Arc::new(handler));
        self
    }

    /// Register a request interceptor.
    pub fn register_request_interceptor<F, Fut>(mut self, callback: F) -> Self
    where
        F: Fn(HandlerInput, ResponseBuilder) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = InterceptorResult> + Send + 'static,
    {
        self.request_interceptors
            .push(Arc::new(create_request_interceptor(callback)));
        self
    }

    /// Register a response interceptor.
    pub fn register_response_interceptor<F, Fut>(mut self, callback: F) -> Self
    where
        F: Fn(HandlerInput, Response) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = InterceptorResult> + Send + 'static,
    {
        self.response_interceptors
            .push(Arc::new(create_response_interceptor(callback)));
        self
    }

    /// Set the application ID requests must be addressed to.
    pub fn skill_id(mut self, skill_id: impl Into<String>) -> Self {
        self.config.skill_id = Some(skill_id.into());
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: SkillConfig) -> Self {
        self.config = config;
        self
    }

    /// Assemble the registered handlers into a [`Skill`].
    pub fn build(self) -> Skill {
        let request_handlers = self.registry.request_handlers();
        let error_handlers = self.registry.error_handlers();

        tracing::debug!(
            "Built skill with {} request handlers, {} error handlers",
            request_handlers.len(),
            error_handlers.len()
        );

        Skill {
            request_handlers,
            error_handlers,
            request_interceptors: self.request_interceptors,
            response_interceptors: self.response_interceptors,
            config: self.config,
        }
    }
}

impl Default for SkillBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// An assembled skill.
///
/// Immutable after [`SkillBuilder::build`]; share it across tasks with `Arc`.
pub struct Skill {
    request_handlers: Vec<Arc<dyn RequestHandler>>,
    error_handlers: Vec<Arc<dyn ErrorHandler>>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
    config: SkillConfig,
}

impl Skill {
    /// Create a new skill builder.
    pub fn builder() -> SkillBuilder {
        SkillBuilder::new()
    }

    /// Request handlers in dispatch order.
    pub fn request_handlers(&self) -> &[Arc<dyn RequestHandler>] {
        &self.request_handlers
    }

    /// Error handlers in dispatch order.
    pub fn error_handlers(&self) -> &[Arc<dyn ErrorHandler>] {
        &self.error_handlers
    }

    /// Request interceptors in run order.
    pub fn request_interceptors(&self) -> &[Arc<dyn RequestInterceptor>] {
        &self.request_interceptors
    }

    /// Response interceptors in run order.
    pub fn response_interceptors(&self) -> &[Arc<dyn ResponseInterceptor>] {
        &self.response_interceptors
    }

    /// Configured skill ID, if any.
    pub fn skill_id(&self) -> Option<&str> {
        self.config.skill_id.as_deref()
    }

    /// Dispatch a parsed request envelope.
    pub async fn invoke(&self, envelope: RequestEnvelope) -> Result<ResponseEnvelope> {
        self.verify_skill_id(&envelope)?;

        let session_attributes = envelope.session_attributes().cloned();
        let input = HandlerInput::new(envelope);

        let response = match self.dispatch_request(input.clone()).await {
            Ok(response) => response,
            Err(err) => self.dispatch_error(input, err).await?,
        };

        Ok(ResponseEnvelope::new(response, session_attributes))
    }

    /// Dispatch a raw JSON request and return the JSON response.
    pub async fn invoke_json(&self, request: serde_json::Value) -> Result<serde_json::Value> {
        let envelope: RequestEnvelope = serde_json::from_value(request)?;
        let response = self.invoke(envelope).await?;
        Ok(serde_json::to_value(response)?)
    }

    fn verify_skill_id(&self, envelope: &RequestEnvelope) -> Result<()> {
        let Some(expected) = self.config.skill_id.as_deref() else {
            return Ok(());
        };

        let actual = envelope.application_id().unwrap_or_default();
        if actual != expected {
            tracing::warn!("Rejecting request for application {:?}", actual);
            return Err(SkillError::SkillIdMismatch {
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }

        Ok(())
    }

    async fn dispatch_request(&self, input: HandlerInput) -> HandlerResult {
        for interceptor in &self.request_interceptors {
            interceptor.process(input.clone()).await?;
        }

        let Some(handler) = self.request_handlers.iter().find(|h| h.can_handle(&input)) else {
            tracing::warn!(
                "No handler for {} (intent: {:?})",
                input.request_type(),
                input.intent_name()
            );
            return Err(HandlerError::unhandled_request(
                input.request_type(),
                input.intent_name(),
            ));
        };

        tracing::debug!(
            "Dispatching {} (intent: {:?})",
            input.request_type(),
            input.intent_name()
        );
        let output = handler.handle(input.clone()).await?;

        for interceptor in &self.response_interceptors {
            interceptor.process(input.clone(), output.clone()).await?;
        }

        Ok(output)
    }

    async fn dispatch_error(&self, input: HandlerInput, error: HandlerError) -> Result<Response> {
        let Some(handler) = self
            .error_handlers
            .iter()
            .find(|h| h.can_handle(&input, &error))
        else {
            tracing::error!("Unhandled error for {}: {}", input.request_type(), error);
            return Err(SkillError::Unhandled(error));
        };

        tracing::debug!("Dispatching error {}", error.name());
        handler.handle(input, error).await.map_err(|e| {
            tracing::error!("Error handler failed: {}", e);
            SkillError::Unhandled(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::intent_names;

    fn ok(res: ResponseBuilder) -> HandlerResult {
        Ok(res.get_response())
    }

    #[test]
    fn test_builder_creation() {
        let skill = SkillBuilder::default().build();
        assert_eq!(skill.request_handlers().len(), 7);
        assert!(skill.error_handlers().is_empty());
        assert!(skill.request_interceptors().is_empty());
        assert!(skill.response_interceptors().is_empty());
        assert_eq!(skill.skill_id(), None);
    }

    #[test]
    fn test_builder_method_chaining() {
        let skill = Skill::builder()
            .on_launch(|_req, res| async move { ok(res) })
            .on_custom_intent("BookFlight", |_req, res| async move { ok(res) })
            .on_custom_intent("BookHotel", |_req, res| async move { ok(res) })
            .on_help(|_req, res| async move { ok(res) })
            .on_error(Some("NotFound"), |_req, res, _err| async move { ok(res) })
            .on_error(None, |_req, res, _err| async move { ok(res) })
            .register_request_interceptor(|_req, _res| async { Ok(()) })
            .register_response_interceptor(|_req, _out| async { Ok(()) })
            .build();

        assert_eq!(skill.request_handlers().len(), 9);
        assert_eq!(skill.error_handlers().len(), 2);
        assert_eq!(skill.request_interceptors().len(), 1);
        assert_eq!(skill.response_interceptors().len(), 1);
    }

    #[test]
    fn test_builder_configuration() {
        let skill = Skill::builder().skill_id("amzn1.ask.skill.test").build();
        assert_eq!(skill.skill_id(), Some("amzn1.ask.skill.test"));

        let skill = Skill::builder()
            .skill_id("ignored")
            .config(SkillConfig::default())
            .build();
        assert_eq!(skill.skill_id(), None);
    }

    #[tokio::test]
    async fn test_default_slot_answers_empty() {
        let skill = Skill::builder().build();
        let envelope = skill
            .invoke(RequestEnvelope::intent(intent_names::HELP_INTENT))
            .await
            .unwrap();

        assert_eq!(envelope.version, "1.0");
        assert!(envelope.response.is_empty());
    }

    #[tokio::test]
    async fn test_unmatched_request_without_error_handler() {
        let skill = Skill::builder().build();
        let err = skill
            .invoke(RequestEnvelope::intent("BookFlight"))
            .await
            .unwrap_err();

        match err {
            SkillError::Unhandled(e) => {
                assert_eq!(e.name(), crate::error::UNHANDLED_REQUEST_ERROR)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_skill_id_verification() {
        let skill = Skill::builder()
            .skill_id("amzn1.ask.skill.expected")
            .on_launch(|_req, res| async move { Ok(res.speak("Hi").get_response()) })
            .build();

        let err = skill
            .invoke(RequestEnvelope::of_type("LaunchRequest"))
            .await
            .unwrap_err();
        assert!(matches!(err, SkillError::SkillIdMismatch { ref actual, .. } if actual.is_empty()));

        let request = serde_json::json!({
            "version": "1.0",
            "context": { "System": { "application": { "applicationId": "amzn1.ask.skill.expected" } } },
            "request": { "type": "LaunchRequest" }
        });
        let response = skill.invoke_json(request).await.unwrap();
        assert_eq!(response["response"]["outputSpeech"]["ssml"], "<speak>Hi</speak>");
    }

    #[tokio::test]
    async fn test_invoke_json_rejects_malformed_request() {
        let skill = Skill::builder().build();
        let err = skill
            .invoke_json(serde_json::json!({ "version": "1.0" }))
            .await
            .unwrap_err();
        assert!(matches!(err, SkillError::Json(_)));
    }
}
