//! Request context for handlers.
//!
//! [`HandlerInput`] bundles the parsed request envelope with the response
//! builder for that request. Predicates borrow it; callbacks receive it by
//! value.

use std::sync::Arc;

use crate::request::RequestEnvelope;
use crate::response::ResponseBuilder;

/// Context passed to predicates, handlers and interceptors.
///
/// `HandlerInput` is `Clone`; clones share the envelope and the response
/// builder, so anything an interceptor writes is visible to the handler.
#[derive(Debug, Clone)]
pub struct HandlerInput {
    envelope: Arc<RequestEnvelope>,
    response_builder: ResponseBuilder,
}

impl HandlerInput {
    /// Create a context for the given envelope with an empty response.
    pub fn new(envelope: RequestEnvelope) -> Self {
        Self {
            envelope: Arc::new(envelope),
            response_builder: ResponseBuilder::new(),
        }
    }

    /// Get the request envelope.
    #[inline]
    pub fn envelope(&self) -> &RequestEnvelope {
        &self.envelope
    }

    /// Get the request kind tag.
    #[inline]
    pub fn request_type(&self) -> &str {
        self.envelope.request_type()
    }

    /// Get the intent name, if the request carries one.
    #[inline]
    pub fn intent_name(&self) -> Option<&str> {
        self.envelope.intent_name()
    }

    /// Get a slot value from the request intent.
    pub fn slot_value(&self, slot_name: &str) -> Option<&str> {
        self.envelope.slot_value(slot_name)
    }

    /// Get a handle to this request's response builder.
    pub fn response_builder(&self) -> ResponseBuilder {
        self.response_builder.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let input = HandlerInput::new(RequestEnvelope::intent("BookFlight"));
        assert_eq!(input.request_type(), "IntentRequest");
        assert_eq!(input.intent_name(), Some("BookFlight"));
        assert_eq!(input.slot_value("city"), None);
        assert_eq!(input.envelope().version, "1.0");
    }

    #[test]
    fn test_clone_shares_response_builder() {
        let input = HandlerInput::new(RequestEnvelope::of_type("LaunchRequest"));
        let clone = input.clone();

        clone.response_builder().speak("from clone");
        assert!(input.response_builder().get_response().output_speech.is_some());
    }
}
