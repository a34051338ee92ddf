//! Shared response accumulator.

use std::sync::Arc;

use parking_lot::Mutex;

use super::{Card, OutputSpeech, Reprompt, Response};

/// Accumulates a [`Response`] for a single request.
///
/// `ResponseBuilder` is `Clone`; all clones write to the same response, so
/// the copy handed to a handler and the copy held by the request context
/// stay in sync.
#[derive(Debug, Clone, Default)]
pub struct ResponseBuilder {
    inner: Arc<Mutex<Response>>,
}

impl ResponseBuilder {
    /// Create a builder holding the empty response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the speech output. Text is wrapped in `<speak>` tags.
    pub fn speak(&self, speech: &str) -> &Self {
        self.inner.lock().output_speech = Some(OutputSpeech::ssml(wrap_ssml(speech)));
        self
    }

    /// Set the reprompt. Also keeps the session open unless told otherwise.
    pub fn reprompt(&self, speech: &str) -> &Self {
        let mut response = self.inner.lock();
        response.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::ssml(wrap_ssml(speech)),
        });
        if response.should_end_session.is_none() {
            response.should_end_session = Some(false);
        }
        drop(response);
        self
    }

    /// Attach a simple card.
    pub fn with_simple_card(&self, title: &str, content: &str) -> &Self {
        self.inner.lock().card = Some(Card {
            card_type: "Simple".to_string(),
            title: title.to_string(),
            content: content.to_string(),
        });
        self
    }

    /// Set whether the session should end after this response.
    pub fn with_should_end_session(&self, value: bool) -> &Self {
        self.inner.lock().should_end_session = Some(value);
        self
    }

    /// Finalize and return a snapshot of the response.
    pub fn get_response(&self) -> Response {
        self.inner.lock().clone()
    }
}

/// Wrap speech in a single `<speak>` element, dropping any existing one.
fn wrap_ssml(speech: &str) -> String {
    let trimmed = speech.trim();
    let inner = trimmed
        .strip_prefix("<speak>")
        .and_then(|s| s.strip_suffix("</speak>"))
        .unwrap_or(trimmed);
    format!("<speak>{}</speak>", inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_builder_is_empty() {
        assert!(ResponseBuilder::new().get_response().is_empty());
    }

    #[test]
    fn test_speak_wraps_ssml() {
        let builder = ResponseBuilder::new();
        builder.speak("Hello");
        assert_eq!(
            builder.get_response().output_speech.unwrap().ssml,
            "<speak>Hello</speak>"
        );

        builder.speak("<speak>Already wrapped</speak>");
        assert_eq!(
            builder.get_response().output_speech.unwrap().ssml,
            "<speak>Already wrapped</speak>"
        );
    }

    #[test]
    fn test_chaining() {
        let builder = ResponseBuilder::new();
        let response = builder
            .speak("Where to?")
            .reprompt("Which city?")
            .with_simple_card("Booking", "Where to?")
            .get_response();

        assert!(response.output_speech.is_some());
        assert_eq!(
            response.reprompt.unwrap().output_speech.ssml,
            "<speak>Which city?</speak>"
        );
        assert_eq!(response.card.unwrap().card_type, "Simple");
        assert_eq!(response.should_end_session, Some(false));
    }

    #[test]
    fn test_explicit_end_session_wins_over_reprompt() {
        let builder = ResponseBuilder::new();
        builder.with_should_end_session(true).reprompt("Anything else?");
        assert_eq!(builder.get_response().should_end_session, Some(true));
    }

    #[test]
    fn test_clones_share_state() {
        let builder = ResponseBuilder::new();
        let clone = builder.clone();
        clone.speak("Shared");
        assert!(builder.get_response().output_speech.is_some());
    }
}
