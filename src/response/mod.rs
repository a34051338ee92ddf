//! Response module - response model and the shared response builder.
//!
//! Handlers accumulate output through a [`ResponseBuilder`] and finish with
//! [`ResponseBuilder::get_response`]. The dispatcher wraps the result in a
//! [`ResponseEnvelope`].

mod builder;

pub use builder::ResponseBuilder;

use serde::{Deserialize, Serialize};

/// Response envelope version.
pub const RESPONSE_VERSION: &str = "1.0";

/// Speech output in SSML form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub speech_type: String,
    pub ssml: String,
}

impl OutputSpeech {
    /// Create an SSML speech block.
    pub fn ssml(ssml: String) -> Self {
        Self {
            speech_type: "SSML".to_string(),
            ssml,
        }
    }
}

/// Reprompt played when the user does not answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// Card shown in the companion app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub card_type: String,
    pub title: String,
    pub content: String,
}

/// Response body.
///
/// The default value is the empty response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

impl Response {
    /// Check if nothing has been set on this response.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Top-level response envelope returned to the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_attributes: Option<serde_json::Map<String, serde_json::Value>>,
    pub response: Response,
}

impl ResponseEnvelope {
    /// Wrap a response in an envelope.
    pub fn new(
        response: Response,
        session_attributes: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            session_attributes,
            response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_response_serializes_to_empty_object() {
        let response = Response::default();
        assert!(response.is_empty());
        assert_eq!(serde_json::to_value(&response).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_envelope_format() {
        let response = Response {
            output_speech: Some(OutputSpeech::ssml("<speak>Hi</speak>".to_string())),
            should_end_session: Some(true),
            ..Response::default()
        };
        let envelope = ResponseEnvelope::new(response, None);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["version"], "1.0");
        assert_eq!(value["response"]["outputSpeech"]["type"], "SSML");
        assert_eq!(value["response"]["outputSpeech"]["ssml"], "<speak>Hi</speak>");
        assert_eq!(value["response"]["shouldEndSession"], true);
        assert!(value.get("sessionAttributes").is_none());
    }
}
