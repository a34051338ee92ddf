//! Request envelope model.
//!
//! Only the fields used for dispatch and skill verification are modelled.
//! Unknown fields are ignored during deserialization, so any platform
//! request parses as long as it carries `request.type`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Top-level request envelope sent by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    pub request: Request,
}

/// Session state attached to in-session requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<Application>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Identifies the skill a request is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

/// Device and system context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(rename = "System", default, skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemState>,
}

/// `context.System` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<Application>,
}

/// The request body.
///
/// `request_type` is kept as a string so that request kinds this crate
/// has no constant for (audio player events, etc.) still parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    /// Present on `SessionEndedRequest`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Intent carried by an `IntentRequest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_status: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub slots: HashMap<String, Slot>,
}

/// A single intent slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl RequestEnvelope {
    /// Build an envelope for the given request kind with no intent.
    ///
    /// Mostly useful in tests and for synthesising requests locally.
    pub fn of_type(request_type: &str) -> Self {
        Self {
            version: "1.0".to_string(),
            session: None,
            context: None,
            request: Request {
                request_type: request_type.to_string(),
                request_id: None,
                timestamp: None,
                locale: None,
                intent: None,
                reason: None,
            },
        }
    }

    /// Build an `IntentRequest` envelope for the given intent name.
    pub fn intent(intent_name: &str) -> Self {
        let mut envelope = Self::of_type(super::request_types::INTENT_REQUEST);
        envelope.request.intent = Some(Intent {
            name: intent_name.to_string(),
            confirmation_status: None,
            slots: HashMap::new(),
        });
        envelope
    }

    /// Get the request kind.
    #[inline]
    pub fn request_type(&self) -> &str {
        &self.request.request_type
    }

    /// Get the intent name, if this request carries an intent.
    pub fn intent_name(&self) -> Option<&str> {
        self.request.intent.as_ref().map(|i| i.name.as_str())
    }

    /// Get a slot value by slot name.
    pub fn slot_value(&self, slot_name: &str) -> Option<&str> {
        self.request
            .intent
            .as_ref()
            .and_then(|i| i.slots.get(slot_name))
            .and_then(|s| s.value.as_deref())
    }

    /// Application ID the request is addressed to.
    ///
    /// Prefers `context.System.application`, falling back to the session.
    pub fn application_id(&self) -> Option<&str> {
        self.context
            .as_ref()
            .and_then(|c| c.system.as_ref())
            .and_then(|s| s.application.as_ref())
            .or_else(|| self.session.as_ref().and_then(|s| s.application.as_ref()))
            .map(|a| a.application_id.as_str())
    }

    /// Session attributes carried by the request, if any.
    pub fn session_attributes(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        self.session.as_ref().and_then(|s| s.attributes.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "version": "1.0",
            "session": {
                "new": false,
                "sessionId": "amzn1.echo-api.session.1",
                "application": { "applicationId": "amzn1.ask.skill.session" },
                "attributes": { "step": 2 }
            },
            "context": {
                "System": {
                    "application": { "applicationId": "amzn1.ask.skill.context" },
                    "device": { "deviceId": "ignored" }
                }
            },
            "request": {
                "type": "IntentRequest",
                "requestId": "amzn1.echo-api.request.1",
                "locale": "en-US",
                "intent": {
                    "name": "BookFlight",
                    "confirmationStatus": "NONE",
                    "slots": {
                        "city": { "name": "city", "value": "Lisbon" },
                        "date": { "name": "date" }
                    }
                }
            }
        })
    }

    #[test]
    fn test_parse_intent_request() {
        let envelope: RequestEnvelope = serde_json::from_value(sample()).unwrap();

        assert_eq!(envelope.request_type(), "IntentRequest");
        assert_eq!(envelope.intent_name(), Some("BookFlight"));
        assert_eq!(envelope.slot_value("city"), Some("Lisbon"));
        assert_eq!(envelope.slot_value("date"), None);
        assert_eq!(envelope.slot_value("missing"), None);
        assert_eq!(envelope.session_attributes().unwrap()["step"], 2);
    }

    #[test]
    fn test_application_id_prefers_context() {
        let envelope: RequestEnvelope = serde_json::from_value(sample()).unwrap();
        assert_eq!(envelope.application_id(), Some("amzn1.ask.skill.context"));

        let mut no_context = envelope.clone();
        no_context.context = None;
        assert_eq!(no_context.application_id(), Some("amzn1.ask.skill.session"));

        assert_eq!(RequestEnvelope::of_type("LaunchRequest").application_id(), None);
    }

    #[test]
    fn test_unknown_request_type_parses() {
        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "request": { "type": "AudioPlayer.PlaybackStarted", "token": "abc" }
        }))
        .unwrap();

        assert_eq!(envelope.request_type(), "AudioPlayer.PlaybackStarted");
        assert_eq!(envelope.intent_name(), None);
    }

    #[test]
    fn test_missing_request_type_fails() {
        let result: serde_json::Result<RequestEnvelope> =
            serde_json::from_value(json!({ "request": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn test_constructors() {
        let launch = RequestEnvelope::of_type("LaunchRequest");
        assert_eq!(launch.request_type(), "LaunchRequest");
        assert!(launch.request.intent.is_none());

        let help = RequestEnvelope::intent("AMAZON.HelpIntent");
        assert_eq!(help.request_type(), "IntentRequest");
        assert_eq!(help.intent_name(), Some("AMAZON.HelpIntent"));
    }
}
