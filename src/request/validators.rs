//! Dispatch predicates over a [`HandlerInput`].
//!
//! Each predicate is a single-field comparison on the request envelope.

use super::{intent_names, request_types};
use crate::handler::HandlerInput;

/// True iff the request kind equals `request_type`.
pub fn check_request_type(input: &HandlerInput, request_type: &str) -> bool {
    input.request_type() == request_type
}

/// True iff this is an `IntentRequest` for the intent named `intent_name`.
///
/// Other request kinds (`CanFulfillIntentRequest` included) never match,
/// even when they carry an intent.
pub fn check_intent_name(input: &HandlerInput, intent_name: &str) -> bool {
    is_intent_request(input) && input.intent_name() == Some(intent_name)
}

/// True iff the request is a `LaunchRequest`.
pub fn is_launch_request(input: &HandlerInput) -> bool {
    check_request_type(input, request_types::LAUNCH_REQUEST)
}

/// True iff the request is an `IntentRequest`.
pub fn is_intent_request(input: &HandlerInput) -> bool {
    check_request_type(input, request_types::INTENT_REQUEST)
}

/// True iff the request is a `SessionEndedRequest`.
pub fn is_session_ended_request(input: &HandlerInput) -> bool {
    check_request_type(input, request_types::SESSION_ENDED_REQUEST)
}

/// True iff the request is a `CanFulfillIntentRequest`.
pub fn is_can_fulfill_intent_request(input: &HandlerInput) -> bool {
    check_request_type(input, request_types::CAN_FULFILL_INTENT_REQUEST)
}

/// True iff the request is `AMAZON.HelpIntent`.
pub fn is_help_intent(input: &HandlerInput) -> bool {
    is_intent_request(input) && check_intent_name(input, intent_names::HELP_INTENT)
}

/// True iff the request is `AMAZON.FallbackIntent`.
pub fn is_fallback_intent(input: &HandlerInput) -> bool {
    is_intent_request(input) && check_intent_name(input, intent_names::FALLBACK_INTENT)
}

/// True iff the request is `AMAZON.CancelIntent`.
pub fn is_cancel_intent(input: &HandlerInput) -> bool {
    is_intent_request(input) && check_intent_name(input, intent_names::CANCEL_INTENT)
}

/// True iff the request is `AMAZON.StopIntent`.
pub fn is_stop_intent(input: &HandlerInput) -> bool {
    is_intent_request(input) && check_intent_name(input, intent_names::STOP_INTENT)
}

/// Cancel AND stop on the same request.
///
/// A request carries one intent name and the two constants differ, so this
/// never holds. Kept as-is; use `on_cancel` and `on_stop` separately to
/// handle either intent.
pub fn is_cancel_and_stop_intent(input: &HandlerInput) -> bool {
    is_cancel_intent(input) && is_stop_intent(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestEnvelope;

    fn launch() -> HandlerInput {
        HandlerInput::new(RequestEnvelope::of_type(request_types::LAUNCH_REQUEST))
    }

    fn intent(name: &str) -> HandlerInput {
        HandlerInput::new(RequestEnvelope::intent(name))
    }

    #[test]
    fn test_request_type_predicates() {
        assert!(is_launch_request(&launch()));
        assert!(!is_intent_request(&launch()));

        let ended = HandlerInput::new(RequestEnvelope::of_type("SessionEndedRequest"));
        assert!(is_session_ended_request(&ended));
        assert!(!is_launch_request(&ended));

        let cfir = HandlerInput::new(RequestEnvelope::of_type("CanFulfillIntentRequest"));
        assert!(is_can_fulfill_intent_request(&cfir));

        assert!(is_intent_request(&intent("BookFlight")));
    }

    #[test]
    fn test_built_in_intent_predicates() {
        assert!(is_help_intent(&intent(intent_names::HELP_INTENT)));
        assert!(is_fallback_intent(&intent(intent_names::FALLBACK_INTENT)));
        assert!(is_cancel_intent(&intent(intent_names::CANCEL_INTENT)));
        assert!(is_stop_intent(&intent(intent_names::STOP_INTENT)));

        assert!(!is_help_intent(&intent(intent_names::STOP_INTENT)));
        assert!(!is_stop_intent(&intent(intent_names::CANCEL_INTENT)));
        assert!(!is_help_intent(&launch()));
    }

    #[test]
    fn test_built_in_intent_requires_intent_request() {
        // Intent name present but the kind is not IntentRequest.
        let mut envelope = RequestEnvelope::intent(intent_names::HELP_INTENT);
        envelope.request.request_type = request_types::CAN_FULFILL_INTENT_REQUEST.to_string();
        let input = HandlerInput::new(envelope);

        assert!(!check_intent_name(&input, intent_names::HELP_INTENT));
        assert!(!is_help_intent(&input));
    }

    #[test]
    fn test_check_intent_name_ignores_can_fulfill_request() {
        let mut envelope = RequestEnvelope::intent("BookFlight");
        envelope.request.request_type = request_types::CAN_FULFILL_INTENT_REQUEST.to_string();
        let input = HandlerInput::new(envelope);

        assert_eq!(input.intent_name(), Some("BookFlight"));
        assert!(is_can_fulfill_intent_request(&input));
        assert!(!check_intent_name(&input, "BookFlight"));
    }

    #[test]
    fn test_check_intent_name() {
        assert!(check_intent_name(&intent("BookFlight"), "BookFlight"));
        assert!(!check_intent_name(&intent("BookFlight"), "BookHotel"));
        assert!(!check_intent_name(&launch(), "BookFlight"));
        assert!(!check_intent_name(&launch(), ""));
    }

    #[test]
    fn test_cancel_and_stop_never_matches_single_intent() {
        for name in [
            intent_names::CANCEL_INTENT,
            intent_names::STOP_INTENT,
            intent_names::CANCEL_AND_STOP_INTENT,
            intent_names::HELP_INTENT,
        ] {
            assert!(!is_cancel_and_stop_intent(&intent(name)), "{}", name);
        }
        assert!(!is_cancel_and_stop_intent(&launch()));
    }
}
