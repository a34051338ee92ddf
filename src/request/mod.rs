//! Request module - envelope model and dispatch predicates.
//!
//! Provides:
//! - [`RequestEnvelope`] - the subset of the platform request JSON used for dispatch
//! - [`request_types`] / [`intent_names`] - well-known request kinds and intent names
//! - predicate functions (`is_launch_request`, `is_help_intent`, ...)

mod envelope;
mod validators;

pub use envelope::{
    Application, Context, Intent, Request, RequestEnvelope, Session, Slot, SystemState,
};
pub use validators::{
    check_intent_name, check_request_type, is_can_fulfill_intent_request,
    is_cancel_and_stop_intent, is_cancel_intent, is_fallback_intent, is_help_intent,
    is_intent_request, is_launch_request, is_session_ended_request, is_stop_intent,
};

/// Request kind constants.
pub mod request_types {
    pub const LAUNCH_REQUEST: &str = "LaunchRequest";
    pub const INTENT_REQUEST: &str = "IntentRequest";
    pub const SESSION_ENDED_REQUEST: &str = "SessionEndedRequest";
    pub const CAN_FULFILL_INTENT_REQUEST: &str = "CanFulfillIntentRequest";

    /// Library-defined kind, never sent by the platform.
    pub const ERROR_REQUEST: &str = "ErrorRequest";
}

/// Built-in intent name constants.
pub mod intent_names {
    pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
    pub const FALLBACK_INTENT: &str = "AMAZON.FallbackIntent";
    pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
    pub const STOP_INTENT: &str = "AMAZON.StopIntent";

    /// Library-defined name, never sent by the platform.
    pub const CANCEL_AND_STOP_INTENT: &str = "LIB.CancelAndStopIntent";
}
