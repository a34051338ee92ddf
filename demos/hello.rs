//! Hello skill - builder and dispatch example.
//!
//! This example demonstrates:
//! - Registering launch, custom intent and error handlers
//! - Gating a custom intent on a slot value
//! - Dispatching JSON requests through the built skill

use serde_json::json;
use skill_kit::handler::CustomIntentOptions;
use skill_kit::{HandlerError, Skill};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let skill = Skill::builder()
        .on_launch(|_req, res| async move {
            Ok(res
                .speak("Welcome to the travel desk. Where would you like to go?")
                .reprompt("Where would you like to go?")
                .get_response())
        })
        .on_custom_intent_with(
            "BookFlight",
            CustomIntentOptions::new().can_handle(|req| req.slot_value("city").is_some()),
            |req, res| async move {
                let city = req.slot_value("city").unwrap_or_default().to_string();
                Ok(res
                    .speak(&format!("Booking a flight to {}.", city))
                    .with_simple_card("Flight booked", &city)
                    .with_should_end_session(true)
                    .get_response())
            },
        )
        .on_custom_intent("BookFlight", |_req, _res| async move {
            Err(HandlerError::new("MissingCity", "no city given"))
        })
        .on_error(Some("MissingCity"), |_req, res, _err| async move {
            Ok(res.speak("Which city?").reprompt("Which city?").get_response())
        })
        .on_error(None, |_req, res, err| async move {
            Ok(res.speak(&format!("Sorry, {}", err.message())).get_response())
        })
        .build();

    let requests = [
        json!({ "request": { "type": "LaunchRequest" } }),
        json!({ "request": { "type": "IntentRequest", "intent": { "name": "BookFlight" } } }),
        json!({
            "request": {
                "type": "IntentRequest",
                "intent": {
                    "name": "BookFlight",
                    "slots": { "city": { "name": "city", "value": "Lisbon" } }
                }
            }
        }),
    ];

    for request in requests {
        let response = skill.invoke_json(request).await?;
        println!("{}", serde_json::to_string_pretty(&response)?);
    }

    Ok(())
}
