//! # skill-kit
//!
//! Fluent handler registration and first-match dispatch for voice-assistant
//! skills.
//!
//! Register callbacks for built-in requests (launch, help, cancel, stop,
//! fallback, session ended), custom intents, named errors and
//! request/response interceptors. `build()` assembles them into an ordered
//! handler chain:
//!
//! - launch is always checked first
//! - custom intents next, in registration order
//! - the remaining built-ins last
//!
//! The first handler whose predicate matches handles the request.
//!
//! ## Example
//!
//! ```ignore
//! use skill_kit::Skill;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let skill = Skill::builder()
//!         .on_launch(|_req, res| async move {
//!             Ok(res.speak("Welcome").get_response())
//!         })
//!         .on_custom_intent("BookFlight", |_req, res| async move {
//!             Ok(res.speak("Booked").get_response())
//!         })
//!         .build();
//!
//!     let response = skill.invoke_json(request_json).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod handler;
pub mod interceptor;
pub mod request;
pub mod response;

mod skill;

pub use error::{HandlerError, SkillError};
pub use handler::{BuiltInKind, HandlerInput};
pub use request::RequestEnvelope;
pub use response::{Response, ResponseBuilder, ResponseEnvelope};
pub use skill::{Skill, SkillBuilder, SkillConfig};
