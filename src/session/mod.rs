mod event_handler;
mod state;


pub use event_handler::handle_session_event;
pub use state::{CookingSession, ScaledIngredient, SessionEvent, SessionOptions, StepDirection};
