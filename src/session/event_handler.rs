use super::state::{CookingSession, SessionEvent};
use crate::notify::Notice;

/// Apply one event to the session. This is the session's state machine.
pub fn handle_session_event(session: &mut CookingSession, event: SessionEvent) {
    match event {
        SessionEvent::TimerTick {
            step_id,
            generation,
        } => {
            if let Some(done) = session.timers.tick(&step_id, generation) {
                session.notifier.notify(Notice::titled(
                    "Timer finished!",
                    format!("The timer for step {} is complete.", done.position),
                ));
            }
        }
        SessionEvent::SpeechEnded(id) => {
            session.read_aloud.on_utterance_end(id);
        }
    }
}
