use std::env;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_channel::Sender;
use tokio::sync::oneshot;

use crate::session::SessionEvent;

/// Identifies one utterance so a late "ended" signal can't clear a newer one.
pub type UtteranceId = u64;

/// Called once when an utterance finishes on its own (not when cancelled).
pub type OnEnd = Box<dyn FnOnce() + Send + 'static>;

/// Words per minute at rate 1.0.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

/// A text-to-speech capability.
pub trait SpeechBackend {
    fn speak(
        &mut self,
        text: &str,
        rate: f32,
        on_end: OnEnd,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    fn cancel(&mut self);
}

/// Speaks through a system synthesiser process (`say`, `espeak-ng`, `espeak`).
pub struct CommandSpeech {
    program: PathBuf,
    current: Option<oneshot::Sender<()>>,
}

impl CommandSpeech {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            current: None,
        }
    }

    /// Locate a synthesiser, preferring `preferred` when given.
    /// Returns `None` when nothing usable is installed.
    pub fn detect(preferred: Option<&str>) -> Option<Self> {
        let candidates: Vec<&str> = match preferred {
            Some(p) => vec![p],
            None if cfg!(target_os = "macos") => vec!["say"],
            None => vec!["espeak-ng", "espeak", "say"],
        };

        let found = candidates.into_iter().find_map(find_program);
        match &found {
            Some(path) => log::info!("Read-aloud using {}", path.display()),
            None => log::info!("No speech synthesiser found, read-aloud disabled"),
        }
        found.map(Self::new)
    }

    fn args(&self, text: &str, rate: f32) -> Vec<String> {
        let wpm = ((BASE_WORDS_PER_MINUTE * rate).round() as u32).max(1).to_string();
        let name = self
            .program
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        // "--" keeps text such as "- Chop the onions" from being read as a flag
        match name {
            "say" => vec!["-r".into(), wpm, "--".into(), text.into()],
            "espeak" | "espeak-ng" => vec!["-s".into(), wpm, "--".into(), text.into()],
            _ => vec![text.into()],
        }
    }
}

impl SpeechBackend for CommandSpeech {
    fn speak(
        &mut self,
        text: &str,
        rate: f32,
        on_end: OnEnd,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.cancel();

        let mut child = tokio::process::Command::new(&self.program)
            .args(self.args(text, rate))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| format!("Failed to spawn {}: {e}", self.program.display()))?;

        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        self.current = Some(cancel_tx);

        tokio::spawn(async move {
            tokio::select! {
                status = child.wait() => {
                    if let Err(e) = status {
                        log::warn!("Speech process failed: {e}");
                    }
                    on_end();
                }
                _ = cancel_rx => {
                    if let Err(e) = child.kill().await {
                        log::debug!("Speech process already gone: {e}");
                    }
                }
            }
        });
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(tx) = self.current.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for CommandSpeech {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn find_program(program: &str) -> Option<PathBuf> {
    let direct = Path::new(program);
    if direct.components().count() > 1 {
        return direct.is_file().then(|| direct.to_path_buf());
    }
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

/// Read-aloud latch: at most one utterance at a time.
///
/// Without a backend every call is a silent no-op.
pub struct ReadAloud {
    backend: Option<Box<dyn SpeechBackend>>,
    rate: f32,
    current: Option<UtteranceId>,
    next_id: UtteranceId,
    events: Sender<SessionEvent>,
}

impl ReadAloud {
    pub fn new(
        backend: Option<Box<dyn SpeechBackend>>,
        rate: f32,
        events: Sender<SessionEvent>,
    ) -> Self {
        Self {
            backend,
            rate,
            current: None,
            next_id: 0,
            events,
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn is_reading(&self) -> bool {
        self.current.is_some()
    }

    /// Stop if reading, otherwise start reading `text`. Returns the new latch.
    pub fn toggle(&mut self, text: &str) -> bool {
        if self.is_reading() {
            self.cancel();
            return false;
        }
        self.speak(text)
    }

    /// Speak `text`, cutting off anything already in progress.
    pub fn speak(&mut self, text: &str) -> bool {
        self.cancel();

        let Some(backend) = self.backend.as_mut() else {
            log::debug!("Read-aloud unavailable, ignoring request");
            return false;
        };

        let id = self.next_id;
        self.next_id += 1;
        let events = self.events.clone();
        let on_end: OnEnd = Box::new(move || {
            let _ = events.try_send(SessionEvent::SpeechEnded(id));
        });

        match backend.speak(text, self.rate, on_end) {
            Ok(()) => {
                self.current = Some(id);
                true
            }
            Err(e) => {
                log::warn!("Read-aloud failed: {e}");
                false
            }
        }
    }

    pub fn cancel(&mut self) {
        if self.current.take().is_some() {
            if let Some(backend) = self.backend.as_mut() {
                backend.cancel();
            }
        }
    }

    /// Clear the latch if `id` is the utterance in progress.
    pub fn on_utterance_end(&mut self, id: UtteranceId) {
        if self.current == Some(id) {
            self.current = None;
        }
    }
}

impl Drop for ReadAloud {
    fn drop(&mut self) {
        self.cancel();
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedSpeech;
    use super::*;

    fn ended(event: SessionEvent) -> UtteranceId {
        match event {
            SessionEvent::SpeechEnded(id) => id,
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn toggle_starts_then_stops() {
        let (tx, _rx) = async_channel::unbounded();
        let speech = ScriptedSpeech::default();
        let mut read_aloud = ReadAloud::new(Some(Box::new(speech.clone())), 0.9, tx);

        assert!(read_aloud.toggle("Stir the rice"));
        assert!(read_aloud.is_reading());
        assert!(!read_aloud.toggle("Stir the rice"));
        assert!(!read_aloud.is_reading());
        assert_eq!(*speech.cancels.borrow(), 1);
        assert_eq!(speech.spoken.borrow().len(), 1);
    }

    #[test]
    fn latch_clears_when_utterance_ends() {
        let (tx, rx) = async_channel::unbounded();
        let speech = ScriptedSpeech::default();
        let mut read_aloud = ReadAloud::new(Some(Box::new(speech.clone())), 0.9, tx);

        read_aloud.speak("Add the garlic");
        speech.finish_next();
        read_aloud.on_utterance_end(ended(rx.try_recv().unwrap()));
        assert!(!read_aloud.is_reading());
    }

    #[test]
    fn speaking_again_cancels_the_prior_utterance() {
        let (tx, rx) = async_channel::unbounded();
        let speech = ScriptedSpeech::default();
        let mut read_aloud = ReadAloud::new(Some(Box::new(speech.clone())), 0.9, tx);

        read_aloud.speak("first");
        read_aloud.speak("second");
        assert_eq!(*speech.cancels.borrow(), 1);

        // A late end signal from the first utterance must not clear the second.
        speech.finish_next();
        read_aloud.on_utterance_end(ended(rx.try_recv().unwrap()));
        assert!(read_aloud.is_reading());

        speech.finish_next();
        read_aloud.on_utterance_end(ended(rx.try_recv().unwrap()));
        assert!(!read_aloud.is_reading());
    }

    #[test]
    fn missing_backend_is_a_no_op() {
        let (tx, rx) = async_channel::unbounded();
        let mut read_aloud = ReadAloud::new(None, 0.9, tx);
        assert!(!read_aloud.is_available());
        assert!(!read_aloud.toggle("anything"));
        assert!(!read_aloud.is_reading());
        read_aloud.cancel();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn synthesiser_arguments_carry_the_rate() {
        let espeak = CommandSpeech::new("/usr/bin/espeak-ng");
        assert_eq!(espeak.args("hi", 0.8), vec!["-s", "140", "--", "hi"]);
        let say = CommandSpeech::new("say");
        assert_eq!(say.args("hi", 1.0), vec!["-r", "175", "--", "hi"]);
        let other = CommandSpeech::new("my-tts");
        assert_eq!(other.args("hi", 1.0), vec!["hi"]);
    }

    #[test]
    fn dash_led_text_stays_an_operand() {
        let espeak = CommandSpeech::new("espeak");
        let args = espeak.args("- Chop the onions", 1.0);
        assert_eq!(args.last().map(String::as_str), Some("- Chop the onions"));
        let text_at = args.len() - 1;
        assert_eq!(args[text_at - 1], "--");
    }

    #[test]
    fn detect_returns_none_for_missing_programs() {
        assert!(CommandSpeech::detect(Some("definitely-not-a-synthesiser")).is_none());
        assert!(CommandSpeech::detect(Some("/no/such/dir/espeak")).is_none());
    }

    #[tokio::test]
    async fn process_exit_signals_the_end() {
        let Some(mut speech) = CommandSpeech::detect(Some("true")) else {
            return;
        };
        let (tx, rx) = async_channel::unbounded();
        speech
            .speak("ignored", 1.0, Box::new(move || tx.try_send(()).unwrap()))
            .unwrap();
        rx.recv().await.unwrap();
    }
}
