use std::collections::HashMap;
use std::ops::ControlFlow;
use std::time::Duration;

use async_channel::{Sender, TrySendError};

use crate::schedule::ScheduledTask;
use crate::session::SessionEvent;

/// Interval between countdown ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Outcome of toggling a step timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerToggle {
    Started,
    Cancelled,
    /// The step does not belong to this recipe.
    UnknownStep,
    /// The step has no countdown.
    NoTimer,
}

/// Raised once when a countdown reaches zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerCompletion {
    pub step_id: String,
    /// 1-based position of the step in the recipe.
    pub position: usize,
}

struct ActiveTimer {
    remaining: u64,
    generation: u64,
    position: usize,
    _task: ScheduledTask,
}

/// Independent per-step countdowns for one recipe.
///
/// Each running timer owns a [`ScheduledTask`] that posts a
/// [`SessionEvent::TimerTick`] every second; the session feeds those back
/// through [`StepTimers::tick`]. Removing an entry drops its task, so no
/// recurring work outlives the countdown.
#[derive(Default)]
pub struct StepTimers {
    active: HashMap<String, ActiveTimer>,
    next_generation: u64,
}

impl StepTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a countdown, or cancel it if one is already running.
    ///
    /// Must be called from within a tokio runtime. `events` should be
    /// unbounded; a closed channel stops the ticking task.
    pub fn toggle(
        &mut self,
        step_id: &str,
        position: usize,
        minutes: f64,
        events: &Sender<SessionEvent>,
    ) -> TimerToggle {
        if self.active.remove(step_id).is_some() {
            log::info!("Cancelled timer for step {step_id}");
            return TimerToggle::Cancelled;
        }

        let seconds = duration_seconds(minutes);
        let generation = self.next_generation;
        self.next_generation += 1;

        let sender = events.clone();
        let id = step_id.to_string();
        let mut sent = 0u64;
        let task = ScheduledTask::every(TICK_PERIOD, move || {
            let tick = SessionEvent::TimerTick {
                step_id: id.clone(),
                generation,
            };
            match sender.try_send(tick) {
                Err(TrySendError::Closed(_)) => return ControlFlow::Break(()),
                Err(TrySendError::Full(_)) => log::warn!("Timer tick dropped for step {id}"),
                Ok(()) => sent += 1,
            }
            if sent >= seconds {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        log::info!("Started {seconds}s timer for step {step_id}");
        self.active.insert(
            step_id.to_string(),
            ActiveTimer {
                remaining: seconds,
                generation,
                position,
                _task: task,
            },
        );
        TimerToggle::Started
    }

    /// Apply one tick. Ticks from a cancelled or replaced countdown are ignored.
    pub fn tick(&mut self, step_id: &str, generation: u64) -> Option<TimerCompletion> {
        let timer = self.active.get_mut(step_id)?;
        if timer.generation != generation {
            return None;
        }

        if timer.remaining <= 1 {
            let position = timer.position;
            self.active.remove(step_id);
            log::info!("Timer for step {position} finished");
            return Some(TimerCompletion {
                step_id: step_id.to_string(),
                position,
            });
        }

        timer.remaining -= 1;
        None
    }

    /// Seconds left on a running countdown.
    pub fn remaining(&self, step_id: &str) -> Option<u64> {
        self.active.get(step_id).map(|t| t.remaining)
    }

    pub fn is_running(&self, step_id: &str) -> bool {
        self.active.contains_key(step_id)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Stop every countdown without raising completions.
    pub fn cancel_all(&mut self) {
        if !self.active.is_empty() {
            log::debug!("Cancelling {} step timer(s)", self.active.len());
        }
        self.active.clear();
    }
}

/// Countdown length in whole seconds, never zero.
pub fn duration_seconds(minutes: f64) -> u64 {
    let seconds = (minutes * 60.0).round();
    if seconds.is_finite() && seconds >= 1.0 {
        seconds as u64
    } else {
        1
    }
}

/// `m:ss` clock face.
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generation_of(event: SessionEvent) -> u64 {
        match event {
            SessionEvent::TimerTick { generation, .. } => generation,
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn completes_once_after_every_second_ticks() {
        let (tx, rx) = async_channel::unbounded();
        let mut timers = StepTimers::new();
        assert_eq!(timers.toggle("s2", 2, 2.0, &tx), TimerToggle::Started);
        assert_eq!(timers.remaining("s2"), Some(120));

        let mut ticks = 0;
        let mut completions = Vec::new();
        while completions.is_empty() {
            let generation = generation_of(rx.recv().await.unwrap());
            ticks += 1;
            if let Some(done) = timers.tick("s2", generation) {
                completions.push(done);
            } else {
                assert!(timers.remaining("s2").unwrap() >= 1);
            }
        }

        assert_eq!(ticks, 120);
        assert_eq!(
            completions,
            vec![TimerCompletion {
                step_id: "s2".into(),
                position: 2
            }]
        );
        assert!(!timers.is_running("s2"));

        // No further ticks, no second completion.
        tokio::time::sleep(Duration::from_secs(300)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(timers.tick("s2", 0), None);
    }

    #[tokio::test(start_paused = true)]
    async fn toggling_twice_cancels_without_completion() {
        let (tx, rx) = async_channel::unbounded();
        let mut timers = StepTimers::new();
        timers.toggle("s1", 1, 2.0, &tx);
        tokio::time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(timers.toggle("s1", 1, 2.0, &tx), TimerToggle::Cancelled);
        assert!(!timers.is_running("s1"));

        tokio::time::sleep(Duration::from_secs(300)).await;
        let mut completions = 0;
        while let Ok(event) = rx.try_recv() {
            if timers.tick("s1", generation_of(event)).is_some() {
                completions += 1;
            }
        }
        assert_eq!(completions, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_ticks_do_not_touch_a_restarted_timer() {
        let (tx, _rx) = async_channel::unbounded();
        let mut timers = StepTimers::new();
        timers.toggle("s1", 1, 1.0, &tx);
        timers.toggle("s1", 1, 1.0, &tx);
        timers.toggle("s1", 1, 1.0, &tx);

        assert_eq!(timers.tick("s1", 0), None);
        assert_eq!(timers.remaining("s1"), Some(60));
        assert_eq!(timers.tick("s1", 1), None);
        assert_eq!(timers.remaining("s1"), Some(59));
    }

    #[tokio::test(start_paused = true)]
    async fn steps_count_down_independently() {
        let (tx, _rx) = async_channel::unbounded();
        let mut timers = StepTimers::new();
        timers.toggle("s1", 1, 2.0, &tx);
        timers.toggle("s3", 3, 0.5, &tx);
        assert_eq!(timers.active_count(), 2);

        timers.tick("s3", 1);
        assert_eq!(timers.remaining("s1"), Some(120));
        assert_eq!(timers.remaining("s3"), Some(29));

        timers.cancel_all();
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn durations_round_to_whole_seconds() {
        assert_eq!(duration_seconds(2.0), 120);
        assert_eq!(duration_seconds(0.25), 15);
        assert_eq!(duration_seconds(0.001), 1);
        assert_eq!(duration_seconds(f64::NAN), 1);
    }

    #[test]
    fn clock_face() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(1200), "20:00");
    }
}
