//! Cosmetic initialization progress.
//!
//! Seven named phases are marked complete one after another with a fixed
//! delay in between. No work happens here; the sequence only gives the user
//! something to watch. [`PhaseSequence`] is the pure state machine and
//! [`StepProgress`] drives it on a timer and publishes every change on a
//! `watch` channel.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Phase {
    pub title: &'static str,
    pub description: &'static str,
}

pub const PHASES: [Phase; 7] = [
    Phase {
        title: "Create Project",
        description: "Store project with metadata (goals, references)",
    },
    Phase {
        title: "Extract Details",
        description: "Extract key details and goals from project metadata",
    },
    Phase {
        title: "Analyze References",
        description: "Analyze competitor references for insights",
    },
    Phase {
        title: "Generate Features",
        description: "Create a list of features based on goals and references",
    },
    Phase {
        title: "Break Down Flows",
        description: "Break references into detailed user flows",
    },
    Phase {
        title: "Link Features to References",
        description: "Connect each feature and flow to relevant references",
    },
    Phase {
        title: "Initialize Structure",
        description: "Set up project structure based on features and flows",
    },
];

pub const DEFAULT_PHASE_DELAY: Duration = Duration::from_millis(1000);

/// Completion state of the seven phases.
///
/// `cursor` is 0 before start, then the 1-based number of the phase being
/// processed, and `PHASES.len() + 1` once everything is done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseSequence {
    completed: [bool; PHASES.len()],
    cursor: usize,
    progress: u8,
}

impl Default for PhaseSequence {
    fn default() -> Self {
        Self {
            completed: [false; PHASES.len()],
            cursor: 0,
            progress: 0,
        }
    }
}

impl PhaseSequence {
    pub fn completed(&self) -> &[bool] {
        &self.completed
    }

    pub fn completed_count(&self) -> usize {
        self.completed.iter().filter(|c| **c).count()
    }

    /// Percentage shown on the progress bar.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_idle(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_finished(&self) -> bool {
        self.completed.iter().all(|c| *c)
    }

    /// Enter phase 1.
    pub fn begin(&self) -> Self {
        Self {
            cursor: 1,
            ..self.clone()
        }
    }

    /// Complete the current phase and move to the next one. An idle
    /// sequence is begun first.
    pub fn tick(&self) -> Self {
        let mut next = if self.is_idle() { self.begin() } else { self.clone() };
        if let Some(done) = next.completed.get_mut(next.cursor - 1) {
            *done = true;
        }
        next.cursor += 1;
        next.progress = percent(next.completed_count(), PHASES.len());
        next
    }

    /// The sequence as it should look while the wizard sits on `step`.
    ///
    /// Steps 1 and below clear everything; later steps mark the phases that
    /// step implies as done.
    pub fn at_wizard_step(step: u8) -> Self {
        let (done, cursor, progress) = match step {
            0 | 1 => return Self::default(),
            2 => (1, 1, 14),
            3 => (3, 3, 42),
            4 => (4, 4, 57),
            _ => (6, 6, 85),
        };
        let mut completed = [false; PHASES.len()];
        completed.iter_mut().take(done).for_each(|c| *c = true);
        Self {
            completed,
            cursor,
            progress,
        }
    }
}

/// `round(100 * done / total)`.
fn percent(done: usize, total: usize) -> u8 {
    ((100 * done + total / 2) / total) as u8
}

/// Runs a [`PhaseSequence`] on a fixed timer.
///
/// There is no cancellation: once [`start`](Self::start) is awaited it runs
/// through all phases.
#[derive(Debug)]
pub struct StepProgress {
    state: PhaseSequence,
    delay: Duration,
    tx: watch::Sender<PhaseSequence>,
}

impl Default for StepProgress {
    fn default() -> Self {
        Self::new(DEFAULT_PHASE_DELAY)
    }
}

impl StepProgress {
    pub fn new(delay: Duration) -> Self {
        let (tx, _) = watch::channel(PhaseSequence::default());
        Self {
            state: PhaseSequence::default(),
            delay,
            tx,
        }
    }

    pub fn state(&self) -> &PhaseSequence {
        &self.state
    }

    /// Receive every state change. The sequence is finished when
    /// [`PhaseSequence::is_finished`] holds.
    pub fn subscribe(&self) -> watch::Receiver<PhaseSequence> {
        self.tx.subscribe()
    }

    /// Run all phases. Returns `false` without doing anything if the
    /// sequence has already started.
    pub async fn start(&mut self) -> bool {
        if !self.state.is_idle() {
            tracing::debug!(cursor = self.state.cursor(), "Progress already started");
            return false;
        }

        self.publish(self.state.begin());
        while !self.state.is_finished() {
            tokio::time::sleep(self.delay).await;
            self.publish(self.state.tick());
            tracing::debug!(
                phase = PHASES[self.state.completed_count() - 1].title,
                progress = self.state.progress(),
                "Phase complete"
            );
        }
        tracing::info!("Initialization phases complete");
        true
    }

    pub fn reset(&mut self) {
        self.publish(PhaseSequence::default());
    }

    pub fn sync_to_wizard_step(&mut self, step: u8) {
        self.publish(PhaseSequence::at_wizard_step(step));
    }

    fn publish(&mut self, next: PhaseSequence) {
        self.state = next;
        self.tx.send_replace(self.state.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_marks_phases_in_order() {
        let seq = PhaseSequence::default().begin().tick().tick();
        assert_eq!(&seq.completed()[..3], &[true, true, false]);
        assert_eq!(seq.cursor(), 3);
        assert_eq!(seq.progress(), 29);
    }

    #[test]
    fn ticking_from_idle_begins_the_sequence() {
        let mut seq = PhaseSequence::default();
        for _ in 0..PHASES.len() {
            seq = seq.tick();
        }
        assert!(seq.is_finished());
        assert_eq!(seq.completed_count(), 7);
        assert_eq!(seq.progress(), 100);
    }

    #[test]
    fn percent_rounds() {
        let values: Vec<u8> = (0..=7).map(|k| percent(k, 7)).collect();
        assert_eq!(values, vec![0, 14, 29, 43, 57, 71, 86, 100]);
    }

    #[test]
    fn wizard_step_ladder() {
        let ladder: Vec<(usize, u8)> = (1..=5)
            .map(|s| {
                let seq = PhaseSequence::at_wizard_step(s);
                (seq.completed_count(), seq.progress())
            })
            .collect();
        assert_eq!(ladder, vec![(0, 0), (1, 14), (3, 42), (4, 57), (6, 85)]);
    }
}
