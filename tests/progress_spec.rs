//! Initialization progress tests.
//!
//! Timer-driven tests run on a paused clock so the phase delays elapse
//! instantly.

use std::time::Duration;

use project_init::progress::{PhaseSequence, StepProgress, PHASES};

mod phase_sequence {
    use super::*;

    #[test]
    fn reaches_100_only_when_all_phases_complete() {
        let mut seq = PhaseSequence::default().begin();
        let mut seen = vec![seq.progress()];
        while !seq.is_finished() {
            assert!(seq.progress() < 100);
            seq = seq.tick();
            seen.push(seq.progress());
        }
        assert_eq!(seq.progress(), 100);
        assert_eq!(seq.completed_count(), PHASES.len());
        assert_eq!(seen, vec![0, 14, 29, 43, 57, 71, 86, 100]);
    }

    #[test]
    fn progress_is_monotonic_and_follows_rounding() {
        let mut seq = PhaseSequence::default().begin();
        let mut last = 0;
        for done in 1..=PHASES.len() {
            seq = seq.tick();
            let expected = (100.0 * done as f64 / PHASES.len() as f64).round() as u8;
            assert_eq!(seq.progress(), expected);
            assert!(seq.progress() >= last);
            last = seq.progress();
        }
    }
}

mod step_progress {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn runs_every_phase_and_signals_completion() {
        let mut progress = StepProgress::new(Duration::from_millis(1000));
        let mut rx = progress.subscribe();

        let watcher = tokio::spawn(async move {
            let mut observed = Vec::new();
            while rx.changed().await.is_ok() {
                let seq = rx.borrow_and_update().clone();
                observed.push(seq.progress());
                if seq.is_finished() {
                    break;
                }
            }
            observed
        });

        let started = tokio::time::Instant::now();
        assert!(progress.start().await);
        assert!(started.elapsed() >= Duration::from_millis(7000));
        assert!(progress.state().is_finished());
        assert_eq!(progress.state().progress(), 100);

        let observed = watcher.await.expect("watcher panicked");
        assert_eq!(observed.last(), Some(&100));
        assert!(observed.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn start_is_a_noop_once_started() {
        let mut progress = StepProgress::new(Duration::from_millis(10));
        assert!(progress.start().await);
        assert!(!progress.start().await);
        assert_eq!(progress.state().progress(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_allows_another_run() {
        let mut progress = StepProgress::new(Duration::from_millis(10));
        progress.start().await;
        progress.reset();
        assert!(progress.state().is_idle());
        assert_eq!(progress.state().progress(), 0);
        assert!(progress.start().await);
    }

    #[tokio::test(start_paused = true)]
    async fn wizard_sync_blocks_start() {
        let mut progress = StepProgress::new(Duration::from_millis(10));
        progress.sync_to_wizard_step(3);
        assert_eq!(progress.state().progress(), 42);
        assert!(!progress.start().await);

        progress.sync_to_wizard_step(1);
        assert!(progress.state().is_idle());
        assert!(progress.start().await);
    }
}
