//! Spotlight rotation — cycles through snippet frames on a timed interval.
//!
//! [`SpotlightController`] owns the single rotation task. Starting a new
//! rotation always cancels the previous one first, so at most one timer is
//! live at any moment. Surfaces observe the current display through a
//! `watch` channel.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::snippet::{SpotlightFrame, decompose};

/// What the spotlight area should currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotlightDisplay {
    /// No rotation is active.
    Placeholder,
    /// A frame from the active rotation.
    Frame(SpotlightFrame),
}

impl SpotlightDisplay {
    /// The frame, if a rotation is showing one.
    pub fn as_frame(&self) -> Option<&SpotlightFrame> {
        match self {
            SpotlightDisplay::Frame(frame) => Some(frame),
            SpotlightDisplay::Placeholder => None,
        }
    }
}

/// Owns the rotation task and the display channel.
pub struct SpotlightController {
    interval: Duration,
    display_tx: watch::Sender<SpotlightDisplay>,
    // Held so publishing succeeds before any surface subscribes.
    _display_rx: watch::Receiver<SpotlightDisplay>,
    task: Option<JoinHandle<()>>,
}

impl SpotlightController {
    /// Create an idle controller that ticks every `interval` once started.
    pub fn new(interval: Duration) -> Self {
        let (display_tx, _display_rx) = watch::channel(SpotlightDisplay::Placeholder);
        Self {
            interval,
            display_tx,
            _display_rx,
            task: None,
        }
    }

    /// Get a receiver for display updates.
    pub fn subscribe(&self) -> watch::Receiver<SpotlightDisplay> {
        self.display_tx.subscribe()
    }

    /// Whether a rotation task is currently live.
    pub fn is_rotating(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Start rotating through `snippets` in round-robin order.
    ///
    /// Any previous rotation is cancelled before the new one begins. An
    /// empty list resets the display to the placeholder and schedules no
    /// timer. Otherwise the first frame is published immediately and the
    /// spawned task advances the index by one on every tick.
    pub fn start(&mut self, snippets: Vec<String>, term: &str) {
        self.cancel();

        if snippets.is_empty() {
            let _ = self.display_tx.send(SpotlightDisplay::Placeholder);
            return;
        }

        let _ = self
            .display_tx
            .send(SpotlightDisplay::Frame(decompose(&snippets[0], term)));

        let term = term.to_string();
        let display_tx = self.display_tx.clone();
        let period = self.interval;
        debug!(clips = snippets.len(), ?period, "spotlight rotation started");

        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick of an interval fires immediately; the first
            // frame already went out above, so swallow it.
            ticker.tick().await;

            let mut index: usize = 1;
            loop {
                ticker.tick().await;
                let snippet = &snippets[index % snippets.len()];
                let _ = display_tx.send(SpotlightDisplay::Frame(decompose(snippet, &term)));
                index = index.wrapping_add(1);
            }
        }));
    }

    /// Cancel any active rotation and reset the display to the placeholder.
    pub fn clear(&mut self) {
        self.cancel();
        let _ = self.display_tx.send(SpotlightDisplay::Placeholder);
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("spotlight rotation cancelled");
        }
    }
}

impl Drop for SpotlightController {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PERIOD: Duration = Duration::from_millis(2600);

    fn frame(rx: &mut watch::Receiver<SpotlightDisplay>) -> SpotlightFrame {
        rx.borrow_and_update()
            .as_frame()
            .expect("expected an active frame")
            .clone()
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_frame_is_published_immediately() {
        let mut controller = SpotlightController::new(PERIOD);
        let mut rx = controller.subscribe();

        controller.start(vec!["tick one".to_string()], "tick");

        // No time has passed; the first frame must already be out.
        assert_eq!(frame(&mut rx).right, "one");
        assert!(controller.is_rotating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_round_robin_order() {
        let mut controller = SpotlightController::new(PERIOD);
        let mut rx = controller.subscribe();

        controller.start(
            vec![
                "tick one".to_string(),
                "tick two".to_string(),
                "tick three".to_string(),
            ],
            "tick",
        );
        assert_eq!(frame(&mut rx).right, "one");

        for expected in ["two", "three", "one", "two", "three"] {
            rx.changed().await.unwrap();
            assert_eq!(frame(&mut rx).right, expected);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_resets_cycle_and_cancels_previous_timer() {
        let mut controller = SpotlightController::new(PERIOD);
        let mut rx = controller.subscribe();

        controller.start(
            vec![
                "tick one".to_string(),
                "tick two".to_string(),
                "tick three".to_string(),
            ],
            "tick",
        );
        assert_eq!(frame(&mut rx).right, "one");
        rx.changed().await.unwrap();
        assert_eq!(frame(&mut rx).right, "two");

        // Restart mid-rotation with a fresh list.
        controller.start(vec!["clip x".to_string(), "clip y".to_string()], "clip");
        let first = frame(&mut rx);
        assert_eq!(first.word, "clip");
        assert_eq!(first.right, "x");

        // The old timer must no longer fire: every subsequent frame comes
        // from the new list, starting fresh at index 0.
        for expected in ["y", "x", "y"] {
            rx.changed().await.unwrap();
            let current = frame(&mut rx);
            assert_eq!(current.word, "clip");
            assert_eq!(current.right, expected);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_list_shows_placeholder_without_timer() {
        let mut controller = SpotlightController::new(PERIOD);
        let mut rx = controller.subscribe();

        controller.start(Vec::new(), "anything");

        assert_eq!(*rx.borrow_and_update(), SpotlightDisplay::Placeholder);
        assert!(!controller.is_rotating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_start_cancels_running_rotation() {
        let mut controller = SpotlightController::new(PERIOD);
        let mut rx = controller.subscribe();

        controller.start(vec!["tick one".to_string()], "tick");
        assert!(controller.is_rotating());

        controller.start(Vec::new(), "tick");
        assert_eq!(*rx.borrow_and_update(), SpotlightDisplay::Placeholder);
        assert!(!controller.is_rotating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_returns_to_placeholder() {
        let mut controller = SpotlightController::new(PERIOD);
        let mut rx = controller.subscribe();

        controller.start(vec!["tick one".to_string()], "tick");
        controller.clear();

        assert_eq!(*rx.borrow_and_update(), SpotlightDisplay::Placeholder);
        assert!(!controller.is_rotating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_snippet_repeats() {
        let mut controller = SpotlightController::new(PERIOD);
        let mut rx = controller.subscribe();

        controller.start(vec!["tick only".to_string()], "tick");
        assert_eq!(frame(&mut rx).right, "only");

        rx.changed().await.unwrap();
        assert_eq!(frame(&mut rx).right, "only");
    }

    #[test]
    fn test_display_as_frame() {
        assert!(SpotlightDisplay::Placeholder.as_frame().is_none());
        let display = SpotlightDisplay::Frame(SpotlightFrame {
            left: String::new(),
            word: "w".to_string(),
            right: String::new(),
        });
        assert_eq!(display.as_frame().unwrap().word, "w");
    }
}
