//! UI sink
//!
//! The core never touches the DOM. Frontends implement `UiSink` and feed it
//! the events drained from the simulation after each frame.

use crate::sim::GameEvent;

/// Receives score and run-state updates for display
pub trait UiSink {
    fn update_score(&mut self, score: u32);
    fn notify_game_over(&mut self, final_score: u32);
    fn notify_reset(&mut self);
    /// Loading finished; hide any loading indicator
    fn notify_assets_ready(&mut self) {}
}

/// Forward the UI-relevant events to `sink`
pub fn dispatch(events: &[GameEvent], sink: &mut impl UiSink) {
    for event in events {
        match *event {
            GameEvent::ObstaclePassed { score, .. } => sink.update_score(score),
            GameEvent::GameOver { final_score } => sink.notify_game_over(final_score),
            GameEvent::Reset => {
                sink.notify_reset();
                sink.update_score(0);
            }
            GameEvent::AssetsReady => sink.notify_assets_ready(),
            GameEvent::Started
            | GameEvent::Paused
            | GameEvent::Resumed
            | GameEvent::SpeedIncreased { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl UiSink for Recorder {
        fn update_score(&mut self, score: u32) {
            self.calls.push(format!("score {}", score));
        }
        fn notify_game_over(&mut self, final_score: u32) {
            self.calls.push(format!("over {}", final_score));
        }
        fn notify_reset(&mut self) {
            self.calls.push("reset".into());
        }
    }

    #[test]
    fn test_dispatch() {
        let mut sink = Recorder::default();
        dispatch(
            &[
                GameEvent::AssetsReady,
                GameEvent::Started,
                GameEvent::ObstaclePassed { obstacle: 2, score: 1 },
                GameEvent::SpeedIncreased { speed: 3.5 },
                GameEvent::GameOver { final_score: 1 },
                GameEvent::Reset,
            ],
            &mut sink,
        );
        assert_eq!(sink.calls, vec!["score 1", "over 1", "reset", "score 0"]);
    }
}
