//! Game phase transitions
//!
//! `Ready` → `Playing` ⇄ `Paused`, `Playing` → `GameOver` → (reset) → `Playing`.
//! Signals that don't apply to the current phase are ignored.

use super::state::{GameEvent, GamePhase, SimulationState};

impl SimulationState {
    /// Start or resume. While assets are still loading the request is latched.
    pub fn start(&mut self) {
        match self.phase {
            GamePhase::Ready if self.assets.all_ready() => {
                self.phase = GamePhase::Playing;
                self.current_speed = self.speed.base_speed;
                self.events.push(GameEvent::Started);
                log::info!("Run started");
            }
            GamePhase::Ready => {
                self.assets.start_requested = true;
                log::info!("Start requested, waiting for assets");
            }
            GamePhase::Paused => self.resume(),
            GamePhase::Playing | GamePhase::GameOver => {}
        }
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            self.current_speed = 0.0;
            self.events.push(GameEvent::Paused);
            log::info!("Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            self.current_speed = self.speed.base_speed;
            self.events.push(GameEvent::Resumed);
            log::info!("Resumed");
        }
    }

    /// Flip between `Playing` and `Paused`; anything else starts if it can
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            GamePhase::Ready => self.start(),
            GamePhase::GameOver => {}
        }
    }

    /// End the run. Idempotent: only the first call has any effect.
    pub fn end_game(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.current_speed = 0.0;
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
        log::info!("Game Over! Final Score: {}", self.score);
    }

    /// Restart after game over with the startup layout
    pub fn reset(&mut self) {
        if self.phase != GamePhase::GameOver {
            log::debug!("Reset ignored in phase {:?}", self.phase);
            return;
        }

        self.score = 0;
        self.scored.clear();
        self.speed.reset(self.tuning.initial_speed);
        self.current_speed = self.speed.base_speed;
        if let Some(rider) = self.rider.as_mut() {
            rider.reset_position(&self.tuning);
        }
        self.restore_obstacle_layout();

        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Reset);
        log::info!("Game reset!");
    }
}
