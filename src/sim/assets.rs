//! Asset readiness gate
//!
//! Model loading happens outside the tick. The frontend reports each
//! completion here; failures are logged and counted as loaded so a broken
//! asset can never hold the game in `Ready` forever.

use thiserror::Error;

use super::state::{GameEvent, SimulationState};

/// Why an asset failed to load, as reported by the frontend loader
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("failed to load {path}: {reason}")]
    LoadFailed { path: String, reason: String },
    #[error("asset {0} is not in the scene graph")]
    Missing(String),
}

/// Which assets have settled (loaded or failed)
#[derive(Debug, Clone)]
pub struct AssetGate {
    rider_settled: bool,
    obstacles_settled: Vec<bool>,
    /// A start signal arrived before everything settled
    pub start_requested: bool,
    ready_announced: bool,
}

impl AssetGate {
    pub fn new(obstacle_count: usize) -> Self {
        Self {
            rider_settled: false,
            obstacles_settled: vec![false; obstacle_count],
            start_requested: false,
            ready_announced: false,
        }
    }

    /// Rider and every obstacle have settled
    pub fn all_ready(&self) -> bool {
        self.rider_settled && !self.obstacles_settled.is_empty() && self.obstacles_settled.iter().all(|&s| s)
    }

    /// Number of obstacle completions received so far
    pub fn obstacles_settled(&self) -> usize {
        self.obstacles_settled.iter().filter(|&&s| s).count()
    }

    pub fn obstacle_total(&self) -> usize {
        self.obstacles_settled.len()
    }
}

impl SimulationState {
    /// The rider model finished loading (or failed)
    pub fn rider_loaded(&mut self, result: Result<(), AssetError>) {
        if self.assets.rider_settled {
            log::warn!("Duplicate rider load completion ignored");
            return;
        }
        self.assets.rider_settled = true;

        match result {
            Ok(()) => {
                self.rider = Some(super::state::Rider::new(&self.tuning));
                log::info!("Rider ready");
            }
            Err(e) => log::error!("Rider asset unavailable, continuing without it: {}", e),
        }
        self.check_all_ready();
    }

    /// The obstacle model for layout index `index` finished loading (or failed)
    pub fn obstacle_loaded(&mut self, index: usize, result: Result<(), AssetError>) {
        let Some(settled) = self.assets.obstacles_settled.get_mut(index) else {
            log::warn!("Obstacle load completion for unknown index {} ignored", index);
            return;
        };
        if *settled {
            log::warn!("Duplicate load completion for obstacle {} ignored", index);
            return;
        }
        *settled = true;

        match result {
            Ok(()) => self.spawn_obstacle(index),
            Err(e) => log::error!("Error loading obstacle {}: {}", index, e),
        }
        log::debug!(
            "Obstacles settled: {}/{}",
            self.assets.obstacles_settled(),
            self.assets.obstacle_total()
        );
        self.check_all_ready();
    }

    fn check_all_ready(&mut self) {
        if self.assets.ready_announced || !self.assets.all_ready() {
            return;
        }
        self.assets.ready_announced = true;
        self.events.push(GameEvent::AssetsReady);
        log::info!("All models loaded!");

        if self.assets.start_requested {
            self.assets.start_requested = false;
            self.start();
        }
    }
}
