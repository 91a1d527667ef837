//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time enters only through frame timestamps passed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (pool order)
//! - No rendering or platform dependencies

pub mod animate;
pub mod assets;
pub mod clock;
pub mod collision;
pub mod lateral;
pub mod phase;
pub mod scoring;
pub mod scroll;
pub mod speed;
pub mod state;
pub mod tick;

pub use animate::{animate_rider, wheel_angular_speed};
pub use assets::{AssetError, AssetGate};
pub use clock::FrameClock;
pub use collision::{CollisionResult, first_collision, rider_obstacle_collision};
pub use lateral::{Direction, HeldDirections, steer};
pub use scoring::track_passes;
pub use scroll::{RecycleRule, RingElement, advance_and_recycle};
pub use speed::SpeedController;
pub use state::{GameEvent, GamePhase, Obstacle, Rider, SimulationState, TrackSegment, WheelPart};
pub use tick::tick;
