//! Arcade assessment instrument.
//!
//! A real-time falling-object simulation: the player steers an actor to
//! collect objects and avoid hazards while a countdown runs. Every tick
//! advances the clock, spawner, motion resolver and scoring machine in a
//! fixed order, feeding behavioral signals into the telemetry recorder.

pub mod engine;
pub mod motion;
pub mod particles;
pub mod scoring;
pub mod spawner;

pub use engine::{ArcadeConfig, ArcadeError, ArcadeInstrument, InputState, Surface, TickSummary};
pub use motion::Actor;
pub use scoring::ScoreBoard;
pub use spawner::Spawner;
