//! Tournament operations core
//!
//! This crate provides the engines behind tournament planning:
//! - Elo-style expected scores from team average ratings
//! - Round-robin scheduling with day-capacity packing and venue rotation
//! - Seeded best-of-N series simulation
//! - Standings, strength of schedule and close-matchup prediction
//!
//! Every engine takes an immutable [`Event`] and returns owned values. Merging
//! generated matches back into the event is the caller's job, see
//! [`Event::upsert_matches`].

mod analytics;
mod elo;
mod error;
mod models;
mod scheduler;
mod simulator;

pub use analytics::*;
pub use elo::*;
pub use error::*;
pub use models::*;
pub use scheduler::*;
pub use simulator::*;
