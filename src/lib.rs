//! Ambient particle backdrop: a full-window field of drifting dots with
//! distance-faded lines linking close pairs, repainted every frame.
//!
//! The simulation core ([`field::ParticleField`]) is plain data with no
//! engine state, so tests and benches drive it directly with a seeded rng;
//! [`field::FieldPlugin`] wires it into a Bevy app for display.

pub mod config;
pub mod field;
