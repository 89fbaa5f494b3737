//! Momentum indicators: stochastic oscillator

pub mod stochastic;

pub use stochastic::*;
