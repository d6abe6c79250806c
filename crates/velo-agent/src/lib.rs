//! `velo-agent` — bicycle agent records and the active population.
//!
//! # Crate layout
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`bicycle`]    | `BicycleParams`, `Kinematics`, `Pending`, `Bicycle`    |
//! | [`population`] | `Population` — id-ordered set of active agents         |
//!
//! # Lifecycle
//!
//! A bicycle is created exactly once, at its scheduled entry tick, from the
//! run's single `ScenarioRng`; its committed state is mutated only during
//! commit phases; it is removed from the population exactly once, the first
//! tick its committed longitudinal position reaches the corridor end, and
//! never reappears.

pub mod bicycle;
pub mod population;


pub use bicycle::{Bicycle, BicycleParams, Kinematics, Pending};
pub use population::Population;
