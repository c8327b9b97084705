//! Slot Rendering
//!
//! Turns named extension points into ordered fragment trees by aggregating
//! every registered plugin's contributions, in registration order, gated by
//! guard predicates over live shared state.

pub mod error;
pub mod fragment;
pub mod renderer;
