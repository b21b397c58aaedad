//! Billionaire OS: load a net-worth table once, then filter and summarise it
//! for a dashboard. Everything here is independent of the egui front-end.

pub mod data;
pub mod state;
