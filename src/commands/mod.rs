//! Command implementations for the Clash of Clans lookup CLI

pub mod player;
pub mod serve;
