// Client for a four-player Schafkopf table. The server owns the game; this crate turns the
// snapshots it sends into view models and hands the actions it offers back to it.

pub mod actions;
pub mod api;
pub mod codec;
pub mod config;
pub mod events;
pub mod relative;
pub mod render;
pub mod session;
pub mod types;
pub mod view;
pub mod web_bridge;
