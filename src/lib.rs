pub mod camera;
pub mod config;
pub mod events;
pub mod grid;
pub mod io;
pub mod render;
pub mod rule_set;
pub mod sim;
pub mod surface;
