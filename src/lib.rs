pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod random;
pub mod renderer;
pub mod snake;
pub mod surface;
pub mod terminal_runtime;
pub mod ui;
