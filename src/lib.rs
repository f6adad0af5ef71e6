/*
ShootemUp - Arcade Shooter
*/
pub mod hud;
pub mod level;
pub mod level_controller;
pub mod level_loader;
pub mod settings;
pub mod spawner;
pub mod systems;
