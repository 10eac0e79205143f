pub mod assets;
pub mod camera;
pub mod core;
pub mod hud;
pub mod input;
pub mod loading;
pub mod media;
pub mod render;
pub mod scene;
pub mod store;
pub mod systems;
pub mod tv;
