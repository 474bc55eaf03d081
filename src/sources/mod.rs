pub mod desktop;
pub mod ini;
pub mod tiles;
