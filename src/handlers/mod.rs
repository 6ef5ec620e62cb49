pub mod race;
pub mod screens;
pub mod standings;
