pub mod driver;
pub mod error;
pub mod race;
pub mod slider;
pub mod view_state;
