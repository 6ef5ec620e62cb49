pub mod countdown;
pub mod details;
pub mod holder;
pub mod home;

pub use details::DetailsScreen;
pub use holder::StateHolder;
pub use home::HomeScreen;
