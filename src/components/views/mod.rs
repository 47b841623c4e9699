mod home;
mod library;
mod player;

pub use home::HomeView;
pub use library::LibraryView;
pub use player::PlayerView;
