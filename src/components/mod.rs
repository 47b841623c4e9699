//! The components module contains all shared components for our app.

mod app_view;
mod full_player;
mod icons;
mod layout;
mod mini_player;
mod play_button;
mod player_bridge;
mod progress_bar;
mod track_list;
mod visualizer;
pub mod views;

pub use app_view::*;
pub use full_player::*;
pub use icons::*;
pub use layout::*;
pub use mini_player::*;
pub use play_button::*;
pub use player_bridge::*;
pub use progress_bar::*;
pub use track_list::*;
pub use visualizer::*;
