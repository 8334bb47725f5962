pub mod auth_controller;
pub mod favorite_controller;
pub mod football_controller;

pub use auth_controller::AuthController;
pub use favorite_controller::FavoriteController;
pub use football_controller::{FootballController, FootballQuery};
