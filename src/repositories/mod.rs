pub mod favorite_repository;
pub mod user_repository;

pub use favorite_repository::FavoriteRepository;
pub use user_repository::UserRepository;
