pub mod category_repository;
pub mod user_repository;

pub use category_repository::CategoryRepository;
pub use user_repository::UserRepository;
