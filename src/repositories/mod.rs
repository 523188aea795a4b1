pub mod test_repository;
pub mod user_repository;

pub use test_repository::{MongoTestRepository, TestRepository};
pub use user_repository::{MongoUserRepository, UserRepository};

#[cfg(test)]
pub use test_repository::MockTestRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
