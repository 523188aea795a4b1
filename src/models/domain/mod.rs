pub mod user;
pub use test::{Question, Test};
pub use user::{Role, User};
