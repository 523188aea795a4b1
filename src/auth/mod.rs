pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod utils;

pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::{AuthMiddleware, AuthenticatedUser};
pub use password::{hash_password, verify_password};
pub use utils::{require_admin, require_role, require_student};
