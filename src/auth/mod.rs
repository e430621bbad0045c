//! Authentication: token codec, session claims, bearer gate and password hashing

pub mod claims;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use claims::{AuthenticatedIdentity, SessionClaims, TOKEN_LIFETIME_SECS};
pub use error::AuthError;
pub use jwt::TokenCodec;
pub use middleware::{authenticate, extract_token, jwt_auth_middleware};
pub use password::{CredentialHasher, PasswordHasher};
