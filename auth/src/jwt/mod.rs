pub mod claims;
pub mod errors;
pub mod key;
pub mod service;

pub use claims::Claims;
pub use errors::TokenError;
pub use key::SigningKey;
pub use service::TokenService;
pub use service::TOKEN_TTL_DAYS;
