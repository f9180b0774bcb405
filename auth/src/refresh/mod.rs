pub mod errors;
pub mod issuer;
pub mod record;

pub use errors::RefreshTokenError;
pub use issuer::RefreshToken;
pub use issuer::RefreshTokenIssuer;
pub use record::RefreshTokenRecord;
pub use record::REFRESH_TOKEN_VALIDITY_DAYS;
