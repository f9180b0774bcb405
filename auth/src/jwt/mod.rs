pub mod claims;
pub mod codec;
pub mod errors;
pub mod token;

pub use claims::Claims;
pub use claims::ISSUER;
pub use codec::AccessTokenCodec;
pub use errors::TokenError;
pub use token::AccessToken;
