pub mod errors;
pub mod extractor;

pub use errors::CredentialError;
pub use extractor::api_key;
pub use extractor::bearer_token;
pub use extractor::CredentialExtractor;
