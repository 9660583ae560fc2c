mod auth_result;
mod login_request;
mod registration_request;
mod token;

pub use auth_result::{AuthData, AuthEnvelope, AuthResult, AuthenticatedUser};
pub use login_request::LoginRequest;
pub use registration_request::RegistrationRequest;
pub use token::Token;
