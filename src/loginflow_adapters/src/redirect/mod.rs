pub mod jwt_redirect_token;

pub use jwt_redirect_token::{decode_redirect_token, encode_redirect_token};
