pub mod control;
pub mod http;
pub mod redirect;

pub use control::InMemoryControl;
pub use http::HttpIntegrationApi;
pub use redirect::{decode_redirect_token, encode_redirect_token};
