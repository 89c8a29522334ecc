pub mod integration_api_client;

pub use integration_api_client::HttpIntegrationApi;
