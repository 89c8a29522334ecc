pub mod customer_data_platform;
pub mod identity_verification;
pub mod link_identity;
pub mod risk_score;

pub use customer_data_platform::{CdpConfig, CustomerDataPlatformHandler};
pub use identity_verification::{IdentityVerificationHandler, IdvConfig};
pub use link_identity::{LinkIdentityConfig, LinkIdentityHandler};
pub use risk_score::{RiskScoreConfig, RiskScoreHandler};

#[cfg(test)]
pub(crate) mod test_support;
