pub mod handlers;
pub mod outcome;

pub use handlers::{
    customer_data_platform::{CdpConfig, CustomerDataPlatformHandler},
    identity_verification::{IdentityVerificationHandler, IdvConfig},
    link_identity::{LinkIdentityConfig, LinkIdentityHandler},
    risk_score::{RiskScoreConfig, RiskScoreHandler},
};
pub use outcome::Outcome;
