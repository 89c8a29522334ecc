pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{app_metadata, contract, event, identity_providers, payloads};

pub use domain::{
    app_metadata::{IdvMetadata, LinkedIdentityMetadata},
    event::{
        Client, GeoIp, Identity, LoginEvent, LoginStats, RequestInfo, Transaction, UserProfile,
    },
    identity_providers::cdp_provider_name,
    payloads::{
        ApplicationAttributes, EventAttributes, EventLocation, LinkIdentityPayload, LinkedIdentity,
        LoginEventPayload, LoginKind, RiskAssessment, RiskLocation, RiskPayload, UserAttributes,
        UserIdentities,
    },
};

pub use ports::{
    control::{
        AccessControl, EncodeTokenRequest, RedirectFlow, RedirectFlowError, TokenClaims,
        UserMetadataStore, ValidateTokenRequest,
    },
    services::{ApiCredentials, IntegrationApi, IntegrationApiError},
};
