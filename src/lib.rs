//! # Loginflow - Login-Flow Action Handlers
//!
//! This is a facade crate that re-exports all public APIs from the loginflow
//! components. Use this crate to wire login-flow handlers into a host binding
//! in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! loginflow = { path = "../loginflow" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `LoginEvent`, `UserProfile`, payload types, wire
//!   contract constants
//! - **Port traits**: `AccessControl`, `TokenClaims`, `UserMetadataStore`,
//!   `RedirectFlow`, `IntegrationApi`
//! - **Handlers**: `CustomerDataPlatformHandler`, `LinkIdentityHandler`,
//!   `RiskScoreHandler`, `IdentityVerificationHandler`
//! - **Adapters**: `HttpIntegrationApi`, `InMemoryControl`, redirect token
//!   codec

// ============================================================================
// Core Domain Types and Ports
// ============================================================================

/// Core domain types, wire-contract constants and port traits
pub mod core {
    pub use loginflow_core::*;
}

// Re-export most commonly used core types at the root level
pub use loginflow_core::{
    Client, GeoIp, Identity, LoginEvent, LoginStats, RequestInfo, Transaction, UserProfile,
};

/// Port trait definitions
pub mod ports {
    pub use loginflow_core::{
        AccessControl, ApiCredentials, EncodeTokenRequest, IntegrationApi, IntegrationApiError,
        RedirectFlow, RedirectFlowError, TokenClaims, UserMetadataStore, ValidateTokenRequest,
    };
}

// Re-export port traits at root level
pub use loginflow_core::{
    AccessControl, ApiCredentials, IntegrationApi, IntegrationApiError, RedirectFlow,
    RedirectFlowError, TokenClaims, UserMetadataStore,
};

// ============================================================================
// Handlers (Application Layer)
// ============================================================================

/// Login-flow handlers
pub mod handlers {
    pub use loginflow_application::handlers::*;
}

// Re-export handlers at root level
pub use loginflow_application::{
    CdpConfig, CustomerDataPlatformHandler, IdentityVerificationHandler, IdvConfig,
    LinkIdentityConfig, LinkIdentityHandler, Outcome, RiskScoreConfig, RiskScoreHandler,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Outbound HTTP client
    pub mod http {
        pub use loginflow_adapters::http::*;
    }

    /// In-memory control surface
    pub mod control {
        pub use loginflow_adapters::control::*;
    }

    /// Signed redirect token codec
    pub mod redirect {
        pub use loginflow_adapters::redirect::*;
    }
}

// Re-export commonly used adapters at root level
pub use loginflow_adapters::{
    HttpIntegrationApi, InMemoryControl,
    redirect::{decode_redirect_token, encode_redirect_token},
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the integration API port
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
