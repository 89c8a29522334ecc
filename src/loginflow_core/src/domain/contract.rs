//! Wire-format constants shared with consuming applications and the
//! integration API. These literals are interoperability contracts:
//! relying parties match on them byte for byte.

/// API host used when no per-integration override is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://api.example.com";

/// Claim carrying the raw risk score.
pub const RISK_SCORE_CLAIM: &str = "https://risk/score";

/// Claim carrying the linked external identity id.
pub const LINK_ID_CLAIM: &str = "https://your-claim-namespace/id";

/// Identity-verification claims, set in the order status, last-check, id
/// on continuation.
pub const IDV_ID_CLAIM: &str = "https://id-verification/id";
pub const IDV_STATUS_CLAIM: &str = "https://id-verification/status";
pub const IDV_LAST_CHECK_CLAIM: &str = "https://id-verification/last-check";

/// Namespace key under which handlers persist user app metadata.
pub const METADATA_NAMESPACE: &str = "yourMetadataNamespace";

// Reason codes passed to AccessControl::deny.
pub const DENY_API_REQUEST_FAILED: &str = "api_request_failed";
pub const DENY_RISK_THRESHOLD_REACHED: &str = "risk_score_threshold_reached";
pub const DENY_IDV_CONFIGURATION_ERROR: &str = "idv_configuration_error";
pub const DENY_IDV_INTERACTION_REQUIRED: &str = "idv_interaction_required";
pub const DENY_IDV_VERIFICATION_FAILED: &str = "idv_verification_failed";

/// Lifetime of the signed redirect token handed to the verification
/// domain.
pub const REDIRECT_TOKEN_TTL_SECONDS: i64 = 600;

/// Query parameter carrying the signed token in both directions.
pub const REDIRECT_TOKEN_PARAMETER: &str = "token";

/// Identity-verification status literals echoed into claims.
pub const IDV_STATUS_VALID: &str = "valid";
pub const IDV_STATUS_SKIPPED: &str = "skipped";
pub const IDV_STATUS_SUCCESS: &str = "success";

/// Transaction protocols that follow an earlier login event; the
/// customer-data-platform export skips these to avoid double counting.
pub const SKIPPED_PROTOCOLS: [&str; 3] = [
    "oauth2-access-token",
    "oauth2-refresh-token",
    "oauth2-token-exchange",
];
