//! Request and response bodies for the integration API. Field names are
//! wire contracts; serde renames pin them independently of Rust naming.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::event::GeoIp;

/// Body for `POST /v2/events`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginEventPayload {
    pub events_attributes: EventAttributes,
    pub user_attributes: UserAttributes,
    pub user_identities: UserIdentities,
    pub application_attributes: ApplicationAttributes,
    pub ip: String,
    /// Always present, possibly empty; individual fields are omitted when
    /// the event carries no value for them.
    pub location: EventLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventAttributes {
    pub name: LoginKind,
}

/// Whether this login counts as a first registration or a repeat login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginKind {
    Registration,
    Login,
}

impl LoginKind {
    /// The first counted login is a registration; everything after is a
    /// login. `logins_count` includes the current attempt.
    pub fn from_logins_count(logins_count: u64) -> Self {
        if logins_count > 1 {
            LoginKind::Login
        } else {
            LoginKind::Registration
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// The user's known identities, keyed the way the customer-data platform
/// expects. Mapped upstream providers flatten into the same object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserIdentities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub auth0_user_id: String,
    #[serde(flatten)]
    pub providers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplicationAttributes {
    pub name: String,
}

/// Location object for the events payload (snake_case keys).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,
}

impl From<&GeoIp> for EventLocation {
    fn from(geoip: &GeoIp) -> Self {
        Self {
            latitude: geoip.latitude,
            longitude: geoip.longitude,
            country_code: geoip.country_code.clone(),
            city_name: geoip.city_name.clone(),
        }
    }
}

/// Body for `POST /v2/link-identity`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkIdentityPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    pub user_email_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_phone: Option<String>,
    pub user_phone_verified: bool,
    pub user_auth0_id: String,
}

/// Response from `POST /v2/link-identity`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkedIdentity {
    pub id: String,
}

/// Body for `POST /v2/risk`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    pub user_email_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_phone: Option<String>,
    pub user_phone_verified: bool,
    pub login_ip: String,
    pub login_user_agent: String,
    /// Omitted entirely when the event carries no geolocation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<RiskLocation>,
}

/// Location object for the risk payload (camelCase keys).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,
}

impl From<&GeoIp> for RiskLocation {
    fn from(geoip: &GeoIp) -> Self {
        Self {
            latitude: geoip.latitude,
            longitude: geoip.longitude,
            country_code: geoip.country_code.clone(),
            city_name: geoip.city_name.clone(),
        }
    }
}

/// Response from `POST /v2/risk`. The score is kept as a raw JSON number
/// so the claim re-emits exactly what the API returned.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RiskAssessment {
    pub score: serde_json::Number,
}
