use std::collections::HashMap;

use secrecy::Secret;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Read-only snapshot of one login attempt, delivered by the hosting
/// identity platform. Handlers never mutate it; every mutation goes
/// through the control-surface ports instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginEvent {
    #[serde(default)]
    pub transaction: Transaction,
    #[serde(default)]
    pub secrets: HashMap<String, Secret<String>>,
    #[serde(default)]
    pub configuration: HashMap<String, String>,
    #[serde(default)]
    pub client: Client,
    #[serde(default)]
    pub user: UserProfile,
    #[serde(default)]
    pub stats: LoginStats,
    #[serde(default)]
    pub request: RequestInfo,
}

impl LoginEvent {
    /// Look up an entry in the secrets bag.
    pub fn secret(&self, key: &str) -> Option<&Secret<String>> {
        self.secrets.get(key)
    }

    /// Look up an entry in the non-secret configuration bag.
    pub fn config(&self, key: &str) -> Option<&str> {
        self.configuration.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub protocol: String,
}

/// The application the user is logging in to.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Client {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub user_id: String,
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    pub phone_number: Option<String>,
    #[serde(default)]
    pub phone_verified: bool,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    #[serde(default)]
    pub identities: Vec<Identity>,
    #[serde(default)]
    pub app_metadata: HashMap<String, serde_json::Value>,
}

impl UserProfile {
    /// Deserialize the app-metadata entry stored under `namespace`.
    ///
    /// Returns `None` when the namespace is absent or the stored value
    /// does not match the expected shape.
    pub fn namespaced_metadata<T: DeserializeOwned>(&self, namespace: &str) -> Option<T> {
        self.app_metadata
            .get(namespace)
            .cloned()
            .and_then(|value| serde_json::from_value(value).ok())
    }
}

/// One upstream identity linked to the user, named by connection strategy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginStats {
    #[serde(default)]
    pub logins_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestInfo {
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub user_agent: String,
    pub geoip: Option<GeoIp>,
}

/// Geolocation attached to the request by the platform. Every field is
/// optional; absent fields must stay absent in outbound payloads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoIp {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(rename = "countryCode")]
    pub country_code: Option<String>,
    #[serde(rename = "cityName")]
    pub city_name: Option<String>,
}
