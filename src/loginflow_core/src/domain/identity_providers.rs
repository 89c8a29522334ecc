/// Maps the identity platform's connection strategy names onto the names
/// the customer-data platform expects.
///
/// Strategies outside this table are dropped from the payload entirely;
/// the mapping never produces a null or placeholder entry.
pub fn cdp_provider_name(strategy: &str) -> Option<&'static str> {
    match strategy {
        "facebook" => Some("facebook"),
        "twitter" => Some("twitter"),
        "google-oauth2" => Some("google"),
        "windowslive" => Some("microsoft"),
        _ => None,
    }
}
