/// What a handler decided for the current login attempt.
///
/// Handlers never fail: missing configuration, outbound-call failures
/// and token-validation failures are all caught at the handler boundary
/// and collapse into one of these per the integration's fail-open or
/// fail-closed policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The pipeline ran to the end of its branch.
    Completed,
    /// The handler exited early without annotating the login.
    Skipped,
    /// The user agent was sent to an external verification domain; a
    /// continuation call resumes the flow.
    Redirected,
    /// Access was denied with the given reason code.
    Denied(&'static str),
}
