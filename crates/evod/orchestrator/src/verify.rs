use evod_types::VerificationIntent;

/// Classification of one live-verification comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The live state matches the intent.
    Pass,
    /// The live state has not converged yet; another attempt may succeed.
    Retry,
    /// The live state contradicts the intent; a human should look. The
    /// commit stays in place, only attention is requested.
    Escalate,
}

/// Compare an intent against the current live state.
///
/// Every expected key must be present and equal for a pass. Missing keys are
/// treated as not-yet-converged (retry); present-but-different values are a
/// contradiction (escalate).
pub fn evaluate(intent: &VerificationIntent, live: &serde_json::Value) -> VerificationOutcome {
    let mut missing = false;
    for (key, expected) in &intent.expected {
        match live.get(key) {
            None => missing = true,
            Some(actual) if actual != expected => return VerificationOutcome::Escalate,
            Some(_) => {}
        }
    }
    if missing {
        VerificationOutcome::Retry
    } else {
        VerificationOutcome::Pass
    }
}
