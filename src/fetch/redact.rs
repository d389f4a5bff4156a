//! Secret redaction for logs and error strings: API keys must never
//! appear in logs.

/// Replaces any of the given secret values found verbatim in `text` with
/// `[REDACTED]`. Order-independent; empty/whitespace-only secrets are
/// ignored so redaction never turns unrelated text into noise.
pub fn redact(text: &str, secrets: &[&str]) -> String {
    let mut out = text.to_string();
    for secret in secrets {
        if secret.trim().is_empty() {
            continue;
        }
        out = out.replace(secret, "[REDACTED]");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_key_wherever_it_appears() {
        let text = "GET /v4/odds?apiKey=sk_live_abc123 failed with 401";
        let redacted = redact(text, &["sk_live_abc123"]);
        assert_eq!(redacted, "GET /v4/odds?apiKey=[REDACTED] failed with 401");
    }

    #[test]
    fn ignores_empty_secret() {
        let text = "no secrets here";
        assert_eq!(redact(text, &[""]), text);
    }
}
