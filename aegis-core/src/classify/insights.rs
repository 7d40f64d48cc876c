//! Keyword insights for text content.

use serde::Serialize;

/// Phrases that suggest credentials or secrets.
const SENSITIVE_PHRASES: &[&str] = &["private key", "password"];

/// Phrases that suggest a financial document.
const FINANCIAL_PHRASES: &[&str] = &["invoice", "payment", "pembayaran"];

/// Content longer than this (in characters) is flagged for archiving.
pub const LONG_CONTENT_CHARS: usize = 500;

pub const SECURITY_ALERT: &str = "Potentially sensitive data detected.";
pub const FINANCIAL_CATEGORY: &str = "Financial document";
pub const LONG_CONTENT: &str = "Long content, consider archiving.";

/// Findings from a keyword scan. Absent findings are omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Insights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_alert: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<&'static str>,
}

impl Insights {
    pub fn is_empty(&self) -> bool {
        self.security_alert.is_none() && self.category.is_none() && self.length.is_none()
    }
}

/// Case-insensitive keyword scan of `content`.
pub fn scan(content: &str) -> Insights {
    let lowered = content.to_lowercase();
    let mentions = |phrases: &[&str]| phrases.iter().any(|p| lowered.contains(p));

    Insights {
        security_alert: mentions(SENSITIVE_PHRASES).then_some(SECURITY_ALERT),
        category: mentions(FINANCIAL_PHRASES).then_some(FINANCIAL_CATEGORY),
        length: (content.chars().count() > LONG_CONTENT_CHARS).then_some(LONG_CONTENT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_content() {
        let insights = scan("Here is my PASSWORD: hunter2");
        assert_eq!(insights.security_alert, Some(SECURITY_ALERT));
        assert!(insights.category.is_none());

        assert!(scan("-----BEGIN private key-----").security_alert.is_some());
    }

    #[test]
    fn test_financial_content() {
        assert_eq!(scan("Invoice #42 due Friday").category, Some(FINANCIAL_CATEGORY));
        assert_eq!(scan("bukti pembayaran").category, Some(FINANCIAL_CATEGORY));
    }

    #[test]
    fn test_long_content() {
        assert!(scan(&"a".repeat(LONG_CONTENT_CHARS)).length.is_none());
        assert_eq!(scan(&"a".repeat(LONG_CONTENT_CHARS + 1)).length, Some(LONG_CONTENT));
    }

    #[test]
    fn test_plain_content_serializes_empty() {
        let insights = scan("nothing to see here");
        assert!(insights.is_empty());
        assert_eq!(serde_json::to_string(&insights).unwrap(), "{}");
    }
}
