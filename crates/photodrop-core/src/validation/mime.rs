//! MIME allow-rule and content-type resolution.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

const OCTET_STREAM: &str = "application/octet-stream";

/// Which declared MIME types an upload may carry.
///
/// Parsed from `ALLOWED_MIME`: `*` or `*/*` accepts anything, `type/*` accepts a
/// whole category (e.g. `image/*`), anything else must match exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MimeRule {
    Any,
    Category(String),
    Exact(String),
}

impl MimeRule {
    /// Check a declared content type against the rule.
    ///
    /// Parameters (`; charset=...`) and case are ignored.
    pub fn allows(&self, content_type: &str) -> bool {
        let normalized = normalize_mime_type(content_type);
        let Some((top, sub)) = normalized.split_once('/') else {
            return false;
        };
        if top.is_empty() || sub.is_empty() {
            return false;
        }

        match self {
            MimeRule::Any => true,
            MimeRule::Category(category) => top == category,
            MimeRule::Exact(expected) => normalized == *expected,
        }
    }
}

impl FromStr for MimeRule {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rule = normalize_mime_type(s);
        if rule == "*" || rule == "*/*" {
            return Ok(MimeRule::Any);
        }

        match rule.split_once('/') {
            Some((top, "*")) if !top.is_empty() && !top.contains('*') => {
                Ok(MimeRule::Category(top.to_string()))
            }
            Some((top, sub))
                if !top.is_empty()
                    && !sub.is_empty()
                    && !rule.contains('*')
                    && !sub.contains('/') =>
            {
                Ok(MimeRule::Exact(rule))
            }
            _ => Err(anyhow::anyhow!(
                "Invalid ALLOWED_MIME '{}': expected 'type/*', '*/*' or an exact MIME type",
                s
            )),
        }
    }
}

impl Display for MimeRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MimeRule::Any => write!(f, "*/*"),
            MimeRule::Category(category) => write!(f, "{}/*", category),
            MimeRule::Exact(mime) => write!(f, "{}", mime),
        }
    }
}

/// Normalize MIME type by stripping parameters and lowercasing
/// (e.g. "Image/JPEG; charset=utf-8" -> "image/jpeg").
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase()
}

/// Content type to present to the remote store.
///
/// Prefers the type implied by the filename extension, then the type declared by
/// the client, then `application/octet-stream`.
pub fn resolve_content_type(filename: &str, declared: Option<&str>) -> String {
    if let Some(guessed) = mime_guess::from_path(filename).first() {
        return guessed.essence_str().to_string();
    }

    declared
        .map(normalize_mime_type)
        .filter(|ct| ct.contains('/'))
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rules() {
        assert_eq!("*".parse::<MimeRule>().unwrap(), MimeRule::Any);
        assert_eq!("*/*".parse::<MimeRule>().unwrap(), MimeRule::Any);
        assert_eq!(
            "image/*".parse::<MimeRule>().unwrap(),
            MimeRule::Category("image".to_string())
        );
        assert_eq!(
            " Video/* ".parse::<MimeRule>().unwrap(),
            MimeRule::Category("video".to_string())
        );
        assert_eq!(
            "image/png".parse::<MimeRule>().unwrap(),
            MimeRule::Exact("image/png".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_malformed_rules() {
        for raw in ["", "image", "/png", "image/", "*/png", "im*ge/png", "a/b/c"] {
            assert!(raw.parse::<MimeRule>().is_err(), "{:?} should not parse", raw);
        }
    }

    #[test]
    fn test_category_rule() {
        let rule = MimeRule::Category("image".to_string());
        assert!(rule.allows("image/png"));
        assert!(rule.allows("IMAGE/JPEG; charset=binary"));
        assert!(!rule.allows("text/plain"));
        assert!(!rule.allows("imagex/png"));
        assert!(!rule.allows("image/"));
        assert!(!rule.allows(""));
    }

    #[test]
    fn test_exact_rule() {
        let rule = MimeRule::Exact("application/pdf".to_string());
        assert!(rule.allows("application/pdf"));
        assert!(rule.allows("Application/PDF;foo=bar"));
        assert!(!rule.allows("application/pdfx"));
        assert!(!rule.allows("image/png"));
    }

    #[test]
    fn test_any_rule_still_needs_a_mime_shape() {
        assert!(MimeRule::Any.allows("text/plain"));
        assert!(!MimeRule::Any.allows("garbage"));
    }

    #[test]
    fn test_display_round_trips_rule_text() {
        assert_eq!(MimeRule::Any.to_string(), "*/*");
        assert_eq!(MimeRule::Category("image".to_string()).to_string(), "image/*");
        assert_eq!(
            MimeRule::Exact("image/png".to_string()).to_string(),
            "image/png"
        );
    }

    #[test]
    fn test_resolve_prefers_extension() {
        assert_eq!(resolve_content_type("cat.png", Some("image/jpeg")), "image/png");
        assert_eq!(resolve_content_type("CAT.JPG", None), "image/jpeg");
    }

    #[test]
    fn test_resolve_falls_back_to_declared_type() {
        assert_eq!(
            resolve_content_type("no-extension", Some("Image/HEIC; q=1")),
            "image/heic"
        );
        assert_eq!(
            resolve_content_type("weird.zzzunknown", Some("image/webp")),
            "image/webp"
        );
    }

    #[test]
    fn test_resolve_defaults_to_octet_stream() {
        assert_eq!(resolve_content_type("blob", None), OCTET_STREAM);
        assert_eq!(resolve_content_type("blob", Some("nonsense")), OCTET_STREAM);
    }
}
