//! Macro for implementing Display and FromStr for wire-format enums
//!
//! The task manager API spells enum values in SCREAMING_SNAKE_CASE
//! (`IN_PROGRESS`), while older payloads and form inputs use display forms
//! (`"In Progress"`, `"in-progress"`). This macro gives every such enum a
//! single canonical `Display` and a forgiving `FromStr`.
//!
//! # Example
//!
//! ```rust
//! use taskdash_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Severity {
//!     Low,
//!     VeryHigh,
//! }
//!
//! impl_wire_enum_conversions!(Severity {
//!     Low => "LOW",
//!     VeryHigh => "VERY_HIGH",
//! });
//!
//! assert_eq!(Severity::VeryHigh.to_string(), "VERY_HIGH");
//! assert_eq!("very high".parse::<Severity>(), Ok(Severity::VeryHigh));
//! ```

/// Normalizes a candidate enum string to wire form: trims, maps spaces and
/// dashes to underscores and upper-cases ASCII letters.
#[doc(hidden)]
pub fn normalize_wire_token(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

/// Implements Display and FromStr traits for wire-format enums
///
/// This macro generates:
/// - `as_str`: the canonical wire string
/// - Display trait: writes the wire string
/// - FromStr trait: parses case-insensitive strings, treating spaces and
///   dashes as underscores
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical wire representation
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = $crate::macros::normalize_wire_token(s);
                match normalized.as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Phase {
        Draft,
        InReview,
        Done,
    }

    impl_wire_enum_conversions!(Phase {
        Draft => "DRAFT",
        InReview => "IN_REVIEW",
        Done => "DONE",
    });

    #[test]
    fn test_display_uses_wire_form() {
        assert_eq!(Phase::Draft.to_string(), "DRAFT");
        assert_eq!(Phase::InReview.to_string(), "IN_REVIEW");
        assert_eq!(Phase::Done.as_str(), "DONE");
    }

    #[test]
    fn test_fromstr_accepts_display_forms() {
        assert_eq!(Phase::from_str("IN_REVIEW").unwrap(), Phase::InReview);
        assert_eq!(Phase::from_str("in review").unwrap(), Phase::InReview);
        assert_eq!(Phase::from_str("In-Review").unwrap(), Phase::InReview);
        assert_eq!(Phase::from_str("  done ").unwrap(), Phase::Done);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = Phase::from_str("archived");
        assert!(result.unwrap_err().contains("Invalid Phase: archived"));
        assert!(Phase::from_str("").is_err());
    }
}
