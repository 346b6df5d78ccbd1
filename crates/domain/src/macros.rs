//! Macro for implementing Display and FromStr for wire enums
//!
//! The backend exchanges categories, statuses and roles as upper-case
//! strings (`"HOT"`, `"TEAM_LEAD"`). This macro keeps `Display`/`FromStr` in
//! step with the serde representation.
//!
//! # Example
//!
//! ```rust
//! use dealerdesk_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Priority {
//!     Low,
//!     High,
//! }
//!
//! impl_wire_enum_conversions!(Priority {
//!     Low => "LOW",
//!     High => "HIGH",
//! });
//!
//! assert_eq!(Priority::High.to_string(), "HIGH");
//! assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
//! ```

/// Implements Display, FromStr and `as_str` for wire enums
///
/// - Display writes the exact wire string
/// - FromStr is case-insensitive
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation
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
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
