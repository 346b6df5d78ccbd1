//! Session and role types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

/// Dealership staff role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    GeneralManager,
    SalesManager,
    TeamLead,
    CustomerAdvisor,
    /// Any role string this client does not know about
    #[default]
    #[serde(other)]
    Unknown,
}

impl_wire_enum_conversions!(Role {
    Admin => "ADMIN",
    GeneralManager => "GENERAL_MANAGER",
    SalesManager => "SALES_MANAGER",
    TeamLead => "TEAM_LEAD",
    CustomerAdvisor => "CUSTOMER_ADVISOR",
    Unknown => "UNKNOWN",
});

impl Role {
    /// Roles allowed to cancel remarks written by other users
    pub const ELEVATED: [Self; 4] =
        [Self::Admin, Self::GeneralManager, Self::SalesManager, Self::TeamLead];

    pub fn is_elevated(self) -> bool {
        Self::ELEVATED.contains(&self)
    }
}

/// Minimal user record cached alongside the token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub dealership_id: Option<String>,
}

/// The authenticated caller as seen by an outbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub bearer_token: String,
    pub user_id: String,
    pub role: Role,
}

/// Everything persisted to the local session store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
}

impl SessionRecord {
    /// True when the id token expires within `skew_secs`
    pub fn expires_within(&self, now: DateTime<Utc>, skew_secs: i64) -> bool {
        self.expires_at - now <= chrono::Duration::seconds(skew_secs)
    }

    pub fn session(&self) -> Session {
        Session {
            bearer_token: self.id_token.clone(),
            user_id: self.user.id.clone(),
            role: self.user.role,
        }
    }
}
