//! Auth-retry policy
//!
//! A request is sent as [`Attempt::Initial`]. A 401 on the initial attempt
//! triggers one forced token refresh and a replay as [`Attempt::Retried`];
//! whatever the replay returns is final.

use reqwest::StatusCode;

/// Which send of a logical request this is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Initial,
    Retried,
}

impl Attempt {
    /// The attempt that follows this one, if any
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Initial => Some(Self::Retried),
            Self::Retried => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::Initial => 1,
            Self::Retried => 2,
        }
    }
}

/// What to do with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Hand the response to the caller
    Deliver,
    /// Force a token refresh and replay as the given attempt
    RefreshAndRetry(Attempt),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AuthRetryPolicy;

impl AuthRetryPolicy {
    pub fn decide(self, attempt: Attempt, status: StatusCode) -> RetryDecision {
        if status != StatusCode::UNAUTHORIZED {
            return RetryDecision::Deliver;
        }

        match attempt.next() {
            Some(next) => RetryDecision::RefreshAndRetry(next),
            None => RetryDecision::Deliver,
        }
    }
}
