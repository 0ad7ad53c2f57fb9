//! Domain types: platform membership codes and the upstream response envelope.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Platform a Destiny membership belongs to.
///
/// Rendered into paths as its numeric code. Codes this enum does not name
/// are carried through as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipType {
    All,
    None,
    Xbox,
    Psn,
    Steam,
    Blizzard,
    Stadia,
    Demon,
    BungieNext,
    Unknown(i32),
}

impl MembershipType {
    pub fn code(self) -> i32 {
        match self {
            MembershipType::All => -1,
            MembershipType::None => 0,
            MembershipType::Xbox => 1,
            MembershipType::Psn => 2,
            MembershipType::Steam => 3,
            MembershipType::Blizzard => 4,
            MembershipType::Stadia => 5,
            MembershipType::Demon => 10,
            MembershipType::BungieNext => 254,
            MembershipType::Unknown(code) => code,
        }
    }
}

impl From<i32> for MembershipType {
    fn from(code: i32) -> Self {
        match code {
            -1 => MembershipType::All,
            0 => MembershipType::None,
            1 => MembershipType::Xbox,
            2 => MembershipType::Psn,
            3 => MembershipType::Steam,
            4 => MembershipType::Blizzard,
            5 => MembershipType::Stadia,
            10 => MembershipType::Demon,
            254 => MembershipType::BungieNext,
            other => MembershipType::Unknown(other),
        }
    }
}

impl fmt::Display for MembershipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error code the upstream service uses for success.
pub const SUCCESS_CODE: i64 = 1;

/// Typed view of the envelope every upstream response is wrapped in.
///
/// The client hands back the raw `Value`; decode into this when the caller
/// wants to check `ErrorCode` without indexing by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerResponse<T = Value> {
    pub error_code: i64,
    pub error_status: Option<String>,
    pub message: Option<String>,
    pub response: Option<T>,
    pub throttle_seconds: Option<i64>,
    pub message_data: Option<Value>,
}

impl<T> ServerResponse<T> {
    pub fn is_success(&self) -> bool {
        self.error_code == SUCCESS_CODE
    }
}
