use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity carried by a validated session token.
///
/// Only what the token itself proves: the account may have been removed since the
/// token was issued, so callers that need the stored user must look it up again.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
}
