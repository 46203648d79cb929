//! Mock session user. There is no credential check: any e-mail signs in and
//! always maps to the same user id.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::model::profile::DEFAULT_ROLE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl SessionUser {
    pub fn from_email(email: &str) -> Self {
        let email = email.trim();
        let name = email
            .split('@')
            .next()
            .filter(|local| !local.is_empty())
            .unwrap_or("Demo User")
            .to_string();

        SessionUser {
            id: general_purpose::URL_SAFE_NO_PAD.encode(email.as_bytes()),
            email: email.to_string(),
            name,
            role: DEFAULT_ROLE.to_string(),
        }
    }
}
