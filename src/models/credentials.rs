use serde::{Deserialize, Serialize};

/// Sign-in payload. Never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountCredentialsVo {
    #[serde(default, alias = "username", alias = "userName")]
    pub user_name: String,

    #[serde(default)]
    pub password: String,
}

impl AccountCredentialsVo {
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.user_name.trim().is_empty() || self.password.trim().is_empty()
    }
}
