use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::XmlRoot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenVo {
    pub username: String,
    pub authenticated: bool,
    pub created: DateTime<Utc>,
    pub expiration: DateTime<Utc>,
    pub access_token: String,
    pub refresh_token: String,
}

impl XmlRoot for TokenVo {
    const XML_ROOT: &'static str = "TokenVO";
}
