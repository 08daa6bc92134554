use serde::{Deserialize, Serialize};

use super::XmlRoot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileResponseVo {
    pub file_name: String,
    pub file_download_uri: String,
    pub file_type: String,
    pub size: u64,
}

impl XmlRoot for UploadFileResponseVo {
    const XML_ROOT: &'static str = "UploadFileResponseVO";
}
