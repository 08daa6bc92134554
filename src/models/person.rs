use serde::{Deserialize, Serialize};

use super::{Resource, SelfLinks, XmlRoot};
use crate::constants::routes;
use crate::db::PersonInput;
use crate::entities::person;

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonVo {
    #[serde(rename = "id", default)]
    pub key: Option<i64>,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub gender: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLinks>,
}

impl From<person::Model> for PersonVo {
    fn from(model: person::Model) -> Self {
        Self {
            key: Some(model.id),
            first_name: model.first_name,
            last_name: model.last_name,
            address: model.address,
            gender: model.gender,
            enabled: model.enabled,
            links: None,
        }
    }
}

impl From<PersonVo> for person::Model {
    fn from(vo: PersonVo) -> Self {
        Self {
            id: vo.key.unwrap_or_default(),
            first_name_folded: person::fold_name(&vo.first_name),
            first_name: vo.first_name,
            last_name: vo.last_name,
            address: vo.address,
            gender: vo.gender,
            enabled: vo.enabled,
        }
    }
}

impl From<PersonVo> for PersonInput {
    fn from(vo: PersonVo) -> Self {
        Self {
            first_name: vo.first_name,
            last_name: vo.last_name,
            address: vo.address,
            gender: vo.gender,
            enabled: vo.enabled,
        }
    }
}

impl Resource for PersonVo {
    const ROUTE: &'static str = routes::PERSON;
    const COLLECTION: &'static str = "personVOList";
    const SORT_FIELD: &'static str = "firstName";

    fn key(&self) -> Option<i64> {
        self.key
    }

    fn set_links(&mut self, links: SelfLinks) {
        self.links = Some(links);
    }
}

impl XmlRoot for PersonVo {
    const XML_ROOT: &'static str = "PersonVO";
}
