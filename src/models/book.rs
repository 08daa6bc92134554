use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Resource, SelfLinks, XmlRoot};
use crate::constants::routes;
use crate::db::BookInput;
use crate::entities::books;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookVo {
    #[serde(rename = "id", default)]
    pub key: Option<i64>,

    #[serde(default)]
    pub author: String,

    pub launch_date: NaiveDateTime,

    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub title: String,

    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLinks>,
}

impl From<books::Model> for BookVo {
    fn from(model: books::Model) -> Self {
        Self {
            key: Some(model.id),
            author: model.author,
            launch_date: model.launch_date,
            price: model.price,
            title: model.title,
            links: None,
        }
    }
}

impl From<BookVo> for books::Model {
    fn from(vo: BookVo) -> Self {
        Self {
            id: vo.key.unwrap_or_default(),
            author: vo.author,
            launch_date: vo.launch_date,
            price: vo.price,
            title: vo.title,
        }
    }
}

impl From<BookVo> for BookInput {
    fn from(vo: BookVo) -> Self {
        Self {
            author: vo.author,
            launch_date: vo.launch_date,
            price: vo.price,
            title: vo.title,
        }
    }
}

impl Resource for BookVo {
    const ROUTE: &'static str = routes::BOOK;
    const COLLECTION: &'static str = "bookVOList";
    const SORT_FIELD: &'static str = "title";

    fn key(&self) -> Option<i64> {
        self.key
    }

    fn set_links(&mut self, links: SelfLinks) {
        self.links = Some(links);
    }
}

impl XmlRoot for BookVo {
    const XML_ROOT: &'static str = "BookVO";
}
