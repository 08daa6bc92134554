//! HAL-style link and page envelopes.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::XmlRoot;
use crate::domain::Page;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

/// `_links` block of a single resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
}

/// A VO that lives under a collection route and can carry a self link.
pub trait Resource: Serialize {
    /// Collection route, e.g. `/api/person/v1`.
    const ROUTE: &'static str;

    /// Key of the embedded list in a paged response.
    const COLLECTION: &'static str;

    /// Field name the collection is sorted by.
    const SORT_FIELD: &'static str;

    fn key(&self) -> Option<i64>;

    fn set_links(&mut self, links: SelfLinks);
}

/// Renders absolute or root-relative hrefs.
#[derive(Debug, Clone, Default)]
pub struct LinkBuilder {
    base: String,
}

impl LinkBuilder {
    #[must_use]
    pub fn new(public_base_url: &str) -> Self {
        Self {
            base: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn to(&self, path: &str) -> Link {
        Link {
            href: format!("{}{path}", self.base),
        }
    }

    #[must_use]
    pub fn item(&self, route: &str, id: i64) -> SelfLinks {
        SelfLinks {
            self_link: self.to(&format!("{route}/{id}")),
        }
    }

    /// Attaches a self link when the resource has a key.
    pub fn attach<T: Resource>(&self, resource: &mut T) {
        if let Some(id) = resource.key() {
            resource.set_links(self.item(T::ROUTE, id));
        }
    }

    fn page_link<T>(&self, path: &str, page: &Page<T>, number: u64, sort_field: &str) -> Link {
        let direction = page.request.order.as_param();
        self.to(&format!(
            "{path}?direction={direction}&page={number}&size={}&sort={sort_field},{direction}",
            page.request.size
        ))
    }

    #[must_use]
    pub fn page<T>(&self, path: &str, page: &Page<T>, sort_field: &str) -> PageLinks {
        let link = |number| self.page_link(path, page, number, sort_field);

        PageLinks {
            first: page.last_page().map(|_| link(0)),
            prev: page.has_previous().then(|| link(page.number() - 1)),
            self_link: link(page.number()),
            next: page.has_next().then(|| link(page.number() + 1)),
            last: page.last_page().map(link),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<Link>,

    #[serde(rename = "self")]
    pub self_link: Link,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Link>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
}

/// `{"personVOList": [...]}` keyed by the resource's collection name.
#[derive(Debug, Clone)]
pub struct Embedded<T>(pub Vec<T>);

impl<T: Resource> Serialize for Embedded<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(T::COLLECTION, &self.0)?;
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PagedModel<T: Resource> {
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<Embedded<T>>,

    #[serde(rename = "_links")]
    pub links: PageLinks,

    pub page: PageMetadata,
}

impl<T: Resource> PagedModel<T> {
    /// Wraps a page of resources, attaching a self link to every item.
    /// `path` is the route the page was requested on.
    pub fn new(page: Page<T>, links: &LinkBuilder, path: &str) -> Self {
        let page_links = links.page(path, &page, T::SORT_FIELD);
        let page_meta = PageMetadata {
            size: page.request.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
            number: page.number(),
        };

        let mut content = page.content;
        for item in &mut content {
            links.attach(item);
        }

        Self {
            embedded: (!content.is_empty()).then_some(Embedded(content)),
            links: page_links,
            page: page_meta,
        }
    }

    #[must_use]
    pub fn content(&self) -> &[T] {
        self.embedded.as_ref().map_or(&[], |e| e.0.as_slice())
    }
}

impl<T: Resource> XmlRoot for PagedModel<T> {
    const XML_ROOT: &'static str = "PagedModel";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PageRequest, SortOrder};
    use crate::models::PersonVo;

    fn person(id: i64, first_name: &str) -> PersonVo {
        PersonVo {
            key: Some(id),
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            address: "Somewhere".to_string(),
            gender: "Female".to_string(),
            enabled: true,
            links: None,
        }
    }

    #[test]
    fn middle_page_has_all_links() {
        let request = PageRequest::new(1, 2, SortOrder::Ascending);
        let page = Page::new(vec![person(3, "Ada"), person(4, "Alan")], request, 6, 3);
        let model = PagedModel::new(page, &LinkBuilder::new("http://localhost:8080/"), "/api/person/v1");

        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(
            json["_links"]["first"]["href"],
            "http://localhost:8080/api/person/v1?direction=asc&page=0&size=2&sort=firstName,asc"
        );
        assert_eq!(
            json["_links"]["prev"]["href"],
            "http://localhost:8080/api/person/v1?direction=asc&page=0&size=2&sort=firstName,asc"
        );
        assert_eq!(
            json["_links"]["next"]["href"],
            "http://localhost:8080/api/person/v1?direction=asc&page=2&size=2&sort=firstName,asc"
        );
        assert_eq!(
            json["_links"]["last"]["href"],
            "http://localhost:8080/api/person/v1?direction=asc&page=2&size=2&sort=firstName,asc"
        );
        assert_eq!(
            json["_embedded"]["personVOList"][0]["_links"]["self"]["href"],
            "http://localhost:8080/api/person/v1/3"
        );
        assert_eq!(json["page"]["totalElements"], 6);
        assert_eq!(json["page"]["number"], 1);
    }

    #[test]
    fn empty_page_omits_embedded() {
        let page: Page<PersonVo> = Page::new(vec![], PageRequest::default(), 0, 0);
        let model = PagedModel::new(page, &LinkBuilder::default(), "/api/person/v1");

        let json = serde_json::to_value(&model).unwrap();
        assert!(json.get("_embedded").is_none());
        assert!(json["_links"].get("first").is_none());
        assert!(json["_links"].get("last").is_none());
        assert_eq!(
            json["_links"]["self"]["href"],
            "/api/person/v1?direction=asc&page=0&size=12&sort=firstName,asc"
        );
        assert!(model.content().is_empty());
    }
}
