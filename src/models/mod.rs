pub mod book;
pub mod credentials;
pub mod file;
pub mod hateoas;
pub mod person;
pub mod token;

pub use book::BookVo;
pub use credentials::AccountCredentialsVo;
pub use file::UploadFileResponseVo;
pub use hateoas::{Link, LinkBuilder, PagedModel, Resource, SelfLinks};
pub use person::PersonVo;
pub use token::TokenVo;

/// Element name used when a value is the root of an XML document.
pub trait XmlRoot {
    const XML_ROOT: &'static str;
}

impl<T: XmlRoot> XmlRoot for Vec<T> {
    const XML_ROOT: &'static str = T::XML_ROOT;
}
