pub mod routes {

    pub const AUTH: &str = "/auth";

    pub const PERSON: &str = "/api/person/v1";

    pub const BOOK: &str = "/api/book/v1";

    pub const FILE: &str = "/api/file/v1";

    pub const FIND_PERSON_BY_NAME: &str = "findPersonByName";

    pub const DOWNLOAD_FILE: &str = "downloadFile";
}

pub mod paging {

    pub const DEFAULT_PAGE: u64 = 0;

    pub const DEFAULT_SIZE: u64 = 12;

    pub const MAX_SIZE: u64 = 1000;
}

pub mod messages {

    pub const NULL_OBJECT: &str = "It's not allowed to persist a null object";

    pub const NO_RECORDS: &str = "No records found for this id";

    pub const INVALID_CLIENT_REQUEST: &str = "Invalid client request";

    pub const ACCESS_DENIED: &str = "Access denied";

    pub const INVALID_CORS_REQUEST: &str = "Invalid CORS request";

    pub const NON_NUMERIC: &str = "Please set a numeric value";
}

pub mod media {

    pub const APPLICATION_JSON: &str = "application/json";

    pub const APPLICATION_XML: &str = "application/xml";

    pub const APPLICATION_YAML: &str = "application/x-yaml";
}
