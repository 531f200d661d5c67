use tracing::{debug, info};

use crate::models::{BookDetail, BookSummary, SubjectPage};

use super::error::{CatalogError, CatalogResult};
use super::transport::Transport;
use super::trending::{CategoryPicker, POPULAR_CATEGORIES};

pub const DEFAULT_BASE_URL: &str = "https://openlibrary.org";
pub const DEFAULT_COVERS_URL: &str = "https://covers.openlibrary.org";
/// Works requested per category search.
pub const SEARCH_LIMIT: u32 = 100;

const JSON_HEADERS: &[(&str, &str)] = &[("Accept", "application/json")];
const WORKS_PREFIX: &str = "/works/";

/// Cover image sizes the covers service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl CoverSize {
    /// Parse `S`, `M` or `L`. Anything else quietly means medium.
    pub fn from_code(code: &str) -> Self {
        match code {
            "S" => CoverSize::Small,
            "L" => CoverSize::Large,
            _ => CoverSize::Medium,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            CoverSize::Small => "S",
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

/// Hosts the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub base_url: String,
    pub covers_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            covers_url: DEFAULT_COVERS_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Public page of a work, e.g. `https://openlibrary.org/works/OL1W`.
    pub fn work_page(&self, work_key: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), work_key)
    }
}

/// Build the image URL for a cover id. Ids that are absent or not positive
/// have no cover.
pub fn cover_image_url(covers_url: &str, cover_id: Option<i64>, size: CoverSize) -> Option<String> {
    let id = cover_id.filter(|id| *id > 0)?;
    Some(format!(
        "{}/b/id/{}-{}.jpg",
        covers_url.trim_end_matches('/'),
        id,
        size.code()
    ))
}

/// Trim, lowercase and percent-encode a category for the subjects path.
pub fn normalize_category(raw: &str) -> CatalogResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::InvalidInput(
            "Categoria non specificata".to_string(),
        ));
    }
    Ok(encode_component(&trimmed.to_lowercase()))
}

/// Turn `OL1W` or `/works/OL1W` into `/works/OL1W`.
pub fn normalize_work_key(raw: &str) -> CatalogResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::InvalidInput(
            "Chiave del libro non specificata".to_string(),
        ));
    }
    if trimmed.starts_with(WORKS_PREFIX) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{WORKS_PREFIX}{trimmed}"))
    }
}

/// Percent-encode everything outside the URI-component unreserved set.
fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

/// Stateless wrapper around the three read endpoints. The only mutable piece
/// is the trending picker, which is why `fetch_trending` takes `&mut self`.
pub struct CatalogClient {
    endpoints: Endpoints,
    transport: Box<dyn Transport>,
    picker: Box<dyn CategoryPicker>,
}

impl CatalogClient {
    pub fn new(
        endpoints: Endpoints,
        transport: Box<dyn Transport>,
        picker: Box<dyn CategoryPicker>,
    ) -> Self {
        Self {
            endpoints,
            transport,
            picker,
        }
    }

    /// Works filed under a subject, at most [`SEARCH_LIMIT`] of them.
    pub fn search_by_category(&self, category: &str) -> CatalogResult<Vec<BookSummary>> {
        let subject = normalize_category(category)?;
        info!(subject = %subject, "searching catalog by category");
        self.fetch_subject(&subject, SEARCH_LIMIT)
    }

    /// Full record of a single work.
    pub fn fetch_details(&self, work_key: &str) -> CatalogResult<BookDetail> {
        let key = normalize_work_key(work_key)?;
        let url = format!("{}{}.json", self.base(), key);
        let response = self.get_ok(&url, &[])?;
        let value: serde_json::Value = serde_json::from_str(&response)?;
        Ok(BookDetail::from_value(value)?)
    }

    /// Works from one popular subject chosen by the picker. Each call may land
    /// on a different subject.
    pub fn fetch_trending(&mut self, limit: u32) -> CatalogResult<Vec<BookSummary>> {
        let index = self.picker.pick(POPULAR_CATEGORIES.len());
        let subject = POPULAR_CATEGORIES[index % POPULAR_CATEGORIES.len()];
        info!(subject, limit, "loading trending shelf");
        self.fetch_subject(subject, limit)
    }

    pub fn cover_image_url(&self, cover_id: Option<i64>, size: CoverSize) -> Option<String> {
        cover_image_url(&self.endpoints.covers_url, cover_id, size)
    }

    fn fetch_subject(&self, subject: &str, limit: u32) -> CatalogResult<Vec<BookSummary>> {
        let url = format!("{}/subjects/{}.json?limit={}", self.base(), subject, limit);
        let body = self.get_ok(&url, JSON_HEADERS)?;
        let page: SubjectPage = serde_json::from_str(&body)?;
        debug!(subject, works = page.works.len(), "subject page decoded");
        Ok(page.works)
    }

    /// Issue a GET and hand back the body of a 2xx answer.
    fn get_ok(&self, url: &str, headers: &[(&str, &str)]) -> CatalogResult<String> {
        debug!(url, "GET");
        let response = self.transport.get(url, headers)?;
        if !response.is_success() {
            return Err(CatalogError::Http {
                status: response.status,
            });
        }
        Ok(response.body)
    }

    fn base(&self) -> &str {
        self.endpoints.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::fake::FakeTransport;
    use crate::catalog::FixedPicker;

    fn client_with(transport: &FakeTransport, pick: usize) -> CatalogClient {
        CatalogClient::new(
            Endpoints::default(),
            Box::new(transport.clone()),
            Box::new(FixedPicker(pick)),
        )
    }

    #[test]
    fn category_is_trimmed_lowercased_and_encoded() {
        assert_eq!(normalize_category("  Science Fiction ").unwrap(), "science%20fiction");
        assert_eq!(normalize_category("Città").unwrap(), "citt%C3%A0");
        assert_eq!(normalize_category("rock&roll/jazz").unwrap(), "rock%26roll%2Fjazz");
        assert_eq!(normalize_category("it's(ok)!").unwrap(), "it's(ok)!");
    }

    #[test]
    fn blank_inputs_are_rejected() {
        assert_eq!(
            normalize_category("   "),
            Err(CatalogError::InvalidInput("Categoria non specificata".into()))
        );
        assert_eq!(
            normalize_work_key(""),
            Err(CatalogError::InvalidInput("Chiave del libro non specificata".into()))
        );
    }

    #[test]
    fn work_keys_gain_prefix_once() {
        assert_eq!(normalize_work_key("OL45804W").unwrap(), "/works/OL45804W");
        assert_eq!(normalize_work_key("/works/OL45804W").unwrap(), "/works/OL45804W");
    }

    #[test]
    fn cover_urls() {
        let covers = DEFAULT_COVERS_URL;
        assert_eq!(cover_image_url(covers, None, CoverSize::Large), None);
        assert_eq!(cover_image_url(covers, Some(0), CoverSize::Large), None);
        assert_eq!(
            cover_image_url(covers, Some(42), CoverSize::Small).as_deref(),
            Some("https://covers.openlibrary.org/b/id/42-S.jpg")
        );
        assert_eq!(
            cover_image_url(covers, Some(42), CoverSize::from_code("X")),
            cover_image_url(covers, Some(42), CoverSize::from_code("M"))
        );

        let client = client_with(&FakeTransport::default(), 0);
        assert_eq!(
            client.cover_image_url(Some(7), CoverSize::from_code("L")).as_deref(),
            Some("https://covers.openlibrary.org/b/id/7-L.jpg")
        );
        assert_eq!(client.cover_image_url(None, CoverSize::Small), None);
    }

    #[test]
    fn search_hits_subject_endpoint_with_json_accept() {
        let transport = FakeTransport::default();
        transport.respond(
            "https://openlibrary.org/subjects/fantasy.json?limit=100",
            200,
            r#"{"name":"fantasy","works":[{"key":"/works/OL1W","title":"The Hobbit","authors":[{"name":"J.R.R. Tolkien"}],"cover_id":14627509}]}"#,
        );
        let client = client_with(&transport, 0);

        let works = client.search_by_category(" Fantasy ").unwrap();
        assert_eq!(works.len(), 1);
        assert_eq!(works[0].title, "The Hobbit");
        assert_eq!(works[0].cover_id, Some(14627509));

        let requests = transport.requests.lock().unwrap();
        assert_eq!(
            requests[0].1,
            vec![("Accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn search_without_works_field_is_empty() {
        let transport = FakeTransport::default();
        transport.respond(
            "https://openlibrary.org/subjects/zzzz_nonexistent.json?limit=100",
            200,
            r#"{"name":"zzzz_nonexistent"}"#,
        );
        let client = client_with(&transport, 0);
        assert!(client.search_by_category("zzzz_nonexistent").unwrap().is_empty());
    }

    #[test]
    fn error_taxonomy() {
        let transport = FakeTransport::default();
        transport
            .respond("https://openlibrary.org/subjects/broken.json?limit=100", 200, "<html>")
            .respond("https://openlibrary.org/subjects/down.json?limit=100", 503, "")
            .fail(
                "https://openlibrary.org/subjects/offline.json?limit=100",
                CatalogError::Network("dns".into()),
            );
        let client = client_with(&transport, 0);

        assert!(matches!(
            client.search_by_category("broken"),
            Err(CatalogError::Parse(_))
        ));
        assert_eq!(
            client.search_by_category("down"),
            Err(CatalogError::Http { status: 503 })
        );
        assert_eq!(
            client.search_by_category("offline"),
            Err(CatalogError::Network("dns".into()))
        );
        assert!(matches!(
            client.search_by_category(""),
            Err(CatalogError::InvalidInput(_))
        ));
        assert_eq!(transport.urls().len(), 3);
    }

    #[test]
    fn details_use_works_path_without_headers() {
        let transport = FakeTransport::default();
        transport.respond(
            "https://openlibrary.org/works/OL45804W.json",
            200,
            r#"{"key":"/works/OL45804W","title":"Fantastic Mr Fox","description":{"type":"/type/text","value":"A fox."}}"#,
        );
        let client = client_with(&transport, 0);

        let detail = client.fetch_details("OL45804W").unwrap();
        assert_eq!(detail.title.as_deref(), Some("Fantastic Mr Fox"));
        assert_eq!(detail.description.unwrap().text(), "A fox.");
        assert!(transport.requests.lock().unwrap()[0].1.is_empty());
    }

    #[test]
    fn details_share_the_error_taxonomy() {
        let transport = FakeTransport::default();
        transport
            .respond("https://openlibrary.org/works/OL1W.json", 200, "<html>")
            .respond("https://openlibrary.org/works/OL2W.json", 500, "")
            .fail(
                "https://openlibrary.org/works/OL3W.json",
                CatalogError::Network("reset".into()),
            );
        let client = client_with(&transport, 0);

        assert!(matches!(
            client.fetch_details("OL1W"),
            Err(CatalogError::Parse(_))
        ));
        assert_eq!(
            client.fetch_details("OL2W"),
            Err(CatalogError::Http { status: 500 })
        );
        assert_eq!(
            client.fetch_details("OL3W"),
            Err(CatalogError::Network("reset".into()))
        );
        assert!(matches!(
            client.fetch_details("  "),
            Err(CatalogError::InvalidInput(_))
        ));
    }

    #[test]
    fn odd_detail_shapes_still_load() {
        let transport = FakeTransport::default();
        transport.respond(
            "https://openlibrary.org/works/OL7W.json",
            200,
            r#"{"title":"Odd","description":{"type":"/type/text"},"first_publish_date":1970,"covers":null,"subjects":["a",{"k":1}]}"#,
        );
        let client = client_with(&transport, 0);

        let detail = client.fetch_details("OL7W").unwrap();
        assert_eq!(detail.description, None);
        assert!(detail.covers.is_empty());
        assert_eq!(detail.subjects, vec!["a"]);
    }

    #[test]
    fn missing_work_is_http_404() {
        let transport = FakeTransport::default();
        let client = client_with(&transport, 0);
        let err = client.fetch_details("/works/OL0W").unwrap_err();
        assert_eq!(err, CatalogError::Http { status: 404 });
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn trending_uses_picked_category_and_limit() {
        let transport = FakeTransport::default();
        transport.respond(
            "https://openlibrary.org/subjects/science.json?limit=24",
            200,
            r#"{"works":[{"key":"/works/OL9W","title":"Cosmos"}]}"#,
        );
        let mut client = client_with(&transport, 2);

        let works = client.fetch_trending(24).unwrap();
        assert_eq!(works[0].title, "Cosmos");
        assert_eq!(
            transport.urls(),
            vec!["https://openlibrary.org/subjects/science.json?limit=24".to_string()]
        );
    }
}
