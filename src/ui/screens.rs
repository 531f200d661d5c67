use std::time::{Duration, Instant};

use crate::catalog::{cover_image_url, CoverSize, Endpoints};
use crate::models::{BookDetail, BookSummary};

use super::helpers::{
    author_line, format_line, language_names, lookup_or, truncate_title, NOT_AVAILABLE,
};

/// Books shown per page.
pub const BOOKS_PER_PAGE: usize = 12;

pub(crate) const CARD_PLACEHOLDER: &str =
    "https://placehold.co/200x300/e9e9e9/7d7d7d?text=Nessuna+copertina";
pub(crate) const DETAIL_PLACEHOLDER: &str =
    "https://placehold.co/400x600/e9e9e9/7d7d7d?text=Nessuna+copertina";

/// What the main area is showing. The detail modal lives outside this on
/// purpose: it can be loading or failing while the list stays put.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    Idle,
    Loading,
    Results,
    NoResults { message: String },
    Error { message: String },
}

/// Result list of the current query plus the page cursor. `current_page`
/// always stays within `1..=total_pages`, and `total_pages` is at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    books: Vec<BookSummary>,
    current_page: usize,
    total_pages: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Pagination {
    /// Start a fresh result set on page 1.
    pub fn new(books: Vec<BookSummary>) -> Self {
        let total_pages = books.len().div_ceil(BOOKS_PER_PAGE).max(1);
        Self {
            books,
            current_page: 1,
            total_pages,
        }
    }

    pub fn all_books(&self) -> &[BookSummary] {
        &self.books
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn total_books(&self) -> usize {
        self.books.len()
    }

    /// Slice of books on the current page.
    pub fn paginated_books(&self) -> &[BookSummary] {
        let (start, end) = self.bounds();
        &self.books[start..end]
    }

    /// Jump to `page`. Out-of-range pages leave everything untouched and
    /// return `false`.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Controls only make sense with more than one page.
    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }

    pub fn page_label(&self) -> String {
        format!("Pagina {} di {}", self.current_page, self.total_pages)
    }

    /// One-based `(first, last, total)` of the visible range.
    pub fn visible_range(&self) -> (usize, usize, usize) {
        let (start, end) = self.bounds();
        (start + 1, end, self.books.len())
    }

    pub fn summary_label(&self) -> String {
        let (first, last, total) = self.visible_range();
        format!("Visualizzazione risultati {first}-{last} di {total}")
    }

    fn bounds(&self) -> (usize, usize) {
        let start = (self.current_page - 1) * BOOKS_PER_PAGE;
        let end = (start + BOOKS_PER_PAGE).min(self.books.len());
        (start.min(end), end)
    }
}

/// Display-ready content of one result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    pub key: String,
    pub title: String,
    pub authors: String,
    pub cover: String,
    pub year: Option<i32>,
    pub cover_id: Option<i64>,
}

impl BookCard {
    pub fn from_summary(book: &BookSummary, endpoints: &Endpoints) -> Self {
        Self {
            key: book.key.clone(),
            title: truncate_title(&book.title),
            authors: author_line(book),
            cover: cover_image_url(&endpoints.covers_url, book.cover_id, CoverSize::Medium)
                .unwrap_or_else(|| CARD_PLACEHOLDER.to_string()),
            year: book.first_publish_year,
            cover_id: book.cover_id,
        }
    }
}

/// Everything the detail modal prints, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub key: String,
    pub heading: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub subjects: String,
    pub formats: String,
    pub languages: String,
    pub publish_date: String,
    pub publisher: String,
    pub badges: Vec<String>,
    pub cover: String,
    pub catalog_url: String,
}

impl DetailView {
    pub fn build(detail: &BookDetail, key: &str, endpoints: &Endpoints) -> Self {
        let heading = detail
            .title
            .clone()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| "Dettagli del libro".to_string());

        let description = detail
            .description
            .as_ref()
            .map(|description| description.text().trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| "Nessuna descrizione disponibile.".to_string());

        let subjects: Vec<&String> = detail.subjects.iter().take(10).collect();
        let subject_line = if subjects.is_empty() {
            "Non disponibili".to_string()
        } else {
            subjects
                .iter()
                .map(|subject| subject.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let languages = language_names(detail);
        let language_line = if languages.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            languages.join(", ")
        };

        let mut badges: Vec<String> = languages.into_iter().take(1).collect();
        badges.extend(subjects.iter().take(3).map(|subject| subject.to_string()));

        let cover = cover_image_url(
            &endpoints.covers_url,
            detail.covers.first().copied(),
            CoverSize::Large,
        )
        .unwrap_or_else(|| DETAIL_PLACEHOLDER.to_string());

        Self {
            key: key.to_string(),
            heading,
            subtitle: detail.subtitle.clone().filter(|s| !s.trim().is_empty()),
            description,
            subjects: subject_line,
            formats: format_line(detail),
            languages: language_line,
            publish_date: lookup_or(detail.raw(), "first_publish_date", "Data sconosciuta"),
            publisher: lookup_or(detail.raw(), "publishers.0.name", "Editore sconosciuto"),
            badges,
            cover,
            catalog_url: endpoints.work_page(key),
        }
    }
}

/// Sub-states of the detail modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailModal {
    Loading { key: String },
    Loaded(Box<DetailView>),
    Failed { key: String, message: String },
}

impl DetailModal {
    pub fn key(&self) -> &str {
        match self {
            DetailModal::Loading { key } | DetailModal::Failed { key, .. } => key,
            DetailModal::Loaded(view) => &view.key,
        }
    }
}

/// Dismissible error notice shown above the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub raised_at: Instant,
}

impl Banner {
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.raised_at) >= ttl
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn books(count: usize) -> Vec<BookSummary> {
        (1..=count)
            .map(|n| BookSummary {
                key: format!("/works/OL{n}W"),
                title: format!("Book {n}"),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn total_pages_for_various_sizes() {
        for (count, pages) in [(0, 1), (1, 1), (12, 1), (13, 2), (24, 2), (100, 9)] {
            assert_eq!(Pagination::new(books(count)).total_pages(), pages, "{count} books");
        }
    }

    #[test]
    fn every_page_holds_the_expected_count() {
        for count in [0usize, 5, 12, 13, 37, 100] {
            let mut pagination = Pagination::new(books(count));
            for page in 1..=pagination.total_pages() {
                assert!(pagination.go_to_page(page));
                let expected = BOOKS_PER_PAGE.min(count - (page - 1) * BOOKS_PER_PAGE);
                assert_eq!(pagination.paginated_books().len(), expected);
            }
        }
    }

    #[test]
    fn out_of_range_pages_are_ignored() {
        let mut pagination = Pagination::new(books(30));
        pagination.go_to_page(2);
        let before = pagination.clone();
        assert!(!pagination.go_to_page(0));
        assert!(!pagination.go_to_page(4));
        assert_eq!(pagination, before);
    }

    #[test]
    fn hundred_books_walkthrough() {
        let mut pagination = Pagination::new(books(100));
        assert_eq!(pagination.paginated_books()[0].title, "Book 1");
        assert_eq!(pagination.paginated_books()[11].title, "Book 12");
        assert!(!pagination.has_previous());

        pagination.go_to_page(9);
        let titles: Vec<&str> = pagination
            .paginated_books()
            .iter()
            .map(|b| b.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Book 97", "Book 98", "Book 99", "Book 100"]);
        assert!(!pagination.has_next());
        assert_eq!(pagination.page_label(), "Pagina 9 di 9");
        assert_eq!(pagination.summary_label(), "Visualizzazione risultati 97-100 di 100");
    }

    #[test]
    fn single_page_hides_controls() {
        assert!(!Pagination::new(books(12)).shows_controls());
        assert!(Pagination::new(books(13)).shows_controls());
    }

    #[test]
    fn card_uses_placeholder_without_cover() {
        let endpoints = Endpoints::default();
        let mut book = books(1).remove(0);
        assert_eq!(BookCard::from_summary(&book, &endpoints).cover, CARD_PLACEHOLDER);
        book.cover_id = Some(8);
        assert_eq!(
            BookCard::from_summary(&book, &endpoints).cover,
            "https://covers.openlibrary.org/b/id/8-M.jpg"
        );
    }

    #[test]
    fn detail_view_fills_placeholders() {
        let detail = BookDetail::from_value(json!({ "key": "/works/OL7W" })).unwrap();
        let view = DetailView::build(&detail, "/works/OL7W", &Endpoints::default());
        assert_eq!(view.heading, "Dettagli del libro");
        assert_eq!(view.description, "Nessuna descrizione disponibile.");
        assert_eq!(view.subjects, "Non disponibili");
        assert_eq!(view.formats, "Non disponibile");
        assert_eq!(view.languages, "Non disponibile");
        assert_eq!(view.publish_date, "Data sconosciuta");
        assert_eq!(view.publisher, "Editore sconosciuto");
        assert_eq!(view.cover, DETAIL_PLACEHOLDER);
        assert!(view.badges.is_empty());
        assert_eq!(view.catalog_url, "https://openlibrary.org/works/OL7W");
    }

    #[test]
    fn detail_view_formats_rich_record() {
        let subjects: Vec<String> = (1..=12).map(|n| format!("Subject {n}")).collect();
        let detail = BookDetail::from_value(json!({
            "key": "/works/OL45804W",
            "title": "Fantastic Mr Fox",
            "subtitle": "A classic",
            "description": { "type": "/type/text", "value": "A clever fox." },
            "subjects": subjects,
            "covers": [6498519, 8904777],
            "languages": [{ "key": "/languages/eng" }, { "key": "/languages/ita" }],
            "first_publish_date": "1970",
            "publishers": [{ "name": "Puffin" }],
            "ebooks": [{ "formats": { "pdf": {} } }]
        }))
        .unwrap();

        let view = DetailView::build(&detail, "/works/OL45804W", &Endpoints::default());
        assert_eq!(view.heading, "Fantastic Mr Fox");
        assert_eq!(view.subtitle.as_deref(), Some("A classic"));
        assert_eq!(view.description, "A clever fox.");
        assert_eq!(view.subjects.split(", ").count(), 10);
        assert_eq!(view.languages, "Inglese, Italiano");
        assert_eq!(view.formats, "pdf");
        assert_eq!(view.publish_date, "1970");
        assert_eq!(view.publisher, "Puffin");
        assert_eq!(view.cover, "https://covers.openlibrary.org/b/id/6498519-L.jpg");
        assert_eq!(
            view.badges,
            vec!["Inglese", "Subject 1", "Subject 2", "Subject 3"]
        );
    }

    #[test]
    fn banners_expire_after_ttl() {
        let raised_at = Instant::now();
        let banner = Banner {
            message: "boom".into(),
            raised_at,
        };
        let ttl = Duration::from_secs(5);
        assert!(!banner.is_expired(raised_at + Duration::from_secs(4), ttl));
        assert!(banner.is_expired(raised_at + Duration::from_secs(5), ttl));
    }
}
