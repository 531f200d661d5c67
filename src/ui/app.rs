use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{debug, info, warn};

use crate::catalog::{normalize_work_key, CatalogResult, Endpoints};
use crate::config::Config;
use crate::models::{BookDetail, BookSummary};
use crate::worker::{FetchJob, FetchOutcome, ListOrigin, Ticket};

use super::forms::SearchForm;
use super::helpers::{centered_rect, repeat_pattern_row};
use super::layout::Regions;
use super::screens::{
    Banner, BookCard, DetailModal, DetailView, Pagination, ViewMode, BOOKS_PER_PAGE,
};
use super::UiError;

/// Number of book cards shown in each row of the results grid.
const GRID_COLUMNS: usize = 4;
const GRID_ROWS: usize = BOOKS_PER_PAGE / GRID_COLUMNS;
/// Banners kept on screen at once; older ones are dropped first.
const MAX_BANNERS: usize = 3;
const TRENDING_TITLE: &str = "Libri in evidenza";
const WORKER_GONE: &str = "Servizio di ricerca non disponibile";
/// ASCII textures standing in for cover images. Cards rotate through them by
/// cover id so the grid does not look uniform.
const COVER_ART: &[&[&str]] = &[
    &["/\\/\\/", "\\/\\/\\"],
    &["*+*+", "+*+*"],
    &["=--=", "--=="],
    &["<>><", "><<>"],
    &["oOo ", " OoO"],
    &["~~  ", "  ~~"],
    &["^v^v", "v^v^"],
    &["::''", "''::"],
];

/// Which part of the screen receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Search,
    Results,
}

/// The single owned controller. It holds every piece of mutable UI state and
/// talks to the network only through the job channel handed in at
/// construction; outcomes come back through [`App::apply`].
///
/// Each list or detail request gets a fresh ticket. Only the outcome carrying
/// the latest ticket of its kind is applied, so a slow earlier search can
/// never overwrite a newer one.
pub struct App {
    jobs: Sender<FetchJob>,
    endpoints: Endpoints,
    trending_limit: u32,
    banner_ttl: Duration,
    search: SearchForm,
    focus: Focus,
    view: ViewMode,
    pagination: Pagination,
    section_title: Option<String>,
    /// Card index within the current page.
    selected: usize,
    detail: Option<DetailModal>,
    detail_scroll: u16,
    banners: Vec<Banner>,
    next_ticket: Ticket,
    pending_list: Option<Ticket>,
    pending_detail: Option<Ticket>,
}

impl App {
    pub fn new(jobs: Sender<FetchJob>, config: &Config) -> Self {
        Self {
            jobs,
            endpoints: config.endpoints(),
            trending_limit: config.trending_limit,
            banner_ttl: config.banner_ttl(),
            search: SearchForm::default(),
            focus: Focus::Search,
            view: ViewMode::Idle,
            pagination: Pagination::default(),
            section_title: None,
            selected: 0,
            detail: None,
            detail_scroll: 0,
            banners: Vec::new(),
            next_ticket: 0,
            pending_list: None,
            pending_detail: None,
        }
    }

    /// Kick off the initial trending load.
    pub fn start(&mut self) {
        self.load_trending();
    }

    pub fn view(&self) -> &ViewMode {
        &self.view
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn section_title(&self) -> Option<&str> {
        self.section_title.as_deref()
    }

    pub fn detail(&self) -> Option<&DetailModal> {
        self.detail.as_ref()
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    pub fn query(&self) -> &str {
        &self.search.query
    }

    pub fn selected_book(&self) -> Option<&BookSummary> {
        self.pagination.paginated_books().get(self.selected)
    }

    /// Cards for the current page, in display order.
    pub fn cards(&self) -> Vec<BookCard> {
        self.pagination
            .paginated_books()
            .iter()
            .map(|book| BookCard::from_summary(book, &self.endpoints))
            .collect()
    }

    /// Whether a list or detail request is still outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending_list.is_some() || self.pending_detail.is_some()
    }

    pub fn load_trending(&mut self) {
        let ticket = self.issue_ticket();
        self.pending_list = Some(ticket);
        self.view = ViewMode::Loading;
        self.dispatch_list(FetchJob::Trending {
            ticket,
            limit: self.trending_limit,
        });
    }

    /// Search the typed category. A blank query falls back to the trending
    /// shelf.
    pub fn submit_search(&mut self) {
        let Some(query) = self.search.submitted_query() else {
            self.load_trending();
            return;
        };
        info!(query = %query, "search submitted");
        let ticket = self.issue_ticket();
        self.pending_list = Some(ticket);
        self.view = ViewMode::Loading;
        self.dispatch_list(FetchJob::Search {
            ticket,
            category: query,
        });
    }

    /// Show another page of the held results. No network traffic; out-of-range
    /// pages change nothing.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if self.view != ViewMode::Results {
            return false;
        }
        let moved = self.pagination.go_to_page(page);
        if moved {
            self.selected = 0;
        }
        moved
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.pagination.current_page() + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        match self.pagination.current_page().checked_sub(1) {
            Some(page) => self.go_to_page(page),
            None => false,
        }
    }

    /// Open the detail modal for the selected card.
    pub fn open_details(&mut self) {
        let Some(key) = self.selected_book().map(|book| book.key.clone()) else {
            return;
        };
        let ticket = self.issue_ticket();
        self.pending_detail = Some(ticket);
        self.detail = Some(DetailModal::Loading { key: key.clone() });
        self.detail_scroll = 0;
        if self.jobs.send(FetchJob::Details { ticket, key: key.clone() }).is_err() {
            warn!("fetch worker is gone");
            self.pending_detail = None;
            self.detail = Some(DetailModal::Failed {
                key,
                message: detail_error(WORKER_GONE),
            });
        }
    }

    pub fn close_details(&mut self) {
        self.detail = None;
        self.pending_detail = None;
        self.detail_scroll = 0;
    }

    /// Fold a worker outcome into the state, dropping anything stale.
    pub fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Books {
                ticket,
                origin,
                result,
            } => {
                if self.pending_list != Some(ticket) {
                    debug!(ticket, "discarding stale book list");
                    return;
                }
                self.pending_list = None;
                self.show_books(origin, result);
            }
            FetchOutcome::Details {
                ticket,
                key,
                result,
            } => {
                if self.pending_detail != Some(ticket) {
                    debug!(ticket, key = %key, "discarding stale book detail");
                    return;
                }
                self.pending_detail = None;
                self.show_details(key, result);
            }
        }
    }

    /// Expire banners older than the configured lifetime.
    pub fn tick(&mut self, now: Instant) {
        let ttl = self.banner_ttl;
        self.banners.retain(|banner| !banner.is_expired(now, ttl));
    }

    pub fn raise_banner<S: Into<String>>(&mut self, message: S) {
        self.banners.push(Banner {
            message: message.into(),
            raised_at: Instant::now(),
        });
        if self.banners.len() > MAX_BANNERS {
            self.banners.remove(0);
        }
    }

    /// Drop the newest banner.
    pub fn dismiss_banner(&mut self) -> bool {
        self.banners.pop().is_some()
    }

    /// Route a key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.detail.is_some() {
            self.handle_detail_key(code);
            return false;
        }
        match self.focus {
            Focus::Search => {
                self.handle_search_key(code);
                false
            }
            Focus::Results => self.handle_results_key(code),
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                self.submit_search();
                self.focus = Focus::Results;
            }
            KeyCode::Esc | KeyCode::Tab | KeyCode::Down => self.focus = Focus::Results,
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Char(ch) => {
                self.search.push_char(ch);
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('/') | KeyCode::Char('s') | KeyCode::Tab => self.focus = Focus::Search,
            KeyCode::Left | KeyCode::Char('h') => self.move_horizontal(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_horizontal(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_vertical(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_vertical(1),
            KeyCode::Enter | KeyCode::Char('d') => self.open_details(),
            KeyCode::Char('n') | KeyCode::PageDown => {
                self.next_page();
            }
            KeyCode::Char('p') | KeyCode::PageUp => {
                self.previous_page();
            }
            KeyCode::Home => {
                self.go_to_page(1);
            }
            KeyCode::End => {
                self.go_to_page(self.pagination.total_pages());
            }
            KeyCode::Char('r') => {
                self.search.clear();
                self.load_trending();
            }
            KeyCode::Char('x') | KeyCode::Esc => {
                self.dismiss_banner();
            }
            _ => {}
        }
        false
    }

    fn handle_detail_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => self.close_details(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
            KeyCode::PageUp => self.detail_scroll = self.detail_scroll.saturating_sub(10),
            KeyCode::PageDown => self.detail_scroll = self.detail_scroll.saturating_add(10),
            KeyCode::Char('o') => self.open_in_browser(),
            KeyCode::Char('x') => {
                self.dismiss_banner();
            }
            _ => {}
        }
    }

    fn open_in_browser(&mut self) {
        let Some(modal) = &self.detail else {
            return;
        };
        let Ok(key) = normalize_work_key(modal.key()) else {
            return;
        };
        let url = self.endpoints.work_page(&key);
        if let Err(err) = open_link(&url) {
            warn!(%err, url = %url, "failed to open browser");
            self.raise_banner(format!("Impossibile aprire il collegamento: {err}"));
        }
    }

    /// Move along the row. Stepping past either end of the page flips to the
    /// neighbouring page.
    fn move_horizontal(&mut self, offset: isize) {
        let count = self.pagination.paginated_books().len();
        if count == 0 {
            return;
        }
        let target = self.selected as isize + offset;
        if target < 0 {
            if self.previous_page() {
                self.selected = self.pagination.paginated_books().len().saturating_sub(1);
            }
        } else if target as usize >= count {
            self.next_page();
        } else {
            self.selected = target as usize;
        }
    }

    fn move_vertical(&mut self, offset: isize) {
        let count = self.pagination.paginated_books().len();
        let target = self.selected as isize + offset * GRID_COLUMNS as isize;
        if target >= 0 && (target as usize) < count {
            self.selected = target as usize;
        }
    }

    fn show_books(&mut self, origin: ListOrigin, result: CatalogResult<Vec<BookSummary>>) {
        self.selected = 0;
        match result {
            Ok(books) if books.is_empty() => {
                let message = match origin {
                    ListOrigin::Trending => "Nessun libro disponibile al momento. Prova a cercare un titolo o una categoria.".to_string(),
                    ListOrigin::Search { query } => format!(
                        "Nessun risultato trovato per \"{query}\". Prova con un'altra categoria o titolo."
                    ),
                };
                self.pagination = Pagination::default();
                self.section_title = None;
                self.view = ViewMode::NoResults { message };
            }
            Ok(books) => {
                info!(count = books.len(), "results loaded");
                self.section_title = Some(match origin {
                    ListOrigin::Trending => TRENDING_TITLE.to_string(),
                    ListOrigin::Search { query } => format!("Risultati per \"{query}\""),
                });
                self.pagination = Pagination::new(books);
                self.view = ViewMode::Results;
            }
            Err(err) => {
                warn!(%err, "book list request failed");
                let message = match origin {
                    ListOrigin::Trending => {
                        format!("Errore durante il caricamento dei libri: {err}")
                    }
                    ListOrigin::Search { .. } => format!("Errore durante la ricerca: {err}"),
                };
                self.pagination = Pagination::default();
                self.section_title = None;
                self.raise_banner(message.clone());
                self.view = ViewMode::Error { message };
            }
        }
    }

    fn show_details(&mut self, key: String, result: CatalogResult<BookDetail>) {
        let modal = match result {
            Ok(detail) => {
                let work_key = normalize_work_key(&key).unwrap_or_else(|_| key.clone());
                DetailModal::Loaded(Box::new(DetailView::build(
                    &detail,
                    &work_key,
                    &self.endpoints,
                )))
            }
            Err(err) => {
                warn!(%err, key = %key, "detail request failed");
                DetailModal::Failed {
                    key,
                    message: detail_error(&err.to_string()),
                }
            }
        };
        self.detail = Some(modal);
    }

    fn dispatch_list(&mut self, job: FetchJob) {
        if self.jobs.send(job).is_err() {
            warn!("fetch worker is gone");
            self.pending_list = None;
            self.raise_banner(WORKER_GONE);
            self.view = ViewMode::Error {
                message: WORKER_GONE.to_string(),
            };
        }
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        self.next_ticket
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let regions = match Regions::split(area, self.banners.len()) {
            Ok(regions) => regions,
            Err(err) => {
                self.draw_too_small(frame, area, &err);
                return;
            }
        };

        self.draw_search_bar(frame, regions.search);
        self.draw_banners(frame, regions.banners);
        self.draw_results(frame, regions.results);
        self.draw_pagination(frame, regions.pagination);
        self.draw_footer(frame, regions.footer);

        if let Some(modal) = &self.detail {
            self.draw_detail(frame, area, modal);
        }
    }

    fn draw_too_small(&self, frame: &mut Frame, area: Rect, err: &UiError) {
        let notice = Paragraph::new(format!("Finestra troppo piccola ({err})"))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(notice, area);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Search && self.detail.is_none();
        let mut block = Block::default()
            .borders(Borders::ALL)
            .title("Open Library");
        if focused {
            block = block.border_style(Style::default().fg(Color::Yellow));
        }
        let input = Paragraph::new(self.search.build_line(focused)).block(block);
        frame.render_widget(input, area);
    }

    fn draw_banners(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let lines: Vec<Line> = self
            .banners
            .iter()
            .rev()
            .take(area.height as usize)
            .map(|banner| {
                Line::from(vec![
                    Span::styled(
                        " ! ",
                        Style::default()
                            .fg(Color::White)
                            .bg(Color::Red)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!(" {}", banner.message), Style::default().fg(Color::Red)),
                    Span::styled("  [x] chiudi", Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_results(&self, frame: &mut Frame, area: Rect) {
        let centered = |text: String, style: Style| {
            Paragraph::new(text)
                .style(style)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
        };
        match &self.view {
            ViewMode::Idle => frame.render_widget(
                centered(
                    "Cerca una categoria per iniziare.".to_string(),
                    Style::default(),
                ),
                area,
            ),
            ViewMode::Loading => frame.render_widget(
                centered(
                    "Caricamento in corso...".to_string(),
                    Style::default().fg(Color::Yellow),
                ),
                area,
            ),
            ViewMode::NoResults { message } => {
                frame.render_widget(centered(message.clone(), Style::default()), area)
            }
            ViewMode::Error { message } => frame.render_widget(
                centered(message.clone(), Style::default().fg(Color::Red)),
                area,
            ),
            ViewMode::Results => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(1),
                        Constraint::Min(0),
                        Constraint::Length(1),
                    ])
                    .split(area);
                if let Some(title) = &self.section_title {
                    let heading = Paragraph::new(Line::from(Span::styled(
                        title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )));
                    frame.render_widget(heading, chunks[0]);
                }
                self.draw_book_grid(frame, chunks[1]);
                let summary = Paragraph::new(self.pagination.summary_label())
                    .style(Style::default().fg(Color::DarkGray));
                frame.render_widget(summary, chunks[2]);
            }
        }
    }

    fn draw_book_grid(&self, frame: &mut Frame, area: Rect) {
        let cards = self.cards();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Ratio(1, GRID_ROWS as u32); GRID_ROWS])
            .split(area);
        for (row_idx, row_chunk) in rows.iter().enumerate() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
                .split(*row_chunk);
            for (col_idx, column_chunk) in columns.iter().enumerate() {
                let index = row_idx * GRID_COLUMNS + col_idx;
                let Some(card) = cards.get(index) else {
                    continue;
                };
                let selected = index == self.selected && self.focus == Focus::Results;
                let mut block = Block::default()
                    .borders(Borders::ALL)
                    .title(card.title.clone());
                if selected {
                    block = block.style(Style::default().fg(Color::Yellow));
                }
                let seed = card.cover_id.unwrap_or(index as i64).unsigned_abs() as usize;
                let art = COVER_ART[seed % COVER_ART.len()];
                let lines = card_lines(
                    card,
                    art,
                    column_chunk.width.saturating_sub(2),
                    column_chunk.height.saturating_sub(2),
                    selected,
                );
                frame.render_widget(Paragraph::new(lines).block(block), *column_chunk);
            }
        }
    }

    fn draw_pagination(&self, frame: &mut Frame, area: Rect) {
        if self.view != ViewMode::Results || !self.pagination.shows_controls() {
            return;
        }
        let enabled = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let disabled = Style::default().fg(Color::DarkGray);
        let line = Line::from(vec![
            Span::styled(
                "< Precedente",
                if self.pagination.has_previous() {
                    enabled
                } else {
                    disabled
                },
            ),
            Span::raw(format!("   {}   ", self.pagination.page_label())),
            Span::styled(
                "Successiva >",
                if self.pagination.has_next() {
                    enabled
                } else {
                    disabled
                },
            ),
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if self.is_busy() {
            Line::from(Span::styled(
                "Richiesta in corso...",
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        if self.detail.is_some() {
            return Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Scorri   "),
                Span::styled("[o]", key_style),
                Span::raw(" Apri nel browser   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Chiudi"),
            ]);
        }
        match self.focus {
            Focus::Search => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Cerca   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Risultati   "),
                Span::styled("[Ctrl+C]", key_style),
                Span::raw(" Esci"),
            ]),
            Focus::Results => Line::from(vec![
                Span::styled("[←↑↓→]", key_style),
                Span::raw(" Sposta   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Dettagli   "),
                Span::styled("[n/p]", key_style),
                Span::raw(" Pagina   "),
                Span::styled("[/]", key_style),
                Span::raw(" Cerca   "),
                Span::styled("[r]", key_style),
                Span::raw(" In evidenza   "),
                Span::styled("[x]", key_style),
                Span::raw(" Chiudi avviso   "),
                Span::styled("[q]", key_style),
                Span::raw(" Esci"),
            ]),
        }
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect, modal: &DetailModal) {
        let popup_area = centered_rect(80, 80, area);
        frame.render_widget(Clear, popup_area);

        let title = match modal {
            DetailModal::Loaded(view) => view.heading.clone(),
            _ => "Dettagli del libro".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::Cyan));

        let body = match modal {
            DetailModal::Loading { .. } => Paragraph::new("Caricamento dettagli...")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center),
            DetailModal::Failed { message, .. } => {
                Paragraph::new(message.clone()).style(Style::default().fg(Color::Red))
            }
            DetailModal::Loaded(view) => Paragraph::new(detail_lines(view)),
        };
        frame.render_widget(
            body.block(block)
                .wrap(Wrap { trim: false })
                .scroll((self.detail_scroll, 0)),
            popup_area,
        );
    }
}

fn detail_error(reason: &str) -> String {
    format!("Si è verificato un errore durante il recupero dei dettagli del libro: {reason}")
}

/// Body of a loaded detail modal.
fn detail_lines(view: &DetailView) -> Vec<Line<'static>> {
    let section = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let label = Style::default().add_modifier(Modifier::BOLD);
    let field = |name: &str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{name}: "), label),
            Span::raw(value.to_string()),
        ])
    };

    let mut lines = vec![Line::from(Span::styled(
        view.heading.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(subtitle) = &view.subtitle {
        lines.push(Line::from(Span::styled(
            subtitle.clone(),
            Style::default().fg(Color::Gray),
        )));
    }
    if !view.badges.is_empty() {
        let mut badges = Vec::new();
        for badge in &view.badges {
            badges.push(Span::styled(
                format!(" {badge} "),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ));
            badges.push(Span::raw(" "));
        }
        lines.push(Line::from(badges));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Descrizione", section)));
    lines.push(Line::from(view.description.clone()));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Genere e categorie", section)));
    lines.push(Line::from(view.subjects.clone()));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Informazioni", section)));
    lines.push(field("Lingue", &view.languages));
    lines.push(field("Formati", &view.formats));
    lines.push(field("Prima pubblicazione", &view.publish_date));
    lines.push(field("Editore", &view.publisher));
    lines.push(field("Copertina", &view.cover));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Vedi su Open Library: ", label),
        Span::styled(
            view.catalog_url.clone(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
        ),
    ]));
    lines
}

/// Card body: authors and year on top, cover texture in the middle, cover
/// image link (or the placeholder) at the bottom, clipped to the card width.
fn card_lines(
    card: &BookCard,
    pattern: &[&str],
    inner_width: u16,
    inner_height: u16,
    selected: bool,
) -> Vec<Line<'static>> {
    let width = inner_width as usize;
    let height = inner_height as usize;
    if width == 0 || height == 0 {
        return vec![Line::from("")];
    }

    let pattern_style = if selected {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let author_style = if selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut lines = vec![Line::from(Span::styled(card.authors.clone(), author_style))];
    if height >= 2 {
        let year = card
            .year
            .map(|year| format!("Prima edizione: {year}"))
            .unwrap_or_default();
        lines.push(Line::from(Span::styled(year, Style::default().fg(Color::Gray))));
    }

    let footer: String = card.cover.chars().take(width).collect();
    let art_rows = height.saturating_sub(lines.len() + 1);
    for row_idx in 0..art_rows {
        let row = repeat_pattern_row(pattern[row_idx % pattern.len()], width);
        lines.push(Line::from(Span::styled(row, pattern_style)));
    }
    if lines.len() < height {
        lines.push(Line::from(Span::styled(
            footer,
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}
