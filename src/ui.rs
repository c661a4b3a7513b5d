// 🖥️ Terminal Browser - Marketplace, timeline and feed pages over one CatalogStore
//
// All view-state (selected month, expanded aspect, search text, request
// dialog) lives on App. The store itself is never mutated from here.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;

use tech_catalog::{
    filter, find_aspect_by_id, find_item_by_id, find_timeline_entry_by_date, CatalogStore,
    Category, Facet, FilterSpec, Item, ItemKind, ProductRequestDraft, Submission, SubmissionSink,
    TimelineEntry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Marketplace,
    Timeline,
    Feed,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Marketplace => Page::Timeline,
            Page::Timeline => Page::Feed,
            Page::Feed => Page::Marketplace,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Marketplace => Page::Feed,
            Page::Timeline => Page::Marketplace,
            Page::Feed => Page::Timeline,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Marketplace => "Marketplace",
            Page::Timeline => "Timeline",
            Page::Feed => "Feed",
        }
    }
}

// ============================================================================
// REQUEST DIALOG
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestField {
    Title,
    Description,
    Category,
    Name,
    Email,
}

impl RequestField {
    const ORDER: [RequestField; 5] = [
        RequestField::Title,
        RequestField::Description,
        RequestField::Category,
        RequestField::Name,
        RequestField::Email,
    ];

    fn label(&self) -> &str {
        match self {
            RequestField::Title => "Product",
            RequestField::Description => "Description",
            RequestField::Category => "Category",
            RequestField::Name => "Your name",
            RequestField::Email => "Email",
        }
    }

    fn next(&self) -> Self {
        let i = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    fn previous(&self) -> Self {
        let i = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone)]
pub struct RequestForm {
    pub draft: ProductRequestDraft,
    pub field: RequestField,
}

impl RequestForm {
    fn new() -> Self {
        RequestForm {
            draft: ProductRequestDraft::default(),
            field: RequestField::Title,
        }
    }

    fn value_mut(&mut self) -> &mut String {
        match self.field {
            RequestField::Title => &mut self.draft.title,
            RequestField::Description => &mut self.draft.description,
            RequestField::Category => &mut self.draft.category,
            RequestField::Name => &mut self.draft.name,
            RequestField::Email => &mut self.draft.email,
        }
    }

    fn value(&self, field: RequestField) -> &str {
        match field {
            RequestField::Title => &self.draft.title,
            RequestField::Description => &self.draft.description,
            RequestField::Category => &self.draft.category,
            RequestField::Name => &self.draft.name,
            RequestField::Email => &self.draft.email,
        }
    }
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub store: CatalogStore,
    sink: Box<dyn SubmissionSink>,
    pub current_page: Page,

    // Marketplace
    pub filter: FilterSpec,
    pub search_mode: bool,
    pub visible_ids: Vec<u32>,
    pub state: TableState,
    pub show_detail: bool,
    pub request: Option<RequestForm>,

    // Timeline
    pub selected_month: Option<String>,
    pub aspect_cursor: usize,
    pub expanded_aspect: Option<u32>,

    // Feed
    pub feed_state: TableState,

    pub status_message: Option<String>,
}

impl App {
    pub fn new(store: CatalogStore, sink: Box<dyn SubmissionSink>) -> Self {
        let selected_month = store.timeline().latest().map(|e| e.date.clone());

        let mut feed_state = TableState::default();
        if !store.feed().cards.is_empty() {
            feed_state.select(Some(0));
        }

        let mut app = Self {
            store,
            sink,
            current_page: Page::Marketplace,
            filter: FilterSpec::any(),
            search_mode: false,
            visible_ids: Vec::new(),
            state: TableState::default(),
            show_detail: false,
            request: None,
            selected_month,
            aspect_cursor: 0,
            expanded_aspect: None,
            feed_state,
            status_message: None,
        };
        app.refresh_items();
        app
    }

    /// Re-run the filter and keep the selection in range
    pub fn refresh_items(&mut self) {
        self.visible_ids = filter(&self.store, &self.filter).ids();

        if self.visible_ids.is_empty() {
            self.state.select(None);
            self.show_detail = false;
        } else {
            let i = self.state.selected().unwrap_or(0).min(self.visible_ids.len() - 1);
            self.state.select(Some(i));
        }
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.state
            .selected()
            .and_then(|i| self.visible_ids.get(i))
            .and_then(|id| find_item_by_id(&self.store, *id))
    }

    pub fn selected_entry(&self) -> Option<&TimelineEntry> {
        self.selected_month
            .as_deref()
            .and_then(|date| find_timeline_entry_by_date(&self.store, date))
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    pub fn next(&mut self) {
        if self.visible_ids.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.visible_ids.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.visible_ids.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.visible_ids.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn toggle_detail(&mut self) {
        if self.selected_item().is_some() {
            self.show_detail = !self.show_detail;
        }
    }

    // ------------------------------------------------------------------------
    // Facets
    // ------------------------------------------------------------------------

    /// Any → Funding → Subscription → Any
    pub fn cycle_kind(&mut self) {
        self.filter.kind = cycle_facet(&self.filter.kind, ItemKind::all());
        self.refresh_items();
    }

    /// Any → each category in catalog order → Any
    pub fn cycle_category(&mut self) {
        self.filter.category = cycle_facet(&self.filter.category, Category::all());
        self.refresh_items();
    }

    pub fn push_query_char(&mut self, c: char) {
        self.filter.query.push(c);
        self.refresh_items();
    }

    pub fn pop_query_char(&mut self) {
        self.filter.query.pop();
        self.refresh_items();
    }

    pub fn clear_filter(&mut self) {
        self.filter = FilterSpec::any();
        self.search_mode = false;
        self.refresh_items();
    }

    // ------------------------------------------------------------------------
    // Timeline
    // ------------------------------------------------------------------------

    /// Move `offset` months along the rail (newest first), clamped at the ends
    pub fn move_month(&mut self, offset: isize) {
        let dates = self.store.timeline().dates();
        if dates.is_empty() {
            return;
        }

        let current = self
            .selected_month
            .as_deref()
            .and_then(|m| dates.iter().position(|d| *d == m))
            .unwrap_or(0);
        let target = (current as isize + offset).clamp(0, dates.len() as isize - 1) as usize;

        if dates.get(target).copied() != self.selected_month.as_deref() {
            self.selected_month = dates.get(target).map(|d| d.to_string());
            self.aspect_cursor = 0;
            self.expanded_aspect = None;
        }
    }

    pub fn move_aspect(&mut self, offset: isize) {
        let count = self.selected_entry().map(|e| e.aspects.len()).unwrap_or(0);
        if count == 0 {
            return;
        }
        self.aspect_cursor =
            (self.aspect_cursor as isize + offset).clamp(0, count as isize - 1) as usize;
    }

    /// Expand the aspect under the cursor; collapse it if already expanded
    pub fn toggle_aspect(&mut self) {
        let Some(aspect_id) = self
            .selected_entry()
            .and_then(|e| e.aspects.get(self.aspect_cursor))
            .map(|a| a.id)
        else {
            return;
        };

        self.expanded_aspect = if self.expanded_aspect == Some(aspect_id) {
            None
        } else {
            Some(aspect_id)
        };
    }

    // ------------------------------------------------------------------------
    // Feed
    // ------------------------------------------------------------------------

    pub fn move_card(&mut self, offset: isize) {
        let count = self.store.feed().cards.len();
        if count == 0 {
            return;
        }
        let i = self.feed_state.selected().unwrap_or(0) as isize + offset;
        self.feed_state.select(Some(i.rem_euclid(count as isize) as usize));
    }

    // ------------------------------------------------------------------------
    // Request dialog
    // ------------------------------------------------------------------------

    pub fn open_request(&mut self) {
        self.request = Some(RequestForm::new());
    }

    pub fn submit_request(&mut self) {
        let Some(form) = self.request.take() else {
            return;
        };

        match self.sink.submit(Submission::ProductRequest(form.draft)) {
            Ok(receipt) => {
                self.status_message = Some(format!(
                    "Your product request has been submitted successfully! ({})",
                    receipt.id
                ));
            }
            Err(err) => {
                tracing::warn!(error = %err, "Product request failed");
                self.status_message = Some(format!("Request failed: {}", err));
            }
        }
    }

    // ------------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------------

    /// Apply one key press; returns false when the app should exit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.request.is_some() {
            self.handle_request_key(key);
            return true;
        }

        if self.search_mode {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.search_mode = false,
                KeyCode::Backspace => self.pop_query_char(),
                KeyCode::Char(c) => self.push_query_char(c),
                _ => {}
            }
            return true;
        }

        self.status_message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.previous_page();
                } else {
                    self.next_page();
                }
            }
            KeyCode::BackTab => self.previous_page(),
            _ => match self.current_page {
                Page::Marketplace => self.handle_marketplace_key(key.code),
                Page::Timeline => self.handle_timeline_key(key.code),
                Page::Feed => self.handle_feed_key(key.code),
            },
        }

        true
    }

    fn handle_marketplace_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('/') => self.search_mode = true,
            KeyCode::Char('t') => self.cycle_kind(),
            KeyCode::Char('c') => self.cycle_category(),
            KeyCode::Char('x') => self.clear_filter(),
            KeyCode::Char('r') => self.open_request(),
            KeyCode::Enter => self.toggle_detail(),
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Home => {
                if !self.visible_ids.is_empty() {
                    self.state.select(Some(0));
                }
            }
            KeyCode::End => {
                if !self.visible_ids.is_empty() {
                    self.state.select(Some(self.visible_ids.len() - 1));
                }
            }
            _ => {}
        }
    }

    fn handle_timeline_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Down | KeyCode::Char('j') => self.move_month(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_month(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_aspect(1),
            KeyCode::Left | KeyCode::Char('h') => self.move_aspect(-1),
            KeyCode::Enter => self.toggle_aspect(),
            _ => {}
        }
    }

    fn handle_feed_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Down | KeyCode::Char('j') => self.move_card(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_card(-1),
            _ => {}
        }
    }

    fn handle_request_key(&mut self, key: KeyEvent) {
        let Some(form) = self.request.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Esc => self.request = None,
            KeyCode::Enter => self.submit_request(),
            KeyCode::Tab | KeyCode::Down => form.field = form.field.next(),
            KeyCode::BackTab | KeyCode::Up => form.field = form.field.previous(),
            KeyCode::Backspace => {
                form.value_mut().pop();
            }
            KeyCode::Char(c) => form.value_mut().push(c),
            _ => {}
        }
    }
}

fn cycle_facet<T: Copy + PartialEq>(current: &Facet<T>, values: &[T]) -> Facet<T> {
    match current {
        Facet::Any => values.first().copied().into(),
        Facet::Exactly(value) => {
            let next = values
                .iter()
                .position(|v| v == value)
                .and_then(|i| values.get(i + 1));
            next.copied().into()
        }
    }
}

// ============================================================================
// TERMINAL LOOP
// ============================================================================

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && !app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Marketplace => {
            if app.show_detail {
                let content_chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .split(chunks[1]);

                render_items(f, content_chunks[0], app);
                render_item_detail(f, content_chunks[1], app);
            } else {
                render_items(f, chunks[1], app);
            }
        }
        Page::Timeline => render_timeline(f, chunks[1], app),
        Page::Feed => render_feed(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);

    if app.request.is_some() {
        render_request_dialog(f, app);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [Page::Marketplace, Page::Timeline, Page::Feed];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Items: {}", app.store.item_count()),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Months: {}", app.store.all_timeline_entries().len()),
        Style::default().fg(Color::Cyan),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn facet_label<T>(facet: &Facet<T>, label: impl Fn(&T) -> String) -> String {
    match facet {
        Facet::Any => "All".to_string(),
        Facet::Exactly(value) => label(value),
    }
}

fn render_items(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let search_style = if app.search_mode {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let filters = Paragraph::new(Line::from(vec![
        Span::styled(" Search: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("{}{}", app.filter.query, if app.search_mode { "▏" } else { "" }),
            search_style,
        ),
        Span::raw("   "),
        Span::styled("Type: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(facet_label(&app.filter.kind, |k| k.label().to_string())),
        Span::raw("   "),
        Span::styled("Category: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(facet_label(&app.filter.category, |c| c.as_str().to_string())),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(filters, chunks[0]);

    if app.visible_ids.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from("  No products found matching your criteria"),
            Line::from(""),
            Line::from(vec![
                Span::raw("  Can't find what you're looking for? Press "),
                Span::styled("r", Style::default().fg(Color::Yellow)),
                Span::raw(" to request a product"),
            ]),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Products "));
        f.render_widget(empty, chunks[1]);
        return;
    }

    let header_cells = ["#", "Title", "Type", "Category", "Rating", "Price / Goal"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let items: Vec<&Item> = app
        .visible_ids
        .iter()
        .filter_map(|id| find_item_by_id(&app.store, *id))
        .collect();

    let rows = items.iter().map(|item| {
        let color = match item.kind() {
            ItemKind::Funding => Color::Green,
            ItemKind::Subscription => Color::Cyan,
        };

        Row::new(vec![
            Cell::from(item.id.to_string()),
            Cell::from(truncate(&item.title, 34)),
            Cell::from(item.kind().label()).style(Style::default().fg(color)),
            Cell::from(truncate(item.category.as_str(), 20)),
            Cell::from(format!("★ {:.1} ({})", item.rating, item.review_count)),
            Cell::from(item.offer.amount()).style(Style::default().fg(color)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(36),
            Constraint::Length(14),
            Constraint::Length(22),
            Constraint::Length(12),
            Constraint::Length(18),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" Products ({}) ", items.len())),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, chunks[1], &mut app.state);
}

fn label_line(label: impl Into<String>, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            label.into(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.into()),
    ])
}

fn section_line(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

fn render_item_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Product Details ");

    let Some(item) = app.selected_item() else {
        f.render_widget(Paragraph::new("No product selected").block(block), area);
        return;
    };

    let mut content = vec![
        Line::from(Span::styled(
            item.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            item.description.as_str(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        label_line("By: ", format!("{} ({})", item.author.name, item.author.tag)),
        label_line("Category: ", item.category.as_str()),
        label_line(
            "Rating: ",
            format!("★ {:.1} ({} reviews)", item.rating, item.review_count),
        ),
        label_line(format!("{}: ", item.kind().label()), item.offer.amount()),
        Line::from(Span::styled(
            format!("[ {} ]", item.offer.action_label()),
            Style::default().fg(Color::Green),
        )),
    ];

    match &item.specs {
        Some(specs) => {
            content.push(Line::from(""));
            content.push(section_line("OVERVIEW"));
            content.push(label_line("Vision: ", specs.overview.vision.as_str()));
            content.push(label_line("Problem: ", specs.overview.problem.as_str()));
            content.push(label_line("Solution: ", specs.overview.solution.as_str()));

            content.push(Line::from(""));
            content.push(section_line("TECHNICAL"));
            for spec in &specs.technical {
                content.push(label_line("• ", format!("{}: {}", spec.label, spec.value)));
            }

            content.push(Line::from(""));
            content.push(section_line("ROADMAP"));
            for milestone in &specs.roadmap {
                content.push(Line::from(format!("{}  {}", milestone.date, milestone.title)));
            }

            content.push(Line::from(""));
            content.push(section_line("REVIEWS"));
            for review in &specs.reviews {
                content.push(Line::from(vec![
                    Span::styled(
                        "★".repeat(review.rating as usize),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(format!(" {} ({})", review.user, review.date)),
                ]));
                content.push(Line::from(format!("  {}", review.comment)));
            }
        }
        None => {
            content.push(Line::from(""));
            content.push(Line::from(Span::styled(
                "No specification page for this product yet",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let detail = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(detail, area);
}

fn render_timeline(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(0)])
        .split(area);

    let timeline = app.store.timeline();
    let rail: Vec<Line> = timeline
        .entries
        .iter()
        .map(|entry| {
            let selected = app.selected_month.as_deref() == Some(entry.date.as_str());
            let style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(vec![
                Span::styled(if selected { "● " } else { "○ " }, style),
                Span::styled(format!("{}  {}", entry.date, truncate(&entry.title, 22)), style),
            ])
        })
        .collect();

    let rail = Paragraph::new(rail).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", timeline.title)),
    );
    f.render_widget(rail, chunks[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let Some(entry) = app.selected_entry() else {
        f.render_widget(Paragraph::new("No timeline entries").block(block), chunks[1]);
        return;
    };

    let mut content = vec![
        Line::from(Span::styled(
            entry.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            entry.summary_text.as_str(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(entry.overview_text.as_str()),
        Line::from(""),
        section_line("TECHNICAL ASPECTS"),
    ];

    for (i, aspect) in entry.aspects.iter().enumerate() {
        let cursor = if i == app.aspect_cursor { "→ " } else { "  " };
        let expanded = app.expanded_aspect == Some(aspect.id);
        content.push(Line::from(vec![
            Span::styled(cursor, Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{} {}", if expanded { "▾" } else { "▸" }, aspect.title),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({} reviews)", aspect.reviews.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    if let Some(aspect) = app
        .expanded_aspect
        .and_then(|id| find_aspect_by_id(entry, id))
    {
        content.push(Line::from(""));
        content.push(Line::from(aspect.body_text.as_str()));
        for review in &aspect.reviews {
            let badge = if review.approved {
                Span::styled("✓ ", Style::default().fg(Color::Green))
            } else {
                Span::styled("… ", Style::default().fg(Color::DarkGray))
            };
            content.push(Line::from(""));
            content.push(Line::from(vec![
                badge,
                Span::styled(review.author.as_str(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(" ({})", review.timestamp)),
            ]));
            content.push(Line::from(format!("  {}", review.body_text)));
        }
    }

    let detail = Paragraph::new(content)
        .block(block.title(format!(" Version as of {} ", entry.date)))
        .wrap(Wrap { trim: false });
    f.render_widget(detail, chunks[1]);
}

fn render_feed(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let feed = app.store.feed();

    let mut intro = vec![Line::from(Span::styled(
        feed.overview.description.as_str(),
        Style::default().fg(Color::White),
    ))];
    for feature in &feed.overview.features {
        intro.push(Line::from(vec![
            Span::styled("  ✓ ", Style::default().fg(Color::Green)),
            Span::raw(feature.as_str()),
        ]));
    }
    if let Some(featured) = &feed.featured {
        intro.push(Line::from(vec![
            Span::styled("⭐ ", Style::default().fg(Color::Yellow)),
            Span::styled(featured.title.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!(" [{}]", featured.topic), Style::default().fg(Color::DarkGray)),
        ]));
    }
    let overview = Paragraph::new(intro)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", feed.overview.title)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(overview, chunks[0]);

    let header = Row::new(["Topic", "Title", "Link"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    }))
    .style(Style::default().bg(Color::DarkGray));

    let rows: Vec<Row> = feed
        .cards
        .iter()
        .map(|card| {
            Row::new(vec![
                Cell::from(truncate(&card.topic, 20)).style(Style::default().fg(Color::Cyan)),
                Cell::from(truncate(&card.title, 44)),
                Cell::from(format!("/topic/{}", card.topic_slug()))
                    .style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let topics: Vec<Span> = feed
        .navigation_topics()
        .into_iter()
        .flat_map(|topic| {
            [
                Span::styled(topic.name, Style::default().fg(Color::White)),
                Span::raw("  "),
            ]
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Length(22), Constraint::Length(46), Constraint::Min(10)],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(" Stories "))
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, chunks[1], &mut app.feed_state);

    let nav = Paragraph::new(Line::from(topics))
        .block(Block::default().borders(Borders::ALL).title(" Topics "));
    f.render_widget(nav, chunks[2]);
}

fn render_request_dialog(f: &mut Frame, app: &App) {
    let Some(form) = &app.request else {
        return;
    };

    let area = centered_rect(60, 14, f.size());

    let mut content = vec![
        Line::from(Span::styled(
            "Tell us what product you'd like to see in our marketplace",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];
    for field in RequestField::ORDER {
        let active = field == form.field;
        let label_style = if active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        content.push(Line::from(vec![
            Span::styled(format!("{:<12} ", field.label()), label_style),
            Span::raw(form.value(field).to_string()),
            Span::raw(if active { "▏" } else { "" }),
        ]));
    }
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Submit Request | "),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Next field | "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" Cancel"),
    ]));

    let dialog = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Request a Product "),
    );

    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    if let Some(message) = &app.status_message {
        status_spans.push(Span::styled(
            format!(" {} ", message),
            Style::default().fg(Color::Green),
        ));
    } else {
        match app.current_page {
            Page::Marketplace => {
                let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
                status_spans.push(Span::styled(
                    format!(" Row: {}/{} ", selected, app.visible_ids.len()),
                    Style::default().fg(Color::Cyan),
                ));
                let hints = [
                    ("/", " Search | "),
                    ("t", " Type | "),
                    ("c", " Category | "),
                    ("x", " Clear | "),
                    ("r", " Request | "),
                    ("Enter", " Details | "),
                ];
                for (key, label) in hints {
                    status_spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
                    status_spans.push(Span::raw(label));
                }
            }
            Page::Timeline => {
                let hints = [("↑/↓", " Month | "), ("←/→", " Aspect | "), ("Enter", " Expand | ")];
                for (key, label) in hints {
                    status_spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
                    status_spans.push(Span::raw(label));
                }
            }
            Page::Feed => {
                status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
                status_spans.push(Span::raw(" Nav | "));
            }
        }
        status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Page | "));
        status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        status_spans.push(Span::raw(" Quit"));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn centered_rect(width_percent: u16, height: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1])[1]
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
