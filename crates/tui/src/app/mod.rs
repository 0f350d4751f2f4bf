use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use chrono_tz::Tz;
use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc;

use api_types::history::{HistoryRequest, HistoryResponse, TransactionView};
use engine::{FilterState, HistoryQuery};

use crate::{
    client::{Client, ClientError},
    config::AppConfig,
    error::{AppError, Result},
    ui,
};

/// Tags offered by the type-filter cycle. The classifier itself is open to
/// arbitrary tags; this list only drives the `t` key.
pub const TAG_CYCLE: &[&str] = &[
    "transfer_in",
    "transfer_out",
    "withdrawal",
    "deposit",
    "referral_commission",
    "ad_reward",
    "badge_bonus",
    "staking_reward",
    "holding_to_withdrawable",
    "loan_disbursement",
];

/// Fetch lifecycle of the history view.
///
/// `Failed` is a real state with a retry affordance; it is never conflated
/// with an empty result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

#[derive(Debug)]
pub struct HistoryState {
    pub items: Vec<engine::Transaction>,
    pub total_count: u64,
    pub statistics: Option<engine::Statistics>,
    pub fetch: FetchState,
    pub selected: usize,
}

impl Default for HistoryState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            statistics: None,
            fetch: FetchState::Loading,
            selected: 0,
        }
    }
}

impl HistoryState {
    fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.items.len() - 1);
    }

    fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
    }
}

#[derive(Debug)]
pub struct AppState {
    pub user_id: String,
    pub timezone: Tz,
    pub filters: FilterState,
    pub history: HistoryState,
    pub input_mode: InputMode,
    pub status: Option<String>,
    pub base_url: String,
}

impl AppState {
    pub fn total_pages(&self) -> u64 {
        if self.history.total_count == 0 {
            1
        } else {
            self.history.total_count.div_ceil(self.filters.page_size)
        }
    }
}

pub enum AppEvent {
    History {
        seq: u64,
        result: std::result::Result<HistoryResponse, ClientError>,
    },
    Export {
        result: std::result::Result<ExportOutcome, String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub exported: usize,
    pub total: u64,
}

pub struct App {
    config: AppConfig,
    client: Client,
    pub state: AppState,
    should_quit: bool,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Sequence of the most recently issued fetch; responses for anything
    /// older are stale and dropped.
    latest_seq: u64,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let timezone = config.timezone.parse::<Tz>().unwrap_or(chrono_tz::UTC);
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let mut filters = FilterState::default();
        filters.page_size = config.page_size.clamp(1, 500);

        let state = AppState {
            user_id: config.user_id.clone(),
            timezone,
            filters,
            history: HistoryState::default(),
            input_mode: InputMode::Normal,
            status: None,
            base_url: config.base_url.clone(),
        };

        Ok(Self {
            config,
            client,
            state,
            should_quit: false,
            events_tx,
            events_rx,
            latest_seq: 0,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        self.issue_fetch(true);
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            while let Ok(message) = self.events_rx.try_recv() {
                self.handle_app_event(message);
            }

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    // Layout is recomputed from the frame area on every draw,
                    // so a resize only needs the redraw itself.
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn handle_app_event(&mut self, message: AppEvent) {
        match message {
            AppEvent::History { seq, result } => {
                if seq != self.latest_seq {
                    tracing::debug!(seq, latest = self.latest_seq, "dropping stale response");
                    return;
                }
                match result {
                    Ok(response) => {
                        self.state.history.items = response
                            .transactions
                            .into_iter()
                            .map(to_domain)
                            .collect();
                        self.state.history.total_count = response.total_count;
                        if let Some(stats) = response.statistics {
                            self.state.history.statistics = Some(to_domain_stats(stats));
                        }
                        self.state.history.selected = 0;
                        self.state.history.fetch = FetchState::Ready;
                    }
                    Err(err) => {
                        self.state.history.fetch = FetchState::Failed(err.user_message());
                    }
                }
            }
            AppEvent::Export { result } => match result {
                Ok(outcome) => {
                    self.state.status = Some(export_status(&outcome));
                }
                Err(err) => {
                    self.state.status = Some(format!("Export failed: {err}"));
                }
            },
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match ui::keymap::map_key(key) {
            ui::keymap::AppAction::Quit => {
                self.should_quit = true;
            }
            ui::keymap::AppAction::Cancel => {
                if self.state.input_mode == InputMode::Search {
                    self.state.input_mode = InputMode::Normal;
                }
            }
            ui::keymap::AppAction::Submit => {
                if self.state.input_mode == InputMode::Search {
                    self.state.filters.submit_search();
                    self.state.input_mode = InputMode::Normal;
                    self.issue_fetch(true);
                }
            }
            ui::keymap::AppAction::Backspace => {
                if self.state.input_mode == InputMode::Search {
                    self.state.filters.search_input.pop();
                }
            }
            ui::keymap::AppAction::Up => self.state.history.select_prev(),
            ui::keymap::AppAction::Down => self.state.history.select_next(),
            ui::keymap::AppAction::Input(ch) => match self.state.input_mode {
                InputMode::Search => self.state.filters.search_input.push(ch),
                InputMode::Normal => self.handle_normal_key(ch),
            },
            ui::keymap::AppAction::None => {}
        }
    }

    fn handle_normal_key(&mut self, ch: char) {
        match ch {
            'q' => self.should_quit = true,
            '/' => {
                self.state.input_mode = InputMode::Search;
            }
            'b' => {
                let next = self.state.filters.balance.next();
                self.state.filters.set_balance(next);
                self.issue_fetch(true);
            }
            't' => {
                let next = next_tag(self.state.filters.tx_type.as_deref());
                self.state.filters.set_tx_type(next);
                self.issue_fetch(true);
            }
            'd' => {
                let next = self.state.filters.direction.next();
                self.state.filters.set_direction(next);
                self.issue_fetch(true);
            }
            'c' => {
                self.state.filters.clear_all();
                self.issue_fetch(true);
            }
            'n' => {
                let before = self.state.filters.page;
                self.state.filters.next_page(self.state.total_pages());
                if self.state.filters.page != before {
                    // Page flips keep the statistics block as-is.
                    self.issue_fetch(false);
                }
            }
            'p' => {
                let before = self.state.filters.page;
                self.state.filters.prev_page();
                if self.state.filters.page != before {
                    self.issue_fetch(false);
                }
            }
            'r' => self.issue_fetch(true),
            'e' => self.start_export(),
            'j' => self.state.history.select_next(),
            'k' => self.state.history.select_prev(),
            _ => {}
        }
    }

    /// Issues a page fetch carrying the next sequence number.
    fn issue_fetch(&mut self, include_statistics: bool) {
        self.latest_seq += 1;
        let seq = self.latest_seq;
        self.state.history.fetch = FetchState::Loading;
        self.state.status = None;

        let query = self.state.filters.to_query(&self.state.user_id);
        let request = query_to_request(&query, include_statistics);
        let client = self.client.clone();
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let result = client.history(&request).await;
            let _ = tx.send(AppEvent::History { seq, result });
        });
    }

    /// Exports the full matching set under the current filters.
    fn start_export(&mut self) {
        let query = self.state.filters.to_query(&self.state.user_id);
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let export_dir = PathBuf::from(self.config.export_dir.clone());
        let today = Utc::now().with_timezone(&self.state.timezone).date_naive();
        self.state.status = Some("Exporting...".to_string());

        tokio::spawn(async move {
            let result = export_all(&client, &query, &export_dir, today).await;
            let _ = tx.send(AppEvent::Export { result });
        });
    }
}

const EXPORT_PAGE_SIZE: u64 = 500;
const EXPORT_MAX_PAGES: u64 = 40;

async fn export_all(
    client: &Client,
    query: &HistoryQuery,
    export_dir: &std::path::Path,
    today: chrono::NaiveDate,
) -> std::result::Result<ExportOutcome, String> {
    let mut all: Vec<engine::Transaction> = Vec::new();
    let mut total = 0;
    let mut page = 1;

    loop {
        let mut page_query = query.clone();
        page_query.page = page;
        page_query.page_size = EXPORT_PAGE_SIZE;
        let request = query_to_request(&page_query, false);

        let response = client
            .history(&request)
            .await
            .map_err(|err| err.user_message())?;
        let received = response.transactions.len() as u64;
        total = response.total_count;
        all.extend(response.transactions.into_iter().map(to_domain));

        let done = all.len() as u64 >= total || received == 0;
        if done || page >= EXPORT_MAX_PAGES {
            break;
        }
        page += 1;
    }

    let path = export_dir.join(engine::export_filename("bsk-history", today));
    let file = std::fs::File::create(&path).map_err(|err| err.to_string())?;
    engine::write_csv(&all, file).map_err(|err| err.to_string())?;
    Ok(ExportOutcome {
        path,
        exported: all.len(),
        total,
    })
}

/// Status line for a finished export. An export that hit the page cap
/// before draining the matching set says so instead of claiming success.
fn export_status(outcome: &ExportOutcome) -> String {
    if (outcome.exported as u64) < outcome.total {
        format!(
            "Exported {} of {} rows to {} (truncated)",
            outcome.exported,
            outcome.total,
            outcome.path.display()
        )
    } else {
        format!(
            "Exported {} rows to {}",
            outcome.exported,
            outcome.path.display()
        )
    }
}

fn next_tag(current: Option<&str>) -> Option<String> {
    match current {
        None => TAG_CYCLE.first().map(|t| t.to_string()),
        Some(tag) => {
            let position = TAG_CYCLE.iter().position(|t| *t == tag);
            match position {
                Some(i) if i + 1 < TAG_CYCLE.len() => Some(TAG_CYCLE[i + 1].to_string()),
                _ => None,
            }
        }
    }
}

fn query_to_request(query: &HistoryQuery, include_statistics: bool) -> HistoryRequest {
    HistoryRequest {
        user_id: query.user_id.clone(),
        search_term: query.search_term.clone(),
        balance_types: query.balance_types.as_ref().map(|types| {
            types
                .iter()
                .map(|b| match b {
                    engine::BalanceType::Withdrawable => api_types::BalanceType::Withdrawable,
                    engine::BalanceType::Holding => api_types::BalanceType::Holding,
                })
                .collect()
        }),
        tx_types: query.tx_types.clone(),
        min_amount_minor: query.min_amount_minor,
        max_amount_minor: query.max_amount_minor,
        page: query.page,
        page_size: Some(query.page_size),
        include_statistics: Some(include_statistics),
    }
}

fn to_domain(view: TransactionView) -> engine::Transaction {
    engine::Transaction {
        id: view.id,
        user_id: String::new(),
        amount: engine::Bsk::new(view.amount_minor),
        balance_type: match view.balance_type {
            api_types::BalanceType::Withdrawable => engine::BalanceType::Withdrawable,
            api_types::BalanceType::Holding => engine::BalanceType::Holding,
        },
        tx_type: view.tx_type,
        description: view.description,
        metadata: view.metadata,
        status: view.status,
        created_at: view.created_at.with_timezone(&Utc),
    }
}

fn to_domain_stats(view: api_types::stats::StatisticsView) -> engine::Statistics {
    engine::Statistics {
        total_earned: engine::Bsk::new(view.total_earned_minor),
        total_spent: engine::Bsk::new(view.total_spent_minor),
        net_change: engine::Bsk::new(view.net_change_minor),
        withdrawable_total: engine::Bsk::new(view.withdrawable_total_minor),
        holding_total: engine::Bsk::new(view.holding_total_minor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{BalanceFilter, DirectionFilter};

    #[test]
    fn tag_cycle_wraps_back_to_all() {
        let mut current: Option<String> = None;
        for expected in TAG_CYCLE {
            current = next_tag(current.as_deref());
            assert_eq!(current.as_deref(), Some(*expected));
        }
        assert_eq!(next_tag(current.as_deref()), None);
        // A tag outside the cycle also resets to "all".
        assert_eq!(next_tag(Some("quarterly_bonus_v2")), None);
    }

    #[test]
    fn request_carries_the_statistics_toggle() {
        let query = FilterState::default().to_query("alice");
        assert_eq!(
            query_to_request(&query, false).include_statistics,
            Some(false)
        );
        assert_eq!(query_to_request(&query, true).include_statistics, Some(true));
    }

    #[test]
    fn filter_changes_reissue_from_page_one() {
        let mut filters = FilterState {
            page: 5,
            ..FilterState::default()
        };
        filters.set_direction(DirectionFilter::Incoming);
        let request = query_to_request(&filters.to_query("alice"), true);
        assert_eq!(request.page, 1);
        assert_eq!(request.min_amount_minor, Some(1));
    }

    #[test]
    fn export_status_reports_truncation() {
        let complete = ExportOutcome {
            path: PathBuf::from("bsk-history-2026-03-01.csv"),
            exported: 10,
            total: 10,
        };
        assert_eq!(
            export_status(&complete),
            "Exported 10 rows to bsk-history-2026-03-01.csv"
        );

        let truncated = ExportOutcome {
            path: PathBuf::from("bsk-history-2026-03-01.csv"),
            exported: 20_000,
            total: 25_000,
        };
        let status = export_status(&truncated);
        assert!(status.contains("20000 of 25000"));
        assert!(status.ends_with("(truncated)"));
    }

    #[test]
    fn balance_filter_maps_to_wire_enum() {
        let mut filters = FilterState::default();
        filters.set_balance(BalanceFilter::Holding);
        let request = query_to_request(&filters.to_query("alice"), true);
        assert_eq!(
            request.balance_types,
            Some(vec![api_types::BalanceType::Holding])
        );
    }
}
