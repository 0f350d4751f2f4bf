//! Session-local filter state and its translation into a history query.
//!
//! The state is exclusively owned by one view instance; nothing here touches
//! I/O. The one hard invariant: any filter mutation snaps pagination back to
//! the first page.

use crate::BalanceType;

/// Smallest representable non-zero amount, used to compile the direction
/// filter into a numeric range (the store is queried by range, not by sign).
const DIRECTION_EPSILON_MINOR: i64 = 1;

pub const DEFAULT_PAGE_SIZE: u64 = 20;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BalanceFilter {
    #[default]
    All,
    Withdrawable,
    Holding,
}

impl BalanceFilter {
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Withdrawable => "Withdrawable",
            Self::Holding => "Holding",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Withdrawable,
            Self::Withdrawable => Self::Holding,
            Self::Holding => Self::All,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DirectionFilter {
    #[default]
    All,
    Incoming,
    Outgoing,
}

impl DirectionFilter {
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Incoming => "Incoming",
            Self::Outgoing => "Outgoing",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Incoming,
            Self::Incoming => Self::Outgoing,
            Self::Outgoing => Self::All,
        }
    }
}

/// Parameters the engine (or the remote history service) is queried with.
///
/// `All` selections are already compiled away: absent means unconstrained.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    pub user_id: String,
    pub search_term: Option<String>,
    pub balance_types: Option<Vec<BalanceType>>,
    pub tx_types: Option<Vec<String>>,
    pub min_amount_minor: Option<i64>,
    pub max_amount_minor: Option<i64>,
    /// 1-based.
    pub page: u64,
    pub page_size: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    /// Text currently being typed; only applied on explicit submit.
    pub search_input: String,
    /// The submitted search term, if any.
    pub search_term: Option<String>,
    pub balance: BalanceFilter,
    /// `None` = all tags.
    pub tx_type: Option<String>,
    pub direction: DirectionFilter,
    pub page: u64,
    pub page_size: u64,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_input: String::new(),
            search_term: None,
            balance: BalanceFilter::default(),
            tx_type: None,
            direction: DirectionFilter::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterState {
    /// Applies the pending search input. Empty input clears the term.
    pub fn submit_search(&mut self) {
        let trimmed = self.search_input.trim();
        self.search_term = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self.page = 1;
    }

    pub fn set_balance(&mut self, balance: BalanceFilter) {
        self.balance = balance;
        self.page = 1;
    }

    pub fn set_tx_type(&mut self, tx_type: Option<String>) {
        self.tx_type = tx_type;
        self.page = 1;
    }

    pub fn set_direction(&mut self, direction: DirectionFilter) {
        self.direction = direction;
        self.page = 1;
    }

    /// Resets search, all selects and the amount range in one step.
    pub fn clear_all(&mut self) {
        let page_size = self.page_size;
        *self = Self {
            page_size,
            ..Self::default()
        };
    }

    /// True when any constraint narrows the result set.
    ///
    /// Drives the mutually exclusive empty-state branches: a virgin history
    /// shows onboarding, a filtered-to-zero result shows "clear filters".
    pub fn has_active_filters(&self) -> bool {
        self.search_term.is_some()
            || self.balance != BalanceFilter::All
            || self.tx_type.is_some()
            || self.direction != DirectionFilter::All
    }

    pub fn next_page(&mut self, total_pages: u64) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Compiles the state into query parameters for the history service.
    pub fn to_query(&self, user_id: &str) -> HistoryQuery {
        let balance_types = match self.balance {
            BalanceFilter::All => None,
            BalanceFilter::Withdrawable => Some(vec![BalanceType::Withdrawable]),
            BalanceFilter::Holding => Some(vec![BalanceType::Holding]),
        };
        let (min_amount_minor, max_amount_minor) = match self.direction {
            DirectionFilter::All => (None, None),
            DirectionFilter::Incoming => (Some(DIRECTION_EPSILON_MINOR), None),
            DirectionFilter::Outgoing => (None, Some(-DIRECTION_EPSILON_MINOR)),
        };

        HistoryQuery {
            user_id: user_id.to_string(),
            search_term: self.search_term.clone(),
            balance_types,
            tx_types: self.tx_type.clone().map(|t| vec![t]),
            min_amount_minor,
            max_amount_minor,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_filter_change_resets_to_page_one() {
        let mut state = FilterState {
            page: 4,
            ..FilterState::default()
        };
        state.set_balance(BalanceFilter::Holding);
        assert_eq!(state.page, 1);

        state.page = 4;
        state.set_tx_type(Some("withdrawal".to_string()));
        assert_eq!(state.page, 1);

        state.page = 4;
        state.set_direction(DirectionFilter::Incoming);
        assert_eq!(state.page, 1);

        state.page = 4;
        state.search_input = "ad".to_string();
        state.submit_search();
        assert_eq!(state.page, 1);
        assert_eq!(state.to_query("u").page, 1);
    }

    #[test]
    fn all_selections_are_omitted_from_the_query() {
        let state = FilterState::default();
        let query = state.to_query("alice");
        assert_eq!(query.balance_types, None);
        assert_eq!(query.tx_types, None);
        assert_eq!(query.min_amount_minor, None);
        assert_eq!(query.max_amount_minor, None);
        assert_eq!(query.search_term, None);
    }

    #[test]
    fn direction_compiles_to_an_amount_range() {
        let mut state = FilterState::default();
        state.set_direction(DirectionFilter::Incoming);
        let query = state.to_query("alice");
        assert_eq!(query.min_amount_minor, Some(1));
        assert_eq!(query.max_amount_minor, None);

        state.set_direction(DirectionFilter::Outgoing);
        let query = state.to_query("alice");
        assert_eq!(query.min_amount_minor, None);
        assert_eq!(query.max_amount_minor, Some(-1));
    }

    #[test]
    fn search_applies_on_submit_not_on_keystroke() {
        let mut state = FilterState::default();
        state.search_input = "referral".to_string();
        assert_eq!(state.to_query("u").search_term, None);

        state.submit_search();
        assert_eq!(state.to_query("u").search_term, Some("referral".to_string()));

        state.search_input = "  ".to_string();
        state.submit_search();
        assert_eq!(state.search_term, None);
    }

    #[test]
    fn clear_all_resets_everything_but_page_size() {
        let mut state = FilterState {
            page_size: 50,
            ..FilterState::default()
        };
        state.search_input = "loan".to_string();
        state.submit_search();
        state.set_balance(BalanceFilter::Holding);
        state.set_tx_type(Some("withdrawal".to_string()));
        state.set_direction(DirectionFilter::Outgoing);
        state.page = 3;

        state.clear_all();
        assert!(!state.has_active_filters());
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, 50);
        assert!(state.search_input.is_empty());
    }

    #[test]
    fn active_filters_detection() {
        let mut state = FilterState::default();
        assert!(!state.has_active_filters());
        state.set_direction(DirectionFilter::Outgoing);
        assert!(state.has_active_filters());
    }

    #[test]
    fn pagination_clamps_at_both_ends() {
        let mut state = FilterState::default();
        state.prev_page();
        assert_eq!(state.page, 1);
        state.next_page(3);
        state.next_page(3);
        state.next_page(3);
        assert_eq!(state.page, 3);
    }
}
