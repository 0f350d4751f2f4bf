use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sub-ledger a transaction belongs to.
///
/// Every transaction affects exactly one of the two BSK balances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceType {
    Withdrawable,
    Holding,
}

impl BalanceType {
    /// Returns the canonical string used on the wire and in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Withdrawable => "withdrawable",
            Self::Holding => "holding",
        }
    }
}

pub mod history {
    use super::*;

    /// Request body for listing a page of a user's BSK history.
    ///
    /// Absent optional fields mean "no constraint": clients must omit a
    /// filter entirely rather than send an "all" sentinel.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct HistoryRequest {
        pub user_id: String,
        pub search_term: Option<String>,
        /// Allow-list of sub-ledgers to return.
        pub balance_types: Option<Vec<BalanceType>>,
        /// Allow-list of transaction-type tags.
        pub tx_types: Option<Vec<String>>,
        /// Inclusive lower bound on the signed amount, in minor units.
        pub min_amount_minor: Option<i64>,
        /// Inclusive upper bound on the signed amount, in minor units.
        pub max_amount_minor: Option<i64>,
        /// 1-based page number.
        pub page: u64,
        pub page_size: Option<u64>,
        /// When false, the response omits `statistics` so page flips do not
        /// recompute aggregates. Defaults to true.
        pub include_statistics: Option<bool>,
    }

    /// One transaction as returned by the history service.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        /// Signed amount in minor units; positive = credit, negative = debit.
        pub amount_minor: i64,
        pub balance_type: BalanceType,
        /// Open-ended tag (`transfer_in`, `ad_video_reward`, ...). New tags
        /// can appear without a client release.
        pub tx_type: String,
        pub description: Option<String>,
        /// Open side-record with per-type auxiliary fields. Passed through as
        /// raw JSON so backend-evolved fields survive untouched.
        #[serde(default)]
        pub metadata: serde_json::Value,
        pub status: Option<String>,
        /// RFC3339 timestamp, including timezone offset.
        pub created_at: DateTime<FixedOffset>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct HistoryResponse {
        pub transactions: Vec<TransactionView>,
        /// Total matching records across all pages.
        pub total_count: u64,
        pub statistics: Option<super::stats::StatisticsView>,
    }
}

pub mod stats {
    use super::*;

    /// Aggregate totals over a user's full (unfiltered) history.
    #[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
    pub struct StatisticsView {
        pub total_earned_minor: i64,
        pub total_spent_minor: i64,
        pub net_change_minor: i64,
        pub withdrawable_total_minor: i64,
        pub holding_total_minor: i64,
    }
}
