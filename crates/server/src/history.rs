//! History API endpoint

use api_types::{
    BalanceType as ApiBalanceType,
    history::{HistoryRequest, HistoryResponse, TransactionView},
    stats::StatisticsView,
};
use axum::{Json, extract::State};
use chrono::FixedOffset;

use crate::{ServerError, server::ServerState};

fn map_balance_type(balance_type: ApiBalanceType) -> engine::BalanceType {
    match balance_type {
        ApiBalanceType::Withdrawable => engine::BalanceType::Withdrawable,
        ApiBalanceType::Holding => engine::BalanceType::Holding,
    }
}

fn map_balance_type_out(balance_type: engine::BalanceType) -> ApiBalanceType {
    match balance_type {
        engine::BalanceType::Withdrawable => ApiBalanceType::Withdrawable,
        engine::BalanceType::Holding => ApiBalanceType::Holding,
    }
}

fn map_statistics(stats: engine::Statistics) -> StatisticsView {
    StatisticsView {
        total_earned_minor: stats.total_earned.minor(),
        total_spent_minor: stats.total_spent.minor(),
        net_change_minor: stats.net_change.minor(),
        withdrawable_total_minor: stats.withdrawable_total.minor(),
        holding_total_minor: stats.holding_total.minor(),
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Json(payload): Json<HistoryRequest>,
) -> Result<Json<HistoryResponse>, ServerError> {
    let engine = &state.engine;

    let query = engine::HistoryQuery {
        user_id: payload.user_id.clone(),
        search_term: payload.search_term,
        balance_types: payload
            .balance_types
            .map(|types| types.into_iter().map(map_balance_type).collect()),
        tx_types: payload.tx_types,
        min_amount_minor: payload.min_amount_minor,
        max_amount_minor: payload.max_amount_minor,
        page: payload.page,
        page_size: payload.page_size.unwrap_or(engine::DEFAULT_PAGE_SIZE),
    };

    let (txs, total_count) = engine.history_page(&query).await?;

    let statistics = if payload.include_statistics.unwrap_or(true) {
        Some(map_statistics(engine.statistics(&payload.user_id).await?))
    } else {
        None
    };

    let utc = FixedOffset::east_opt(0)
        .ok_or_else(|| ServerError::Generic("invalid UTC offset".to_string()))?;
    let transactions = txs
        .into_iter()
        .map(|tx| TransactionView {
            id: tx.id,
            amount_minor: tx.amount.minor(),
            balance_type: map_balance_type_out(tx.balance_type),
            tx_type: tx.tx_type,
            description: tx.description,
            metadata: tx.metadata,
            status: tx.status,
            created_at: tx.created_at.with_timezone(&utc),
        })
        .collect();

    Ok(Json(HistoryResponse {
        transactions,
        total_count,
        statistics,
    }))
}
