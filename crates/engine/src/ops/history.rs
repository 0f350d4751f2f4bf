use sea_orm::{
    ActiveValue, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait, prelude::*,
};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::{
    EngineError, HistoryQuery, NewTransaction, ResultEngine, Statistics, Transaction,
    entity, transaction::statistics_of,
};

use super::{Engine, with_tx};

const MAX_PAGE_SIZE: u64 = 500;

fn validate_query(query: &HistoryQuery) -> ResultEngine<()> {
    if query.user_id.trim().is_empty() {
        return Err(EngineError::InvalidFilter(
            "user_id must not be empty".to_string(),
        ));
    }
    if query.page == 0 {
        return Err(EngineError::InvalidFilter(
            "page numbers are 1-based".to_string(),
        ));
    }
    if query.page_size == 0 || query.page_size > MAX_PAGE_SIZE {
        return Err(EngineError::InvalidFilter(format!(
            "page_size must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    if let (Some(min), Some(max)) = (query.min_amount_minor, query.max_amount_minor)
        && min > max
    {
        return Err(EngineError::InvalidFilter(
            "invalid amount range: min must be <= max".to_string(),
        ));
    }
    if query.balance_types.as_ref().is_some_and(|b| b.is_empty()) {
        return Err(EngineError::InvalidFilter(
            "balance_types must not be empty".to_string(),
        ));
    }
    if query.tx_types.as_ref().is_some_and(|t| t.is_empty()) {
        return Err(EngineError::InvalidFilter(
            "tx_types must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn normalize_text(value: &str) -> String {
    value.trim().nfc().collect()
}

trait ApplyHistoryFilters: QueryFilter + Sized {
    fn apply_history_filters(self, query: &HistoryQuery) -> Self;
}

impl<T> ApplyHistoryFilters for T
where
    T: QueryFilter + Sized,
{
    fn apply_history_filters(mut self, query: &HistoryQuery) -> Self {
        if let Some(term) = &query.search_term {
            let term = normalize_text(term);
            self = self.filter(
                Condition::any()
                    .add(entity::Column::Description.contains(&term))
                    .add(entity::Column::TxType.contains(&term)),
            );
        }
        if let Some(balance_types) = &query.balance_types {
            let values: Vec<String> = balance_types
                .iter()
                .map(|b| b.as_str().to_string())
                .collect();
            self = self.filter(entity::Column::BalanceType.is_in(values));
        }
        if let Some(tx_types) = &query.tx_types {
            self = self.filter(entity::Column::TxType.is_in(tx_types.clone()));
        }
        if let Some(min) = query.min_amount_minor {
            self = self.filter(entity::Column::AmountMinor.gte(min));
        }
        if let Some(max) = query.max_amount_minor {
            self = self.filter(entity::Column::AmountMinor.lte(max));
        }
        self
    }
}

impl Engine {
    /// Records one history entry. Used by the back office and by seeding;
    /// balance crediting itself happens elsewhere and is not modeled here.
    pub async fn record_transaction(&self, new: NewTransaction) -> ResultEngine<Uuid> {
        if new.user_id.trim().is_empty() {
            return Err(EngineError::InvalidRecord(
                "user_id must not be empty".to_string(),
            ));
        }
        let tx_type = normalize_text(&new.tx_type);
        if tx_type.is_empty() {
            return Err(EngineError::InvalidRecord(
                "tx_type must not be empty".to_string(),
            ));
        }
        let description = new
            .description
            .as_deref()
            .map(normalize_text)
            .filter(|d| !d.is_empty());
        let metadata = match &new.metadata {
            serde_json::Value::Null => None,
            value => Some(
                serde_json::to_string(value)
                    .map_err(|_| EngineError::InvalidRecord("invalid metadata".to_string()))?,
            ),
        };

        let id = Uuid::new_v4();
        let model = entity::ActiveModel {
            id: ActiveValue::Set(id.to_string()),
            user_id: ActiveValue::Set(new.user_id),
            amount_minor: ActiveValue::Set(new.amount.minor()),
            balance_type: ActiveValue::Set(new.balance_type.as_str().to_string()),
            tx_type: ActiveValue::Set(tx_type),
            description: ActiveValue::Set(description),
            metadata: ActiveValue::Set(metadata),
            status: ActiveValue::Set(new.status),
            created_at: ActiveValue::Set(new.created_at),
        };

        with_tx!(self, |db_tx| {
            entity::Entity::insert(model)
                .exec(&db_tx)
                .await
                .map(|_| id)
                .map_err(EngineError::from)
        })
    }

    /// Lists one page of a user's history, newest first by
    /// `(created_at DESC, id DESC)`.
    ///
    /// Returns the page plus the total number of matching records. A page
    /// past the end is an empty page, not an error.
    pub async fn history_page(
        &self,
        query: &HistoryQuery,
    ) -> ResultEngine<(Vec<Transaction>, u64)> {
        validate_query(query)?;

        with_tx!(self, |db_tx| {
            let select = entity::Entity::find()
                .filter(entity::Column::UserId.eq(query.user_id.clone()))
                .apply_history_filters(query)
                .order_by_desc(entity::Column::CreatedAt)
                .order_by_desc(entity::Column::Id);

            let paginator = select.paginate(&db_tx, query.page_size);
            let total = paginator.num_items().await?;
            let rows = paginator.fetch_page(query.page - 1).await?;

            let mut out = Vec::with_capacity(rows.len());
            for row in rows {
                out.push(Transaction::try_from(row)?);
            }
            tracing::debug!(
                user_id = %query.user_id,
                page = query.page,
                returned = out.len(),
                total,
                "history page served"
            );
            Ok((out, total))
        })
    }

    /// Aggregate totals over the user's **unfiltered** history.
    pub async fn statistics(&self, user_id: &str) -> ResultEngine<Statistics> {
        if user_id.trim().is_empty() {
            return Err(EngineError::InvalidFilter(
                "user_id must not be empty".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let rows: Vec<(i64, String)> = entity::Entity::find()
                .filter(entity::Column::UserId.eq(user_id))
                .select_only()
                .column(entity::Column::AmountMinor)
                .column(entity::Column::BalanceType)
                .into_tuple()
                .all(&db_tx)
                .await?;

            let mut pairs = Vec::with_capacity(rows.len());
            for (amount_minor, balance_type) in rows {
                pairs.push((
                    crate::Bsk::new(amount_minor),
                    crate::BalanceType::try_from(balance_type.as_str())?,
                ));
            }
            Ok(statistics_of(pairs))
        })
    }
}
