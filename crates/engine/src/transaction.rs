//! Transaction primitives.
//!
//! A `Transaction` is one read-only entry of a user's BSK history. The engine
//! never mutates balances; entries are written once (by the back office or a
//! seed) and only listed and classified afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Bsk, EngineError, entity};

/// Sub-ledger an entry affects. Every transaction belongs to exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceType {
    Withdrawable,
    Holding,
}

impl BalanceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Withdrawable => "withdrawable",
            Self::Holding => "holding",
        }
    }

    /// Human-facing wallet label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Withdrawable => "Withdrawable",
            Self::Holding => "Holding",
        }
    }
}

impl TryFrom<&str> for BalanceType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "withdrawable" => Ok(Self::Withdrawable),
            "holding" => Ok(Self::Holding),
            other => Err(EngineError::InvalidRecord(format!(
                "invalid balance type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: String,
    /// Signed amount; the sign is authoritative for incoming vs outgoing.
    pub amount: Bsk,
    pub balance_type: BalanceType,
    /// Open-ended tag. Not a closed enum: backend writers introduce new tags
    /// over time and unknown values must still render.
    pub tx_type: String,
    pub description: Option<String>,
    /// Open side-record carrying per-type auxiliary fields. Kept as raw JSON;
    /// typed views are parsed from it on demand with every field optional.
    pub metadata: serde_json::Value,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<entity::Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: entity::Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|_| EngineError::InvalidRecord("invalid transaction id".to_string()))?;
        let balance_type = BalanceType::try_from(model.balance_type.as_str())?;
        let metadata = match model.metadata {
            Some(raw) => {
                serde_json::from_str(&raw).unwrap_or(serde_json::Value::Null)
            }
            None => serde_json::Value::Null,
        };

        Ok(Self {
            id,
            user_id: model.user_id,
            amount: Bsk::new(model.amount_minor),
            balance_type,
            tx_type: model.tx_type,
            description: model.description,
            metadata,
            status: model.status,
            created_at: model.created_at,
        })
    }
}

/// Input for recording a new history entry.
#[derive(Clone, Debug)]
pub struct NewTransaction {
    pub user_id: String,
    pub amount: Bsk,
    pub balance_type: BalanceType,
    pub tx_type: String,
    pub description: Option<String>,
    pub metadata: serde_json::Value,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Aggregate totals over a user's full history.
///
/// Rendered next to the list; never derived from the filtered page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total_earned: Bsk,
    pub total_spent: Bsk,
    pub net_change: Bsk,
    pub withdrawable_total: Bsk,
    pub holding_total: Bsk,
}

impl Statistics {
    /// Folds one `(amount, balance_type)` pair into the running totals.
    pub fn accumulate(&mut self, amount: Bsk, balance_type: BalanceType) {
        if amount.is_negative() {
            self.total_spent += -amount;
        } else {
            self.total_earned += amount;
        }
        self.net_change += amount;
        match balance_type {
            BalanceType::Withdrawable => self.withdrawable_total += amount,
            BalanceType::Holding => self.holding_total += amount,
        }
    }
}

pub(crate) fn statistics_of<I>(pairs: I) -> Statistics
where
    I: IntoIterator<Item = (Bsk, BalanceType)>,
{
    let mut stats = Statistics::default();
    for (amount, balance_type) in pairs {
        stats.accumulate(amount, balance_type);
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_split_credits_and_debits() {
        let stats = statistics_of([
            (Bsk::new(1000), BalanceType::Withdrawable),
            (Bsk::new(-300), BalanceType::Withdrawable),
            (Bsk::new(500), BalanceType::Holding),
        ]);

        assert_eq!(stats.total_earned, Bsk::new(1500));
        assert_eq!(stats.total_spent, Bsk::new(300));
        assert_eq!(stats.net_change, Bsk::new(1200));
        assert_eq!(stats.withdrawable_total, Bsk::new(700));
        assert_eq!(stats.holding_total, Bsk::new(500));
    }

    #[test]
    fn balance_type_round_trips() {
        assert_eq!(
            BalanceType::try_from("withdrawable").unwrap(),
            BalanceType::Withdrawable
        );
        assert_eq!(BalanceType::Holding.as_str(), "holding");
        assert!(BalanceType::try_from("frozen").is_err());
    }
}
