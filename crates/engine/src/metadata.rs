//! Typed view over the open `metadata` side-record.
//!
//! Different transaction categories carry different auxiliary fields and the
//! backend evolves them without client releases, so every field is optional
//! and parsing never fails: malformed or missing metadata degrades to an
//! all-`None` view and the classifier falls back per field.

use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TxMetadata {
    // Counterparty info for wallet-to-wallet transfers.
    pub sender_display_name: Option<String>,
    pub sender_username: Option<String>,
    pub recipient_display_name: Option<String>,
    pub recipient_username: Option<String>,
    pub from_wallet_type: Option<String>,
    pub to_wallet_type: Option<String>,
    // Withdrawal rail details.
    pub withdrawal_type: Option<String>,
    pub bank_name: Option<String>,
    pub account_holder_name: Option<String>,
    pub crypto_symbol: Option<String>,
    pub crypto_address: Option<String>,
}

impl TxMetadata {
    /// Parses the raw side-record, ignoring unknown fields.
    pub fn from_value(value: &serde_json::Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_known_fields_and_ignores_the_rest() {
        let meta = TxMetadata::from_value(&json!({
            "sender_display_name": "Alice",
            "from_wallet_type": "withdrawable",
            "some_future_field": {"nested": true},
        }));
        assert_eq!(meta.sender_display_name.as_deref(), Some("Alice"));
        assert_eq!(meta.from_wallet_type.as_deref(), Some("withdrawable"));
        assert!(meta.bank_name.is_none());
    }

    #[test]
    fn malformed_metadata_degrades_to_defaults() {
        let meta = TxMetadata::from_value(&json!("not an object"));
        assert!(meta.sender_display_name.is_none());

        let meta = TxMetadata::from_value(&serde_json::Value::Null);
        assert!(meta.withdrawal_type.is_none());
    }
}
