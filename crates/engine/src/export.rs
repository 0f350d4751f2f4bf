//! CSV export of history records.
//!
//! Every field is quoted; the csv writer doubles embedded quote characters,
//! so free-text descriptions with literal `"` survive a round trip.

use std::io::Write;

use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;

use crate::{EngineError, ResultEngine, Transaction, classify};

#[derive(Serialize)]
struct ExportRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Type")]
    tx_type: String,
    #[serde(rename = "Label")]
    label: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Amount (BSK)")]
    amount: String,
    #[serde(rename = "Balance Type")]
    balance_type: String,
    #[serde(rename = "Status")]
    status: String,
}

/// Writes the given records as CSV, header included.
pub fn write_csv<W: Write>(transactions: &[Transaction], out: W) -> ResultEngine<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(out);

    for tx in transactions {
        let descriptor = classify::classify(tx);
        writer
            .serialize(ExportRow {
                id: tx.id.to_string(),
                date: tx.created_at.to_rfc3339(),
                tx_type: tx.tx_type.clone(),
                label: descriptor.label,
                description: tx.description.clone().unwrap_or_default(),
                amount: tx.amount.to_string(),
                balance_type: tx.balance_type.label().to_string(),
                status: tx.status.clone().unwrap_or_default(),
            })
            .map_err(|err| EngineError::Export(err.to_string()))?;
    }

    writer
        .flush()
        .map_err(|err| EngineError::Export(err.to_string()))?;
    Ok(())
}

/// `<context>-<YYYY-MM-DD>.csv`
pub fn export_filename(context: &str, date: NaiveDate) -> String {
    format!("{context}-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BalanceType, Bsk};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn sample(description: &str) -> Transaction {
        Transaction {
            id: Uuid::nil(),
            user_id: "alice".to_string(),
            amount: Bsk::new(2550),
            balance_type: BalanceType::Withdrawable,
            tx_type: "ad_video_reward".to_string(),
            description: Some(description.to_string()),
            metadata: serde_json::Value::Null,
            status: Some("completed".to_string()),
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn every_field_is_quoted() {
        let mut buf = Vec::new();
        write_csv(&[sample("Watched 30s ad")], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "\"ID\",\"Date\",\"Type\",\"Label\",\"Description\",\"Amount (BSK)\",\"Balance Type\",\"Status\""
        );
        let row = lines.next().unwrap();
        assert!(row.contains("\"Ad Reward\""));
        assert!(row.contains("\"25.50\""));
        assert!(row.contains("\"Withdrawable\""));
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let mut buf = Vec::new();
        write_csv(&[sample("note with \"quotes\" inside")], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"note with \"\"quotes\"\" inside\""));
    }

    #[test]
    fn filename_carries_the_date_stamp() {
        let date = chrono::NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(
            export_filename("bsk-history", date),
            "bsk-history-2026-03-01.csv"
        );
    }
}
