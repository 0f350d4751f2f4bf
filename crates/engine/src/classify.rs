//! Classification of raw history entries into display descriptors.
//!
//! [`classify`] is a pure, total function: any transaction, including one with
//! a tag this code has never seen, yields a complete descriptor. Rules are an
//! ordered list with first-match-wins semantics and use substring/prefix
//! checks on stable infixes rather than exact lookup, so suffixed tags the
//! backend introduces later (`ad_video_reward`, `ad_banner_reward`, ...) keep
//! classifying without a client release.

use crate::{BalanceType, Transaction, TxMetadata};

/// Icon family a row renders with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    TransferIn,
    TransferOut,
    Bank,
    Wallet,
    Card,
    People,
    Sparkle,
    Gift,
    TrendUp,
    Convert,
    Coin,
}

impl Icon {
    /// Single-cell glyph for terminal rendering.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::TransferIn => "↓",
            Self::TransferOut => "↑",
            Self::Bank => "⌂",
            Self::Wallet => "◈",
            Self::Card => "▤",
            Self::People => "◉",
            Self::Sparkle => "✦",
            Self::Gift => "▣",
            Self::TrendUp => "↗",
            Self::Convert => "⇄",
            Self::Coin => "●",
        }
    }
}

/// Color family a row renders with. Mapped to concrete colors by the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Warning,
    Accent,
    Info,
    Attention,
    Emerald,
    Indigo,
    Neutral,
}

/// Everything a row needs to render one transaction.
///
/// Derived, ephemeral, never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayDescriptor {
    pub label: String,
    pub secondary: String,
    pub icon: Icon,
    pub tone: Tone,
}

/// Maps a transaction to its display descriptor.
///
/// Rule order matters: several rules match on substrings, so e.g.
/// `referral` must be tested before the generic fallback but after the exact
/// transfer tags. The final rule is total.
pub fn classify(tx: &Transaction) -> DisplayDescriptor {
    let tag = tx.tx_type.as_str();
    let meta = TxMetadata::from_value(&tx.metadata);
    let description = tx.description.clone().unwrap_or_default();

    match tag {
        "transfer_in" => {
            let who = counterparty(
                meta.sender_display_name.as_deref(),
                meta.sender_username.as_deref(),
            );
            return DisplayDescriptor {
                label: "Received from".to_string(),
                secondary: format!(
                    "{who} • {} → {}",
                    wallet_label(meta.from_wallet_type.as_deref()),
                    wallet_label(meta.to_wallet_type.as_deref()),
                ),
                icon: Icon::TransferIn,
                tone: Tone::Positive,
            };
        }
        "transfer_out" => {
            let who = counterparty(
                meta.recipient_display_name.as_deref(),
                meta.recipient_username.as_deref(),
            );
            return DisplayDescriptor {
                label: "Sent to".to_string(),
                secondary: format!(
                    "{who} • {} → {}",
                    wallet_label(meta.from_wallet_type.as_deref()),
                    wallet_label(meta.to_wallet_type.as_deref()),
                ),
                icon: Icon::TransferOut,
                tone: Tone::Negative,
            };
        }
        "withdrawal" => return classify_withdrawal(tx.balance_type, &meta, &description),
        "deposit" | "credit" => {
            return DisplayDescriptor {
                label: "Deposit".to_string(),
                secondary: "Added to your account".to_string(),
                icon: Icon::Card,
                tone: Tone::Info,
            };
        }
        "holding_to_withdrawable" => {
            return DisplayDescriptor {
                label: "Converted".to_string(),
                secondary: "From Holding Wallet → To Withdrawable Wallet".to_string(),
                icon: Icon::Convert,
                tone: Tone::Indigo,
            };
        }
        _ => {}
    }

    if tag.contains("referral") {
        return DisplayDescriptor {
            label: "Referral Reward".to_string(),
            secondary: or_default(&description, "Commission earned"),
            icon: Icon::People,
            tone: Tone::Positive,
        };
    }
    if tag.contains("ad_") {
        return DisplayDescriptor {
            label: "Ad Reward".to_string(),
            secondary: or_default(&description, "Earned from viewing ads"),
            icon: Icon::Sparkle,
            tone: Tone::Attention,
        };
    }
    // `bonus` is a prefix check on purpose: infix matching would swallow
    // unrelated suffixed tags (e.g. `quarterly_bonus_v2`) that belong to the
    // fallback rule.
    if tag.contains("badge") || tag.starts_with("bonus") {
        return DisplayDescriptor {
            label: "Bonus Reward".to_string(),
            secondary: description,
            icon: Icon::Gift,
            tone: Tone::Accent,
        };
    }
    if tag.contains("staking") {
        return DisplayDescriptor {
            label: "Staking Reward".to_string(),
            secondary: or_default(&description, "Interest earned"),
            icon: Icon::TrendUp,
            tone: Tone::Emerald,
        };
    }
    if tag.contains("loan") {
        let label = if tag.contains("disbursement") {
            "Loan Received"
        } else {
            "Loan Payment"
        };
        // Styling follows the sign of the amount, not the tag.
        let (icon, tone) = if tx.amount.is_negative() {
            (Icon::TransferOut, Tone::Negative)
        } else {
            (Icon::TransferIn, Tone::Positive)
        };
        return DisplayDescriptor {
            label: label.to_string(),
            secondary: description,
            icon,
            tone,
        };
    }

    // Total fallback: unknown tags still render, humanized only by replacing
    // underscores.
    DisplayDescriptor {
        label: tag.replace('_', " "),
        secondary: description,
        icon: Icon::Coin,
        tone: Tone::Neutral,
    }
}

fn classify_withdrawal(
    balance_type: BalanceType,
    meta: &TxMetadata,
    description: &str,
) -> DisplayDescriptor {
    let label = format!("Withdrawn from {}", balance_type.label());
    match meta.withdrawal_type.as_deref() {
        Some("bank") => {
            let secondary = match (meta.bank_name.as_deref(), meta.account_holder_name.as_deref())
            {
                (Some(bank), Some(holder)) => format!("To {bank} - {holder}"),
                _ => "To Bank Account".to_string(),
            };
            DisplayDescriptor {
                label,
                secondary,
                icon: Icon::Bank,
                tone: Tone::Warning,
            }
        }
        Some("crypto") => {
            let secondary = match (meta.crypto_symbol.as_deref(), meta.crypto_address.as_deref())
            {
                (Some(symbol), Some(address)) => {
                    format!("To {symbol} ({})", truncate_address(address))
                }
                _ => "To Crypto Wallet".to_string(),
            };
            DisplayDescriptor {
                label,
                secondary,
                icon: Icon::Wallet,
                tone: Tone::Accent,
            }
        }
        _ => DisplayDescriptor {
            label,
            secondary: description.to_string(),
            icon: Icon::Bank,
            tone: Tone::Warning,
        },
    }
}

fn counterparty(display_name: Option<&str>, username: Option<&str>) -> String {
    display_name
        .or(username)
        .unwrap_or("Unknown User")
        .to_string()
}

fn wallet_label(raw: Option<&str>) -> &'static str {
    match raw {
        Some("holding") => "Holding",
        _ => "Withdrawable",
    }
}

/// First 6 chars + `...` + last 4. Short addresses are shown as-is.
pub fn truncate_address(address: &str) -> String {
    if address.chars().count() <= 10 {
        return address.to_string();
    }
    let head: String = address.chars().take(6).collect();
    let tail: String = address
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("{head}...{tail}")
}

fn or_default(description: &str, fallback: &str) -> String {
    if description.is_empty() {
        fallback.to_string()
    } else {
        description.to_string()
    }
}

/// Badge tone, separate from row tones: badges have their own palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeTone {
    Positive,
    Outline,
    Info,
    Negative,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub tone: BadgeTone,
}

/// Derives the status badge, independent of classification.
///
/// Unrecognized or absent statuses render no badge at all; that is not an
/// error.
pub fn status_badge(status: Option<&str>) -> Option<StatusBadge> {
    let status = status?.to_lowercase();
    let badge = match status.as_str() {
        "completed" | "approved" => StatusBadge {
            label: "Completed",
            tone: BadgeTone::Positive,
        },
        "pending" => StatusBadge {
            label: "Pending",
            tone: BadgeTone::Outline,
        },
        "processing" => StatusBadge {
            label: "Processing",
            tone: BadgeTone::Info,
        },
        "rejected" | "failed" => StatusBadge {
            label: "Failed",
            tone: BadgeTone::Negative,
        },
        _ => return None,
    };
    Some(badge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bsk;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn tx(amount_minor: i64, tx_type: &str) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            user_id: "alice".to_string(),
            amount: Bsk::new(amount_minor),
            balance_type: BalanceType::Withdrawable,
            tx_type: tx_type.to_string(),
            description: None,
            metadata: serde_json::Value::Null,
            status: None,
            created_at: Utc::now(),
        }
    }

    fn tx_with(
        amount_minor: i64,
        tx_type: &str,
        description: Option<&str>,
        metadata: serde_json::Value,
    ) -> Transaction {
        let mut tx = tx(amount_minor, tx_type);
        tx.description = description.map(str::to_string);
        tx.metadata = metadata;
        tx
    }

    #[test]
    fn transfer_in_renders_counterparty_and_wallet_route() {
        let tx = tx_with(
            2550,
            "transfer_in",
            None,
            json!({
                "sender_display_name": "Alice",
                "from_wallet_type": "withdrawable",
                "to_wallet_type": "holding",
            }),
        );
        let d = classify(&tx);
        assert_eq!(d.label, "Received from");
        assert_eq!(d.secondary, "Alice • Withdrawable → Holding");
        assert_eq!(d.icon, Icon::TransferIn);
        assert_eq!(d.tone, Tone::Positive);
        assert_eq!(tx.amount.format_signed(), "+25.50");
    }

    #[test]
    fn transfer_in_falls_back_to_username_then_unknown() {
        let tx = tx_with(
            100,
            "transfer_in",
            None,
            json!({"sender_username": "alice42"}),
        );
        assert!(classify(&tx).secondary.starts_with("alice42 • "));

        let tx = tx_with(100, "transfer_in", None, json!({}));
        assert!(classify(&tx).secondary.starts_with("Unknown User • "));
    }

    #[test]
    fn transfer_out_is_symmetric() {
        let tx = tx_with(
            -100,
            "transfer_out",
            None,
            json!({"recipient_display_name": "Bob", "to_wallet_type": "holding"}),
        );
        let d = classify(&tx);
        assert_eq!(d.label, "Sent to");
        assert_eq!(d.secondary, "Bob • Withdrawable → Holding");
        assert_eq!(d.icon, Icon::TransferOut);
        assert_eq!(d.tone, Tone::Negative);
    }

    #[test]
    fn bank_withdrawal_with_full_details() {
        let tx = tx_with(
            -50000,
            "withdrawal",
            None,
            json!({
                "withdrawal_type": "bank",
                "bank_name": "HDFC",
                "account_holder_name": "J Doe",
            }),
        );
        let d = classify(&tx);
        assert_eq!(d.label, "Withdrawn from Withdrawable");
        assert_eq!(d.secondary, "To HDFC - J Doe");
        assert_eq!(d.icon, Icon::Bank);
        assert_eq!(d.tone, Tone::Warning);
    }

    #[test]
    fn bank_withdrawal_without_details_is_generic() {
        let tx = tx_with(-100, "withdrawal", None, json!({"withdrawal_type": "bank"}));
        assert_eq!(classify(&tx).secondary, "To Bank Account");
    }

    #[test]
    fn crypto_withdrawal_truncates_the_address() {
        let tx = tx_with(
            -100,
            "withdrawal",
            None,
            json!({
                "withdrawal_type": "crypto",
                "crypto_symbol": "USDT",
                "crypto_address": "0x1234567890abcdef1234",
            }),
        );
        let d = classify(&tx);
        assert_eq!(d.secondary, "To USDT (0x1234...1234)");
        assert_eq!(d.icon, Icon::Wallet);
        assert_eq!(d.tone, Tone::Accent);
    }

    #[test]
    fn unrailed_withdrawal_uses_the_description() {
        let tx = tx_with(-100, "withdrawal", Some("Manual payout"), json!({}));
        let d = classify(&tx);
        assert_eq!(d.secondary, "Manual payout");
        assert_eq!(d.tone, Tone::Warning);
    }

    #[test]
    fn deposit_and_credit_share_a_descriptor() {
        for tag in ["deposit", "credit"] {
            let d = classify(&tx(100, tag));
            assert_eq!(d.label, "Deposit");
            assert_eq!(d.secondary, "Added to your account");
            assert_eq!(d.icon, Icon::Card);
        }
    }

    #[test]
    fn referral_matches_any_suffix() {
        let tx = tx_with(500, "referral_commission_l2", None, json!({}));
        let d = classify(&tx);
        assert_eq!(d.label, "Referral Reward");
        assert_eq!(d.secondary, "Commission earned");
        assert_eq!(d.tone, Tone::Positive);
    }

    #[test]
    fn ad_reward_matches_unseen_tags() {
        let tx = tx_with(300, "ad_video_reward", Some("Watched 30s ad"), json!({}));
        let d = classify(&tx);
        assert_eq!(d.label, "Ad Reward");
        assert_eq!(d.secondary, "Watched 30s ad");
        assert_eq!(d.icon, Icon::Sparkle);
    }

    #[test]
    fn badge_and_bonus_tags_are_bonus_rewards() {
        assert_eq!(classify(&tx(100, "badge_bonus")).label, "Bonus Reward");
        assert_eq!(classify(&tx(100, "bonus_signup")).label, "Bonus Reward");
    }

    #[test]
    fn staking_reward_has_interest_fallback() {
        let d = classify(&tx(100, "staking_reward"));
        assert_eq!(d.label, "Staking Reward");
        assert_eq!(d.secondary, "Interest earned");
        assert_eq!(d.tone, Tone::Emerald);
    }

    #[test]
    fn conversion_has_a_fixed_secondary() {
        let d = classify(&tx(100, "holding_to_withdrawable"));
        assert_eq!(d.label, "Converted");
        assert_eq!(d.secondary, "From Holding Wallet → To Withdrawable Wallet");
        assert_eq!(d.icon, Icon::Convert);
        assert_eq!(d.tone, Tone::Indigo);
    }

    #[test]
    fn loan_styling_follows_the_sign_not_the_tag() {
        let disbursed = classify(&tx(10000, "loan_disbursement"));
        assert_eq!(disbursed.label, "Loan Received");
        assert_eq!(disbursed.tone, Tone::Positive);
        assert_eq!(disbursed.icon, Icon::TransferIn);

        let payment = classify(&tx(-2500, "loan_emi_payment"));
        assert_eq!(payment.label, "Loan Payment");
        assert_eq!(payment.tone, Tone::Negative);
        assert_eq!(payment.icon, Icon::TransferOut);

        // A negative disbursement (reversal) keeps the label but flips style.
        let reversal = classify(&tx(-10000, "loan_disbursement"));
        assert_eq!(reversal.label, "Loan Received");
        assert_eq!(reversal.tone, Tone::Negative);
    }

    #[test]
    fn unknown_tags_humanize_via_fallback() {
        let tx = tx_with(1000, "quarterly_bonus_v2", Some("Q3 bonus"), json!({}));
        let d = classify(&tx);
        assert_eq!(d.label, "quarterly bonus v2");
        assert_eq!(d.secondary, "Q3 bonus");
        assert_eq!(d.icon, Icon::Coin);
        assert_eq!(d.tone, Tone::Neutral);
    }

    #[test]
    fn classifier_is_total_over_arbitrary_tags() {
        for tag in ["", "???", "bsk-weird-TAG", "未知", "a_b_c_d_e"] {
            let d = classify(&tx(1, tag));
            assert!(!d.label.is_empty() || tag.is_empty());
            // All four fields populated regardless of input.
            let _ = (d.icon, d.tone, d.secondary);
        }
    }

    #[test]
    fn address_truncation_exact_shape() {
        assert_eq!(truncate_address("0x1234567890abcdef1234"), "0x1234...1234");
        assert_eq!(truncate_address("0xabcdef"), "0xabcdef");
    }

    #[test]
    fn status_badges_map_known_states_only() {
        assert_eq!(status_badge(Some("COMPLETED")).map(|b| b.label), Some("Completed"));
        assert_eq!(status_badge(Some("approved")).map(|b| b.label), Some("Completed"));
        assert_eq!(status_badge(Some("pending")).map(|b| b.tone), Some(BadgeTone::Outline));
        assert_eq!(status_badge(Some("processing")).map(|b| b.tone), Some(BadgeTone::Info));
        assert_eq!(status_badge(Some("rejected")).map(|b| b.label), Some("Failed"));
        assert_eq!(status_badge(Some("failed")).map(|b| b.label), Some("Failed"));
        assert_eq!(status_badge(Some("on_hold")), None);
        assert_eq!(status_badge(None), None);
    }
}
