//! Transaction domain model

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction type used by the bank for recurring direct debits
const DIRECT_DEBIT_TYPE: &str = "Avtalegiro";

/// Source tag for transactions served from the archive
const ARCHIVE_SOURCE: &str = "Archive";

/// A single transaction on one account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Interest-posting date; the dashboard shows transactions posted today
    pub interest_date: NaiveDate,
    pub accounting_date: Option<NaiveDate>,
    /// Free-text description as delivered by the bank
    pub text: String,
    pub amount: Decimal,
    pub transaction_type: Option<String>,
    pub source: Option<String>,
}

impl Transaction {
    /// Archived transactions are excluded from the today view
    pub fn is_archived(&self) -> bool {
        self.source.as_deref() == Some(ARCHIVE_SOURCE)
    }

    /// Recurring direct debits get the owning account's name appended
    /// when rendered
    pub fn is_direct_debit(&self) -> bool {
        self.transaction_type.as_deref() == Some(DIRECT_DEBIT_TYPE)
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Cleaned-up description for display
    ///
    /// Lowercases the text, strips currency ("nok") and exchange-rate
    /// ("kurs") tokens, digits, and `* : .` punctuation, collapses the
    /// resulting whitespace, and capitalizes the first letter.
    /// "NOK 123.45 Kurs: Foo*Bar" becomes "Foo bar".
    pub fn display_text(&self) -> String {
        let lowered = self.text.to_lowercase();

        let noise_re = Regex::new(r"\bnok\b|\bkurs\b|\d|\*|:|\.").unwrap();
        let stripped = noise_re.replace_all(&lowered, " ");

        let whitespace_re = Regex::new(r"\s+").unwrap();
        let collapsed = whitespace_re.replace_all(stripped.trim(), " ").to_string();

        capitalize_first(&collapsed)
    }
}

/// Uppercase the first character, leave the rest untouched
fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction(text: &str) -> Transaction {
        Transaction {
            interest_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            accounting_date: None,
            text: text.to_string(),
            amount: Decimal::new(-12345, 2),
            transaction_type: None,
            source: None,
        }
    }

    #[test]
    fn test_display_text_strips_currency_and_rate_tokens() {
        let tx = transaction("NOK 123.45 Kurs: Foo*Bar");
        assert_eq!(tx.display_text(), "Foo bar");
    }

    #[test]
    fn test_display_text_strips_digits() {
        let tx = transaction("REMA 1000 OSLO");
        assert_eq!(tx.display_text(), "Rema oslo");
    }

    #[test]
    fn test_display_text_empty_after_stripping() {
        let tx = transaction("123.45");
        assert_eq!(tx.display_text(), "");
    }

    #[test]
    fn test_archived_detection() {
        let mut tx = transaction("Vipps");
        assert!(!tx.is_archived());
        tx.source = Some("Archive".to_string());
        assert!(tx.is_archived());
    }

    #[test]
    fn test_direct_debit_detection() {
        let mut tx = transaction("Strøm");
        assert!(!tx.is_direct_debit());
        tx.transaction_type = Some("Avtalegiro".to_string());
        assert!(tx.is_direct_debit());
    }

    #[test]
    fn test_expense_detection() {
        let mut tx = transaction("Lønn");
        assert!(tx.is_expense());
        tx.amount = Decimal::new(2500000, 2);
        assert!(!tx.is_expense());
    }
}
