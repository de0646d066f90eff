use std::convert::TryFrom;

use chrono::NaiveDateTime;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::GenError;

/// Currency minor-unit precision used for every amount and balance.
pub const NUM_DECIMAL_PLACES: u32 = 2;

/// A non-negative money amount, always carried at [`NUM_DECIMAL_PLACES`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "Decimal")]
pub struct Amount(Decimal);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Credit,
    Debit,
}

/// What a single record moves: its side of the ledger, how much, and the label shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind: EntryKind,
    pub amount: Amount,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NonValueTransactionItem {
    pub non_value_transaction_id: String,
    pub non_value_transaction_description: String,
    pub non_value_transaction_code: String,
}

#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub transaction_id: String,
    pub account_number: String,
    #[serde(with = "timestamp_format")]
    pub transaction_date: NaiveDateTime,
    pub debit_amount: Amount,
    pub credit_amount: Amount,
    pub balance: Decimal,
    pub description: String,
    pub transaction_code: String,
    pub branch: String,
    pub operator: String,
    #[serde(with = "timestamp_format")]
    pub effective_date: NaiveDateTime,
    pub cheque: String,
    pub this_payee_part: String,
    pub this_payee_code: String,
    pub this_payee_ref: String,
    pub other_payee_part: String,
    pub other_payee_code: String,
    pub other_payee_ref: String,
    pub other_payee_name: String,
    pub other_payee_account_number: String,
    // The consuming API spells it this way.
    #[serde(rename = "originialTransactionCode")]
    pub original_transaction_code: String,
    pub source_code: String,
    pub non_value_transaction_items: Vec<NonValueTransactionItem>,
}

#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    pub more_transactions: bool,
    pub transaction_count: usize,
    pub transaction_items: Vec<TransactionRecord>,
}

/// The output document. `moreTransactions` is always false since nothing here paginates.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionEnvelope {
    pub data: TransactionData,
}

impl TryFrom<Decimal> for Amount {
    type Error = GenError;
    fn try_from(mut decimal: Decimal) -> Result<Self, Self::Error> {
        if decimal >= Decimal::ZERO {
            decimal.rescale(NUM_DECIMAL_PLACES);
            Ok(Amount(decimal))
        } else {
            Err(GenError::InvalidAmount)
        }
    }
}

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    #[must_use]
    pub fn from_cents(cents: u64) -> Self {
        Amount(Decimal::from_i128_with_scale(
            i128::from(cents),
            NUM_DECIMAL_PLACES,
        ))
    }

    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl Entry {
    #[must_use]
    pub fn new(kind: EntryKind, amount: Amount, description: impl Into<String>) -> Self {
        Entry {
            kind,
            amount,
            description: description.into(),
        }
    }

    #[must_use]
    pub fn credit(amount: Amount, description: impl Into<String>) -> Self {
        Entry::new(EntryKind::Credit, amount, description)
    }

    #[must_use]
    pub fn debit(amount: Amount, description: impl Into<String>) -> Self {
        Entry::new(EntryKind::Debit, amount, description)
    }

    /// Returns `(debit, credit)`; exactly one side carries the amount.
    #[must_use]
    pub fn sides(&self) -> (Amount, Amount) {
        match self.kind {
            EntryKind::Credit => (Amount::ZERO, self.amount),
            EntryKind::Debit => (self.amount, Amount::ZERO),
        }
    }

    /// The balance after this entry is posted.
    #[must_use]
    pub fn apply(&self, balance: Decimal) -> Decimal {
        let (debit, credit) = self.sides();
        (balance + credit.value() - debit.value()).round_dp(NUM_DECIMAL_PLACES)
    }
}

impl TransactionRecord {
    /// Builds a record for `entry` with every identifier and placeholder field left empty.
    #[must_use]
    pub fn new(
        transaction_id: u64,
        account_number: &str,
        timestamp: NaiveDateTime,
        entry: &Entry,
        balance: Decimal,
    ) -> Self {
        let (debit_amount, credit_amount) = entry.sides();
        TransactionRecord {
            transaction_id: transaction_id.to_string(),
            account_number: account_number.to_owned(),
            transaction_date: timestamp,
            debit_amount,
            credit_amount,
            balance,
            description: entry.description.clone(),
            transaction_code: String::new(),
            branch: String::from("1"),
            operator: String::new(),
            effective_date: timestamp,
            cheque: String::new(),
            this_payee_part: String::new(),
            this_payee_code: String::new(),
            this_payee_ref: String::new(),
            other_payee_part: String::new(),
            other_payee_code: String::new(),
            other_payee_ref: String::new(),
            other_payee_name: String::new(),
            other_payee_account_number: String::new(),
            original_transaction_code: String::new(),
            source_code: String::new(),
            non_value_transaction_items: Vec::new(),
        }
    }
}

impl TransactionEnvelope {
    #[must_use]
    pub fn new(transaction_items: Vec<TransactionRecord>) -> Self {
        TransactionEnvelope {
            data: TransactionData {
                more_transactions: false,
                transaction_count: transaction_items.len(),
                transaction_items,
            },
        }
    }

    #[must_use]
    pub fn records(&self) -> &[TransactionRecord] {
        &self.data.transaction_items
    }
}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&timestamp.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(de::Error::custom)
    }
}
