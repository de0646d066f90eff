use chrono::NaiveDateTime;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::config::GeneratorConfig;
use crate::counterparty::CounterpartyAccount;
use crate::error::GenError;
use crate::timeline::{self, Window};
use crate::transaction::{Entry, EntryKind, TransactionEnvelope, TransactionRecord};

/// Builds synthetic records one after another, carrying the running balance between them.
/// Every envelope starts over from the configured starting balance and transaction id 1.
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    window: Window,
    rng: StdRng,
    balance: Decimal,
    next_tx_id: u64,
}

impl Generator {
    /// # Errors
    /// Errors when `config` does not pass [`GeneratorConfig::validate`]
    pub fn new(config: GeneratorConfig) -> Result<Self, GenError> {
        config.validate()?;
        let window = config.window()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        debug!(
            "Generating {} transactions between {} and {} ({:?}, {:?})",
            config.count, window.start, window.end, config.timestamp_policy, config.vocabulary
        );
        Ok(Generator {
            balance: config.starting_balance,
            config,
            window,
            rng,
            next_tx_id: 1,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The balance after the last record produced so far.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Generates the configured number of records and wraps them in an envelope.
    pub fn generate(&mut self) -> TransactionEnvelope {
        self.restart();
        let timestamps = self.timestamps(self.config.count);
        let records = timestamps
            .into_iter()
            .map(|timestamp| {
                let entry = self.draw_entry();
                self.record(timestamp, &entry)
            })
            .collect();
        self.finish(records)
    }

    /// Like [`Generator::generate`], but posts the given entries instead of random ones. The
    /// configured count is ignored in favour of the number of entries.
    pub fn generate_entries(
        &mut self,
        entries: impl IntoIterator<Item = Entry>,
    ) -> TransactionEnvelope {
        let entries: Vec<Entry> = entries.into_iter().collect();
        self.restart();
        let timestamps = self.timestamps(entries.len());
        let records = timestamps
            .into_iter()
            .zip(&entries)
            .map(|(timestamp, entry)| self.record(timestamp, entry))
            .collect();
        self.finish(records)
    }

    /// Picks a side, a category and an amount. The salary override is rolled first.
    pub fn draw_entry(&mut self) -> Entry {
        if let Some(salary) = self.config.salary {
            if self.rng.gen_bool(salary.probability) {
                let amount = salary.category.draw_amount(&mut self.rng);
                return Entry::credit(amount, salary.category.description);
            }
        }

        let kind = if self.rng.gen_bool(self.config.credit_probability) {
            EntryKind::Credit
        } else {
            EntryKind::Debit
        };
        let categories = self.config.vocabulary.categories(kind);
        let category = &categories[self.rng.gen_range(0..categories.len())];
        Entry::new(kind, category.draw_amount(&mut self.rng), category.description)
    }

    /// Posts `entry` against the running balance and fills in the identifiers around it.
    pub fn record(&mut self, timestamp: NaiveDateTime, entry: &Entry) -> TransactionRecord {
        self.balance = entry.apply(self.balance);
        let mut record = TransactionRecord::new(
            self.next_tx_id,
            &self.config.account_number,
            timestamp,
            entry,
            self.balance,
        );
        self.next_tx_id += 1;

        record.transaction_code = self.rng.gen_range(10..=99_u8).to_string();
        record.operator = self.rng.gen_range(1000..=9999_u16).to_string();
        record.other_payee_account_number = self.rng.gen::<CounterpartyAccount>().to_string();

        trace!(
            "tx {} {:?} {} -> balance {}",
            record.transaction_id,
            entry.kind,
            entry.amount.value(),
            record.balance
        );
        record
    }

    // The seed stays unrounded; only posted balances are rounded.
    fn restart(&mut self) {
        self.balance = self.config.starting_balance;
        self.next_tx_id = 1;
    }

    fn timestamps(&mut self, count: usize) -> Vec<NaiveDateTime> {
        timeline::sequence(count, &self.window, self.config.timestamp_policy, &mut self.rng)
    }

    fn finish(&self, records: Vec<TransactionRecord>) -> TransactionEnvelope {
        debug!(
            "Generated {} transactions, closing balance {}",
            records.len(),
            self.balance
        );
        TransactionEnvelope::new(records)
    }
}

/// One-shot generation from a configuration.
///
/// # Errors
/// Errors when `config` does not pass [`GeneratorConfig::validate`]
pub fn generate_envelope(config: GeneratorConfig) -> Result<TransactionEnvelope, GenError> {
    Ok(Generator::new(config)?.generate())
}
