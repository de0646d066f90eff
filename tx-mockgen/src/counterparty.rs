//! Synthetic "other party" bank account numbers in the `PP-BBBB-AAAAAAA-SS` layout.

use std::fmt;

use rand::distributions::{Distribution, Standard};
use rand::Rng;

/// A bank whose accounts can show up as counterparties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankProfile {
    pub name: &'static str,
    /// Two-digit bank prefixes the bank issues accounts under
    pub prefixes: &'static [u8],
    /// Inclusive branch number range
    pub branch_min: u16,
    pub branch_max: u16,
}

pub const BANK_PROFILES: &[BankProfile] = &[
    BankProfile {
        name: "ANZ",
        prefixes: &[1, 6, 11],
        branch_min: 1,
        branch_max: 999,
    },
    BankProfile {
        name: "BNZ",
        prefixes: &[2],
        branch_min: 1,
        branch_max: 1299,
    },
    BankProfile {
        name: "Westpac",
        prefixes: &[3],
        branch_min: 1,
        branch_max: 1999,
    },
    BankProfile {
        name: "ASB",
        prefixes: &[12],
        branch_min: 3000,
        branch_max: 3499,
    },
    BankProfile {
        name: "TSB",
        prefixes: &[15],
        branch_min: 3941,
        branch_max: 3999,
    },
    BankProfile {
        name: "Kiwibank",
        prefixes: &[38],
        branch_min: 9000,
        branch_max: 9499,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterpartyAccount {
    pub bank: u8,
    pub branch: u16,
    pub account: u32,
    pub suffix: u8,
}

impl fmt::Display for CounterpartyAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}-{:04}-{:07}-{:02}",
            self.bank, self.branch, self.account, self.suffix
        )
    }
}

impl Distribution<CounterpartyAccount> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> CounterpartyAccount {
        let profile = &BANK_PROFILES[rng.gen_range(0..BANK_PROFILES.len())];
        CounterpartyAccount {
            bank: profile.prefixes[rng.gen_range(0..profile.prefixes.len())],
            branch: rng.gen_range(profile.branch_min..=profile.branch_max),
            account: rng.gen_range(1..=9_999_999),
            suffix: rng.gen_range(0..=99),
        }
    }
}
