use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;

use crate::error::GenError;
use crate::timeline::{default_lookback_days, TimestampPolicy, Window};
use crate::transaction::{Amount, EntryKind};

pub const DEFAULT_TRANSACTION_COUNT: usize = 200;
pub const DEFAULT_ACCOUNT_NUMBER: &str = "9023053068900";

/// A description together with the inclusive band its amounts are drawn from, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub description: &'static str,
    pub min_cents: u64,
    pub max_cents: u64,
}

impl Category {
    #[must_use]
    pub const fn new(description: &'static str, min_cents: u64, max_cents: u64) -> Self {
        Category {
            description,
            min_cents,
            max_cents,
        }
    }

    /// Draws a uniform amount in whole cents from the band. The band must be valid.
    #[must_use]
    pub fn draw_amount(&self, rng: &mut impl Rng) -> Amount {
        Amount::from_cents(rng.gen_range(self.min_cents..=self.max_cents))
    }

    fn validate(&self) -> Result<(), GenError> {
        if self.min_cents <= self.max_cents {
            Ok(())
        } else {
            Err(GenError::InvalidAmountBand)
        }
    }
}

pub const GENERIC_CATEGORIES: &[Category] = &[
    Category::new("TRANSFER FROM JJXEDXX - 01", 10_00, 5_000_00),
    Category::new("PAYMENT TO SUPPLIER ABC", 10_00, 5_000_00),
    Category::new("DIRECT DEBIT UTILITY", 10_00, 5_000_00),
    Category::new("POS PURCHASE OFFICE SUPPLIES", 10_00, 5_000_00),
    Category::new("CREDIT INTEREST", 10_00, 5_000_00),
    Category::new("TRANSFER TO SAVINGS", 10_00, 5_000_00),
];

pub const HOUSEHOLD_INCOME: &[Category] = &[
    Category::new("TRANSFER FROM SAVINGS", 50_00, 1_500_00),
    Category::new("TRANSFER FROM JJXEDXX - 01", 20_00, 800_00),
    Category::new("CREDIT INTEREST", 1_00, 80_00),
    Category::new("REFUND POS PURCHASE", 5_00, 300_00),
];

pub const HOUSEHOLD_EXPENSE: &[Category] = &[
    Category::new("RENT PAYMENT", 1_200_00, 2_600_00),
    Category::new("IRD TAX PAYMENT", 400_00, 3_000_00),
    Category::new("DIRECT DEBIT UTILITY", 60_00, 350_00),
    Category::new("POS PURCHASE GROCERIES", 15_00, 250_00),
    Category::new("POS PURCHASE CAFE", 4_00, 40_00),
    Category::new("FUEL STATION", 30_00, 150_00),
    Category::new("ONLINE SUBSCRIPTION", 5_00, 30_00),
];

pub const SALARY_CATEGORY: Category = Category::new("SALARY PAYMENT", 2_500_00, 6_000_00);

/// Descriptions and amount bands records are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Vocabulary {
    /// One list shared by credits and debits.
    #[default]
    Generic,
    /// Separate income and expense lists with per-category bands.
    Household,
    Custom {
        income: &'static [Category],
        expense: &'static [Category],
    },
}

impl Vocabulary {
    #[must_use]
    pub fn categories(&self, kind: EntryKind) -> &'static [Category] {
        match (*self, kind) {
            (Vocabulary::Generic, _) => GENERIC_CATEGORIES,
            (Vocabulary::Household, EntryKind::Credit) => HOUSEHOLD_INCOME,
            (Vocabulary::Household, EntryKind::Debit) => HOUSEHOLD_EXPENSE,
            (Vocabulary::Custom { income, .. }, EntryKind::Credit) => income,
            (Vocabulary::Custom { expense, .. }, EntryKind::Debit) => expense,
        }
    }

    fn validate(&self) -> Result<(), GenError> {
        for kind in [EntryKind::Credit, EntryKind::Debit] {
            let categories = self.categories(kind);
            if categories.is_empty() {
                return Err(GenError::EmptyVocabulary);
            }
            categories.iter().try_for_each(Category::validate)?;
        }
        Ok(())
    }
}

/// A rare large credit that is rolled for before the regular credit/debit choice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryOverride {
    pub probability: f64,
    pub category: Category,
}

/// Named presets of [`GeneratorConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Even credit/debit split over generic business descriptions, random-walk dates.
    #[default]
    Classic,
    /// Mostly expenses with the odd salary, category-specific bands, sampled dates.
    Household,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Number of records to generate
    pub count: usize,
    /// Balance before the first record is posted
    pub starting_balance: Decimal,
    /// Last day of the generated window
    pub anchor: NaiveDate,
    /// `None` draws a fresh seed from the OS
    pub seed: Option<u64>,
    /// `None` uses [`default_lookback_days`]
    pub lookback_days: Option<u32>,
    pub timestamp_policy: TimestampPolicy,
    pub vocabulary: Vocabulary,
    /// Chance a record is a credit once the salary roll has missed
    pub credit_probability: f64,
    pub salary: Option<SalaryOverride>,
    pub account_number: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig::from_profile(Profile::Classic)
    }
}

impl GeneratorConfig {
    #[must_use]
    pub fn from_profile(profile: Profile) -> Self {
        let classic = GeneratorConfig {
            count: DEFAULT_TRANSACTION_COUNT,
            starting_balance: Decimal::new(10_000_00, 2),
            anchor: default_anchor(),
            seed: None,
            lookback_days: None,
            timestamp_policy: TimestampPolicy::RandomWalk,
            vocabulary: Vocabulary::Generic,
            credit_probability: 0.5,
            salary: None,
            account_number: String::from(DEFAULT_ACCOUNT_NUMBER),
        };
        match profile {
            Profile::Classic => classic,
            Profile::Household => GeneratorConfig {
                starting_balance: Decimal::new(5_000_00, 2),
                timestamp_policy: TimestampPolicy::SampledSorted,
                vocabulary: Vocabulary::Household,
                credit_probability: 0.3,
                salary: Some(SalaryOverride {
                    probability: 0.1,
                    category: SALARY_CATEGORY,
                }),
                ..classic
            },
        }
    }

    #[must_use]
    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
            .unwrap_or_else(|| default_lookback_days(self.count))
    }

    /// # Errors
    /// Errors when the anchor and lookback do not fit in the calendar
    pub fn window(&self) -> Result<Window, GenError> {
        Window::before(self.anchor, self.lookback_days())
    }

    /// Checks everything generation relies on, so that generating itself can't fail.
    ///
    /// # Errors
    /// 1. A credit or salary probability outside `[0, 1]`
    /// 2. A category band with `min > max`
    /// 3. A vocabulary without income or expense categories
    /// 4. A window that falls off the calendar
    pub fn validate(&self) -> Result<(), GenError> {
        check_probability(self.credit_probability)?;
        if let Some(salary) = &self.salary {
            check_probability(salary.probability)?;
            salary.category.validate()?;
        }
        self.vocabulary.validate()?;
        self.window()?;
        Ok(())
    }
}

fn check_probability(probability: f64) -> Result<(), GenError> {
    if (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(GenError::InvalidProbability)
    }
}

fn default_anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    static EMPTY: &[Category] = &[];
    static BAD_BAND: &[Category] = &[Category::new("BACKWARDS", 10_00, 1_00)];

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.count, 200);
        assert_eq!(config.starting_balance, Decimal::new(10_000_00, 2));
        assert_eq!(config.anchor, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(config.timestamp_policy, TimestampPolicy::RandomWalk);
        assert_eq!(config.lookback_days(), 365);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_household_profile() {
        let config = GeneratorConfig::from_profile(Profile::Household);
        assert_eq!(config.starting_balance, Decimal::new(5_000_00, 2));
        assert_eq!(config.vocabulary, Vocabulary::Household);
        assert!(config.salary.is_some());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_probability_validation() {
        let mut config = GeneratorConfig::default();
        config.credit_probability = 1.5;
        assert!(matches!(config.validate(), Err(GenError::InvalidProbability)));

        config.credit_probability = f64::NAN;
        assert!(matches!(config.validate(), Err(GenError::InvalidProbability)));

        config.credit_probability = 1.0;
        config.salary = Some(SalaryOverride {
            probability: -0.1,
            category: SALARY_CATEGORY,
        });
        assert!(matches!(config.validate(), Err(GenError::InvalidProbability)));
    }

    #[test]
    fn test_vocabulary_validation() {
        let mut config = GeneratorConfig::default();
        config.vocabulary = Vocabulary::Custom {
            income: GENERIC_CATEGORIES,
            expense: EMPTY,
        };
        assert!(matches!(config.validate(), Err(GenError::EmptyVocabulary)));

        config.vocabulary = Vocabulary::Custom {
            income: BAD_BAND,
            expense: GENERIC_CATEGORIES,
        };
        assert!(matches!(config.validate(), Err(GenError::InvalidAmountBand)));
    }

    #[test]
    fn test_huge_count_keeps_valid_window() {
        let config = GeneratorConfig {
            count: usize::MAX,
            ..GeneratorConfig::default()
        };
        assert_eq!(config.lookback_days(), crate::timeline::MAX_LOOKBACK_DAYS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_anchor_validation() {
        let mut config = GeneratorConfig::default();
        config.anchor = NaiveDate::MIN;
        assert!(matches!(config.validate(), Err(GenError::InvalidAnchor)));
    }

    #[test]
    fn test_household_bands() {
        // rent and tax sit above every incidental purchase
        let rent = &HOUSEHOLD_EXPENSE[0];
        let tax = &HOUSEHOLD_EXPENSE[1];
        let incidental_max = HOUSEHOLD_EXPENSE[2..]
            .iter()
            .map(|c| c.max_cents)
            .max()
            .unwrap();
        assert!(rent.min_cents > incidental_max);
        assert!(tax.min_cents > incidental_max);
    }

    #[test]
    fn test_draw_amount_in_band() {
        let mut rng = StdRng::seed_from_u64(5);
        let category = Category::new("FUEL STATION", 30_00, 150_00);
        for _ in 0..500 {
            let amount = category.draw_amount(&mut rng).value();
            assert!(amount >= Decimal::new(30_00, 2));
            assert!(amount <= Decimal::new(150_00, 2));
            assert_eq!(amount.scale(), 2);
        }

        let fixed = Category::new("FIXED", 9_99, 9_99);
        assert_eq!(fixed.draw_amount(&mut rng), Amount::from_cents(9_99));
    }

    #[test]
    fn test_generic_vocabulary_shared() {
        let vocabulary = Vocabulary::Generic;
        assert_eq!(
            vocabulary.categories(EntryKind::Credit),
            vocabulary.categories(EntryKind::Debit)
        );
    }
}
