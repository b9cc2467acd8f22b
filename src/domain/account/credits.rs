//! Credit balance arithmetic.

use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// Balance granted to every new user.
pub const STARTING_CREDITS: i64 = 100;

/// Priced operations, published to clients so they can debit before
/// calling a generation endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditCost {
    GenerateNotes,
    GenerateQuizQuestion,
    GenerateAudio,
}

impl CreditCost {
    pub const ALL: [CreditCost; 3] = [
        CreditCost::GenerateNotes,
        CreditCost::GenerateQuizQuestion,
        CreditCost::GenerateAudio,
    ];

    /// Wire name, matching the serde representation.
    pub fn key(&self) -> &'static str {
        match self {
            CreditCost::GenerateNotes => "generate_notes",
            CreditCost::GenerateQuizQuestion => "generate_quiz_question",
            CreditCost::GenerateAudio => "generate_audio",
        }
    }

    pub fn amount(&self) -> i64 {
        match self {
            CreditCost::GenerateNotes => 1,
            CreditCost::GenerateQuizQuestion => 1,
            CreditCost::GenerateAudio => 2,
        }
    }
}

/// A non-negative number of credits to add or remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CreditAmount(i64);

impl CreditAmount {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < 0 {
            return Err(ValidationError::negative("amount", value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl FromStr for CreditAmount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|e| ValidationError::invalid_format("amount", e.to_string()))?;
        Self::new(value)
    }
}

/// Raised when a debit exceeds the current balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Insufficient credits: balance {balance}, requested {requested}")]
pub struct InsufficientCredits {
    pub balance: i64,
    pub requested: i64,
}

/// Computes the balance after a credit.
pub fn credited(balance: i64, amount: CreditAmount) -> i64 {
    balance.saturating_add(amount.value())
}

/// Computes the balance after a debit, refusing to go negative.
pub fn debited(balance: i64, amount: CreditAmount) -> Result<i64, InsufficientCredits> {
    if amount.value() > balance {
        return Err(InsufficientCredits {
            balance,
            requested: amount.value(),
        });
    }
    Ok(balance - amount.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn costs_match_price_list() {
        assert_eq!(CreditCost::GenerateNotes.amount(), 1);
        assert_eq!(CreditCost::GenerateQuizQuestion.amount(), 1);
        assert_eq!(CreditCost::GenerateAudio.amount(), 2);
    }

    #[test]
    fn amount_parses_digits() {
        let amount: CreditAmount = "25".parse().unwrap();
        assert_eq!(amount.value(), 25);
    }

    #[test]
    fn amount_rejects_garbage_and_negatives() {
        assert!("ten".parse::<CreditAmount>().is_err());
        assert!("-3".parse::<CreditAmount>().is_err());
        assert!("".parse::<CreditAmount>().is_err());
    }

    #[test]
    fn debit_beyond_balance_reports_balance() {
        let err = debited(10, CreditAmount::new(11).unwrap()).unwrap_err();
        assert_eq!(
            err,
            InsufficientCredits {
                balance: 10,
                requested: 11
            }
        );
    }

    #[test]
    fn debit_of_entire_balance_reaches_zero() {
        assert_eq!(debited(7, CreditAmount::new(7).unwrap()).unwrap(), 0);
    }

    proptest! {
        #[test]
        fn debit_never_goes_negative(balance in 0i64..10_000, amount in 0i64..20_000) {
            let amount = CreditAmount::new(amount).unwrap();
            match debited(balance, amount) {
                Ok(remaining) => prop_assert!(remaining >= 0),
                Err(err) => prop_assert_eq!(err.balance, balance),
            }
        }

        #[test]
        fn credit_then_debit_restores_balance(balance in 0i64..10_000, amount in 0i64..10_000) {
            let amount = CreditAmount::new(amount).unwrap();
            let raised = credited(balance, amount);
            prop_assert_eq!(debited(raised, amount).unwrap(), balance);
        }
    }
}
