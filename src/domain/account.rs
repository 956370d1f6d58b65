//! Bank account with a guarded balance.
//!
//! The holder name is plain public data. The balance is only reachable through
//! [`BankAccount::balance`], [`BankAccount::deposit`] and
//! [`BankAccount::withdraw`], each of which validates the amount first.

use crate::error::{FieldError, FieldResult};
use crate::field::{ValidatedField, WriteOutcome};
use crate::validation::{DepositPolicy, MIN_OPENING_BALANCE, RangePolicy, WithdrawPolicy};

const OPENING_POLICY: RangePolicy<i64> = RangePolicy::new(MIN_OPENING_BALANCE, i64::MAX);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankAccount {
    /// Account holder. Not validated beyond being non-empty at opening.
    pub holder: String,
    balance: ValidatedField<i64>,
}

impl BankAccount {
    pub const FIELD: &'static str = "balance";

    /// Opens an account for `holder` with an opening balance.
    ///
    /// # Errors
    /// Returns `Err` if the holder name is blank or the balance is negative.
    pub fn open(holder: impl Into<String>, balance: i64) -> FieldResult<Self> {
        let holder = holder.into();
        if holder.trim().is_empty() {
            return Err(FieldError::InvalidInitial {
                field: "holder",
                value: holder,
                reason: "holder name cannot be empty".to_string(),
            });
        }
        let balance = ValidatedField::init(Self::FIELD, &OPENING_POLICY, balance)?;
        tracing::debug!(holder = %holder, balance = balance.get(), "account opened");
        Ok(Self { holder, balance })
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn balance(&self) -> i64 {
        self.balance.get()
    }

    /// Adds a positive `amount` to the balance.
    ///
    /// # Errors
    /// Returns `Err` and leaves the balance unchanged if `amount` is not positive.
    pub fn deposit(&mut self, amount: i64) -> FieldResult<WriteOutcome<i64>> {
        self.balance.write(&DepositPolicy, amount)
    }

    /// Removes a positive `amount` no larger than the balance.
    ///
    /// # Errors
    /// Returns `Err` and leaves the balance unchanged if `amount` is not
    /// positive or exceeds the balance.
    pub fn withdraw(&mut self, amount: i64) -> FieldResult<WriteOutcome<i64>> {
        self.balance.write(&WithdrawPolicy, amount)
    }
}
