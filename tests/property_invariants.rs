//! Property-Based Invariant Testing
//!
//! Invariants that must hold for every holder:
//! - Accepted writes store exactly what the policy committed
//! - Rejected writes never change the stored value
//! - Clamped writes always land inside the device range

use proptest::prelude::*;
use validated_fields::{BankAccount, Device, Fan, InitialValues, Step, StepStatus, Workbench};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Invariant: in-range speeds are accepted and read back
    #[test]
    fn invariant_speed_in_range_accepted(initial in 0i32..=5, c in 0i32..=5) {
        let mut fan = Fan::new(initial).unwrap();
        prop_assert!(fan.set_speed(c).is_ok());
        prop_assert_eq!(fan.speed(), c);
    }

    /// Invariant: out-of-range speeds are rejected and leave the speed alone
    #[test]
    fn invariant_speed_out_of_range_rejected(
        initial in 0i32..=5,
        c in prop_oneof![i32::MIN..0, 6..=i32::MAX],
    ) {
        let mut fan = Fan::new(initial).unwrap();
        prop_assert!(fan.set_speed(c).is_err());
        prop_assert_eq!(fan.speed(), initial);
    }

    /// Invariant: a positive deposit increases the balance by exactly the amount
    #[test]
    fn invariant_deposit_adds_exact_amount(
        balance in 0i64..1_000_000_000,
        amount in 1i64..1_000_000_000,
    ) {
        let mut account = BankAccount::open("Ali", balance).unwrap();
        prop_assert!(account.deposit(amount).is_ok());
        prop_assert_eq!(account.balance(), balance + amount);
    }

    /// Invariant: non-positive deposits are rejected
    #[test]
    fn invariant_non_positive_deposit_rejected(balance in 0i64..1_000_000, amount in i64::MIN..=0) {
        let mut account = BankAccount::open("Ali", balance).unwrap();
        prop_assert!(account.deposit(amount).is_err());
        prop_assert_eq!(account.balance(), balance);
    }

    /// Invariant: invalid withdrawals fail and leave the balance unchanged
    #[test]
    fn invariant_invalid_withdraw_rejected(
        balance in 0i64..1_000_000,
        amount in prop_oneof![i64::MIN..=0, 1_000_000i64..=i64::MAX],
    ) {
        let mut account = BankAccount::open("Ali", balance).unwrap();
        prop_assert!(account.withdraw(amount).is_err());
        prop_assert_eq!(account.balance(), balance);
    }

    /// Invariant: valid withdrawals subtract exactly the amount
    #[test]
    fn invariant_valid_withdraw_subtracts(balance in 1i64..1_000_000, fraction in 0.0f64..1.0) {
        let amount = ((balance as f64 * fraction) as i64).max(1);
        let mut account = BankAccount::open("Ali", balance).unwrap();
        prop_assert!(account.withdraw(amount).is_ok());
        prop_assert_eq!(account.balance(), balance - amount);
        prop_assert!(account.balance() >= 0);
    }

    /// Invariant: temperature writes never fail and always land in [0, 40]
    #[test]
    fn invariant_temperature_clamped(initial in any::<i32>(), t in any::<i32>()) {
        let mut device = Device::new(initial);
        let outcome = device.set_temperature(t);
        prop_assert_eq!(device.temperature(), t.clamp(0, 40));
        prop_assert_eq!(outcome.value(), device.temperature());
        prop_assert_eq!(outcome.is_clamped(), !(0..=40).contains(&t));
    }

    /// Invariant: a rejected step's record shows the value it left behind
    #[test]
    fn invariant_rejected_records_keep_value(
        steps in prop::collection::vec(
            prop_oneof![
                (-10i32..15).prop_map(|value| Step::SetSpeed { value }),
                (-500i64..3000).prop_map(|value| Step::Deposit { value }),
                (-500i64..3000).prop_map(|value| Step::Withdraw { value }),
                (-50i32..80).prop_map(|value| Step::SetTemperature { value }),
            ],
            1..50,
        )
    ) {
        let mut bench = Workbench::new(&InitialValues::default()).unwrap();
        let report = bench.run(&steps);
        prop_assert_eq!(report.records.len(), steps.len());
        for record in &report.records {
            if record.status == StepStatus::Rejected {
                prop_assert_eq!(record.previous, record.value);
                prop_assert!(record.error.is_some());
            } else {
                prop_assert!(record.error.is_none());
            }
        }
        prop_assert!((0..=5).contains(&report.final_state.speed));
        prop_assert!(report.final_state.balance >= 0);
        prop_assert!((0..=40).contains(&report.final_state.temperature));
    }
}
