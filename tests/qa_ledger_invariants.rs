//! Independent QA pass over the ledger invariants that hold without a
//! running store: the status state machine, validation gates, and the
//! bounded-payout accrual math.

use rust_decimal_macros::dec;
use vaultex::investment::{InvestmentPlan, check_plan_amount, daily_credit};
use vaultex::ledger::{Decision, LedgerError, TxStatus, validate_request};

#[test]
fn qa_status_reaches_terminal_at_most_once() {
    // pending may go to either terminal state
    assert!(TxStatus::Pending.can_transition_to(TxStatus::Completed));
    assert!(TxStatus::Pending.can_transition_to(TxStatus::Failed));

    // once terminal, every further transition is forbidden
    for terminal in [TxStatus::Completed, TxStatus::Failed] {
        for next in [TxStatus::Pending, TxStatus::Completed, TxStatus::Failed] {
            assert!(
                !terminal.can_transition_to(next),
                "{} -> {} must be forbidden",
                terminal,
                next
            );
        }
    }
}

#[test]
fn qa_decision_maps_to_exactly_one_terminal_status() {
    assert_eq!(Decision::Approved.terminal_status(), TxStatus::Completed);
    assert_eq!(Decision::Rejected.terminal_status(), TxStatus::Failed);
    assert!(Decision::Approved.terminal_status().is_terminal());
    assert!(Decision::Rejected.terminal_status().is_terminal());
}

#[test]
fn qa_validation_rejects_before_any_mutation_could_happen() {
    assert!(matches!(
        validate_request(dec!(0), "card"),
        Err(LedgerError::InvalidAmount)
    ));
    assert!(matches!(
        validate_request(dec!(-0.01), "card"),
        Err(LedgerError::InvalidAmount)
    ));
    assert!(matches!(
        validate_request(dec!(10), ""),
        Err(LedgerError::MissingMethod)
    ));
    assert!(validate_request(dec!(10), "card").is_ok());
}

#[test]
fn qa_plan_range_is_inclusive_on_both_ends() {
    let plan = InvestmentPlan {
        plan_id: 1,
        name: "Standard".to_string(),
        min_amount: dec!(100),
        max_amount: dec!(1000),
        daily_percent: dec!(0.02),
        duration_days: 30,
        is_active: true,
    };

    assert!(check_plan_amount(&plan, dec!(100)).is_ok());
    assert!(check_plan_amount(&plan, dec!(1000)).is_ok());
    assert!(matches!(
        check_plan_amount(&plan, dec!(99.99)),
        Err(LedgerError::AmountOutOfRange { .. })
    ));
    assert!(matches!(
        check_plan_amount(&plan, dec!(1000.01)),
        Err(LedgerError::AmountOutOfRange { .. })
    ));
}

#[test]
fn qa_bounded_payout_over_full_duration() {
    // amount=1000, daily_percent=0.02, duration=30
    // Total profit must be exactly 600, and day 31 credits nothing.
    let daily = dec!(1000) * dec!(0.02);
    let cap = daily * dec!(30);

    let mut total = dec!(0);
    let mut days = 0;
    while days < 30 {
        let credit = daily_credit(daily, total, cap);
        assert!(credit > dec!(0), "every scheduled day must credit");
        total += credit;
        days += 1;
    }

    assert_eq!(total, dec!(600));
    assert_eq!(daily_credit(daily, total, cap), dec!(0));
}

#[test]
fn qa_accrual_clamp_recovers_from_drift() {
    // If a drifted row somehow exceeds the cap, the credit clamps to
    // zero instead of going negative.
    assert_eq!(daily_credit(dec!(20), dec!(700), dec!(600)), dec!(0));
    // And a partial remainder is credited exactly once.
    assert_eq!(daily_credit(dec!(20), dec!(595), dec!(600)), dec!(5));
}

#[test]
fn qa_error_codes_are_stable_and_distinct() {
    let errors = [
        LedgerError::InvalidAmount,
        LedgerError::MissingMethod,
        LedgerError::InsufficientFunds { balance: dec!(0) },
        LedgerError::UserNotFound,
        LedgerError::TransactionNotFound("x".into()),
        LedgerError::WrongType,
        LedgerError::PlanInactive,
        LedgerError::AmountOutOfRange {
            min: dec!(1),
            max: dec!(2),
        },
        LedgerError::AlreadyResolved,
        LedgerError::Database("x".into()),
    ];

    let codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
    let mut deduped = codes.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(codes.len(), deduped.len(), "error codes must be distinct");

    for err in &errors {
        let status = err.http_status();
        assert!((400..=599).contains(&status), "{} out of range", status);
    }
}
