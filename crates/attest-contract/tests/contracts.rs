//! Contracts over condition-built expressions, with rendered reports.

use attest_conditions::that_named;
use attest_contract::{
    ContractKind, FormatConfig, TextFormatter, confirm, ensure, format_cause, require,
    require_with,
};
use attest_kernel::{Expression, Outcome};

struct Transfer {
    balance: i64,
    amount: i64,
    currency: String,
}

fn can_transfer(transfer: &Transfer) -> Expression {
    Expression::all("transfer allowed")
        .append(that_named("amount", transfer.amount).is_greater_than(0))
        .append(that_named("balance", transfer.balance).is_greater_than_or_equal_to(transfer.amount))
        .append(that_named("currency", transfer.currency.clone()).has_length(3))
        .build()
        .unwrap()
}

#[test]
fn precondition_report_names_the_root_cause() {
    let transfer = Transfer {
        balance: 40,
        amount: 100,
        currency: "EUR".to_string(),
    };
    let violation = require(&can_transfer(&transfer)).unwrap_err();

    assert_eq!(violation.kind(), ContractKind::Precondition);
    assert_eq!(violation.to_string(), "precondition failed: balance >= 100");
    assert_eq!(
        violation.failure().chain().unwrap().to_string(),
        "transfer allowed > balance >= 100"
    );
    insta::assert_snapshot!(violation.report(), @r#"
precondition failed: balance >= 100
root cause: transfer allowed > balance >= 100
[FAIL] transfer allowed
    expected: All children must pass
    actual: Passed: 1, Failed: 1, Skipped: 1
  [PASS] amount > 0
      expected: greater than 0
      actual: 100
  [FAIL] balance >= 100  <- root cause
      expected: greater than or equal to 100
      actual: 40
  [SKIP] currency has 3 characters
"#);
}

#[test]
fn compact_formatter_hides_passing_detail() {
    let transfer = Transfer {
        balance: 40,
        amount: 100,
        currency: "EUR".to_string(),
    };
    let formatter = TextFormatter::new(FormatConfig {
        show_passing: false,
        ..FormatConfig::default()
    });
    let violation = require_with(&can_transfer(&transfer), &formatter).unwrap_err();

    let report = violation.report();
    assert!(report.contains("  [PASS] amount > 0\n  [FAIL] balance >= 100  <- root cause\n"));
    assert!(!report.contains("greater than 0\n"));
}

#[test]
fn satisfied_postcondition_returns_evaluation() {
    let transfer = Transfer {
        balance: 500,
        amount: 100,
        currency: "EUR".to_string(),
    };
    let evaluation = ensure(&can_transfer(&transfer)).unwrap();
    assert_eq!(evaluation.outcome(), Outcome::True);
    assert_eq!(evaluation.evaluated_terminals(), 3);
}

#[test]
fn violation_keeps_the_evaluation() {
    let transfer = Transfer {
        balance: 500,
        amount: 100,
        currency: "euro".to_string(),
    };
    let violation = confirm(&can_transfer(&transfer)).unwrap_err();
    let evaluation = violation.evaluation();
    let cause = evaluation.root_cause().unwrap();

    assert_eq!(format_cause(&cause), "transfer allowed > currency has 3 characters");
    assert_eq!(cause.evaluation().rationale().actual(), "\"euro\"");
    assert_eq!(violation.into_evaluation().outcome(), Outcome::False);
}
