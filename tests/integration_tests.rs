use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use split_engine::core::event::{Event, EventId};
use split_engine::core::fee::{FeeId, FeeRecord, FeeSet};
use split_engine::core::member::{Member, MemberDirectory, MemberId};
use split_engine::engine::{
    CalculationNote, EngineError, EngineOptions, ErrorKind, ExpenseSummary, SettlementEngine,
    SettlementReport, EPSILON,
};

fn alice() -> MemberId {
    MemberId::new("member1")
}

fn bob() -> MemberId {
    MemberId::new("member2")
}

fn charlie() -> MemberId {
    MemberId::new("member3")
}

fn test_event() -> Event {
    Event::new(EventId::new("event1"), vec![alice(), bob(), charlie()])
}

fn test_directory() -> MemberDirectory {
    [
        Member::new(alice(), "Alice"),
        Member::new(bob(), "Bob"),
        Member::new(charlie(), "Charlie"),
    ]
    .into_iter()
    .collect()
}

fn dinner_and_taxi() -> FeeSet {
    [
        FeeRecord::with_id(FeeId::new("fee1"), "Dinner", dec!(90))
            .with_payer(alice())
            .with_beneficiaries(vec![alice(), bob(), charlie()]),
        FeeRecord::with_id(FeeId::new("fee2"), "Taxi", dec!(30))
            .with_payer(bob())
            .with_beneficiaries(vec![alice(), bob()]),
    ]
    .into_iter()
    .collect()
}

fn replay_balances(report: &SettlementReport) -> Vec<Decimal> {
    let mut amounts: Vec<(MemberId, Decimal)> = report
        .balances()
        .iter()
        .map(|b| (b.member_id.clone(), b.amount))
        .collect();
    for transfer in &report.transactions {
        for (id, amount) in &mut amounts {
            if *id == transfer.from {
                *amount += transfer.amount;
            } else if *id == transfer.to {
                *amount -= transfer.amount;
            }
        }
    }
    amounts.into_iter().map(|(_, amount)| amount).collect()
}

/// Scenario A: dinner and taxi, expected balances and exact transfer order.
#[test]
fn dinner_and_taxi_full_pipeline() {
    let report = SettlementEngine::calculate(
        &test_event(),
        &test_directory(),
        &dinner_and_taxi(),
        &EngineOptions::strict(),
    )
    .unwrap();

    let balances = report.balances();
    assert_eq!(balances[0].amount, dec!(45));
    assert_eq!(balances[1].amount, dec!(-15));
    assert_eq!(balances[2].amount, dec!(-30));

    assert_eq!(report.transactions.len(), 2);
    assert_eq!(report.transactions[0].from_name, "Charlie");
    assert_eq!(report.transactions[0].to_name, "Alice");
    assert_eq!(report.transactions[0].amount, dec!(30.00));
    assert_eq!(report.transactions[1].from_name, "Bob");
    assert_eq!(report.transactions[1].to_name, "Alice");
    assert_eq!(report.transactions[1].amount, dec!(15.00));

    // Replaying the plan settles everyone.
    for remaining in replay_balances(&report) {
        assert!(remaining.abs() <= EPSILON);
    }
}

/// Scenario B: an empty fee list is a success with an empty plan.
#[test]
fn empty_fee_list_yields_empty_transactions() {
    let report = SettlementEngine::calculate(
        &test_event(),
        &test_directory(),
        &FeeSet::new(),
        &EngineOptions::strict(),
    )
    .unwrap();
    assert!(report.transactions.is_empty());
    assert_eq!(report.balances().len(), 3);
}

/// Scenario C: zero-price fees have no effect at all.
#[test]
fn zero_price_fee_is_skipped() {
    let mut fees = dinner_and_taxi();
    fees.add(
        FeeRecord::with_id(FeeId::new("fee3"), "Pending", dec!(0)).with_payer(charlie()),
    );

    let with_zero = SettlementEngine::calculate(
        &test_event(),
        &test_directory(),
        &fees,
        &EngineOptions::strict(),
    )
    .unwrap();
    let without_zero = SettlementEngine::calculate(
        &test_event(),
        &test_directory(),
        &dinner_and_taxi(),
        &EngineOptions::strict(),
    )
    .unwrap();

    assert_eq!(with_zero.transactions, without_zero.transactions);
    assert_eq!(with_zero.balances(), without_zero.balances());
}

/// Scenario D: a missing payer fails strict mode and succeeds under the
/// fallback policy, with the substitution surfaced.
#[test]
fn missing_payer_strict_vs_fallback() {
    let fees: FeeSet = [FeeRecord::with_id(FeeId::new("fee1"), "Dinner", dec!(90))
        .with_beneficiaries(vec![bob(), charlie()])]
    .into_iter()
    .collect();

    let err = SettlementEngine::calculate(
        &test_event(),
        &test_directory(),
        &fees,
        &EngineOptions::strict(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        EngineError::MissingPayer {
            fee_id: FeeId::new("fee1"),
        }
    );
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.status_code(), 400);

    let report = SettlementEngine::fallback(&test_event(), &test_directory(), &fees).unwrap();
    assert_eq!(
        report.notes,
        vec![CalculationNote::AutoAssignedPayer {
            fee_id: FeeId::new("fee1"),
            fee_name: "Dinner".to_string(),
            payer: bob(),
        }]
    );
    // Bob fronted 90, owes 45: net +45; Charlie owes 45.
    assert_eq!(report.transactions.len(), 1);
    assert_eq!(report.transactions[0].from, charlie());
    assert_eq!(report.transactions[0].to, bob());
    assert_eq!(report.transactions[0].amount, dec!(45.00));
}

/// Scenario E: a beneficiary outside the event is a consistency failure.
#[test]
fn unknown_beneficiary_is_consistency_error() {
    let fees: FeeSet = [FeeRecord::with_id(FeeId::new("fee1"), "Dinner", dec!(90))
        .with_payer(alice())
        .with_beneficiaries(vec![alice(), MemberId::new("ghost")])]
    .into_iter()
    .collect();

    let err = SettlementEngine::calculate(
        &test_event(),
        &test_directory(),
        &fees,
        &EngineOptions::strict(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        EngineError::UnknownBeneficiary {
            fee_id: FeeId::new("fee1"),
            member_id: MemberId::new("ghost"),
        }
    );
    assert_eq!(err.kind(), ErrorKind::Consistency);
    assert_eq!(err.status_code(), 500);
}

/// Scenario F: total moved equals the sum of the positive balances.
#[test]
fn total_transferred_equals_positive_balances() {
    let fees: FeeSet = [
        FeeRecord::with_id(FeeId::new("fee1"), "Dinner", dec!(90)).with_payer(alice()),
        FeeRecord::with_id(FeeId::new("fee2"), "Taxi", dec!(30))
            .with_payer(bob())
            .with_beneficiaries(vec![alice(), bob()]),
        FeeRecord::with_id(FeeId::new("fee3"), "Hotel", dec!(150)).with_payer(charlie()),
    ]
    .into_iter()
    .collect();

    let report = SettlementEngine::calculate(
        &test_event(),
        &test_directory(),
        &fees,
        &EngineOptions::strict(),
    )
    .unwrap();

    assert_eq!(report.total_transferred(), dec!(70.00));

    let positive: Decimal = report
        .balances()
        .iter()
        .filter(|b| b.amount > Decimal::ZERO)
        .map(|b| b.amount)
        .sum();
    assert_eq!(report.total_transferred(), positive);
}

#[test]
fn report_serializes_to_wire_contract() {
    let report = SettlementEngine::calculate(
        &test_event(),
        &test_directory(),
        &dinner_and_taxi(),
        &EngineOptions::strict(),
    )
    .unwrap();

    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["transactions"][0]["from"], "member3");
    assert_eq!(json["transactions"][0]["fromName"], "Charlie");
    assert_eq!(json["transactions"][0]["to"], "member1");
    assert_eq!(json["transactions"][0]["toName"], "Alice");
    assert_eq!(json["debug"]["balances"][0]["memberId"], "member1");
    assert_eq!(json["debug"]["balances"][0]["memberName"], "Alice");
    assert!(json["debug"]["balances"][0].get("balance").is_some());
}

#[test]
fn report_round_trips_through_json() {
    let report = SettlementEngine::fallback(
        &test_event(),
        &test_directory(),
        &[FeeRecord::with_id(FeeId::new("fee1"), "Dinner", dec!(90))]
            .into_iter()
            .collect(),
    )
    .unwrap();

    let json = serde_json::to_string(&report).unwrap();
    let parsed: SettlementReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.transactions, report.transactions);
    assert_eq!(parsed.notes, report.notes);
}

#[test]
fn summary_matches_settlement_inputs() {
    let summary =
        ExpenseSummary::compute(&test_event(), &test_directory(), &dinner_and_taxi()).unwrap();

    assert_eq!(summary.total_expense, dec!(120));
    let shares: Vec<Decimal> = summary.member_shares.iter().map(|m| m.share).collect();
    assert_eq!(shares, vec![dec!(45), dec!(45), dec!(30)]);

    // Shares sum back to the total.
    let total: Decimal = shares.iter().copied().sum();
    assert_eq!(total, summary.total_expense);
}

#[test]
fn empty_event_rejected_everywhere() {
    let event = Event::new(EventId::new("empty"), vec![]);
    let directory = MemberDirectory::new();
    let fees = FeeSet::new();

    assert_eq!(
        SettlementEngine::calculate(&event, &directory, &fees, &EngineOptions::strict())
            .unwrap_err(),
        EngineError::InvalidEvent
    );
    assert_eq!(
        ExpenseSummary::compute(&event, &directory, &fees).unwrap_err(),
        EngineError::InvalidEvent
    );
}

/// Many small fees with thirds: rounding once at the end keeps the sum of
/// balances within a cent and the plan complete.
#[test]
fn many_small_fees_do_not_accumulate_rounding_error() {
    let fees: FeeSet = (0..100)
        .map(|n| {
            FeeRecord::with_id(FeeId::new(format!("fee{n}")), "Split", dec!(0.10))
                .with_payer(alice())
        })
        .collect();

    let report = SettlementEngine::calculate(
        &test_event(),
        &test_directory(),
        &fees,
        &EngineOptions::strict(),
    )
    .unwrap();

    let sum: Decimal = report.balances().iter().map(|b| b.amount).sum();
    assert!(sum.abs() <= EPSILON);
    // 100 fees of $0.10: Alice fronted $10, owes a third: +6.67 after one
    // final rounding (10/3 = 3.333... each for Bob and Charlie).
    assert_eq!(report.balances()[0].amount, dec!(6.67));
    assert_eq!(report.balances()[1].amount, dec!(-3.33));
    assert_eq!(report.balances()[2].amount, dec!(-3.33));

    for remaining in replay_balances(&report) {
        assert!(remaining.abs() <= EPSILON);
    }
}
