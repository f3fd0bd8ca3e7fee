//! Basic expense settlement example.
//!
//! Demonstrates how the engine turns a handful of shared fees into
//! per-member balances and a minimal transfer plan.

use rust_decimal_macros::dec;
use split_engine::core::event::{Event, EventId};
use split_engine::core::fee::{FeeRecord, FeeSet};
use split_engine::core::member::{Member, MemberDirectory, MemberId};
use split_engine::engine::{EngineOptions, SettlementEngine};

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  split-engine: Basic Settlement Example      ║");
    println!("╚══════════════════════════════════════════════╝\n");

    let alice = MemberId::new("member-alice");
    let bob = MemberId::new("member-bob");
    let charlie = MemberId::new("member-charlie");

    let event = Event::new(
        EventId::new("weekend-trip"),
        vec![alice.clone(), bob.clone(), charlie.clone()],
    );
    let directory: MemberDirectory = [
        Member::new(alice.clone(), "Alice"),
        Member::new(bob.clone(), "Bob"),
        Member::new(charlie.clone(), "Charlie"),
    ]
    .into_iter()
    .collect();

    // Alice fronts dinner for everyone; Bob covers a taxi he shared with
    // Alice; Charlie books the hotel for the whole group.
    let fees: FeeSet = [
        FeeRecord::new("Dinner", dec!(90)).with_payer(alice.clone()),
        FeeRecord::new("Taxi", dec!(30))
            .with_payer(bob.clone())
            .with_beneficiaries(vec![alice.clone(), bob.clone()]),
        FeeRecord::new("Hotel", dec!(150)).with_payer(charlie.clone()),
    ]
    .into_iter()
    .collect();

    println!("━━━ Fees ━━━\n");
    for fee in fees.fees() {
        println!(
            "  {:<10} ${:>8}  paid by {}",
            fee.name(),
            fee.price(),
            fee.paid_by().map(|p| p.as_str()).unwrap_or("<nobody>")
        );
    }
    println!("\n  Gross total: ${}\n", fees.gross_total());

    let report =
        SettlementEngine::calculate(&event, &directory, &fees, &EngineOptions::strict())
            .expect("valid scenario");

    println!("{}", report);
}
