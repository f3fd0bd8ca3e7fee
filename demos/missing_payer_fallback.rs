//! Strict vs. fallback policy on a fee with no payer.
//!
//! The strict path rejects such a fee outright; the fallback policy
//! assigns the first beneficiary and reports the substitution so a UI can
//! tell the user a default was used.

use rust_decimal_macros::dec;
use split_engine::core::event::{Event, EventId};
use split_engine::core::fee::{FeeRecord, FeeSet};
use split_engine::core::member::{Member, MemberDirectory, MemberId};
use split_engine::engine::{EngineOptions, SettlementEngine};

fn main() {
    let alice = MemberId::new("member-alice");
    let bob = MemberId::new("member-bob");

    let event = Event::new(EventId::new("lunch"), vec![alice.clone(), bob.clone()]);
    let directory: MemberDirectory = [
        Member::new(alice.clone(), "Alice"),
        Member::new(bob.clone(), "Bob"),
    ]
    .into_iter()
    .collect();

    // Somebody logged the bill but forgot to say who paid.
    let fees: FeeSet = [FeeRecord::new("Lunch", dec!(40))].into_iter().collect();

    println!("━━━ Strict policy ━━━\n");
    match SettlementEngine::calculate(&event, &directory, &fees, &EngineOptions::strict()) {
        Ok(_) => unreachable!("strict mode must reject a missing payer"),
        Err(err) => println!("  rejected ({:?}): {}\n", err.kind(), err),
    }

    println!("━━━ Fallback policy ━━━\n");
    let report = SettlementEngine::fallback(&event, &directory, &fees)
        .expect("fallback handles the missing payer");
    println!("{}", report);
}
