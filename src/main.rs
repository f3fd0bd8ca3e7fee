//! split-engine CLI
//!
//! Run expense settlement from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Settle an event described in a JSON file
//! split-engine calculate --input event.json
//!
//! # Output as JSON; auto-assign payers for fees that have none
//! split-engine calculate --input event.json --format json --auto-assign
//!
//! # Per-member cost breakdown
//! split-engine summary --input event.json
//!
//! # Generate a random scenario for testing
//! split-engine generate --members 10 --fees 30
//! ```

use rust_decimal::Decimal;
use split_engine::core::event::{Event, EventId};
use split_engine::core::fee::{FeeId, FeeRecord, FeeSet};
use split_engine::core::member::{Member, MemberDirectory, MemberId};
use split_engine::engine::{EngineOptions, ExpenseSummary, SettlementEngine};
use split_engine::simulation::stress_test::{generate_random_scenario, ScenarioConfig};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"split-engine — shared-expense settlement

USAGE:
    split-engine <COMMAND> [OPTIONS]

COMMANDS:
    calculate   Compute balances and a settlement plan for an event
    summary     Compute each member's share of the event costs
    generate    Generate a random scenario (for testing)
    help        Show this message

OPTIONS (calculate, summary):
    --input <FILE>      Path to JSON event file
    --format <FORMAT>   Output format: text (default) or json
    --auto-assign       (calculate only) assign a default payer to fees
                        that have none, instead of failing

OPTIONS (generate):
    --members <N>       Number of members (default: 10)
    --fees <N>          Number of fees (default: 30)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    split-engine calculate --input event.json
    split-engine calculate --input event.json --format json
    split-engine summary --input event.json
    split-engine generate --members 5 --fees 12 --output test.json"#
    );
}

/// JSON schema for input scenarios.
#[derive(serde::Deserialize)]
struct ScenarioFile {
    event: EventInput,
    members: Vec<MemberInput>,
    #[serde(default)]
    fees: Vec<FeeInput>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventInput {
    #[serde(default = "default_event_id")]
    event_id: String,
    member_ids: Vec<String>,
}

fn default_event_id() -> String {
    "event".to_string()
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemberInput {
    member_id: String,
    member_name: String,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeeInput {
    fee_id: Option<String>,
    fee_name: String,
    price: String,
    paid_by: Option<String>,
    #[serde(default)]
    member_ids: Vec<String>,
}

fn load_scenario(path: &str) -> (Event, MemberDirectory, FeeSet) {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: ScenarioFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "event": {{ "eventId": "trip", "memberIds": ["m1", "m2"] }},
  "members": [ {{ "memberId": "m1", "memberName": "Alice" }} ],
  "fees": [
    {{ "feeName": "Dinner", "price": "90", "paidBy": "m1", "memberIds": [] }}
  ]
}}"#
        );
        process::exit(1);
    });

    let event = Event::new(
        EventId::new(file.event.event_id),
        file.event.member_ids.into_iter().map(MemberId::new).collect(),
    );

    let directory: MemberDirectory = file
        .members
        .into_iter()
        .map(|m| Member::new(MemberId::new(m.member_id), m.member_name))
        .collect();

    let mut fees = FeeSet::new();
    for input in file.fees {
        let price: Decimal = input.price.parse().unwrap_or_else(|e| {
            eprintln!("Invalid price '{}': {}", input.price, e);
            process::exit(1);
        });

        let mut fee = match input.fee_id {
            Some(id) => FeeRecord::with_id(FeeId::new(id), input.fee_name, price),
            None => FeeRecord::new(input.fee_name, price),
        };
        // Treat an empty paidBy string the same as an absent one.
        if let Some(payer) = input.paid_by.filter(|p| !p.is_empty()) {
            fee = fee.with_payer(MemberId::new(payer));
        }
        fee = fee.with_beneficiaries(input.member_ids.into_iter().map(MemberId::new).collect());
        fees.add(fee);
    }

    (event, directory, fees)
}

struct ReportArgs {
    input_path: String,
    format: String,
    auto_assign: bool,
}

fn parse_report_args(args: &[String]) -> ReportArgs {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut auto_assign = false;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            "--auto-assign" => {
                auto_assign = true;
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input_path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    ReportArgs {
        input_path,
        format,
        auto_assign,
    }
}

fn cmd_calculate(args: &[String]) {
    let args = parse_report_args(args);
    let (event, directory, fees) = load_scenario(&args.input_path);

    let options = if args.auto_assign {
        EngineOptions::fallback()
    } else {
        EngineOptions::strict()
    };

    let report = SettlementEngine::calculate(&event, &directory, &fees, &options)
        .unwrap_or_else(|e| {
            eprintln!("Calculation failed ({:?}): {}", e.kind(), e);
            process::exit(1);
        });

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
    } else {
        println!("{}", report);
    }
}

fn cmd_summary(args: &[String]) {
    let args = parse_report_args(args);
    let (event, directory, fees) = load_scenario(&args.input_path);

    let summary = ExpenseSummary::compute(&event, &directory, &fees).unwrap_or_else(|e| {
        eprintln!("Summary failed ({:?}): {}", e.kind(), e);
        process::exit(1);
    });

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary).unwrap());
    } else {
        println!("{}", summary);
    }
}

fn cmd_generate(args: &[String]) {
    let mut members = 10usize;
    let mut fee_count = 30usize;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--members" => {
                i += 1;
                members = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--members requires a number");
                    process::exit(1);
                });
            }
            "--fees" => {
                i += 1;
                fee_count = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--fees requires a number");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = ScenarioConfig {
        member_count: members,
        fee_count,
        ..Default::default()
    };
    let (event, directory, fees) = generate_random_scenario(&config);

    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct OutputEvent<'a> {
        event_id: &'a str,
        member_ids: Vec<&'a str>,
    }

    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct OutputMember<'a> {
        member_id: &'a str,
        member_name: &'a str,
    }

    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct OutputFee<'a> {
        fee_id: &'a str,
        fee_name: &'a str,
        price: String,
        paid_by: Option<&'a str>,
        member_ids: Vec<&'a str>,
    }

    #[derive(serde::Serialize)]
    struct OutputFile<'a> {
        event: OutputEvent<'a>,
        members: Vec<OutputMember<'a>>,
        fees: Vec<OutputFee<'a>>,
    }

    let output = OutputFile {
        event: OutputEvent {
            event_id: event.id().as_str(),
            member_ids: event.member_ids().iter().map(|m| m.as_str()).collect(),
        },
        members: directory
            .members()
            .iter()
            .map(|m| OutputMember {
                member_id: m.id().as_str(),
                member_name: m.name(),
            })
            .collect(),
        fees: fees
            .fees()
            .iter()
            .map(|f| OutputFee {
                fee_id: f.id().as_str(),
                fee_name: f.name(),
                price: f.price().to_string(),
                paid_by: f.paid_by().map(|p| p.as_str()),
                member_ids: f.beneficiary_ids().iter().map(|m| m.as_str()).collect(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} fees across {} members → {}",
            fees.len(),
            members,
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "calculate" => cmd_calculate(rest),
        "summary" => cmd_summary(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
