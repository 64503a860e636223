use anyhow::Result;
use roadside_assist::core::RequestStatus;
use roadside_assist::{AssistanceService, ConsoleSession, DataStore, RecordingNotifier};
use std::io::Cursor;

fn run_script(script: &str) -> Result<(AssistanceService<RecordingNotifier>, RecordingNotifier, String)> {
    let notifier = RecordingNotifier::new();
    let mut service = AssistanceService::new(DataStore::new(), notifier.clone());
    let mut output = Vec::new();

    ConsoleSession::new(&mut service, Cursor::new(script.as_bytes()), &mut output)
        .run("Onroad Assistance Helper")?;

    Ok((service, notifier, String::from_utf8(output)?))
}

#[test]
fn test_fuel_request_then_resolve() -> Result<()> {
    let script = "1\nfuel\nKA01AB1234\nSwift\nPetrol\n12.9715\n77.5905\n5\n4\n1\n0\n";
    let (service, notifier, output) = run_script(script)?;

    assert!(output.starts_with("Welcome to Onroad Assistance Helper (console prototype)"));
    assert!(output.contains("Approx liters needed: "));
    assert!(output.trim_end().ends_with("Goodbye!"));

    let request = service.request(1).expect("request 1 exists");
    assert_eq!(request.status(), RequestStatus::Resolved);
    assert_eq!(request.liters_needed(), 5.0);
    assert_eq!(request.assigned_helper().map(|h| h.as_str()), Some("H2"));

    let messages = notifier.messages();
    assert!(messages[0].starts_with("Request created: Req#1 [FUEL] KA01AB1234 | Swift | Petrol"));
    assert!(messages[1].starts_with("Dispatched FuelBuddy to request #1"));
    assert!(messages[2].starts_with("Request resolved: Req#1"));
    Ok(())
}

#[test]
fn test_breakdown_skips_liters_prompt() -> Result<()> {
    let script = "1\nBREAKDOWN\nMH12\nNexon\nDiesel\n12.97\n77.59\n0\n";
    let (service, _, output) = run_script(script)?;

    assert!(!output.contains("Approx liters needed"));
    let request = service.request(1).expect("request 1 exists");
    assert_eq!(request.liters_needed(), 0.0);
    assert_eq!(request.status(), RequestStatus::Dispatched);
    Ok(())
}

#[test]
fn test_malformed_input_reprompts_same_field() -> Result<()> {
    let script = "1\ntow\nfuel\nKA01\nSwift\nPetrol\nnorth\n12.9715\n77.5905\n-2\nabc\n5\n0\n";
    let (service, _, output) = run_script(script)?;

    assert_eq!(output.matches("Type (BREAKDOWN/FUEL): ").count(), 2);
    assert_eq!(output.matches("Latitude: ").count(), 2);
    assert_eq!(output.matches("Approx liters needed: ").count(), 3);
    assert!(output.contains("Please re-enter latitude"));
    assert_eq!(service.history().len(), 1);
    assert_eq!(service.request(1).expect("request 1 exists").liters_needed(), 5.0);
    Ok(())
}

#[test]
fn test_list_helpers_and_invalid_choice() -> Result<()> {
    let (_, _, output) = run_script("2\n7\nxyz\n0\n")?;

    assert!(output.contains("Available helpers:"));
    assert!(output.contains("Speedy Tow (TOW) @ (12.9712, 77.5936) r=4.5"));
    assert!(output.contains("Express Fuel (FUEL) @ (12.9750, 77.5920) r=4.0"));
    assert_eq!(output.matches("Invalid choice.").count(), 1);
    Ok(())
}

#[test]
fn test_history_prints_plain_lines_and_unknown_resolve_notifies() -> Result<()> {
    let script = "1\nfuel\nA1\nSwift\nPetrol\n12.97\n77.59\n3\n1\nbreakdown\nB2\nCity\nPetrol\n12.97\n77.59\n3\n4\n42\n0\n";
    let (_, notifier, output) = run_script(script)?;

    let lines: Vec<&str> = output.lines().collect();
    let header = lines
        .iter()
        .position(|line| line.ends_with("=== Request History ==="))
        .expect("history header printed");
    assert!(lines[header + 1].starts_with("Req#1 [FUEL] A1"));
    assert!(lines[header + 2].starts_with("Req#2 [BREAKDOWN] B2"));

    let messages = notifier.messages();
    assert!(!messages.iter().any(|m| m.starts_with("Req#")));
    assert_eq!(messages.last().map(String::as_str), Some("Request not found: 42"));
    Ok(())
}

#[test]
fn test_end_of_input_mid_request_ends_session() -> Result<()> {
    let (service, _, output) = run_script("1\nfuel\nKA01\n")?;

    assert!(service.history().is_empty());
    assert!(output.trim_end().ends_with("Goodbye!"));
    Ok(())
}
