//! Tests for identifiers and validated names.

use crate::contract::{AgentName, AgentVersion, ContractError, CorrelationId, RecordId, RequestId};
use rstest::rstest;

#[rstest]
#[case("task_manager", "task_manager")]
#[case("  Storage_Handler ", "storage_handler")]
#[case("ui-controller", "ui-controller")]
fn agent_name_normalises_valid_input(#[case] raw: &str, #[case] expected: &str) {
    let name = AgentName::new(raw).expect("valid name");
    assert_eq!(name.as_str(), expected);
}

#[rstest]
#[case("", ContractError::EmptyName)]
#[case("   ", ContractError::EmptyName)]
#[case("has space", ContractError::InvalidName("has space".to_owned()))]
#[case("dotted.name", ContractError::InvalidName("dotted.name".to_owned()))]
fn agent_name_rejects_invalid_input(#[case] raw: &str, #[case] expected: ContractError) {
    assert_eq!(AgentName::new(raw), Err(expected));
}

#[rstest]
fn agent_name_rejects_overlong_input() {
    let raw = "a".repeat(65);
    assert!(matches!(
        AgentName::new(raw),
        Err(ContractError::NameTooLong(_))
    ));
}

#[rstest]
fn agent_name_deserialisation_applies_validation() {
    let parsed: Result<AgentName, _> = serde_json::from_str("\"Not Valid\"");
    assert!(parsed.is_err());
}

#[rstest]
fn record_id_rejects_zero() {
    assert_eq!(RecordId::new(0), Err(ContractError::InvalidRecordId(0)));
    assert_eq!(RecordId::new(7).map(RecordId::value), Ok(7));
}

#[rstest]
fn record_id_deserialisation_rejects_zero_and_negative_values() {
    assert!(serde_json::from_str::<RecordId>("0").is_err());
    assert!(serde_json::from_str::<RecordId>("-4").is_err());
    assert_eq!(
        serde_json::from_str::<RecordId>("12").expect("positive id"),
        RecordId::new(12).expect("positive id")
    );
}

#[rstest]
fn correlation_id_trims_and_rejects_blank_tokens() {
    assert_eq!(
        CorrelationId::new("  trace-1 ").expect("valid token").as_str(),
        "trace-1"
    );
    assert_eq!(
        CorrelationId::new(" \t"),
        Err(ContractError::EmptyCorrelationId)
    );
}

#[rstest]
fn generated_identifiers_are_distinct() {
    assert_ne!(RequestId::new(), RequestId::new());
    assert_ne!(CorrelationId::generate(), CorrelationId::generate());
}

#[rstest]
#[case("1.0.0", true)]
#[case("10.20.30", true)]
#[case("1.0", false)]
#[case("1.0.x", false)]
#[case("v1.0.0", false)]
#[case("", false)]
fn agent_version_requires_three_numeric_segments(#[case] raw: &str, #[case] valid: bool) {
    assert_eq!(AgentVersion::new(raw).is_ok(), valid);
}
