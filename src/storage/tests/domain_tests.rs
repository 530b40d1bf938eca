//! Tests for entity types and storage operations.

use crate::contract::{AgentError, EntityScope, ErrorKind, RecordId, RecordRef, StorageAction};
use crate::storage::domain::{EntityType, OperationKind, StorageDomainError, StorageOperation};
use rstest::rstest;

#[rstest]
#[case("task", true)]
#[case(" note_v2 ", true)]
#[case("", false)]
#[case("Task", false)]
#[case("to-do", false)]
fn entity_type_validation(#[case] raw: &str, #[case] valid: bool) {
    assert_eq!(EntityType::new(raw).is_ok(), valid);
}

#[rstest]
fn entity_type_errors_are_validation_errors_naming_the_field() {
    let error = AgentError::from(StorageDomainError::EmptyEntityType);
    assert_eq!(error.kind(), ErrorKind::ValidationError);
    assert!(matches!(
        error,
        AgentError::Validation { field: Some(ref field), .. } if field == "entity_type"
    ));
}

#[rstest]
fn operation_exposes_kind_and_optional_fields() {
    let id = RecordId::new(4).expect("valid id");
    let operation = StorageOperation::try_from(StorageAction::Get(RecordRef {
        entity_type: "task".to_owned(),
        id,
    }))
    .expect("valid operation");

    assert_eq!(operation.kind(), OperationKind::Get);
    assert_eq!(operation.entity_type().as_str(), "task");
    assert_eq!(operation.id(), Some(id));
    assert!(operation.data().is_none());
    assert!(operation.filters().is_none());
}

#[rstest]
fn operation_rejects_invalid_entity_type() {
    let result = StorageOperation::try_from(StorageAction::Clear(EntityScope {
        entity_type: "   ".to_owned(),
    }));
    assert_eq!(result, Err(StorageDomainError::EmptyEntityType));
}
