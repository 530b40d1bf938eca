//! Tests for task validation and state changes.

use crate::contract::{AgentError, ErrorKind};
use crate::task::domain::{
    MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH, NewTask, Task, TaskChanges, TaskDescription,
    TaskDomainError, TaskTitle,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn stored_task() -> Task {
    let draft = NewTask::new("Write report", Some("quarterly".to_owned()), &DefaultClock)
        .expect("valid task");
    let mut record = draft.to_record().expect("serialisable");
    record.insert("id".to_owned(), json!(1));
    serde_json::from_value(Value::Object(record)).expect("task decodes")
}

#[rstest]
#[case("  Buy milk  ", "Buy milk")]
#[case("x", "x")]
fn title_is_trimmed(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(TaskTitle::new(raw).expect("valid title").as_str(), expected);
}

#[rstest]
fn title_length_limits() {
    assert_eq!(TaskTitle::new("   "), Err(TaskDomainError::EmptyTitle));
    assert!(TaskTitle::new("a".repeat(MAX_TITLE_LENGTH)).is_ok());
    assert_eq!(
        TaskTitle::new("a".repeat(MAX_TITLE_LENGTH + 1)),
        Err(TaskDomainError::TitleTooLong {
            max: MAX_TITLE_LENGTH,
            actual: MAX_TITLE_LENGTH + 1
        })
    );
}

#[rstest]
fn title_length_counts_characters_not_bytes() {
    assert!(TaskTitle::new("é".repeat(MAX_TITLE_LENGTH)).is_ok());
}

#[rstest]
fn blank_description_becomes_absent() {
    assert_eq!(TaskDescription::parse("   "), Ok(None));
    assert!(TaskDescription::parse("a".repeat(MAX_DESCRIPTION_LENGTH)).is_ok());
    assert!(matches!(
        TaskDescription::parse("a".repeat(MAX_DESCRIPTION_LENGTH + 1)),
        Err(TaskDomainError::DescriptionTooLong { .. })
    ));
}

#[rstest]
fn new_task_is_pending_with_equal_timestamps() {
    let draft = NewTask::new("Plan", None, &DefaultClock).expect("valid task");
    let record = draft.to_record().expect("serialisable");

    assert_eq!(record.get("completed"), Some(&json!(false)));
    assert_eq!(record.get("completed_at"), Some(&Value::Null));
    assert_eq!(record.get("created_at"), record.get("updated_at"));
    assert!(record.get("id").is_none());
}

#[rstest]
fn update_requires_at_least_one_field() {
    assert_eq!(TaskChanges::new(None, None), Err(TaskDomainError::EmptyUpdate));
}

#[rstest]
fn apply_changes_only_given_fields(mut stored_task: Task) {
    let changes = TaskChanges::new(Some(" Renamed ".to_owned()), None).expect("valid changes");
    stored_task.apply(changes, &DefaultClock);

    assert_eq!(stored_task.title().as_str(), "Renamed");
    assert_eq!(
        stored_task.description().map(TaskDescription::as_str),
        Some("quarterly")
    );
    assert!(stored_task.updated_at() >= stored_task.created_at());
}

#[rstest]
fn blank_description_update_clears_description(mut stored_task: Task) {
    let changes = TaskChanges::new(None, Some("  ".to_owned())).expect("valid changes");
    stored_task.apply(changes, &DefaultClock);
    assert!(stored_task.description().is_none());
}

#[rstest]
fn complete_is_idempotent_and_keeps_first_completion_time(mut stored_task: Task) {
    stored_task.complete(&DefaultClock);
    let first = stored_task.completed_at();
    stored_task.complete(&DefaultClock);

    assert!(stored_task.is_completed());
    assert!(first.is_some());
    assert_eq!(stored_task.completed_at(), first);
}

#[rstest]
fn reopen_clears_completion(mut stored_task: Task) {
    stored_task.complete(&DefaultClock);
    stored_task.reopen(&DefaultClock);

    assert!(!stored_task.is_completed());
    assert!(stored_task.completed_at().is_none());
}

#[rstest]
#[case(TaskDomainError::EmptyTitle, Some("title"))]
#[case(TaskDomainError::DescriptionTooLong { max: 1, actual: 2 }, Some("description"))]
#[case(TaskDomainError::EmptyUpdate, None)]
fn domain_errors_become_validation_errors(
    #[case] error: TaskDomainError,
    #[case] expected_field: Option<&str>,
) {
    let agent_error = AgentError::from(error);
    assert_eq!(agent_error.kind(), ErrorKind::ValidationError);
    let AgentError::Validation { field, .. } = agent_error else {
        return;
    };
    assert_eq!(field.as_deref(), expected_field);
}
