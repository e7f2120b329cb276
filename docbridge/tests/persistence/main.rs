//! Integration tests for saving, uniqueness validation and references.

mod models;

use docbridge::{bson::Bson, memory::InMemoryBackend, prelude::*};
use models::{Course, Orphan, Student, Teacher};
use serde_json::json;

async fn test_store() -> ModelStore<InMemoryBackend> {
    let backend = InMemoryBackend::builder().build().await.unwrap();
    ModelStore::new(backend, StoreConfig::test())
}

#[tokio::test]
async fn save_assigns_a_generated_identifier() {
    let store = test_store().await;
    let students = store.objects::<Student>();

    let mut student = Student {
        id: None,
        name: "Maxwell".to_string(),
        teacher: ForeignKey::new("Newton"),
    };
    assert!(student.document_id().is_none());

    students.save(&mut student).await.unwrap();

    let id = student.id.clone().expect("save sets the identifier");
    let reloaded = students.get_by_id(&id).await.unwrap();
    assert_eq!(reloaded.name, "Maxwell");
}

#[tokio::test]
async fn save_uses_the_natural_key_hook() {
    let store = test_store().await;
    let teachers = store.objects::<Teacher>();

    let mut newton = Teacher::named("Newton");
    teachers.save(&mut newton).await.unwrap();

    assert_eq!(newton.id.as_deref(), Some("Newton"));
}

#[tokio::test]
async fn saving_the_same_natural_key_twice_is_already_exists() {
    let store = test_store().await;
    let teachers = store.objects::<Teacher>();

    let mut first = Teacher::named("Newton");
    teachers.save(&mut first).await.unwrap();

    let mut second = Teacher::named("Newton");
    let result = teachers.save(&mut second).await;

    match result {
        Err(ModelStoreError::DocumentAlreadyExists(id, collection)) => {
            assert_eq!(id, "Newton");
            assert_eq!(collection, "test_teacher");
        }
        other => panic!("expected DocumentAlreadyExists, got {other:?}"),
    }
}

#[test]
#[should_panic(expected = "missing its production collection name")]
fn a_model_without_collections_fails_on_first_use() {
    let _ = Orphan::descriptor();
}

#[tokio::test]
async fn validate_unique_passes_for_a_unique_candidate() {
    let store = test_store().await;
    let courses = store.objects::<Course>();

    let mut algebra = Course::new("Algebra", "fall", "B2");
    courses.save(&mut algebra).await.unwrap();

    let candidate = Course::new("Geometry", "fall", "C1");
    courses.validate_unique(&candidate).await.unwrap();
}

#[tokio::test]
async fn validate_unique_reports_every_violated_constraint() {
    let store = test_store().await;
    let courses = store.objects::<Course>();

    let mut algebra = Course::new("Algebra", "fall", "B2");
    courses.save(&mut algebra).await.unwrap();

    // Collides on name+semester and on room+semester at once
    let candidate = Course::new("Algebra", "fall", "B2");
    let result = courses.validate_unique(&candidate).await;

    match result {
        Err(ModelStoreError::Validation(errors)) => {
            assert_eq!(errors.len(), 2);
            let violations = errors.violations();
            assert_eq!(violations[0].constraint, "name, semester");
            assert_eq!(
                violations[0].message,
                "Course with this name, semester already exists."
            );
            assert_eq!(violations[1].constraint, "room, semester");
            assert_eq!(
                violations[1].message,
                "Course with this room, semester already exists."
            );
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn validate_unique_reports_only_the_violated_constraints() {
    let store = test_store().await;
    let courses = store.objects::<Course>();

    let mut algebra = Course::new("Algebra", "fall", "B2");
    courses.save(&mut algebra).await.unwrap();

    // Same room and semester, different name
    let candidate = Course::new("Geometry", "fall", "B2");
    let result = courses.validate_unique(&candidate).await;

    match result {
        Err(ModelStoreError::Validation(errors)) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.violations()[0].constraint, "room, semester");
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn foreign_keys_serialize_as_the_bare_identifier() {
    let store = test_store().await;
    let students = store.objects::<Student>();

    let mut student = Student {
        id: None,
        name: "Maxwell".to_string(),
        teacher: ForeignKey::new("Newton"),
    };
    students.save(&mut student).await.unwrap();

    let raw = store
        .backend()
        .get_document(student.id.as_deref().unwrap(), "test_student")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(raw.data.get("teacher"), Some(&Bson::String("Newton".to_string())));
}

#[tokio::test]
async fn foreign_keys_resolve_through_the_target_manager() {
    let store = test_store().await;
    let teachers = store.objects::<Teacher>();

    let mut newton = Teacher::named("Newton");
    teachers.save(&mut newton).await.unwrap();

    let reference = ForeignKey::to(&newton).expect("saved instances have identifiers");
    let resolved = reference.resolve(&teachers).await.unwrap();
    assert_eq!(resolved.name, "Newton");

    let dangling: ForeignKey<Teacher> = ForeignKey::new("Nobody");
    let missing = dangling.resolve(&teachers).await;
    assert!(matches!(
        missing,
        Err(ModelStoreError::DoesNotExist { model: "Teacher" })
    ));
}

#[tokio::test]
async fn instances_render_to_json() {
    let store = test_store().await;
    let teachers = store.objects::<Teacher>();

    let mut newton = Teacher::named("Newton");
    teachers.save(&mut newton).await.unwrap();

    assert_eq!(
        newton.to_json().unwrap(),
        json!({ "id": "Newton", "name": "Newton" })
    );
}
