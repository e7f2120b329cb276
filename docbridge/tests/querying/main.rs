//! Integration tests for the query façade over the in-memory backend.

mod models;

use docbridge::{memory::InMemoryBackend, prelude::*};
use models::{Student, Teacher};

async fn test_store() -> ModelStore<InMemoryBackend> {
    let backend = InMemoryBackend::builder().build().await.unwrap();
    ModelStore::new(backend, StoreConfig::test())
}

async fn seed_teachers(store: &ModelStore<InMemoryBackend>) {
    let teachers = store.objects::<Teacher>();
    for (name, subject, age) in [
        ("Curie", "chemistry", 35),
        ("Newton", "physics", 46),
        ("Lovelace", "mathematics", 28),
    ] {
        let mut teacher = Teacher::new(name, subject, age);
        teachers.save(&mut teacher).await.unwrap();
    }
}

#[tokio::test]
async fn unfiltered_listing_returns_identifier_order() {
    let store = test_store().await;
    seed_teachers(&store).await;

    let all = store.objects::<Teacher>().all().iterator().await.unwrap();

    let names: Vec<&str> = all.iter().map(|teacher| teacher.name.as_str()).collect();
    assert_eq!(names, ["Curie", "Lovelace", "Newton"]);
}

#[tokio::test]
async fn repeated_executions_return_the_same_sequence() {
    let store = test_store().await;
    seed_teachers(&store).await;

    let teachers = store.objects::<Teacher>();
    let first = teachers.all().iterator().await.unwrap();
    let second = teachers.all().iterator().await.unwrap();

    let names = |run: &[Teacher]| -> Vec<String> {
        run.iter().map(|teacher| teacher.name.clone()).collect()
    };
    assert_eq!(names(&first), names(&second));
}

#[tokio::test]
async fn equality_filter_matches_through_renamed_field() {
    let store = test_store().await;
    seed_teachers(&store).await;

    // The filter names the attribute; the stored key is subjectArea
    let physics = store
        .objects::<Teacher>()
        .filter(Q::eq("subject", "physics"))
        .iterator()
        .await
        .unwrap();

    assert_eq!(physics.len(), 1);
    assert_eq!(physics[0].name, "Newton");
}

#[tokio::test]
async fn renamed_field_is_stored_under_its_stored_key() {
    let store = test_store().await;
    seed_teachers(&store).await;

    let raw = store
        .backend()
        .get_document("Newton", "test_teacher")
        .await
        .unwrap()
        .unwrap();

    assert!(raw.data.contains_key("subjectArea"));
    assert!(!raw.data.contains_key("subject"));
    assert!(!raw.data.contains_key("id"));

    let newton = store.objects::<Teacher>().get_by_id("Newton").await.unwrap();
    assert_eq!(newton.subject, "physics");
    assert_eq!(newton.id.as_deref(), Some("Newton"));
}

#[tokio::test]
async fn descending_order_spec_sorts_descending() {
    let store = test_store().await;
    seed_teachers(&store).await;

    let by_age = store
        .objects::<Teacher>()
        .all()
        .order_by(["-age"])
        .iterator()
        .await
        .unwrap();

    let ages: Vec<i64> = by_age.iter().map(|teacher| teacher.age).collect();
    assert_eq!(ages, [46, 35, 28]);
}

#[tokio::test]
async fn primary_key_order_specs_are_ignored() {
    let store = test_store().await;
    seed_teachers(&store).await;

    let listing = store
        .objects::<Teacher>()
        .all()
        .order_by(["-pk", "age"])
        .iterator()
        .await
        .unwrap();

    let ages: Vec<i64> = listing.iter().map(|teacher| teacher.age).collect();
    assert_eq!(ages, [28, 35, 46]);
}

#[tokio::test]
async fn unsupported_predicates_are_dropped_from_the_query() {
    let store = test_store().await;
    seed_teachers(&store).await;

    // Or and range predicates cannot be pushed down; the listing comes
    // back unfiltered
    let either = store
        .objects::<Teacher>()
        .filter(Q::or([
            Q::eq("subject", "physics"),
            Q::eq("subject", "chemistry"),
        ]))
        .count()
        .await
        .unwrap();
    assert_eq!(either, 3);

    let older = store
        .objects::<Teacher>()
        .filter(Q::gt("age", 30))
        .count()
        .await
        .unwrap();
    assert_eq!(older, 3);
}

#[tokio::test]
async fn get_matches_by_attribute() {
    let store = test_store().await;
    seed_teachers(&store).await;

    let newton = store
        .objects::<Teacher>()
        .get([("name", "Newton")])
        .await
        .unwrap();

    assert_eq!(newton.subject, "physics");
}

#[tokio::test]
async fn get_matches_numbers_across_integer_widths() {
    let store = test_store().await;
    seed_teachers(&store).await;

    // Stored as i64, looked up as i32
    let newton = store
        .objects::<Teacher>()
        .get([("age", 46_i32)])
        .await
        .unwrap();

    assert_eq!(newton.name, "Newton");
}

#[tokio::test]
async fn get_without_match_is_does_not_exist() {
    let store = test_store().await;
    seed_teachers(&store).await;

    let missing = store
        .objects::<Teacher>()
        .get([("name", "Cavendish")])
        .await;

    assert!(matches!(
        missing,
        Err(ModelStoreError::DoesNotExist { model: "Teacher" })
    ));
}

#[tokio::test]
async fn get_on_empty_collection_is_does_not_exist_even_for_unknown_attributes() {
    let store = test_store().await;

    let missing = store.objects::<Teacher>().get([("bogus", 1)]).await;

    assert!(matches!(
        missing,
        Err(ModelStoreError::DoesNotExist { model: "Teacher" })
    ));
}

#[tokio::test]
async fn get_with_unknown_attribute_errors_once_instances_exist() {
    let store = test_store().await;
    seed_teachers(&store).await;

    let result = store.objects::<Teacher>().get([("bogus", 1)]).await;

    match result {
        Err(ModelStoreError::UnknownAttribute { model, attribute }) => {
            assert_eq!(model, "Teacher");
            assert_eq!(attribute, "bogus");
        }
        other => panic!("expected UnknownAttribute, got {other:?}"),
    }
}

#[tokio::test]
async fn reference_fields_answer_lookups_under_both_names() {
    let store = test_store().await;
    seed_teachers(&store).await;

    let students = store.objects::<Student>();
    let mut student = Student::new("Maxwell", "Newton");
    students.save(&mut student).await.unwrap();

    let by_base_name = students.get([("teacher", "Newton")]).await.unwrap();
    assert_eq!(by_base_name.name, "Maxwell");
    assert_eq!(by_base_name.teacher.id(), "Newton");

    let by_identifier_name = students.get([("teacher_id", "Newton")]).await.unwrap();
    assert_eq!(by_identifier_name.name, "Maxwell");
}

#[tokio::test]
async fn index_past_the_result_is_out_of_range() {
    let store = test_store().await;
    seed_teachers(&store).await;

    let result = store.objects::<Teacher>().all().index(10).await;

    assert!(matches!(
        result,
        Err(ModelStoreError::IndexOutOfRange { index: 10, len: 3 })
    ));
}

#[tokio::test]
async fn count_and_exists_follow_the_filter() {
    let store = test_store().await;
    seed_teachers(&store).await;

    let teachers = store.objects::<Teacher>();

    assert_eq!(
        teachers.filter(Q::eq("subject", "physics")).count().await.unwrap(),
        1
    );
    assert!(teachers.filter(Q::eq("subject", "physics")).exists().await.unwrap());
    assert!(!teachers.filter(Q::eq("subject", "history")).exists().await.unwrap());
}

#[tokio::test]
async fn a_facade_executes_once_and_derived_facades_re_execute() {
    let store = test_store().await;
    seed_teachers(&store).await;

    let teachers = store.objects::<Teacher>();
    let mut cached = teachers.all();
    assert_eq!(cached.count().await.unwrap(), 3);

    let mut late = Teacher::new("Cavendish", "chemistry", 58);
    teachers.save(&mut late).await.unwrap();

    // The executed façade keeps answering from its cache
    assert_eq!(cached.count().await.unwrap(), 3);

    // A façade derived from it starts cold and sees the new document
    let mut derived = cached.order_by(["name"]);
    assert_eq!(derived.count().await.unwrap(), 4);
}

#[tokio::test]
async fn production_mode_addresses_the_production_collection() {
    let backend = InMemoryBackend::builder().build().await.unwrap();
    let store = ModelStore::new(backend, StoreConfig::production());

    let mut newton = Teacher::new("Newton", "physics", 46);
    store.objects::<Teacher>().save(&mut newton).await.unwrap();

    let raw = store.backend().get_document("Newton", "teacher").await.unwrap();
    assert!(raw.is_some());

    let test_raw = store
        .backend()
        .get_document("Newton", "test_teacher")
        .await
        .unwrap();
    assert!(test_raw.is_none());
}

#[tokio::test]
async fn get_by_id_missing_is_does_not_exist() {
    let store = test_store().await;

    let result = store.objects::<Teacher>().get_by_id("Nobody").await;

    assert!(matches!(
        result,
        Err(ModelStoreError::DoesNotExist { model: "Teacher" })
    ));
}
