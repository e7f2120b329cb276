use chrono::{DateTime, Utc};
use docbridge::{memory::InMemoryBackend, prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Model)]
#[model(
    prod_collection = "teacher",
    test_collection = "test_teacher",
    document_id_with = "Teacher::name_key"
)]
pub struct Teacher {
    #[model(primary_key)]
    pub id: Option<String>,
    pub name: String,
    pub subject: String,
    pub hired_at: DateTime<Utc>,
}

impl Teacher {
    fn name_key(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Model)]
#[model(
    prod_collection = "student",
    test_collection = "test_student",
    unique_together = "name, teacher"
)]
pub struct Student {
    #[model(primary_key)]
    pub id: Option<String>,
    pub name: String,
    #[model(reference)]
    pub teacher: ForeignKey<Teacher>,
}

#[tokio::main]
async fn main() -> Result<(), ModelStoreError> {
    env_logger::init();

    let backend = InMemoryBackend::builder().build().await?;
    let store = ModelStore::new(backend, StoreConfig::test());

    let teachers = store.objects::<Teacher>();
    for (name, subject) in [("Newton", "physics"), ("Curie", "chemistry")] {
        let mut teacher = Teacher {
            id: None,
            name: name.to_string(),
            subject: subject.to_string(),
            hired_at: Utc::now(),
        };
        teachers.save(&mut teacher).await?;
    }
    log::info!("seeded the teacher collection");

    let students = store.objects::<Student>();
    let mut maxwell = Student {
        id: None,
        name: "Maxwell".to_string(),
        teacher: ForeignKey::new("Newton"),
    };
    students.validate_unique(&maxwell).await?;
    students.save(&mut maxwell).await?;

    // Compose a query; nothing runs until the results are read
    let physicists = teachers
        .filter(Q::eq("subject", "physics"))
        .order_by(["-hired_at"])
        .iterator()
        .await?;
    for teacher in &physicists {
        println!("{} teaches {}", teacher.name, teacher.subject);
    }

    // Follow a reference back to its document
    let enrolled = students.get([("teacher", "Newton")]).await?;
    let advisor = enrolled.teacher.resolve(&teachers).await?;
    println!("{} studies with {}", enrolled.name, advisor.name);

    // A second Maxwell under the same teacher violates the constraint
    let duplicate = Student {
        id: None,
        name: "Maxwell".to_string(),
        teacher: ForeignKey::new("Newton"),
    };
    if let Err(error) = students.validate_unique(&duplicate).await {
        println!("rejected: {error}");
    }

    println!("{}", enrolled.to_json()?);

    store.shutdown().await?;

    Ok(())
}
