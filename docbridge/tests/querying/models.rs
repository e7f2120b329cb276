//! Model declarations shared by the querying tests.

use docbridge::prelude::*;
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
    #[model(stored_as = "subjectArea")]
    pub subject: String,
    pub age: i64,
}

impl Teacher {
    pub fn new(name: &str, subject: &str, age: i64) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            subject: subject.to_string(),
            age,
        }
    }

    fn name_key(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Model)]
#[model(prod_collection = "student", test_collection = "test_student")]
pub struct Student {
    #[model(primary_key)]
    pub id: Option<String>,
    pub name: String,
    #[model(reference)]
    pub teacher: ForeignKey<Teacher>,
}

impl Student {
    pub fn new(name: &str, teacher: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            teacher: ForeignKey::new(teacher),
        }
    }
}
