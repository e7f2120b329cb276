//! Model declarations shared by the persistence tests.

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
}

impl Teacher {
    pub fn named(name: &str) -> Self {
        Self { id: None, name: name.to_string() }
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

#[derive(Debug, Clone, Serialize, Deserialize, Model)]
#[model(
    prod_collection = "course",
    test_collection = "test_course",
    unique_together = "name, semester",
    unique_together = "room, semester"
)]
pub struct Course {
    #[model(primary_key)]
    pub id: Option<String>,
    pub name: String,
    pub semester: String,
    pub room: String,
}

impl Course {
    pub fn new(name: &str, semester: &str, room: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            semester: semester.to_string(),
            room: room.to_string(),
        }
    }
}

/// Deliberately declared without collection names.
#[derive(Debug, Clone, Serialize, Deserialize, Model)]
pub struct Orphan {
    #[model(primary_key)]
    pub id: Option<String>,
    pub name: String,
}
