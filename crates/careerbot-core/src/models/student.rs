use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered student profile. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub class: String,
    pub interests: String,
    pub location: String,
    pub created_at: jiff::Timestamp,
}

/// Registration payload as submitted by the form.
///
/// Absent fields deserialize to empty strings so they are reported by
/// validation rather than by the JSON decoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub interests: String,
    #[serde(default)]
    pub location: String,
}

impl NewStudent {
    pub fn into_student(self, id: Uuid, created_at: jiff::Timestamp) -> Student {
        Student {
            id,
            name: self.name,
            class: self.class,
            interests: self.interests,
            location: self.location,
            created_at,
        }
    }
}

/// The part of a profile sent along with every chat turn.
///
/// Absent fields render as empty text in the prompt rather than rejecting
/// the question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentContext {
    pub name: String,
    pub interests: String,
    pub location: String,
}

impl From<&Student> for StudentContext {
    fn from(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            interests: student.interests.clone(),
            location: student.location.clone(),
        }
    }
}
