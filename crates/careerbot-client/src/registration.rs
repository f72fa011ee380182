use careerbot_core::models::student::{NewStudent, Student};
use careerbot_core::validate::validate_new_student;

use crate::api::CareerApi;
use crate::error::ClientError;

/// Shown whenever registration fails, whatever the cause.
pub const REGISTRATION_FAILED: &str = "Failed to register. Please try again.";

/// The only class the form offers.
pub const CLASS_10: &str = "10";

/// Registration form contents. Class is not editable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub interests: String,
    pub location: String,
}

impl RegistrationForm {
    pub fn to_new_student(&self) -> NewStudent {
        NewStudent {
            name: self.name.clone(),
            class: CLASS_10.to_string(),
            interests: self.interests.clone(),
            location: self.location.clone(),
        }
    }

    /// Check required fields locally, then register. Nothing is sent when a
    /// field is blank.
    pub async fn submit(&self, api: &dyn CareerApi) -> Result<Student, ClientError> {
        let new = self.to_new_student();
        validate_new_student(&new)?;
        api.register(&new).await
    }
}
