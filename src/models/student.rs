use serde::{Deserialize, Serialize};

/// Subject id of the synthetic faculty identity
pub const FACULTY_SUBJECT_ID: &str = "ADMIN";
/// Display name of the synthetic faculty identity
pub const FACULTY_DISPLAY_NAME: &str = "Senior Lecturer";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Student,
    Faculty,
}

/// A single course score, fixed at registration time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseGrade {
    pub course: String,
    pub score: u8,
}

/// Identity record as laid out in the session store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityRecord {
    #[serde(rename = "studentID")]
    pub subject_id: String,
    #[serde(rename = "fullName")]
    pub display_name: String,
    /// bcrypt hash; the synthetic faculty identity has none
    #[serde(rename = "password", default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub role: Role,
    #[serde(rename = "grades", default)]
    pub scores: Vec<CourseGrade>,
}

impl IdentityRecord {
    /// Create a persisted student record
    pub fn student(
        subject_id: String,
        display_name: String,
        password_hash: String,
        scores: Vec<CourseGrade>,
    ) -> Self {
        Self {
            subject_id,
            display_name,
            password_hash: Some(password_hash),
            role: Role::Student,
            scores,
        }
    }

    /// The synthetic faculty identity. Never persisted.
    pub fn faculty() -> Self {
        Self {
            subject_id: FACULTY_SUBJECT_ID.to_string(),
            display_name: FACULTY_DISPLAY_NAME.to_string(),
            password_hash: None,
            role: Role::Faculty,
            scores: Vec::new(),
        }
    }

    pub fn is_faculty(&self) -> bool {
        self.role == Role::Faculty
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub student_id: String,
    pub full_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub student_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Student ID
    pub name: String,
    pub role: Role,
    pub sid: String, // Portal session ID
    pub exp: usize,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: StudentInfo,
}

/// Public view of an identity record (no password hash)
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StudentInfo {
    pub student_id: String,
    pub full_name: String,
    pub role: Role,
    pub grades: Vec<CourseGrade>,
}

impl From<IdentityRecord> for StudentInfo {
    fn from(record: IdentityRecord) -> Self {
        Self {
            student_id: record.subject_id,
            full_name: record.display_name,
            role: record.role,
            grades: record.scores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uses_session_store_layout() {
        let record = IdentityRecord::student(
            "305123456".to_string(),
            "Alice".to_string(),
            "$2b$04$hash".to_string(),
            vec![CourseGrade {
                course: "Algorithms".to_string(),
                score: 77,
            }],
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["studentID"], "305123456");
        assert_eq!(value["fullName"], "Alice");
        assert_eq!(value["password"], "$2b$04$hash");
        assert_eq!(value["role"], "Student");
        assert_eq!(value["grades"][0]["course"], "Algorithms");
        assert_eq!(value["grades"][0]["score"], 77);
    }

    #[test]
    fn test_faculty_identity() {
        let faculty = IdentityRecord::faculty();
        assert_eq!(faculty.subject_id, "ADMIN");
        assert_eq!(faculty.role, Role::Faculty);
        assert!(faculty.is_faculty());
        assert!(faculty.password_hash.is_none());

        let value = serde_json::to_value(&faculty).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["role"], "Faculty");
    }

    #[test]
    fn test_student_info_hides_password() {
        let record = IdentityRecord::student(
            "305123456".to_string(),
            "Alice".to_string(),
            "hash".to_string(),
            vec![],
        );
        let info = StudentInfo::from(record);
        let value = serde_json::to_value(&info).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["student_id"], "305123456");
    }
}
