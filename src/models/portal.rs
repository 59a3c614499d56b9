use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Key under which the directory lives in the session store
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Privileged faculty secret. When absent the faculty login never matches.
    #[serde(default)]
    pub faculty_secret: Option<String>,
    /// Backing session store
    #[serde(default)]
    pub storage: StorageConfig,
    /// Delay before register/login resolve (0 disables)
    #[serde(default = "default_response_delay_ms")]
    pub response_delay_ms: u64,
    /// Required length of a student ID, in characters
    #[serde(default = "default_student_id_length")]
    pub student_id_length: usize,
    /// Minimum password length, enforced at registration only
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
    /// bcrypt cost used when hashing new passwords
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    /// Courses and score ranges synthesized at registration
    #[serde(default = "default_grade_scheme")]
    pub grade_scheme: Vec<CourseRange>,
    /// Secret for signing portal session tokens
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Token expiration in seconds (default: 86400 = 24 hours)
    #[serde(default = "default_token_expiration")]
    pub token_expiration_secs: i64,
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

/// Session store backend
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    /// In-process store, cleared when the process exits
    #[default]
    Memory,
    /// JSON file on disk
    File { path: String },
}

/// Score range for one course; `min` inclusive, `max` exclusive
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseRange {
    pub course: String,
    pub min: u8,
    pub max: u8,
}

impl CourseRange {
    pub fn new(course: &str, min: u8, max: u8) -> Self {
        Self {
            course: course.to_string(),
            min,
            max,
        }
    }

    /// The range must be non-empty and stay within 0-100
    pub fn validate(&self) -> Result<(), String> {
        if self.min >= self.max || self.max > 100 {
            return Err(format!(
                "Invalid score range [{}, {}) for course '{}'",
                self.min, self.max, self.course
            ));
        }
        Ok(())
    }
}

fn default_storage_key() -> String {
    "college_backup_db".to_string()
}

fn default_response_delay_ms() -> u64 {
    800
}

fn default_student_id_length() -> usize {
    9
}

fn default_min_password_length() -> usize {
    6
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

pub fn default_grade_scheme() -> Vec<CourseRange> {
    vec![
        CourseRange::new("Linear Algebra", 60, 100),
        CourseRange::new("Web Development", 80, 100),
        CourseRange::new("Algorithms", 55, 100),
    ]
}

fn default_jwt_secret() -> String {
    "your-secret-key-change-this-in-production".to_string()
}

fn default_token_expiration() -> i64 {
    86400
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            faculty_secret: None,
            storage: StorageConfig::default(),
            response_delay_ms: default_response_delay_ms(),
            student_id_length: default_student_id_length(),
            min_password_length: default_min_password_length(),
            bcrypt_cost: default_bcrypt_cost(),
            grade_scheme: default_grade_scheme(),
            jwt_secret: default_jwt_secret(),
            token_expiration_secs: default_token_expiration(),
            bind_address: default_bind_address(),
        }
    }
}

impl PortalConfig {
    /// The privileged secret, treating an empty value as unset
    pub fn faculty_secret(&self) -> Option<&str> {
        self.faculty_secret.as_deref().filter(|s| !s.is_empty())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.storage_key.is_empty() {
            return Err("Configuration must have a non-empty storage_key".to_string());
        }

        if self.jwt_secret.is_empty() {
            return Err("Configuration must have a jwt_secret".to_string());
        }

        if self.grade_scheme.is_empty() {
            return Err("Grade scheme must have at least one course".to_string());
        }

        for range in &self.grade_scheme {
            range.validate()?;
        }

        if let StorageConfig::File { path } = &self.storage
            && path.is_empty()
        {
            return Err("File storage must have a path".to_string());
        }

        Ok(())
    }
}
