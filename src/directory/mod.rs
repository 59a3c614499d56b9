// Session directory
// Registration, login and roster queries over the persisted identity collection

pub mod error;
pub mod grades;

pub use error::PortalError;
pub use grades::generate_grades;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::auth::{hash_password, verify_password};
use crate::models::{
    CourseRange, IdentityRecord, LoginRequest, PortalConfig, RegisterRequest, Role,
};
use crate::session::PortalSession;
use crate::storage::DirectoryStore;

/// Settings the directory needs from the portal configuration
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub faculty_secret: Option<String>,
    pub response_delay: Duration,
    pub student_id_length: usize,
    pub min_password_length: usize,
    pub bcrypt_cost: u32,
    pub grade_scheme: Vec<CourseRange>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self::from(&PortalConfig::default())
    }
}

impl DirectoryConfig {
    pub fn validate(&self) -> Result<(), PortalError> {
        if self.grade_scheme.is_empty() {
            return Err(PortalError::Validation(
                "Grade scheme must have at least one course".to_string(),
            ));
        }
        for range in &self.grade_scheme {
            range.validate().map_err(PortalError::Validation)?;
        }
        Ok(())
    }
}

impl From<&PortalConfig> for DirectoryConfig {
    fn from(config: &PortalConfig) -> Self {
        Self {
            faculty_secret: config.faculty_secret().map(str::to_string),
            response_delay: Duration::from_millis(config.response_delay_ms),
            student_id_length: config.student_id_length,
            min_password_length: config.min_password_length,
            bcrypt_cost: config.bcrypt_cost,
            grade_scheme: config.grade_scheme.clone(),
        }
    }
}

/// Owns the identity collection in the session store and answers
/// register/login/listing queries against it.
///
/// The directory does not check the caller's role before `list_students`;
/// restricting the roster to faculty sessions is the caller's job.
pub struct SessionDirectory {
    store: Arc<dyn DirectoryStore>,
    config: DirectoryConfig,
    // Serializes the duplicate check and append of `register`
    write_lock: Mutex<()>,
}

impl SessionDirectory {
    /// Create a directory over `store`; rejects an unusable grade scheme
    pub fn new(
        store: Arc<dyn DirectoryStore>,
        config: DirectoryConfig,
    ) -> Result<Self, PortalError> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            write_lock: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Register a new student and make it the session's current identity
    pub async fn register(
        &self,
        session: &mut PortalSession,
        request: RegisterRequest,
    ) -> Result<IdentityRecord, PortalError> {
        self.validate_registration(&request)?;
        self.simulate_latency().await;

        let password_hash = self.hash(request.password).await?;

        let record = {
            let _guard = self.write_lock.lock().await;
            let mut records = self.store.load().await?;

            if records.iter().any(|r| r.subject_id == request.student_id) {
                warn!("Registration rejected: {} already exists", request.student_id);
                return Err(PortalError::DuplicateIdentity(request.student_id));
            }

            let record = IdentityRecord::student(
                request.student_id,
                request.full_name,
                password_hash,
                generate_grades(&self.config.grade_scheme),
            );
            records.push(record.clone());
            self.store.save(&records).await?;

            info!(
                "Registered student {} ({} on record)",
                record.subject_id,
                records.len()
            );
            record
        };

        session.sign_in(record.clone());
        Ok(record)
    }

    /// Authenticate and make the matched identity the session's current one.
    ///
    /// The privileged faculty secret is checked first and ignores the
    /// supplied student ID.
    pub async fn login(
        &self,
        session: &mut PortalSession,
        request: LoginRequest,
    ) -> Result<IdentityRecord, PortalError> {
        self.simulate_latency().await;

        if let Some(secret) = self.config.faculty_secret.as_deref()
            && request.password == secret
        {
            info!("Faculty login");
            let faculty = IdentityRecord::faculty();
            session.sign_in(faculty.clone());
            return Ok(faculty);
        }

        let records = self.store.load().await?;
        let Some(record) = records
            .into_iter()
            .find(|r| r.subject_id == request.student_id)
        else {
            debug!("Login failed: unknown student {}", request.student_id);
            return Err(PortalError::InvalidCredentials);
        };

        let Some(password_hash) = record.password_hash.clone() else {
            return Err(PortalError::InvalidCredentials);
        };

        if !self.verify(request.password, password_hash).await? {
            debug!("Login failed: wrong password for {}", record.subject_id);
            return Err(PortalError::InvalidCredentials);
        }

        info!("Student {} logged in", record.subject_id);
        session.sign_in(record.clone());
        Ok(record)
    }

    /// Clear the session's current identity
    pub fn logout(&self, session: &mut PortalSession) {
        if let Some(current) = session.current() {
            debug!("Logging out {}", current.subject_id);
        }
        session.sign_out();
    }

    /// All persisted students, in registration order
    pub async fn list_students(&self) -> Result<Vec<IdentityRecord>, PortalError> {
        let records = self.store.load().await?;
        Ok(records
            .into_iter()
            .filter(|r| r.role == Role::Student)
            .collect())
    }

    fn validate_registration(&self, request: &RegisterRequest) -> Result<(), PortalError> {
        if request.full_name.trim().is_empty() {
            return Err(PortalError::Validation("Full name is required".to_string()));
        }

        if request.student_id.chars().count() != self.config.student_id_length {
            return Err(PortalError::Validation(format!(
                "ID must be {} digits",
                self.config.student_id_length
            )));
        }

        if request.password.chars().count() < self.config.min_password_length {
            return Err(PortalError::Validation(format!(
                "Must be at least {} characters",
                self.config.min_password_length
            )));
        }

        Ok(())
    }

    async fn simulate_latency(&self) {
        if !self.config.response_delay.is_zero() {
            tokio::time::sleep(self.config.response_delay).await;
        }
    }

    async fn hash(&self, password: String) -> Result<String, PortalError> {
        let cost = self.config.bcrypt_cost;
        tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| PortalError::PasswordHash(e.to_string()))?
            .map_err(PortalError::from)
    }

    /// A stored value that is not a bcrypt hash never matches
    async fn verify(&self, password: String, password_hash: String) -> Result<bool, PortalError> {
        let verified = tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .map_err(|e| PortalError::PasswordHash(e.to_string()))?;

        match verified {
            Ok(matched) => Ok(matched),
            Err(e) => {
                warn!("Stored password is not a usable hash: {}", e);
                Ok(false)
            }
        }
    }
}
