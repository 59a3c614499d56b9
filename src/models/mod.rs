pub mod portal;
pub mod student;

pub use portal::{CourseRange, PortalConfig, StorageConfig};
pub use student::{
    AuthResponse, Claims, CourseGrade, IdentityRecord, LoginRequest, RegisterRequest, Role,
    StudentInfo,
};
