use academic_portal::directory::{DirectoryConfig, PortalError, SessionDirectory};
use academic_portal::models::{LoginRequest, RegisterRequest, Role};
use academic_portal::session::PortalSession;
use academic_portal::storage::{DirectoryStore, FileStore, MemoryStore};
use std::sync::Arc;
use std::time::Duration;

fn config() -> DirectoryConfig {
    DirectoryConfig {
        faculty_secret: Some("lecturer-pass".to_string()),
        response_delay: Duration::ZERO,
        bcrypt_cost: 4,
        ..DirectoryConfig::default()
    }
}

fn register(id: &str, name: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        student_id: id.to_string(),
        full_name: name.to_string(),
        password: password.to_string(),
    }
}

fn login(id: &str, password: &str) -> LoginRequest {
    LoginRequest {
        student_id: id.to_string(),
        password: password.to_string(),
    }
}

/// Register, reject a duplicate, log in, reject a bad password, list
#[tokio::test]
async fn test_alice_scenario() {
    let directory = SessionDirectory::new(Arc::new(MemoryStore::new("college_backup_db")), config()).unwrap();
    let mut session = PortalSession::new();

    let alice = directory
        .register(&mut session, register("305123456", "Alice", "secret1"))
        .await
        .unwrap();
    assert_eq!(alice.role, Role::Student);
    assert_eq!(alice.scores.len(), 3);
    assert!(alice.scores.iter().all(|g| g.score <= 100));

    let duplicate = directory
        .register(&mut session, register("305123456", "Bob", "secret2"))
        .await;
    assert!(matches!(duplicate, Err(PortalError::DuplicateIdentity(_))));

    let again = directory
        .login(&mut session, login("305123456", "secret1"))
        .await
        .unwrap();
    assert_eq!(again, alice);

    let wrong = directory
        .login(&mut session, login("305123456", "wrong"))
        .await;
    assert!(matches!(wrong, Err(PortalError::InvalidCredentials)));
    // A failed login leaves the current identity alone
    assert_eq!(session.current(), Some(&alice));

    assert_eq!(directory.list_students().await.unwrap(), vec![alice]);
}

#[tokio::test]
async fn test_each_registration_grows_directory_by_one() {
    let directory = SessionDirectory::new(Arc::new(MemoryStore::new("db")), config()).unwrap();
    let mut session = PortalSession::new();

    for i in 0..5 {
        let id = format!("30512345{}", i);
        directory
            .register(&mut session, register(&id, "Student", "secret1"))
            .await
            .unwrap();
        assert_eq!(directory.list_students().await.unwrap().len(), i + 1);
        assert_eq!(session.current().unwrap().subject_id, id);
    }
}

#[tokio::test]
async fn test_faculty_never_listed() {
    let directory = SessionDirectory::new(Arc::new(MemoryStore::new("db")), config()).unwrap();
    let mut student = PortalSession::new();
    let mut faculty = PortalSession::new();

    directory
        .register(&mut student, register("305123456", "Alice", "secret1"))
        .await
        .unwrap();
    let admin = directory
        .login(&mut faculty, login("", "lecturer-pass"))
        .await
        .unwrap();
    assert_eq!(admin.subject_id, "ADMIN");
    assert_eq!(admin.role, Role::Faculty);

    let students = directory.list_students().await.unwrap();
    assert_eq!(students.len(), 1);
    assert!(students.iter().all(|r| r.role == Role::Student));

    directory.logout(&mut faculty);
    assert!(!faculty.is_authenticated());
    assert!(student.is_authenticated());
}

#[tokio::test]
async fn test_file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portal.json");

    let alice = {
        let directory = SessionDirectory::new(Arc::new(FileStore::new(&path, "db")), config()).unwrap();
        let mut session = PortalSession::new();
        directory
            .register(&mut session, register("305123456", "Alice", "secret1"))
            .await
            .unwrap()
    };

    let store: Arc<dyn DirectoryStore> = Arc::new(FileStore::new(&path, "db"));
    let directory = SessionDirectory::new(store, config()).unwrap();
    let mut session = PortalSession::new();

    let restored = directory
        .login(&mut session, login("305123456", "secret1"))
        .await
        .unwrap();
    assert_eq!(restored, alice);

    let duplicate = directory
        .register(&mut session, register("305123456", "Bob", "secret2"))
        .await;
    assert!(matches!(duplicate, Err(PortalError::DuplicateIdentity(_))));
}
