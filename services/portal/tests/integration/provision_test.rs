use uuid::Uuid;

use cartera_portal::error::PortalServiceError;
use cartera_portal::usecase::provision::{ProvisionPortalLoginInput, ProvisionPortalLoginUseCase};

use crate::helpers::{MockAuthAdmin, MockProfileRepo, SyncBehavior, soft_deleted_profile, test_profile};

fn input(email: &str, cliente_id: Uuid) -> ProvisionPortalLoginInput {
    ProvisionPortalLoginInput {
        email: email.to_owned(),
        password: "secret1".to_owned(),
        nombre: "Ana".to_owned(),
        cliente_id,
    }
}

// ── Happy path ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_provision_login_with_shared_identifier() {
    let cliente_id = Uuid::new_v4();
    let auth = MockAuthAdmin::new();
    let auth_users = auth.users_handle();
    let profiles = MockProfileRepo::new(vec![cliente_id]);
    let profiles_handle = profiles.profiles_handle();
    let customers = profiles.customers_handle();

    let usecase = ProvisionPortalLoginUseCase { auth, profiles };
    let output = usecase.execute(input("a@b.com", cliente_id)).await.unwrap();

    // Returned id, identity id and profile id are all the same value.
    let users = auth_users.lock().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, output.user_id);

    let stored = profiles_handle.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, output.user_id);
    assert_eq!(stored[0].email, "a@b.com");
    assert_eq!(stored[0].rol, "cliente");
    assert_eq!(stored[0].cliente_id, Some(cliente_id));

    // Customer now references the new portal login.
    let linked = customers.lock().unwrap();
    assert_eq!(linked[0], (cliente_id, Some(output.user_id)));
}

#[tokio::test]
async fn should_normalize_email_before_provisioning() {
    let cliente_id = Uuid::new_v4();
    let profiles = MockProfileRepo::new(vec![cliente_id]);
    let profiles_handle = profiles.profiles_handle();

    let usecase = ProvisionPortalLoginUseCase {
        auth: MockAuthAdmin::new(),
        profiles,
    };
    usecase
        .execute(input("  Ana@Example.COM ", cliente_id))
        .await
        .unwrap();

    assert_eq!(profiles_handle.lock().unwrap()[0].email, "ana@example.com");
}

// ── Input validation ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_malformed_email() {
    let usecase = ProvisionPortalLoginUseCase {
        auth: MockAuthAdmin::new(),
        profiles: MockProfileRepo::new(vec![]),
    };
    let result = usecase.execute(input("not-an-email", Uuid::new_v4())).await;
    assert!(matches!(result, Err(PortalServiceError::InvalidEmail)));
}

#[tokio::test]
async fn should_reject_short_password() {
    let cliente_id = Uuid::new_v4();
    let usecase = ProvisionPortalLoginUseCase {
        auth: MockAuthAdmin::new(),
        profiles: MockProfileRepo::new(vec![cliente_id]),
    };
    let mut short = input("a@b.com", cliente_id);
    short.password = "12345".to_owned();
    let result = usecase.execute(short).await;
    assert!(matches!(result, Err(PortalServiceError::WeakPassword)));
}

// ── Duplicate handling ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_duplicate_email_without_writes() {
    let cliente_id = Uuid::new_v4();
    let auth = MockAuthAdmin::new();
    let auth_users = auth.users_handle();
    let profiles =
        MockProfileRepo::with_profiles(vec![cliente_id], vec![test_profile("a@b.com")]);

    let usecase = ProvisionPortalLoginUseCase { auth, profiles };
    let result = usecase.execute(input("a@b.com", cliente_id)).await;

    assert!(matches!(result, Err(PortalServiceError::DuplicateEmail)));
    assert!(auth_users.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_clear_stale_soft_deleted_rows_before_provisioning() {
    let cliente_id = Uuid::new_v4();
    let profiles = MockProfileRepo::with_profiles(
        vec![cliente_id],
        vec![
            soft_deleted_profile("a@b.com"),
            soft_deleted_profile("a@b.com"),
        ],
    );
    let profiles_handle = profiles.profiles_handle();

    let usecase = ProvisionPortalLoginUseCase {
        auth: MockAuthAdmin::new(),
        profiles,
    };
    let output = usecase.execute(input("a@b.com", cliente_id)).await.unwrap();

    // Only the freshly synced profile remains.
    let stored = profiles_handle.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, output.user_id);
}

#[tokio::test]
async fn should_proceed_when_dedup_fails() {
    let cliente_id = Uuid::new_v4();
    let mut profiles = MockProfileRepo::new(vec![cliente_id]);
    profiles.fail_dedup = true;

    let usecase = ProvisionPortalLoginUseCase {
        auth: MockAuthAdmin::new(),
        profiles,
    };
    // Dedup is best-effort; its failure must not abort provisioning.
    assert!(usecase.execute(input("a@b.com", cliente_id)).await.is_ok());
}

// ── Provider failure ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_surface_provider_error_verbatim() {
    let cliente_id = Uuid::new_v4();
    let profiles = MockProfileRepo::new(vec![cliente_id]);
    let profiles_handle = profiles.profiles_handle();

    let usecase = ProvisionPortalLoginUseCase {
        auth: MockAuthAdmin::failing_create("email rate limit exceeded"),
        profiles,
    };
    let result = usecase.execute(input("a@b.com", cliente_id)).await;

    match result {
        Err(PortalServiceError::AuthCreationFailed(message)) => {
            assert_eq!(message, "email rate limit exceeded");
        }
        other => panic!("expected AuthCreationFailed, got {other:?}"),
    }
    assert!(profiles_handle.lock().unwrap().is_empty());
}

// ── Sync failure + compensation ──────────────────────────────────────────────

#[tokio::test]
async fn should_roll_back_identity_when_sync_reports_failure() {
    let cliente_id = Uuid::new_v4();
    let auth = MockAuthAdmin::new();
    let auth_users = auth.users_handle();
    let deleted = auth.deleted_handle();
    let expected_id = auth.next_id;

    let mut profiles = MockProfileRepo::new(vec![cliente_id]);
    profiles.sync_behavior = SyncBehavior::StructuredFailure(
        "duplicate key value violates unique constraint".to_owned(),
    );
    let profiles_handle = profiles.profiles_handle();

    let usecase = ProvisionPortalLoginUseCase { auth, profiles };
    let result = usecase.execute(input("a@b.com", cliente_id)).await;

    match result {
        Err(PortalServiceError::SyncFailed(reason)) => {
            assert_eq!(reason, "duplicate key value violates unique constraint");
        }
        other => panic!("expected SyncFailed, got {other:?}"),
    }
    // No residual identity or profile rows.
    assert!(auth_users.lock().unwrap().is_empty());
    assert_eq!(deleted.lock().unwrap().as_slice(), &[expected_id]);
    assert!(profiles_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_roll_back_identity_when_sync_transport_fails() {
    let cliente_id = Uuid::new_v4();
    let auth = MockAuthAdmin::new();
    let auth_users = auth.users_handle();

    let mut profiles = MockProfileRepo::new(vec![cliente_id]);
    profiles.sync_behavior = SyncBehavior::TransportError;

    let usecase = ProvisionPortalLoginUseCase { auth, profiles };
    let result = usecase.execute(input("a@b.com", cliente_id)).await;

    assert!(matches!(result, Err(PortalServiceError::SyncFailed(_))));
    assert!(auth_users.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_fail_sync_for_unknown_customer() {
    // No customers seeded: the sync step cannot link the profile.
    let auth = MockAuthAdmin::new();
    let auth_users = auth.users_handle();
    let profiles = MockProfileRepo::new(vec![]);

    let usecase = ProvisionPortalLoginUseCase { auth, profiles };
    let result = usecase.execute(input("a@b.com", Uuid::new_v4())).await;

    match result {
        Err(PortalServiceError::SyncFailed(reason)) => {
            assert!(reason.contains("not found"), "unexpected reason: {reason}");
        }
        other => panic!("expected SyncFailed, got {other:?}"),
    }
    assert!(auth_users.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_not_mask_sync_failure_when_rollback_fails() {
    let cliente_id = Uuid::new_v4();
    let mut auth = MockAuthAdmin::new();
    auth.fail_delete = true;
    let auth_users = auth.users_handle();

    let mut profiles = MockProfileRepo::new(vec![cliente_id]);
    profiles.sync_behavior = SyncBehavior::StructuredFailure("insert rejected".to_owned());

    let usecase = ProvisionPortalLoginUseCase { auth, profiles };
    let result = usecase.execute(input("a@b.com", cliente_id)).await;

    // The primary error wins; the failed cleanup is only logged.
    match result {
        Err(PortalServiceError::SyncFailed(reason)) => assert_eq!(reason, "insert rejected"),
        other => panic!("expected SyncFailed, got {other:?}"),
    }
    // Rollback failed, so the orphaned identity is still there.
    assert_eq!(auth_users.lock().unwrap().len(), 1);
}

// ── Verification ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_fail_verification_when_sync_reports_success_without_row() {
    let cliente_id = Uuid::new_v4();
    let mut profiles = MockProfileRepo::new(vec![cliente_id]);
    profiles.sync_behavior = SyncBehavior::SucceedWithoutWrite;

    let usecase = ProvisionPortalLoginUseCase {
        auth: MockAuthAdmin::new(),
        profiles,
    };
    let result = usecase.execute(input("a@b.com", cliente_id)).await;
    assert!(matches!(result, Err(PortalServiceError::VerificationFailed)));
}
