mod common;

use application::auth::dtos::{LoginRequest, RegisterRequest};
use application::auth::use_cases::{
    decode_token, email_taken_or_database, issue_token, AuthConfig, EnsureAdminUseCase,
    LoginUseCase, RegisterUseCase, ResolveActorUseCase,
};
use application::empresas::dtos::EmpresaInput;
use application::users::dtos::{ApprovalStatus, ListUsersQuery, ReviewAction, ReviewOutcome};
use application::users::use_cases::{ListUsersUseCase, ReviewUserUseCase};
use application::AppError;
use chrono::Utc;
use common::{actor, create_user, setup_db};
use ecclesia_core::entities::{empresas, sea_orm_active_enums::UserRole, user_empresas, users};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-secret".to_string(),
        jwt_expiration: 3600,
    }
}

fn empresa(name: &str) -> EmpresaInput {
    EmpresaInput {
        name: name.to_string(),
        description: None,
        segment: Some("Alimentação".to_string()),
        phone: None,
        email: None,
        website: None,
        instagram: None,
        address: None,
        logo_url: None,
    }
}

fn register_request(email: &str, empresa: Option<EmpresaInput>) -> RegisterRequest {
    RegisterRequest {
        name: "Carlos Lima".to_string(),
        email: email.to_string(),
        password: "senha-forte-123".to_string(),
        phone: None,
        empresa,
    }
}

#[tokio::test]
async fn test_registration_then_approval_then_login() {
    let db = setup_db().await;
    let admin = create_user(&db, "admin@example.com", UserRole::Admin, true).await;

    // 1. Register with a company
    let registered = RegisterUseCase::execute(&db, register_request("Carlos@Example.com", Some(empresa("Padaria Pão Vivo"))))
        .await
        .expect("Registration should succeed");
    assert!(!registered.user.approved);
    assert_eq!(registered.user.email, "carlos@example.com");
    assert!(registered.empresa_id.is_some());

    // 2. Pending users cannot sign in
    let err = LoginUseCase::execute(
        &db,
        &auth_config(),
        LoginRequest {
            email: "carlos@example.com".to_string(),
            password: "senha-forte-123".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.status_code(), 403);

    let pending = ListUsersUseCase::execute(&db, ListUsersQuery { status: Some(ApprovalStatus::Pending) })
        .await
        .expect("List should succeed");
    assert_eq!(pending.len(), 1);

    // 3. Approve
    let outcome = ReviewUserUseCase::execute(&db, &actor(&admin), registered.user.id, ReviewAction::Approve)
        .await
        .expect("Approve should succeed");
    assert!(matches!(outcome, ReviewOutcome::Approved { ref user } if user.approved));

    // 4. Sign in
    let login = LoginUseCase::execute(
        &db,
        &auth_config(),
        LoginRequest {
            email: "carlos@example.com".to_string(),
            password: "senha-forte-123".to_string(),
        },
    )
    .await
    .expect("Approved user should sign in");
    assert!(!login.token.is_empty());
    assert_eq!(login.expires_in, 3600);

    let err = LoginUseCase::execute(
        &db,
        &auth_config(),
        LoginRequest {
            email: "carlos@example.com".to_string(),
            password: "senha-errada".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.status_code(), 401);
}

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let db = setup_db().await;

    RegisterUseCase::execute(&db, register_request("carlos@example.com", None))
        .await
        .expect("First registration should succeed");

    let err = RegisterUseCase::execute(&db, register_request("CARLOS@example.com", None))
        .await
        .unwrap_err();
    match err {
        AppError::Validation(msg) => assert_eq!(msg, "Email already registered"),
        other => panic!("unexpected error: {:?}", other),
    }

    assert_eq!(users::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_reject_removes_exclusively_owned_companies() {
    let db = setup_db().await;
    let admin = create_user(&db, "admin@example.com", UserRole::Admin, true).await;

    let registered = RegisterUseCase::execute(&db, register_request("carlos@example.com", Some(empresa("Solo Ltda"))))
        .await
        .expect("Registration should succeed");
    let solo_id = registered.empresa_id.expect("Company should be created");

    // A second company shared with another owner
    let partner = create_user(&db, "socio@example.com", UserRole::Member, true).await;
    let shared = empresa("Sociedade Ltda")
        .into_active_model(uuid::Uuid::new_v4())
        .insert(&db)
        .await
        .expect("Company insert should succeed");
    for owner in [registered.user.id, partner.id] {
        user_empresas::ActiveModel {
            user_id: Set(owner),
            empresa_id: Set(shared.id),
            created_at: Set(Utc::now().into()),
        }
        .insert(&db)
        .await
        .expect("Link insert should succeed");
    }

    let outcome = ReviewUserUseCase::execute(&db, &actor(&admin), registered.user.id, ReviewAction::Reject)
        .await
        .expect("Reject should succeed");
    assert!(matches!(outcome, ReviewOutcome::Rejected { removed_empresas: 1 }));

    assert!(users::Entity::find_by_id(registered.user.id).one(&db).await.unwrap().is_none());
    assert!(empresas::Entity::find_by_id(solo_id).one(&db).await.unwrap().is_none());
    assert!(empresas::Entity::find_by_id(shared.id).one(&db).await.unwrap().is_some());

    // Only the partner's link remains
    let links = user_empresas::Entity::find().all(&db).await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].user_id, partner.id);
}

#[tokio::test]
async fn test_review_requires_admin() {
    let db = setup_db().await;
    let member = create_user(&db, "membro@example.com", UserRole::Member, true).await;
    let pending = create_user(&db, "novo@example.com", UserRole::Member, false).await;

    let err = ReviewUserUseCase::execute(&db, &actor(&member), pending.id, ReviewAction::Approve)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 403);

    let err = ReviewUserUseCase::execute(&db, &actor(&pending), uuid::Uuid::new_v4(), ReviewAction::Approve)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 403);
}

#[tokio::test]
async fn test_ensure_admin_is_idempotent() {
    let db = setup_db().await;

    let first = EnsureAdminUseCase::execute(&db, "Pastor@Example.com", "senha-forte-123", "Pastor")
        .await
        .expect("Admin should be created");
    assert!(first.is_admin());
    assert!(first.approved);

    let second = EnsureAdminUseCase::execute(&db, "pastor@example.com", "outra-senha-123", "Pastor")
        .await
        .expect("Second run should succeed");
    assert_eq!(first.id, second.id);
    assert_eq!(users::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_resolved_actor_follows_stored_account() {
    let db = setup_db().await;
    let config = auth_config();
    let admin = create_user(&db, "admin@example.com", UserRole::Admin, true).await;
    let member = create_user(&db, "membro@example.com", UserRole::Member, true).await;

    let admin_claims = decode_token(&config.jwt_secret, &issue_token(&config, &admin).unwrap()).unwrap();
    let member_claims = decode_token(&config.jwt_secret, &issue_token(&config, &member).unwrap()).unwrap();

    let resolved = ResolveActorUseCase::execute(&db, &member_claims).await.unwrap();
    assert_eq!(resolved.user_id, member.id);
    assert!(!resolved.is_admin());

    // Demoted after the token was issued: the stored role wins
    let mut demoted: users::ActiveModel = admin.clone().into();
    demoted.role = Set(UserRole::Member);
    demoted.update(&db).await.unwrap();
    let resolved = ResolveActorUseCase::execute(&db, &admin_claims).await.unwrap();
    assert!(!resolved.is_admin());

    // Rejected (deleted) accounts lose access
    let reviewer = create_user(&db, "outro-admin@example.com", UserRole::Admin, true).await;
    ReviewUserUseCase::execute(&db, &actor(&reviewer), member.id, ReviewAction::Reject)
        .await
        .unwrap();
    let err = ResolveActorUseCase::execute(&db, &member_claims).await.unwrap_err();
    assert_eq!(err.status_code(), 401);
}

#[tokio::test]
async fn test_unapproved_account_cannot_act() {
    let db = setup_db().await;
    let config = auth_config();
    let pending = create_user(&db, "pendente@example.com", UserRole::Member, false).await;

    let claims = decode_token(&config.jwt_secret, &issue_token(&config, &pending).unwrap()).unwrap();
    let err = ResolveActorUseCase::execute(&db, &claims).await.unwrap_err();
    assert!(matches!(err, AppError::Authentication(_)));
}

#[tokio::test]
async fn test_unique_email_violation_reads_as_duplicate_registration() {
    let db = setup_db().await;
    let existing = create_user(&db, "dup@example.com", UserRole::Member, false).await;

    // What a registration that lost the race sees on insert
    let twin = |model: users::Model| {
        let mut twin: users::ActiveModel = model.into();
        twin.id = Set(uuid::Uuid::new_v4());
        twin
    };

    let raw = AppError::Database(twin(existing.clone()).insert(&db).await.unwrap_err());
    assert_eq!(raw.status_code(), 409);
    let body = application::ErrorResponse::from(&raw);
    assert_eq!(body.error, "Resource already exists");
    assert!(!body.error.to_lowercase().contains("unique"));

    let err = email_taken_or_database(twin(existing).insert(&db).await.unwrap_err());
    assert!(matches!(err, AppError::Validation(ref m) if m == "Email already registered"));
    assert_eq!(err.status_code(), 400);
}
