mod common;

use application::forms::dtos::{
    AnswerInput, CreateFormRequest, FieldInput, SubmitResponseRequest, UpdateFormRequest,
};
use application::forms::public::{ResolvePublicFormUseCase, SubmitResponseUseCase};
use application::forms::use_cases::{
    CreateFormUseCase, DeleteFormUseCase, GetFormUseCase, ListFormResponsesUseCase,
    ListFormsUseCase, UpdateFormUseCase,
};
use application::AppError;
use async_trait::async_trait;
use common::{actor, create_user, setup_db};
use ecclesia_core::entities::{
    form_answers, form_fields, form_responses,
    sea_orm_active_enums::{FieldType, FormStatus, FormVisibility, UserRole},
};
use infrastructure::notifications::{LogNotifier, Notifier, OutgoingEmail};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use std::sync::Mutex;

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<OutgoingEmail>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_email(&self, email: OutgoingEmail) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send_email(&self, _email: OutgoingEmail) -> anyhow::Result<()> {
        anyhow::bail!("smtp unavailable")
    }
}

fn field(label: &str, field_type: FieldType, required: bool) -> FieldInput {
    FieldInput {
        label: label.to_string(),
        field_type,
        required,
        placeholder: None,
        help_text: None,
        options: None,
        order: None,
    }
}

fn form_request(status: FormStatus, fields: Vec<FieldInput>) -> CreateFormRequest {
    CreateFormRequest {
        title: "Cadastro de Voluntários".to_string(),
        description: None,
        status: Some(status),
        visibility: Some(FormVisibility::Public),
        require_auth: false,
        email_enabled: false,
        email_subject: None,
        email_body: None,
        fields,
    }
}

fn answer(field_id: uuid::Uuid, value: serde_json::Value) -> AnswerInput {
    AnswerInput { field_id, value }
}

#[tokio::test]
async fn test_publish_requires_a_field() {
    let db = setup_db().await;
    let admin = create_user(&db, "admin@example.com", UserRole::Admin, true).await;

    let err = CreateFormUseCase::execute(&db, &actor(&admin), form_request(FormStatus::Published, vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Draft without fields is fine, but publishing it later is not
    let draft = CreateFormUseCase::execute(&db, &actor(&admin), form_request(FormStatus::Draft, vec![]))
        .await
        .expect("Draft should be created");

    let err = UpdateFormUseCase::execute(
        &db,
        draft.id,
        UpdateFormRequest {
            status: Some(FormStatus::Published),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.status_code(), 400);

    // Replacing fields and publishing in the same update succeeds
    let published = UpdateFormUseCase::execute(
        &db,
        draft.id,
        UpdateFormRequest {
            status: Some(FormStatus::Published),
            fields: Some(vec![field("Nome", FieldType::Text, true)]),
            ..Default::default()
        },
    )
    .await
    .expect("Publish with a field should succeed");
    assert_eq!(published.status, FormStatus::Published);
    assert_eq!(published.fields.len(), 1);
}

#[tokio::test]
async fn test_field_orders_are_contiguous() {
    let db = setup_db().await;
    let admin = create_user(&db, "admin@example.com", UserRole::Admin, true).await;

    let mut last = field("Último", FieldType::Text, false);
    last.order = Some(50);
    let mut first = field("Primeiro", FieldType::Text, false);
    first.order = Some(0);
    let mut middle = field("Meio", FieldType::Select, false);
    middle.order = Some(7);
    middle.options = Some(vec!["A".to_string(), " A ".to_string(), "B".to_string()]);

    let form = CreateFormUseCase::execute(
        &db,
        &actor(&admin),
        form_request(FormStatus::Draft, vec![last, first, middle]),
    )
    .await
    .expect("Form should be created");

    let labels: Vec<&str> = form.fields.iter().map(|f| f.label.as_str()).collect();
    let orders: Vec<i32> = form.fields.iter().map(|f| f.order).collect();
    assert_eq!(labels, vec!["Primeiro", "Meio", "Último"]);
    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(form.fields[1].options, vec!["A".to_string(), "B".to_string()]);

    let fetched = GetFormUseCase::execute(&db, form.id).await.expect("Form should load");
    let orders: Vec<i32> = fetched.fields.iter().map(|f| f.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_update_without_orders_follows_submission_order() {
    let db = setup_db().await;
    let admin = create_user(&db, "admin@example.com", UserRole::Admin, true).await;

    let form = CreateFormUseCase::execute(
        &db,
        &actor(&admin),
        form_request(FormStatus::Draft, vec![field("Antigo", FieldType::Text, false)]),
    )
    .await
    .expect("Form should be created");

    UpdateFormUseCase::execute(
        &db,
        form.id,
        UpdateFormRequest {
            fields: Some(vec![
                field("Nome", FieldType::Text, true),
                field("Email", FieldType::Email, true),
                field("Telefone", FieldType::Phone, false),
                field("Observações", FieldType::Textarea, false),
            ]),
            ..Default::default()
        },
    )
    .await
    .expect("Update should succeed");

    let fetched = GetFormUseCase::execute(&db, form.id).await.expect("Form should load");
    let labels: Vec<&str> = fetched.fields.iter().map(|f| f.label.as_str()).collect();
    let orders: Vec<i32> = fetched.fields.iter().map(|f| f.order).collect();
    assert_eq!(labels, vec!["Nome", "Email", "Telefone", "Observações"]);
    assert_eq!(orders, vec![0, 1, 2, 3]);

    let stored = form_fields::Entity::find().count(&db).await.unwrap();
    assert_eq!(stored, 4);
}

#[tokio::test]
async fn test_select_without_options_rejected() {
    let db = setup_db().await;
    let admin = create_user(&db, "admin@example.com", UserRole::Admin, true).await;

    let err = CreateFormUseCase::execute(
        &db,
        &actor(&admin),
        form_request(FormStatus::Draft, vec![field("Culto", FieldType::Select, true)]),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_tokens_resolve_by_visibility_and_status() {
    let db = setup_db().await;
    let admin = create_user(&db, "admin@example.com", UserRole::Admin, true).await;

    let form = CreateFormUseCase::execute(
        &db,
        &actor(&admin),
        form_request(FormStatus::Published, vec![field("Nome", FieldType::Text, true)]),
    )
    .await
    .expect("Form should be created");
    assert_ne!(form.public_token, form.private_token);

    let view = ResolvePublicFormUseCase::execute(&db, &form.public_token)
        .await
        .expect("Public token should resolve");
    assert_eq!(view.fields.len(), 1);
    assert!(ResolvePublicFormUseCase::execute(&db, &form.private_token).await.is_ok());

    // Private: only the private token works
    UpdateFormUseCase::execute(
        &db,
        form.id,
        UpdateFormRequest {
            visibility: Some(FormVisibility::Private),
            ..Default::default()
        },
    )
    .await
    .expect("Update should succeed");
    let err = ResolvePublicFormUseCase::execute(&db, &form.public_token).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert!(ResolvePublicFormUseCase::execute(&db, &form.private_token).await.is_ok());

    // Closed: nothing resolves
    UpdateFormUseCase::execute(
        &db,
        form.id,
        UpdateFormRequest {
            status: Some(FormStatus::Closed),
            ..Default::default()
        },
    )
    .await
    .expect("Update should succeed");
    let err = ResolvePublicFormUseCase::execute(&db, &form.private_token).await.unwrap_err();
    assert_eq!(err.status_code(), 404);

    let err = ResolvePublicFormUseCase::execute(&db, "no-such-token").await.unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_submission_checks_answers() {
    let db = setup_db().await;
    let admin = create_user(&db, "admin@example.com", UserRole::Admin, true).await;

    let mut dias = field("Dias", FieldType::Checkbox, false);
    dias.options = Some(vec!["Sábado".to_string(), "Domingo".to_string()]);
    let form = CreateFormUseCase::execute(
        &db,
        &actor(&admin),
        form_request(
            FormStatus::Published,
            vec![
                field("Nome", FieldType::Text, true),
                field("Idade", FieldType::Number, false),
                dias,
            ],
        ),
    )
    .await
    .expect("Form should be created");
    let nome = form.fields[0].id;
    let idade = form.fields[1].id;
    let dias = form.fields[2].id;

    // Missing required field and a bad number are both reported
    let err = SubmitResponseUseCase::execute(
        &db,
        &LogNotifier,
        &form.public_token,
        None,
        SubmitResponseRequest {
            respondent_email: None,
            answers: vec![answer(idade, json!("abc"))],
        },
    )
    .await
    .unwrap_err();
    match err {
        AppError::Validation(msg) => {
            assert!(msg.contains("'Nome' is required"));
            assert!(msg.contains("'Idade' must be a number"));
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let receipt = SubmitResponseUseCase::execute(
        &db,
        &LogNotifier,
        &form.public_token,
        None,
        SubmitResponseRequest {
            respondent_email: Some("Visitante@Example.com".to_string()),
            answers: vec![
                answer(dias, json!(["Domingo"])),
                answer(nome, json!("João")),
                answer(idade, json!(34)),
            ],
        },
    )
    .await
    .expect("Valid submission should be stored");

    let stored = form_answers::Entity::find()
        .all(&db)
        .await
        .expect("Answers should load");
    assert_eq!(stored.len(), 3);
    assert!(stored.iter().all(|a| a.response_id == receipt.response_id));

    let responses = ListFormResponsesUseCase::execute(&db, form.id)
        .await
        .expect("Responses should load");
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].respondent_email.as_deref(), Some("visitante@example.com"));
    let labels: Vec<&str> = responses[0].answers.iter().map(|a| a.field_label.as_str()).collect();
    assert_eq!(labels, vec!["Nome", "Idade", "Dias"]);
    assert_eq!(responses[0].answers[2].value, r#"["Domingo"]"#);
}

#[tokio::test]
async fn test_submission_requires_auth_when_configured() {
    let db = setup_db().await;
    let admin = create_user(&db, "admin@example.com", UserRole::Admin, true).await;
    let member = create_user(&db, "membro@example.com", UserRole::Member, true).await;

    let mut req = form_request(FormStatus::Published, vec![field("Nome", FieldType::Text, true)]);
    req.require_auth = true;
    req.email_enabled = true;
    req.email_subject = Some("Obrigado: {{title}}".to_string());
    let form = CreateFormUseCase::execute(&db, &actor(&admin), req)
        .await
        .expect("Form should be created");
    let nome = form.fields[0].id;

    let submit = || SubmitResponseRequest {
        respondent_email: None,
        answers: vec![answer(nome, json!("Ana"))],
    };

    let err = SubmitResponseUseCase::execute(&db, &LogNotifier, &form.public_token, None, submit())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 401);

    let notifier = RecordingNotifier::default();
    SubmitResponseUseCase::execute(&db, &notifier, &form.public_token, Some(&actor(&member)), submit())
        .await
        .expect("Signed-in submission should succeed");

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "membro@example.com");
    assert_eq!(sent[0].subject, "Obrigado: Cadastro de Voluntários");
    drop(sent);

    let response = form_responses::Entity::find()
        .one(&db)
        .await
        .expect("Query should succeed")
        .expect("Response should exist");
    assert_eq!(response.respondent_user_id, Some(member.id));
}

#[tokio::test]
async fn test_notification_failure_keeps_submission() {
    let db = setup_db().await;
    let admin = create_user(&db, "admin@example.com", UserRole::Admin, true).await;

    let mut req = form_request(FormStatus::Published, vec![field("Nome", FieldType::Text, true)]);
    req.email_enabled = true;
    let form = CreateFormUseCase::execute(&db, &actor(&admin), req)
        .await
        .expect("Form should be created");

    SubmitResponseUseCase::execute(
        &db,
        &FailingNotifier,
        &form.public_token,
        None,
        SubmitResponseRequest {
            respondent_email: Some("ana@example.com".to_string()),
            answers: vec![answer(form.fields[0].id, json!("Ana"))],
        },
    )
    .await
    .expect("Submission should survive a mail failure");

    let count = form_responses::Entity::find().count(&db).await.expect("Count should succeed");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_replacing_fields_keeps_old_answers() {
    let db = setup_db().await;
    let admin = create_user(&db, "admin@example.com", UserRole::Admin, true).await;

    let form = CreateFormUseCase::execute(
        &db,
        &actor(&admin),
        form_request(FormStatus::Published, vec![field("Nome", FieldType::Text, true)]),
    )
    .await
    .expect("Form should be created");

    SubmitResponseUseCase::execute(
        &db,
        &LogNotifier,
        &form.public_token,
        None,
        SubmitResponseRequest {
            respondent_email: None,
            answers: vec![answer(form.fields[0].id, json!("Ana"))],
        },
    )
    .await
    .expect("Submission should succeed");

    UpdateFormUseCase::execute(
        &db,
        form.id,
        UpdateFormRequest {
            fields: Some(vec![field("Nome completo", FieldType::Text, true)]),
            ..Default::default()
        },
    )
    .await
    .expect("Field replacement should succeed");

    let responses = ListFormResponsesUseCase::execute(&db, form.id)
        .await
        .expect("Responses should load");
    assert_eq!(responses[0].answers.len(), 1);
    assert_eq!(responses[0].answers[0].field_id, None);
    assert_eq!(responses[0].answers[0].field_label, "Nome");
    assert_eq!(responses[0].answers[0].value, "Ana");
}

#[tokio::test]
async fn test_delete_cascades_and_list_counts() {
    let db = setup_db().await;
    let admin = create_user(&db, "admin@example.com", UserRole::Admin, true).await;

    let form = CreateFormUseCase::execute(
        &db,
        &actor(&admin),
        form_request(
            FormStatus::Published,
            vec![field("Nome", FieldType::Text, true), field("Email", FieldType::Email, false)],
        ),
    )
    .await
    .expect("Form should be created");

    SubmitResponseUseCase::execute(
        &db,
        &LogNotifier,
        &form.private_token,
        None,
        SubmitResponseRequest {
            respondent_email: None,
            answers: vec![answer(form.fields[0].id, json!("Ana"))],
        },
    )
    .await
    .expect("Submission should succeed");

    let list = ListFormsUseCase::execute(&db).await.expect("List should succeed");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].field_count, 2);
    assert_eq!(list[0].response_count, 1);

    DeleteFormUseCase::execute(&db, form.id).await.expect("Delete should succeed");

    assert_eq!(form_fields::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(form_responses::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(form_answers::Entity::find().count(&db).await.unwrap(), 0);

    let err = GetFormUseCase::execute(&db, form.id).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
}
