use super::dtos::*;
use super::fields::{normalize_fields, NormalizedField};
use crate::auth::dtos::Actor;
use crate::validation::clean_optional;
use crate::{AppError, AppResult};
use chrono::Utc;
use ecclesia_core::entities::{
    form_answers, form_fields, form_responses, forms,
    sea_orm_active_enums::{FormStatus, FormVisibility},
};
use rand::{distributions::Alphanumeric, Rng};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use std::collections::HashMap;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

const PUBLIC_TOKEN_LEN: usize = 24;
const PRIVATE_TOKEN_LEN: usize = 32;

pub fn generate_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// A form with no fields may not go live.
pub fn ensure_publishable(status: FormStatus, field_count: usize) -> AppResult<()> {
    if status == FormStatus::Published && field_count == 0 {
        return Err(AppError::Validation(
            "A form needs at least one field to be published".to_string(),
        ));
    }
    Ok(())
}

async fn insert_fields<C: ConnectionTrait>(
    conn: &C,
    form_id: Uuid,
    fields: Vec<NormalizedField>,
) -> AppResult<Vec<form_fields::Model>> {
    let mut stored = Vec::with_capacity(fields.len());
    for field in fields {
        let model = form_fields::ActiveModel {
            id: Set(Uuid::new_v4()),
            form_id: Set(form_id),
            label: Set(field.label),
            field_type: Set(field.field_type),
            required: Set(field.required),
            placeholder: Set(field.placeholder),
            help_text: Set(field.help_text),
            options: Set(field.options.map(|o| serde_json::json!(o))),
            order: Set(field.order),
        }
        .insert(conn)
        .await?;
        stored.push(model);
    }
    Ok(stored)
}

pub(crate) async fn load_fields<C: ConnectionTrait>(
    conn: &C,
    form_id: Uuid,
) -> AppResult<Vec<form_fields::Model>> {
    Ok(form_fields::Entity::find()
        .filter(form_fields::Column::FormId.eq(form_id))
        .order_by_asc(form_fields::Column::Order)
        .all(conn)
        .await?)
}

async fn count_responses<C: ConnectionTrait>(conn: &C, form_id: Uuid) -> AppResult<u64> {
    Ok(form_responses::Entity::find()
        .filter(form_responses::Column::FormId.eq(form_id))
        .count(conn)
        .await?)
}

async fn find_form<C: ConnectionTrait>(conn: &C, form_id: Uuid) -> AppResult<forms::Model> {
    forms::Entity::find_by_id(form_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Form {} not found", form_id)))
}

/// Row counts grouped by form id.
async fn counts_by_form<C, E>(
    conn: &C,
    form_column: E::Column,
    id_column: E::Column,
) -> AppResult<HashMap<Uuid, u64>>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let rows: Vec<(Uuid, i64)> = E::find()
        .select_only()
        .column(form_column)
        .column_as(Expr::col(id_column).count(), "count")
        .group_by(form_column)
        .into_tuple()
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(form_id, count)| (form_id, count.max(0) as u64))
        .collect())
}

// ============ Create ============

pub struct CreateFormUseCase;

impl CreateFormUseCase {
    #[instrument(skip(db, req), fields(user_id = %actor.user_id, title = %req.title))]
    pub async fn execute(
        db: &DatabaseConnection,
        actor: &Actor,
        req: CreateFormRequest,
    ) -> AppResult<FormDetail> {
        req.validate()?;

        let fields = normalize_fields(req.fields)?;
        let status = req.status.unwrap_or(FormStatus::Draft);
        ensure_publishable(status, fields.len())?;

        let now = Utc::now();
        let txn = db.begin().await?;

        let form = forms::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(req.title.trim().to_string()),
            description: Set(clean_optional(req.description)),
            status: Set(status),
            visibility: Set(req.visibility.unwrap_or(FormVisibility::Public)),
            require_auth: Set(req.require_auth),
            email_enabled: Set(req.email_enabled),
            email_subject: Set(clean_optional(req.email_subject)),
            email_body: Set(clean_optional(req.email_body)),
            public_token: Set(generate_token(PUBLIC_TOKEN_LEN)),
            private_token: Set(generate_token(PRIVATE_TOKEN_LEN)),
            created_by_id: Set(Some(actor.user_id)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        let stored = insert_fields(&txn, form.id, fields).await?;

        txn.commit().await?;

        info!(form_id = %form.id, fields = stored.len(), "Form created");
        Ok(FormDetail::from_parts(form, stored, 0))
    }
}

// ============ Update ============

pub struct UpdateFormUseCase;

impl UpdateFormUseCase {
    #[instrument(skip(db, req))]
    pub async fn execute(
        db: &DatabaseConnection,
        form_id: Uuid,
        req: UpdateFormRequest,
    ) -> AppResult<FormDetail> {
        req.validate()?;

        let replacement = match req.fields {
            Some(inputs) => Some(normalize_fields(inputs)?),
            None => None,
        };

        let txn = db.begin().await?;

        let form = find_form(&txn, form_id).await?;

        let field_count = match &replacement {
            Some(fields) => fields.len(),
            None => load_fields(&txn, form_id).await?.len(),
        };
        let status = req.status.unwrap_or(form.status);
        ensure_publishable(status, field_count)?;

        let mut active: forms::ActiveModel = form.into();
        if let Some(title) = req.title {
            active.title = Set(title.trim().to_string());
        }
        if req.description.is_some() {
            active.description = Set(clean_optional(req.description));
        }
        active.status = Set(status);
        if let Some(visibility) = req.visibility {
            active.visibility = Set(visibility);
        }
        if let Some(require_auth) = req.require_auth {
            active.require_auth = Set(require_auth);
        }
        if let Some(email_enabled) = req.email_enabled {
            active.email_enabled = Set(email_enabled);
        }
        if req.email_subject.is_some() {
            active.email_subject = Set(clean_optional(req.email_subject));
        }
        if req.email_body.is_some() {
            active.email_body = Set(clean_optional(req.email_body));
        }
        active.updated_at = Set(Utc::now().into());
        let form = active.update(&txn).await?;

        // Replace wholesale: old answers keep their label snapshot, field_id goes NULL
        let fields = match replacement {
            Some(fields) => {
                form_fields::Entity::delete_many()
                    .filter(form_fields::Column::FormId.eq(form_id))
                    .exec(&txn)
                    .await?;
                insert_fields(&txn, form_id, fields).await?
            }
            None => load_fields(&txn, form_id).await?,
        };
        let response_count = count_responses(&txn, form_id).await?;

        txn.commit().await?;

        info!(form_id = %form_id, status = ?status, "Form updated");
        Ok(FormDetail::from_parts(form, fields, response_count))
    }
}

// ============ Get ============

pub struct GetFormUseCase;

impl GetFormUseCase {
    pub async fn execute(db: &DatabaseConnection, form_id: Uuid) -> AppResult<FormDetail> {
        let form = find_form(db, form_id).await?;
        let fields = load_fields(db, form_id).await?;
        let response_count = count_responses(db, form_id).await?;

        Ok(FormDetail::from_parts(form, fields, response_count))
    }
}

// ============ List ============

pub struct ListFormsUseCase;

impl ListFormsUseCase {
    pub async fn execute(db: &DatabaseConnection) -> AppResult<Vec<FormSummary>> {
        let rows = forms::Entity::find()
            .order_by_desc(forms::Column::CreatedAt)
            .all(db)
            .await?;

        let field_counts = counts_by_form::<_, form_fields::Entity>(
            db,
            form_fields::Column::FormId,
            form_fields::Column::Id,
        )
        .await?;
        let response_counts = counts_by_form::<_, form_responses::Entity>(
            db,
            form_responses::Column::FormId,
            form_responses::Column::Id,
        )
        .await?;

        Ok(rows
            .into_iter()
            .map(|form| FormSummary {
                field_count: field_counts.get(&form.id).copied().unwrap_or(0),
                response_count: response_counts.get(&form.id).copied().unwrap_or(0),
                id: form.id,
                title: form.title,
                status: form.status,
                visibility: form.visibility,
                public_token: form.public_token,
                private_token: form.private_token,
                created_at: form.created_at.with_timezone(&Utc),
                updated_at: form.updated_at.with_timezone(&Utc),
            })
            .collect())
    }
}

// ============ Delete ============

pub struct DeleteFormUseCase;

impl DeleteFormUseCase {
    #[instrument(skip(db))]
    pub async fn execute(db: &DatabaseConnection, form_id: Uuid) -> AppResult<()> {
        let form = find_form(db, form_id).await?;

        // Fields, responses and their answers go with it (ON DELETE CASCADE)
        form.delete(db).await?;

        info!(form_id = %form_id, "Form deleted");
        Ok(())
    }
}

// ============ Responses ============

pub struct ListFormResponsesUseCase;

impl ListFormResponsesUseCase {
    pub async fn execute(db: &DatabaseConnection, form_id: Uuid) -> AppResult<Vec<SubmissionDto>> {
        find_form(db, form_id).await?;

        let responses = form_responses::Entity::find()
            .filter(form_responses::Column::FormId.eq(form_id))
            .order_by_desc(form_responses::Column::SubmittedAt)
            .all(db)
            .await?;

        if responses.is_empty() {
            return Ok(Vec::new());
        }

        let positions: HashMap<Uuid, i32> = load_fields(db, form_id)
            .await?
            .into_iter()
            .map(|f| (f.id, f.order))
            .collect();

        let mut answers: HashMap<Uuid, Vec<form_answers::Model>> = HashMap::new();
        for answer in form_answers::Entity::find()
            .filter(form_answers::Column::ResponseId.is_in(responses.iter().map(|r| r.id)))
            .all(db)
            .await?
        {
            answers.entry(answer.response_id).or_default().push(answer);
        }

        Ok(responses
            .into_iter()
            .map(|response| {
                let mut list = answers.remove(&response.id).unwrap_or_default();
                // Current field order first; answers to removed fields trail by label
                list.sort_by(|a, b| {
                    let pa = a.field_id.and_then(|id| positions.get(&id)).copied().unwrap_or(i32::MAX);
                    let pb = b.field_id.and_then(|id| positions.get(&id)).copied().unwrap_or(i32::MAX);
                    pa.cmp(&pb).then_with(|| a.field_label.cmp(&b.field_label))
                });

                SubmissionDto {
                    id: response.id,
                    respondent_email: response.respondent_email,
                    respondent_user_id: response.respondent_user_id,
                    submitted_at: response.submitted_at.with_timezone(&Utc),
                    answers: list.into_iter().map(Into::into).collect(),
                }
            })
            .collect())
    }
}
