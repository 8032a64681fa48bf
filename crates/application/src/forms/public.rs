//! Respondent-facing side of forms: token lookup and submissions.

use super::dtos::{PublicFormView, SubmissionReceipt, SubmitResponseRequest};
use super::fields::check_answers;
use super::use_cases::load_fields;
use crate::auth::dtos::Actor;
use crate::auth::use_cases::normalize_email;
use crate::{AppError, AppResult};
use chrono::Utc;
use ecclesia_core::entities::{
    form_answers, form_responses, forms,
    sea_orm_active_enums::{FormStatus, FormVisibility},
    users,
};
use infrastructure::notifications::{Notifier, OutgoingEmail};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

const DEFAULT_EMAIL_SUBJECT: &str = "Recebemos sua resposta: {{title}}";
const DEFAULT_EMAIL_BODY: &str = "Obrigado por responder o formulário \"{{title}}\".";

/// Finds the live form behind a share token.
///
/// The private token always works; the public one only while the form is PUBLIC.
/// Anything not PUBLISHED is reported as missing.
async fn find_by_token<C: ConnectionTrait>(conn: &C, token: &str) -> AppResult<forms::Model> {
    let not_found = || AppError::NotFound("Form not found".to_string());

    if token.is_empty() || token.len() > 64 {
        return Err(not_found());
    }

    let form = forms::Entity::find()
        .filter(
            Condition::any()
                .add(forms::Column::PrivateToken.eq(token))
                .add(
                    Condition::all()
                        .add(forms::Column::PublicToken.eq(token))
                        .add(forms::Column::Visibility.eq(FormVisibility::Public)),
                ),
        )
        .one(conn)
        .await?
        .ok_or_else(not_found)?;

    if form.status != FormStatus::Published {
        return Err(not_found());
    }
    Ok(form)
}

pub fn render_template(template: &str, title: &str) -> String {
    template.replace("{{title}}", title)
}

// ============ Resolve ============

pub struct ResolvePublicFormUseCase;

impl ResolvePublicFormUseCase {
    pub async fn execute(db: &DatabaseConnection, token: &str) -> AppResult<PublicFormView> {
        let form = find_by_token(db, token).await?;
        let fields = load_fields(db, form.id).await?;

        Ok(PublicFormView {
            id: form.id,
            title: form.title,
            description: form.description,
            require_auth: form.require_auth,
            fields: fields.into_iter().map(Into::into).collect(),
        })
    }
}

// ============ Submit ============

pub struct SubmitResponseUseCase;

impl SubmitResponseUseCase {
    #[instrument(skip(db, notifier, token, actor, req), fields(user_id = ?actor.map(|a| a.user_id)))]
    pub async fn execute(
        db: &DatabaseConnection,
        notifier: &dyn Notifier,
        token: &str,
        actor: Option<&Actor>,
        req: SubmitResponseRequest,
    ) -> AppResult<SubmissionReceipt> {
        let form = find_by_token(db, token).await?;

        if form.require_auth && actor.is_none() {
            return Err(AppError::Authentication(
                "Sign in to answer this form".to_string(),
            ));
        }

        req.validate()?;

        let mut respondent_email = req
            .respondent_email
            .as_deref()
            .map(normalize_email)
            .filter(|e| !e.is_empty());
        if respondent_email.is_none() {
            if let Some(actor) = actor {
                respondent_email = users::Entity::find_by_id(actor.user_id)
                    .one(db)
                    .await?
                    .map(|u| u.email);
            }
        }

        let fields = load_fields(db, form.id).await?;
        let answers = check_answers(&fields, req.answers)?;

        let now = Utc::now();
        let txn = db.begin().await?;

        let response = form_responses::ActiveModel {
            id: Set(Uuid::new_v4()),
            form_id: Set(form.id),
            respondent_email: Set(respondent_email.clone()),
            respondent_user_id: Set(actor.map(|a| a.user_id)),
            submitted_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        for answer in answers {
            form_answers::ActiveModel {
                id: Set(Uuid::new_v4()),
                response_id: Set(response.id),
                field_id: Set(Some(answer.field_id)),
                field_label: Set(answer.field_label),
                value: Set(answer.value),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        info!(form_id = %form.id, response_id = %response.id, "Form response stored");

        if form.email_enabled {
            if let Some(to) = respondent_email {
                let subject = form.email_subject.as_deref().unwrap_or(DEFAULT_EMAIL_SUBJECT);
                let body = form.email_body.as_deref().unwrap_or(DEFAULT_EMAIL_BODY);
                let email = OutgoingEmail {
                    to,
                    subject: render_template(subject, &form.title),
                    body: render_template(body, &form.title),
                };
                // The response is already stored; a delivery failure must not undo it
                if let Err(e) = notifier.send_email(email).await {
                    warn!(form_id = %form.id, error = %e, "Failed to send confirmation email");
                }
            }
        }

        Ok(SubmissionReceipt {
            response_id: response.id,
            submitted_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template() {
        assert_eq!(
            render_template("Obrigado: {{title}}", "Cadastro GP"),
            "Obrigado: Cadastro GP"
        );
        assert_eq!(render_template("Sem marcador", "X"), "Sem marcador");
    }
}
