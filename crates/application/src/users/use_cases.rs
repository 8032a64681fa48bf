use super::dtos::{ListUsersQuery, ReviewAction, ReviewOutcome};
use crate::auth::dtos::{Actor, UserProfile};
use crate::{AppError, AppResult};
use chrono::Utc;
use ecclesia_core::entities::{empresas, user_empresas, users};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;
use tracing::{info, instrument};
use uuid::Uuid;

// ============ List ============

pub struct ListUsersUseCase;

impl ListUsersUseCase {
    pub async fn execute(
        db: &DatabaseConnection,
        query: ListUsersQuery,
    ) -> AppResult<Vec<UserProfile>> {
        let mut select = users::Entity::find().order_by_desc(users::Column::CreatedAt);
        if let Some(status) = query.status {
            select = select.filter(users::Column::Approved.eq(status.approved()));
        }

        Ok(select.all(db).await?.into_iter().map(Into::into).collect())
    }
}

// ============ Review ============

pub struct ReviewUserUseCase;

impl ReviewUserUseCase {
    /// Approves a pending user, or rejects them.
    ///
    /// Rejection deletes the user together with every company they own alone.
    /// Companies shared with another owner only lose the link.
    #[instrument(skip(db), fields(admin_id = %actor.user_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        actor: &Actor,
        user_id: Uuid,
        action: ReviewAction,
    ) -> AppResult<ReviewOutcome> {
        if !actor.is_admin() {
            return Err(AppError::Authorization("Admin access required".to_string()));
        }
        if actor.user_id == user_id {
            return Err(AppError::Validation("You cannot review your own account".to_string()));
        }

        let txn = db.begin().await?;

        let user = users::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        let outcome = match action {
            ReviewAction::Approve => {
                let mut active: users::ActiveModel = user.into();
                active.approved = Set(true);
                active.updated_at = Set(Utc::now().into());
                let user = active.update(&txn).await?;

                info!(user_id = %user_id, "User approved");
                ReviewOutcome::Approved { user: user.into() }
            }
            ReviewAction::Reject => {
                let owned: Vec<Uuid> = user_empresas::Entity::find()
                    .filter(user_empresas::Column::UserId.eq(user_id))
                    .all(&txn)
                    .await?
                    .into_iter()
                    .map(|l| l.empresa_id)
                    .collect();

                let mut owner_counts: HashMap<Uuid, usize> = HashMap::new();
                if !owned.is_empty() {
                    for link in user_empresas::Entity::find()
                        .filter(user_empresas::Column::EmpresaId.is_in(owned.clone()))
                        .all(&txn)
                        .await?
                    {
                        *owner_counts.entry(link.empresa_id).or_default() += 1;
                    }
                }

                let sole: Vec<Uuid> = owned
                    .into_iter()
                    .filter(|id| owner_counts.get(id).copied().unwrap_or(0) <= 1)
                    .collect();

                let removed_empresas = if sole.is_empty() {
                    0
                } else {
                    empresas::Entity::delete_many()
                        .filter(empresas::Column::Id.is_in(sole))
                        .exec(&txn)
                        .await?
                        .rows_affected
                };

                // Remaining links, group leadership and form authorship follow the FKs
                user.delete(&txn).await?;

                info!(user_id = %user_id, removed_empresas, "User rejected");
                ReviewOutcome::Rejected { removed_empresas }
            }
        };

        txn.commit().await?;
        Ok(outcome)
    }
}
