use super::dtos::{EmpresaInput, EmpresaResponse, ListEmpresasQuery};
use crate::auth::dtos::Actor;
use crate::{AppError, AppResult};
use chrono::Utc;
use ecclesia_core::entities::{empresas, user_empresas};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Owner ids per company, for the given companies.
async fn owners_by_empresa<C: ConnectionTrait>(
    conn: &C,
    empresa_ids: Vec<Uuid>,
) -> AppResult<HashMap<Uuid, Vec<Uuid>>> {
    if empresa_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let links = user_empresas::Entity::find()
        .filter(user_empresas::Column::EmpresaId.is_in(empresa_ids))
        .all(conn)
        .await?;

    let mut owners: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for link in links {
        owners.entry(link.empresa_id).or_default().push(link.user_id);
    }
    Ok(owners)
}

/// Loads a company and checks the actor is one of its owners or an admin.
async fn find_manageable<C: ConnectionTrait>(
    conn: &C,
    empresa_id: Uuid,
    actor: &Actor,
) -> AppResult<(empresas::Model, Vec<Uuid>)> {
    let empresa = empresas::Entity::find_by_id(empresa_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Empresa {} not found", empresa_id)))?;

    let owner_ids = owners_by_empresa(conn, vec![empresa_id])
        .await?
        .remove(&empresa_id)
        .unwrap_or_default();

    if !actor.is_admin() && !owner_ids.contains(&actor.user_id) {
        return Err(AppError::Authorization(
            "Only the company's owners or an admin can change it".to_string(),
        ));
    }

    Ok((empresa, owner_ids))
}

// ============ List ============

pub struct ListEmpresasUseCase;

impl ListEmpresasUseCase {
    pub async fn execute(
        db: &DatabaseConnection,
        query: ListEmpresasQuery,
    ) -> AppResult<Vec<EmpresaResponse>> {
        let mut select = empresas::Entity::find().order_by_asc(empresas::Column::Name);

        if let Some(q) = query.q.map(|q| q.trim().to_string()).filter(|q| !q.is_empty()) {
            select = select.filter(
                Condition::any()
                    .add(empresas::Column::Name.contains(&q))
                    .add(empresas::Column::Segment.contains(&q)),
            );
        }

        let rows = select.all(db).await?;
        let mut owners = owners_by_empresa(db, rows.iter().map(|e| e.id).collect()).await?;

        Ok(rows
            .into_iter()
            .map(|e| {
                let owner_ids = owners.remove(&e.id).unwrap_or_default();
                EmpresaResponse::from_model(e, owner_ids)
            })
            .collect())
    }
}

// ============ Get ============

pub struct GetEmpresaUseCase;

impl GetEmpresaUseCase {
    pub async fn execute(db: &DatabaseConnection, empresa_id: Uuid) -> AppResult<EmpresaResponse> {
        let empresa = empresas::Entity::find_by_id(empresa_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Empresa {} not found", empresa_id)))?;

        let owner_ids = owners_by_empresa(db, vec![empresa_id])
            .await?
            .remove(&empresa_id)
            .unwrap_or_default();

        Ok(EmpresaResponse::from_model(empresa, owner_ids))
    }
}

// ============ Create ============

pub struct CreateEmpresaUseCase;

impl CreateEmpresaUseCase {
    #[instrument(skip(db, req), fields(user_id = %actor.user_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        actor: &Actor,
        req: EmpresaInput,
    ) -> AppResult<EmpresaResponse> {
        req.validate()?;

        let txn = db.begin().await?;

        let empresa = req.into_active_model(Uuid::new_v4()).insert(&txn).await?;

        user_empresas::ActiveModel {
            user_id: Set(actor.user_id),
            empresa_id: Set(empresa.id),
            created_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(empresa_id = %empresa.id, "Empresa created");
        Ok(EmpresaResponse::from_model(empresa, vec![actor.user_id]))
    }
}

// ============ Update ============

pub struct UpdateEmpresaUseCase;

impl UpdateEmpresaUseCase {
    #[instrument(skip(db, req), fields(user_id = %actor.user_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        actor: &Actor,
        empresa_id: Uuid,
        req: EmpresaInput,
    ) -> AppResult<EmpresaResponse> {
        req.validate()?;

        let (empresa, owner_ids) = find_manageable(db, empresa_id, actor).await?;

        let mut active: empresas::ActiveModel = empresa.into();
        req.apply(&mut active);
        let updated = active.update(db).await?;

        Ok(EmpresaResponse::from_model(updated, owner_ids))
    }
}

// ============ Delete ============

pub struct DeleteEmpresaUseCase;

impl DeleteEmpresaUseCase {
    #[instrument(skip(db), fields(user_id = %actor.user_id))]
    pub async fn execute(db: &DatabaseConnection, actor: &Actor, empresa_id: Uuid) -> AppResult<()> {
        let (empresa, _) = find_manageable(db, empresa_id, actor).await?;

        // user_empresas rows go with it (ON DELETE CASCADE)
        empresa.delete(db).await?;

        info!(empresa_id = %empresa_id, "Empresa deleted");
        Ok(())
    }
}
