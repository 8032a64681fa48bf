use super::dtos::{GrupoInput, GrupoResponse, LeaderDto, ListGruposQuery};
use crate::validation::clean_optional;
use crate::{AppError, AppResult};
use chrono::Utc;
use ecclesia_core::entities::{grupo_lideres, grupos, users};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::{BTreeSet, HashMap};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

async fn leaders_by_grupo<C: ConnectionTrait>(
    conn: &C,
    grupo_ids: Vec<Uuid>,
) -> AppResult<HashMap<Uuid, Vec<LeaderDto>>> {
    if grupo_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let links = grupo_lideres::Entity::find()
        .filter(grupo_lideres::Column::GrupoId.is_in(grupo_ids))
        .all(conn)
        .await?;

    let user_ids: BTreeSet<Uuid> = links.iter().map(|l| l.user_id).collect();
    let users_by_id: HashMap<Uuid, users::Model> = users::Entity::find()
        .filter(users::Column::Id.is_in(user_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let mut leaders: HashMap<Uuid, Vec<LeaderDto>> = HashMap::new();
    for link in links {
        if let Some(user) = users_by_id.get(&link.user_id) {
            leaders
                .entry(link.grupo_id)
                .or_default()
                .push(user.clone().into());
        }
    }
    for list in leaders.values_mut() {
        list.sort_by(|a, b| a.name.cmp(&b.name));
    }
    Ok(leaders)
}

/// Replaces the leader links of a group. Every id must reference an existing user.
async fn replace_leaders<C: ConnectionTrait>(
    conn: &C,
    grupo_id: Uuid,
    leader_ids: &[Uuid],
) -> AppResult<()> {
    let wanted: BTreeSet<Uuid> = leader_ids.iter().copied().collect();

    if !wanted.is_empty() {
        let found = users::Entity::find()
            .filter(users::Column::Id.is_in(wanted.iter().copied()))
            .all(conn)
            .await?;
        if found.len() != wanted.len() {
            return Err(AppError::Validation("Unknown leader id".to_string()));
        }
    }

    grupo_lideres::Entity::delete_many()
        .filter(grupo_lideres::Column::GrupoId.eq(grupo_id))
        .exec(conn)
        .await?;

    if !wanted.is_empty() {
        let rows = wanted.into_iter().map(|user_id| grupo_lideres::ActiveModel {
            grupo_id: Set(grupo_id),
            user_id: Set(user_id),
        });
        grupo_lideres::Entity::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
    }

    Ok(())
}

fn apply(input: GrupoInput, active: &mut grupos::ActiveModel) -> Vec<Uuid> {
    active.name = Set(input.name.trim().to_string());
    active.description = Set(clean_optional(input.description));
    active.weekday = Set(input.weekday);
    active.meeting_time = Set(input.meeting_time);
    active.address = Set(clean_optional(input.address));
    active.neighborhood = Set(clean_optional(input.neighborhood));
    active.image_url = Set(clean_optional(input.image_url));
    active.active = Set(input.active);
    active.updated_at = Set(Utc::now().into());
    input.leader_ids
}

// ============ List ============

pub struct ListGruposUseCase;

impl ListGruposUseCase {
    pub async fn execute(
        db: &DatabaseConnection,
        query: ListGruposQuery,
    ) -> AppResult<Vec<GrupoResponse>> {
        let mut select = grupos::Entity::find().order_by_asc(grupos::Column::Name);
        if let Some(active) = query.active {
            select = select.filter(grupos::Column::Active.eq(active));
        }

        let rows = select.all(db).await?;
        let mut leaders = leaders_by_grupo(db, rows.iter().map(|g| g.id).collect()).await?;

        Ok(rows
            .into_iter()
            .map(|g| {
                let list = leaders.remove(&g.id).unwrap_or_default();
                GrupoResponse::from_model(g, list)
            })
            .collect())
    }
}

// ============ Get ============

pub struct GetGrupoUseCase;

impl GetGrupoUseCase {
    pub async fn execute(db: &DatabaseConnection, grupo_id: Uuid) -> AppResult<GrupoResponse> {
        let grupo = grupos::Entity::find_by_id(grupo_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Grupo {} not found", grupo_id)))?;

        let leaders = leaders_by_grupo(db, vec![grupo_id])
            .await?
            .remove(&grupo_id)
            .unwrap_or_default();

        Ok(GrupoResponse::from_model(grupo, leaders))
    }
}

// ============ Create ============

pub struct CreateGrupoUseCase;

impl CreateGrupoUseCase {
    #[instrument(skip(db, req), fields(name = %req.name))]
    pub async fn execute(db: &DatabaseConnection, req: GrupoInput) -> AppResult<GrupoResponse> {
        req.validate()?;

        let txn = db.begin().await?;

        let mut active = grupos::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let leader_ids = apply(req, &mut active);
        let grupo = active.insert(&txn).await?;

        replace_leaders(&txn, grupo.id, &leader_ids).await?;
        let leaders = leaders_by_grupo(&txn, vec![grupo.id])
            .await?
            .remove(&grupo.id)
            .unwrap_or_default();

        txn.commit().await?;

        info!(grupo_id = %grupo.id, "Grupo created");
        Ok(GrupoResponse::from_model(grupo, leaders))
    }
}

// ============ Update ============

pub struct UpdateGrupoUseCase;

impl UpdateGrupoUseCase {
    #[instrument(skip(db, req))]
    pub async fn execute(
        db: &DatabaseConnection,
        grupo_id: Uuid,
        req: GrupoInput,
    ) -> AppResult<GrupoResponse> {
        req.validate()?;

        let txn = db.begin().await?;

        let grupo = grupos::Entity::find_by_id(grupo_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Grupo {} not found", grupo_id)))?;

        let mut active: grupos::ActiveModel = grupo.into();
        let leader_ids = apply(req, &mut active);
        let grupo = active.update(&txn).await?;

        replace_leaders(&txn, grupo.id, &leader_ids).await?;
        let leaders = leaders_by_grupo(&txn, vec![grupo.id])
            .await?
            .remove(&grupo.id)
            .unwrap_or_default();

        txn.commit().await?;

        Ok(GrupoResponse::from_model(grupo, leaders))
    }
}

// ============ Delete ============

pub struct DeleteGrupoUseCase;

impl DeleteGrupoUseCase {
    #[instrument(skip(db))]
    pub async fn execute(db: &DatabaseConnection, grupo_id: Uuid) -> AppResult<()> {
        let grupo = grupos::Entity::find_by_id(grupo_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Grupo {} not found", grupo_id)))?;

        grupo.delete(db).await?;

        info!(grupo_id = %grupo_id, "Grupo deleted");
        Ok(())
    }
}
