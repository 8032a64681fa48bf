use super::demographics::{age_distribution, gender_by_culto};
use super::dtos::*;
use crate::validation::clean_optional;
use crate::{AppError, AppResult};
use chrono::Utc;
use ecclesia_core::entities::{
    empresas, forms, grupos,
    sea_orm_active_enums::{Culto, FormStatus, Gender},
    users, visitantes,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

fn filter_range(select: Select<visitantes::Entity>, range: &DateRange) -> Select<visitantes::Entity> {
    let mut select = select;
    if let Some(start) = range.start {
        select = select.filter(visitantes::Column::VisitDate.gte(start));
    }
    if let Some(end) = range.end {
        select = select.filter(visitantes::Column::VisitDate.lte(end));
    }
    select
}

// ============ Register ============

pub struct RegisterVisitorUseCase;

impl RegisterVisitorUseCase {
    #[instrument(skip(db, req), fields(culto = ?req.culto))]
    pub async fn execute(
        db: &DatabaseConnection,
        req: RegisterVisitorRequest,
    ) -> AppResult<VisitorResponse> {
        req.validate()?;

        let now = Utc::now();
        let visitor = visitantes::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(req.name.trim().to_string()),
            phone: Set(clean_optional(req.phone)),
            email: Set(clean_optional(req.email).map(|e| e.to_lowercase())),
            gender: Set(req.gender),
            age: Set(req.age),
            culto: Set(req.culto),
            visit_date: Set(req.visit_date.unwrap_or_else(|| now.date_naive())),
            first_time: Set(req.first_time),
            how_found: Set(clean_optional(req.how_found)),
            prayer_request: Set(clean_optional(req.prayer_request)),
            wants_contact: Set(req.wants_contact),
            created_at: Set(now.into()),
        }
        .insert(db)
        .await?;

        info!(visitor_id = %visitor.id, "Visitor registered");
        Ok(visitor.into())
    }
}

// ============ List ============

pub struct ListVisitorsUseCase;

impl ListVisitorsUseCase {
    pub async fn execute(
        db: &DatabaseConnection,
        query: ListVisitorsQuery,
    ) -> AppResult<Vec<VisitorResponse>> {
        let range = query.range();
        range.validate()?;

        let mut select = filter_range(visitantes::Entity::find(), &range);
        if let Some(culto) = query.culto {
            select = select.filter(visitantes::Column::Culto.eq(culto));
        }

        let rows = select
            .order_by_desc(visitantes::Column::VisitDate)
            .order_by_desc(visitantes::Column::CreatedAt)
            .all(db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// ============ Delete ============

pub struct DeleteVisitorUseCase;

impl DeleteVisitorUseCase {
    #[instrument(skip(db))]
    pub async fn execute(db: &DatabaseConnection, visitor_id: Uuid) -> AppResult<()> {
        let visitor = visitantes::Entity::find_by_id(visitor_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Visitor {} not found", visitor_id)))?;

        visitor.delete(db).await?;
        Ok(())
    }
}

// ============ Gender by service ============

pub struct GenderByCultoUseCase;

impl GenderByCultoUseCase {
    #[instrument(skip(db))]
    pub async fn execute(db: &DatabaseConnection, range: DateRange) -> AppResult<Vec<GenderByCulto>> {
        range.validate()?;

        let rows: Vec<(Culto, Gender)> = filter_range(visitantes::Entity::find(), &range)
            .select_only()
            .column(visitantes::Column::Culto)
            .column(visitantes::Column::Gender)
            .into_tuple()
            .all(db)
            .await?;

        Ok(gender_by_culto(rows))
    }
}

// ============ Age brackets ============

pub struct AgeDistributionUseCase;

impl AgeDistributionUseCase {
    #[instrument(skip(db))]
    pub async fn execute(db: &DatabaseConnection, range: DateRange) -> AppResult<AgeDistribution> {
        range.validate()?;

        let ages: Vec<Option<i32>> = filter_range(visitantes::Entity::find(), &range)
            .select_only()
            .column(visitantes::Column::Age)
            .into_tuple()
            .all(db)
            .await?;

        Ok(age_distribution(ages))
    }
}

// ============ Summary ============

pub struct DashboardSummaryUseCase;

impl DashboardSummaryUseCase {
    pub async fn execute(db: &DatabaseConnection, range: DateRange) -> AppResult<DashboardSummary> {
        range.validate()?;

        let visitors = filter_range(visitantes::Entity::find(), &range).count(db).await?;
        let first_time_visitors = filter_range(visitantes::Entity::find(), &range)
            .filter(visitantes::Column::FirstTime.eq(true))
            .count(db)
            .await?;
        let pending_users = users::Entity::find()
            .filter(users::Column::Approved.eq(false))
            .count(db)
            .await?;
        let grupos = grupos::Entity::find()
            .filter(grupos::Column::Active.eq(true))
            .count(db)
            .await?;
        let empresas = empresas::Entity::find().count(db).await?;
        let published_forms = forms::Entity::find()
            .filter(forms::Column::Status.eq(FormStatus::Published))
            .count(db)
            .await?;

        Ok(DashboardSummary {
            visitors,
            first_time_visitors,
            pending_users,
            grupos,
            empresas,
            published_forms,
        })
    }
}
