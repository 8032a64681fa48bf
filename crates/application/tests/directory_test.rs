mod common;

use application::empresas::dtos::{EmpresaInput, ListEmpresasQuery};
use application::empresas::use_cases::{
    CreateEmpresaUseCase, DeleteEmpresaUseCase, ListEmpresasUseCase, UpdateEmpresaUseCase,
};
use application::grupos::dtos::{GrupoInput, ListGruposQuery};
use application::grupos::use_cases::{
    CreateGrupoUseCase, DeleteGrupoUseCase, GetGrupoUseCase, ListGruposUseCase, UpdateGrupoUseCase,
};
use common::{actor, create_user, setup_db};
use ecclesia_core::entities::{grupo_lideres, sea_orm_active_enums::UserRole};
use sea_orm::{EntityTrait, PaginatorTrait};

fn grupo(name: &str, leader_ids: Vec<uuid::Uuid>) -> GrupoInput {
    GrupoInput {
        name: name.to_string(),
        description: None,
        weekday: "quarta".to_string(),
        meeting_time: "19:30".to_string(),
        address: Some("Rua das Flores, 10".to_string()),
        neighborhood: Some("Centro".to_string()),
        image_url: None,
        active: true,
        leader_ids,
    }
}

fn empresa(name: &str, segment: &str) -> EmpresaInput {
    EmpresaInput {
        name: name.to_string(),
        description: None,
        segment: Some(segment.to_string()),
        phone: None,
        email: None,
        website: None,
        instagram: None,
        address: None,
        logo_url: None,
    }
}

#[tokio::test]
async fn test_grupo_leaders_are_replaced() {
    let db = setup_db().await;
    let ana = create_user(&db, "ana@example.com", UserRole::Member, true).await;
    let bruno = create_user(&db, "bruno@example.com", UserRole::Member, true).await;

    let created = CreateGrupoUseCase::execute(&db, grupo("GP Esperança", vec![ana.id, bruno.id]))
        .await
        .expect("Grupo should be created");
    assert_eq!(created.leaders.len(), 2);

    let updated = UpdateGrupoUseCase::execute(&db, created.id, grupo("GP Esperança", vec![bruno.id]))
        .await
        .expect("Grupo should be updated");
    assert_eq!(updated.leaders.len(), 1);
    assert_eq!(updated.leaders[0].id, bruno.id);

    let fetched = GetGrupoUseCase::execute(&db, created.id).await.expect("Grupo should load");
    assert_eq!(fetched.leaders.len(), 1);

    DeleteGrupoUseCase::execute(&db, created.id).await.expect("Delete should succeed");
    assert_eq!(grupo_lideres::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_grupo_unknown_leader_rolls_back() {
    let db = setup_db().await;

    let err = CreateGrupoUseCase::execute(&db, grupo("GP Fé", vec![uuid::Uuid::new_v4()]))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);

    let all = ListGruposUseCase::execute(&db, ListGruposQuery::default())
        .await
        .expect("List should succeed");
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_grupo_active_filter() {
    let db = setup_db().await;

    CreateGrupoUseCase::execute(&db, grupo("GP Ativo", vec![])).await.unwrap();
    let mut inactive = grupo("GP Pausado", vec![]);
    inactive.active = false;
    CreateGrupoUseCase::execute(&db, inactive).await.unwrap();

    let active = ListGruposUseCase::execute(&db, ListGruposQuery { active: Some(true) })
        .await
        .expect("List should succeed");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "GP Ativo");
}

#[tokio::test]
async fn test_empresa_ownership() {
    let db = setup_db().await;
    let owner = create_user(&db, "dono@example.com", UserRole::Member, true).await;
    let other = create_user(&db, "outro@example.com", UserRole::Member, true).await;
    let admin = create_user(&db, "admin@example.com", UserRole::Admin, true).await;

    let created = CreateEmpresaUseCase::execute(&db, &actor(&owner), empresa("Café Graça", "Alimentação"))
        .await
        .expect("Company should be created");
    assert_eq!(created.owner_ids, vec![owner.id]);

    let err = UpdateEmpresaUseCase::execute(&db, &actor(&other), created.id, empresa("Tomado", "X"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 403);

    let updated = UpdateEmpresaUseCase::execute(&db, &actor(&admin), created.id, empresa("Café Graça & Cia", "Alimentação"))
        .await
        .expect("Admin may edit");
    assert_eq!(updated.name, "Café Graça & Cia");

    let found = ListEmpresasUseCase::execute(&db, ListEmpresasQuery { q: Some("Graça".to_string()) })
        .await
        .expect("Search should succeed");
    assert_eq!(found.len(), 1);
    let none = ListEmpresasUseCase::execute(&db, ListEmpresasQuery { q: Some("Oficina".to_string()) })
        .await
        .expect("Search should succeed");
    assert!(none.is_empty());

    DeleteEmpresaUseCase::execute(&db, &actor(&owner), created.id)
        .await
        .expect("Owner may delete");
}
