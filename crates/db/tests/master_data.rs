//! Integration tests for the master-data repositories.

use assert_matches::assert_matches;
use sqlx::PgPool;
use seeker_core::master_data::MasterDataKind;
use seeker_db::models::category::CreateCategory;
use seeker_db::models::country::{CreateCountry, UpdateCountry};
use seeker_db::models::lookup::{CreateLookupItem, UpdateLookupItem};
use seeker_db::repositories::{CategoryRepo, CountryRepo, LookupRepo};

fn new_lookup(name: &str) -> CreateLookupItem {
    CreateLookupItem {
        name: name.to_string(),
        description: None,
        sort_order: None,
        is_active: None,
    }
}

fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            db.constraint().map(str::to_string)
        }
        _ => None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lookup_crud_for_every_kind(pool: PgPool) {
    for kind in MasterDataKind::ALL {
        let created = LookupRepo::create(&pool, kind, &new_lookup("Zeta"))
            .await
            .unwrap();
        assert!(created.is_active);
        assert_eq!(created.sort_order, 0);

        let found = LookupRepo::find_by_id(&pool, kind, created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "Zeta");

        let updated = LookupRepo::update(
            &pool,
            kind,
            created.id,
            &UpdateLookupItem {
                name: None,
                description: Some("Last".into()),
                sort_order: Some(99),
                is_active: Some(false),
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(updated.name, "Zeta");
        assert_eq!(updated.description.as_deref(), Some("Last"));
        assert!(!updated.is_active);
        assert!(updated.updated_at >= created.updated_at);

        assert!(LookupRepo::delete(&pool, kind, created.id).await.unwrap());
        assert!(!LookupRepo::delete(&pool, kind, created.id).await.unwrap());
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lookup_list_hides_inactive_by_default(pool: PgPool) {
    let kind = MasterDataKind::RewardTypes;
    let retired = LookupRepo::create(
        &pool,
        kind,
        &CreateLookupItem {
            is_active: Some(false),
            ..new_lookup("Equity")
        },
    )
    .await
    .unwrap();

    let active = LookupRepo::list(&pool, kind, false).await.unwrap();
    assert!(active.iter().all(|r| r.id != retired.id));

    let all = LookupRepo::list(&pool, kind, true).await.unwrap();
    assert!(all.iter().any(|r| r.id == retired.id));

    assert!(!LookupRepo::exists_active(&pool, kind, retired.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lookup_duplicate_name_is_unique_violation(pool: PgPool) {
    let err = LookupRepo::create(&pool, MasterDataKind::OrganizationTypes, &new_lookup("Startup"))
        .await
        .unwrap_err();
    assert_eq!(
        unique_violation(&err).as_deref(),
        Some("uq_organization_types_name")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_country_code_constraint_and_update(pool: PgPool) {
    let country = CountryRepo::create(
        &pool,
        &CreateCountry {
            code: "FR".into(),
            name: "France".into(),
            phone_code: Some("+33".into()),
            sort_order: Some(5),
            is_active: None,
        },
    )
    .await
    .unwrap();

    let dup = CountryRepo::create(
        &pool,
        &CreateCountry {
            code: "FR".into(),
            name: "French Republic".into(),
            phone_code: None,
            sort_order: None,
            is_active: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(unique_violation(&dup).as_deref(), Some("uq_countries_code"));

    let updated = CountryRepo::update(
        &pool,
        country.id,
        &UpdateCountry {
            code: None,
            name: Some("France (Metropolitan)".into()),
            phone_code: None,
            sort_order: None,
            is_active: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.code, "FR");
    assert_eq!(updated.phone_code.as_deref(), Some("+33"));

    assert!(CountryRepo::update(
        &pool,
        999_999,
        &UpdateCountry {
            code: None,
            name: Some("Nowhere".into()),
            phone_code: None,
            sort_order: None,
            is_active: None,
        },
    )
    .await
    .unwrap()
    .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_referenced_domain_group_cannot_be_deleted(pool: PgPool) {
    let groups = LookupRepo::list(&pool, MasterDataKind::DomainGroups, false)
        .await
        .unwrap();
    let group = &groups[0];

    let category = CategoryRepo::create(
        &pool,
        &CreateCategory {
            domain_group_id: group.id,
            name: "Cloud Migration".into(),
            description: None,
            sort_order: None,
            is_active: None,
        },
    )
    .await
    .unwrap();

    let err = LookupRepo::delete(&pool, MasterDataKind::DomainGroups, group.id)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23503")
    );

    let in_group = CategoryRepo::list(&pool, Some(group.id), false).await.unwrap();
    assert_eq!(in_group.len(), 1);
    assert_eq!(in_group[0].id, category.id);

    let other = CategoryRepo::list(&pool, Some(groups[1].id), false).await.unwrap();
    assert!(other.is_empty());
}
