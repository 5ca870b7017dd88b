use chrono::NaiveTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QuerySelect, Set, SqlErr,
};
use serde::Serialize;
use tracing::debug;

use models::store::{self, Entity as StoreEntity};
use models::supplier::{self, Entity as SupplierEntity};

use crate::errors::ServiceError;
use crate::pagination::{total_pages, Page, PageQuery};

/// Reduced supplier view for the highest-friendliness query;
/// id and score are deliberately omitted.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SupplierContact {
    pub name: String,
    pub phone_number: String,
}

/// List stores, optionally filtered by a keyword matched as a substring
/// of name or address.
pub async fn list_stores(
    db: &DatabaseConnection,
    page: PageQuery,
    keyword: Option<&str>,
) -> Result<Page<store::Model>, ServiceError> {
    if page.page_size == 0 {
        return Err(ServiceError::Validation("pageSize must be greater than zero".into()));
    }
    let mut finder = StoreEntity::find();
    if let Some(kw) = keyword.filter(|k| !k.is_empty()) {
        finder = finder.filter(
            Condition::any()
                .add(store::Column::Name.contains(kw))
                .add(store::Column::Address.contains(kw)),
        );
    }
    let total_items = finder
        .clone()
        .count(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let items = finder
        .offset(page.offset())
        .limit(page.page_size)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    debug!(total_items, page_index = page.page_index, "listed stores");
    Ok(Page { total_items, total_pages: total_pages(total_items, page.page_size), items })
}

/// Get a store by id.
pub async fn get_store(db: &DatabaseConnection, id: i32) -> Result<Option<store::Model>, ServiceError> {
    let found = StoreEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Create a store. Name conflicts surface from the database unique key.
pub async fn create_store(
    db: &DatabaseConnection,
    name: &str,
    address: &str,
    opening_time: NaiveTime,
    closing_time: NaiveTime,
    friendliness_level: f32,
) -> Result<store::Model, ServiceError> {
    let created = store::create(db, name, address, opening_time, closing_time, friendliness_level).await?;
    Ok(created)
}

/// Overwrite the five mutable fields of an existing store.
pub async fn update_store(
    db: &DatabaseConnection,
    id: i32,
    name: &str,
    address: &str,
    opening_time: NaiveTime,
    closing_time: NaiveTime,
    friendliness_level: f32,
) -> Result<store::Model, ServiceError> {
    // Existence first: a bad payload against a missing id is still a 404.
    let existing = StoreEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("store"))?;
    store::validate_name(name)?;
    store::validate_address(address)?;
    let mut am: store::ActiveModel = existing.into();
    am.name = Set(name.to_string());
    am.address = Set(address.to_string());
    am.opening_time = Set(opening_time);
    am.closing_time = Set(closing_time);
    am.friendliness_level = Set(friendliness_level);
    match am.update(db).await {
        Ok(updated) => Ok(updated),
        // Keeping the store's own name does not trip the unique key;
        // taking another store's name does.
        Err(e) => match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Err(ServiceError::Conflict("store name already exists".into()))
            }
            _ => Err(ServiceError::Db(e.to_string())),
        },
    }
}

/// Delete a store; returns true if deleted. Suppliers go with it (FK cascade).
pub async fn delete_store(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = StoreEntity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

/// Suppliers of the given store holding the maximum friendliness score.
/// A store without suppliers yields an empty list.
pub async fn top_suppliers(
    db: &DatabaseConnection,
    store_id: i32,
) -> Result<Vec<SupplierContact>, ServiceError> {
    let found = StoreEntity::find_by_id(store_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("store"))?;
    let suppliers = found
        .find_related(SupplierEntity)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(pick_top(suppliers))
}

// Exact float equality: every supplier tied at the maximum is returned.
fn pick_top(suppliers: Vec<supplier::Model>) -> Vec<SupplierContact> {
    let Some(max) = suppliers.iter().map(|s| s.friendliness_level).reduce(f32::max) else {
        return Vec::new();
    };
    suppliers
        .into_iter()
        .filter(|s| s.friendliness_level == max)
        .map(|s| SupplierContact { name: s.name, phone_number: s.phone_number })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use uuid::Uuid;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn sup(name: &str, phone: &str, friendliness: f32) -> supplier::Model {
        supplier::Model {
            id: 0,
            name: name.to_string(),
            phone_number: phone.to_string(),
            friendliness_level: friendliness,
            store_id: 0,
        }
    }

    #[test]
    fn pick_top_keeps_all_ties() {
        let picked = pick_top(vec![sup("A", "111", 5.0), sup("B", "222", 9.0), sup("C", "333", 9.0)]);
        assert_eq!(picked.len(), 2);
        assert!(picked.contains(&SupplierContact { name: "B".into(), phone_number: "222".into() }));
        assert!(picked.contains(&SupplierContact { name: "C".into(), phone_number: "333".into() }));
    }

    #[test]
    fn pick_top_empty_list_is_empty() {
        assert!(pick_top(Vec::new()).is_empty());
    }

    #[test]
    fn supplier_contact_serializes_name_and_phone_only() {
        let json = serde_json::to_value(sup_contact()).unwrap();
        assert_eq!(json.get("Name").unwrap(), "B");
        assert_eq!(json.get("PhoneNumber").unwrap(), "222");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    fn sup_contact() -> SupplierContact {
        SupplierContact { name: "B".into(), phone_number: "222".into() }
    }

    #[tokio::test]
    async fn store_crud_service() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return Ok(());
            }
        };

        let name = format!("svc_store_{}", Uuid::new_v4());
        let created = create_store(&db, &name, "1 Main St", t(8, 0), t(22, 0), 4.5).await?;
        assert!(created.id > 0);

        let found = get_store(&db, created.id).await?.unwrap();
        assert_eq!(found.name, name);
        assert_eq!(found.opening_time, t(8, 0));

        // Duplicate name regardless of other fields
        let dup = create_store(&db, &name, "9 Other Rd", t(6, 0), t(20, 0), 1.0).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));

        // Update keeping the own name succeeds
        let updated = update_store(&db, created.id, &name, "2 Main St", t(9, 0), t(21, 0), 3.0).await?;
        assert_eq!(updated.address, "2 Main St");

        // Update to another store's name conflicts
        let other_name = format!("svc_store_{}", Uuid::new_v4());
        let other = create_store(&db, &other_name, "3 Side St", t(8, 0), t(22, 0), 2.0).await?;
        let clash = update_store(&db, other.id, &name, "3 Side St", t(8, 0), t(22, 0), 2.0).await;
        assert!(matches!(clash, Err(ServiceError::Conflict(_))));

        // Update of a missing id, even with an invalid payload, is NotFound
        let missing = update_store(&db, i32::MAX, "nope", "x", t(8, 0), t(22, 0), 0.0).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        let missing_blank = update_store(&db, i32::MAX, "  ", "x", t(8, 0), t(22, 0), 0.0).await;
        assert!(matches!(missing_blank, Err(ServiceError::NotFound(_))));

        // Invalid payloads against an existing store are Validation
        let blank = update_store(&db, created.id, "  ", "x", t(8, 0), t(22, 0), 0.0).await;
        assert!(matches!(blank, Err(ServiceError::Validation(_))));
        let long_name = create_store(&db, &"n".repeat(200), "x", t(8, 0), t(22, 0), 0.0).await;
        assert!(matches!(long_name, Err(ServiceError::Validation(_))));
        let long_addr = update_store(&db, created.id, &name, &"a".repeat(600), t(8, 0), t(22, 0), 0.0).await;
        assert!(matches!(long_addr, Err(ServiceError::Validation(_))));

        // Suppliers: empty list yields empty result, then ties at the max
        assert!(top_suppliers(&db, created.id).await?.is_empty());
        for (n, p, f) in [("A", "111", 5.0f32), ("B", "222", 9.0), ("C", "333", 9.0)] {
            let am = supplier::ActiveModel {
                name: sea_orm::Set(n.to_string()),
                phone_number: sea_orm::Set(p.to_string()),
                friendliness_level: sea_orm::Set(f),
                store_id: sea_orm::Set(created.id),
                ..Default::default()
            };
            am.insert(&db).await?;
        }
        let mut top = top_suppliers(&db, created.id).await?;
        top.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            top,
            vec![
                SupplierContact { name: "B".into(), phone_number: "222".into() },
                SupplierContact { name: "C".into(), phone_number: "333".into() },
            ]
        );
        let absent = top_suppliers(&db, i32::MAX).await;
        assert!(matches!(absent, Err(ServiceError::NotFound(_))));

        // Delete cascades and reports absence afterwards
        assert!(delete_store(&db, created.id).await?);
        assert!(get_store(&db, created.id).await?.is_none());
        assert!(!delete_store(&db, created.id).await?);
        assert!(delete_store(&db, other.id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn list_stores_paginates_and_filters() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return Ok(());
            }
        };

        // Unique marker so the keyword filter only sees this test's rows
        let marker = Uuid::new_v4().simple().to_string();
        let mut ids = Vec::new();
        for i in 0..5 {
            let name = format!("list_{}_{}", marker, i);
            let addr = if i % 2 == 0 { format!("{} Ave {}", marker, i) } else { format!("Plain St {}", i) };
            let m = create_store(&db, &name, &addr, t(8, 0), t(22, 0), i as f32).await?;
            ids.push(m.id);
        }

        let page = list_stores(&db, PageQuery { page_size: 2, page_index: 0 }, Some(&marker)).await?;
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 2);

        let last = list_stores(&db, PageQuery { page_size: 2, page_index: 2 }, Some(&marker)).await?;
        assert_eq!(last.items.len(), 1);

        let beyond = list_stores(&db, PageQuery { page_size: 2, page_index: 9 }, Some(&marker)).await?;
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_items, 5);

        // Keyword matches address as well as name
        let by_addr = list_stores(&db, PageQuery::default(), Some(&format!("{} Ave", marker))).await?;
        assert_eq!(by_addr.total_items, 3);

        let zero = list_stores(&db, PageQuery { page_size: 0, page_index: 0 }, None).await;
        assert!(matches!(zero, Err(ServiceError::Validation(_))));

        for id in ids {
            delete_store(&db, id).await?;
        }
        Ok(())
    }
}
