//! 商品服务流程测试
//!
//! 使用内存仓储驱动 `ProductService` 的查询、创建与更新。

use std::sync::Arc;

use chrono::Utc;
use cuba_errors::AppError;
use ms_product::domain::{
    AuditInfo, Category, CategoryId, CategoryRepository, DeletionState, ProductId,
};
use ms_product::infrastructure::persistence::{
    InMemoryCategoryRepository, InMemoryProductRepository,
};
use ms_product::{ProductDto, ProductError, ProductService};
use rust_decimal::Decimal;

struct Fixture {
    service: ProductService,
    products: Arc<InMemoryProductRepository>,
    categories: Arc<InMemoryCategoryRepository>,
}

fn fixture() -> Fixture {
    let products = Arc::new(InMemoryProductRepository::new());
    let categories = Arc::new(InMemoryCategoryRepository::new());
    let service = ProductService::new(products.clone(), categories.clone());
    Fixture {
        service,
        products,
        categories,
    }
}

fn dto(title: &str, category: Option<&str>) -> ProductDto {
    ProductDto {
        title: Some(title.to_string()),
        description: Some(format!("{} description", title)),
        price: Some(Decimal::new(1250, 2)),
        image: Some(format!("https://img.example.com/{}.png", title)),
        category: category.map(str::to_string),
        ..Default::default()
    }
}

// ============================================================================
// 查询
// ============================================================================

#[tokio::test]
async fn test_find_all_filters_by_deleted_flag() {
    let f = fixture();
    let kettle = f.service.save_product(&dto("Kettle", None)).await.unwrap();
    f.service.save_product(&dto("Toaster", None)).await.unwrap();
    f.service.delete_product(&kettle.id.unwrap()).await.unwrap();

    let active = f.service.find_all_products(false).await.unwrap();
    let deleted = f.service.find_all_products(true).await.unwrap();

    assert_eq!(active.len(), 1);
    assert_eq!(active[0].title.as_deref(), Some("Toaster"));
    assert!(active.iter().all(|p| !p.deleted));
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].title.as_deref(), Some("Kettle"));
    assert!(deleted.iter().all(|p| p.deleted && p.deleted_on.is_some()));
}

#[tokio::test]
async fn test_find_all_on_empty_store() {
    let f = fixture();
    assert!(f.service.find_all_products(false).await.unwrap().is_empty());
    assert!(f.service.find_all_products(true).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_dto_carries_category_name() {
    let f = fixture();
    let with = f
        .service
        .save_product(&dto("Hammer", Some("Tools")))
        .await
        .unwrap();
    let without = f.service.save_product(&dto("Nail", None)).await.unwrap();

    assert_eq!(with.category.as_deref(), Some("Tools"));
    assert_eq!(without.category, None);

    let listed = f.service.find_all_products(false).await.unwrap();
    assert_eq!(listed[0].category.as_deref(), Some("Tools"));
    assert_eq!(listed[1].category, None);
}

#[tokio::test]
async fn test_find_by_id_round_trip() {
    let f = fixture();
    let saved = f
        .service
        .save_product(&dto("Blender", Some("Kitchen")))
        .await
        .unwrap();

    let found = f
        .service
        .find_product_by_id(&saved.id.unwrap())
        .await
        .unwrap();

    assert_eq!(found, saved);
    assert_eq!(found.price, Some(Decimal::new(1250, 2)));
    assert!(!found.deleted);
    assert!(found.deleted_on.is_none());
}

#[tokio::test]
async fn test_find_by_id_not_found() {
    let f = fixture();
    let err = f
        .service
        .find_product_by_id(&ProductId(42))
        .await
        .unwrap_err();

    assert!(matches!(err, ProductError::NotFound(id) if id == ProductId(42)));
    assert_eq!(AppError::from(err).status_code(), 404);
}

#[tokio::test]
async fn test_find_by_id_rejects_deleted_product() {
    let f = fixture();
    let saved = f.service.save_product(&dto("Mixer", None)).await.unwrap();
    let id = saved.id.unwrap();
    f.service.delete_product(&id).await.unwrap();

    let err = f.service.find_product_by_id(&id).await.unwrap_err();
    assert!(matches!(err, ProductError::AlreadyDeleted(found) if found == id));
}

// ============================================================================
// 创建
// ============================================================================

#[tokio::test]
async fn test_save_assigns_id_and_ignores_client_state() {
    let f = fixture();
    let request = ProductDto {
        id: Some(ProductId(500)),
        deleted: true,
        deleted_on: Some(Utc::now()),
        ..dto("Fan", None)
    };

    let saved = f.service.save_product(&request).await.unwrap();

    assert_eq!(saved.id, Some(ProductId(1)));
    assert!(!saved.deleted);
    assert!(saved.deleted_on.is_none());
}

#[tokio::test]
async fn test_save_rejects_duplicate_active_title() {
    let f = fixture();
    f.service.save_product(&dto("Heater", None)).await.unwrap();

    let err = f
        .service
        .save_product(&dto("Heater", Some("Climate")))
        .await
        .unwrap_err();

    assert!(matches!(err, ProductError::AlreadyExists(ref msg) if msg.contains("Heater")));
    assert_eq!(f.products.len().await, 1);
    assert!(f.categories.all().await.is_empty());
}

#[tokio::test]
async fn test_save_requires_title() {
    let f = fixture();
    let missing = ProductDto {
        title: None,
        ..dto("ignored", None)
    };
    let blank = ProductDto {
        title: Some("  ".to_string()),
        ..dto("ignored", None)
    };

    let err = f.service.save_product(&missing).await.unwrap_err();
    assert!(matches!(err, ProductError::InvalidInput(_)));
    assert_eq!(AppError::from(err).status_code(), 400);

    let err = f.service.save_product(&blank).await.unwrap_err();
    assert!(matches!(err, ProductError::InvalidInput(_)));
    assert!(f.products.is_empty().await);
}

#[tokio::test]
async fn test_save_creates_category_once() {
    let f = fixture();
    let first = ProductDto {
        description: Some("Hand tools".to_string()),
        ..dto("Saw", Some("Tools"))
    };
    f.service.save_product(&first).await.unwrap();
    f.service.save_product(&dto("Drill", Some("Tools"))).await.unwrap();

    let categories = f.categories.all().await;
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name(), "Tools");
    assert_eq!(categories[0].description(), Some("Hand tools"));
    assert!(!categories[0].is_deleted());
}

#[tokio::test]
async fn test_save_does_not_reuse_deleted_category() {
    let f = fixture();
    f.categories.insert(deleted_category("Retro")).await;

    let saved = f
        .service
        .save_product(&dto("Radio", Some("Retro")))
        .await
        .unwrap();

    assert_eq!(saved.category.as_deref(), Some("Retro"));
    let categories = f.categories.all().await;
    assert_eq!(categories.len(), 2);
    assert!(!categories[1].is_deleted());
}

// ============================================================================
// 更新
// ============================================================================

#[tokio::test]
async fn test_update_patches_only_given_fields() {
    let f = fixture();
    let saved = f
        .service
        .save_product(&dto("Chair", Some("Furniture")))
        .await
        .unwrap();
    let id = saved.id.unwrap();

    let patch = ProductDto {
        price: Some(Decimal::new(4999, 2)),
        ..Default::default()
    };
    let updated = f.service.update_product(&id, Some(&patch)).await.unwrap();

    assert_eq!(updated.price, Some(Decimal::new(4999, 2)));
    assert_eq!(updated.title, saved.title);
    assert_eq!(updated.description, saved.description);
    assert_eq!(updated.image, saved.image);
    assert_eq!(updated.category, saved.category);
    assert_eq!(f.categories.all().await.len(), 1);
}

#[tokio::test]
async fn test_update_assigns_new_category() {
    let f = fixture();
    let saved = f.service.save_product(&dto("Desk", None)).await.unwrap();

    let patch = ProductDto {
        category: Some("Office".to_string()),
        description: Some("Standing desk".to_string()),
        ..Default::default()
    };
    let updated = f
        .service
        .update_product(&saved.id.unwrap(), Some(&patch))
        .await
        .unwrap();

    assert_eq!(updated.category.as_deref(), Some("Office"));
    assert_eq!(updated.description.as_deref(), Some("Standing desk"));
    let categories = f.categories.all().await;
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].description(), Some("Standing desk"));
}

#[tokio::test]
async fn test_update_reuses_deleted_category() {
    let f = fixture();
    let retro = f.categories.insert(deleted_category("Retro")).await;
    let saved = f.service.save_product(&dto("Phone", None)).await.unwrap();

    let patch = ProductDto {
        category: Some("Retro".to_string()),
        ..Default::default()
    };
    let updated = f
        .service
        .update_product(&saved.id.unwrap(), Some(&patch))
        .await
        .unwrap();

    assert_eq!(updated.category.as_deref(), Some("Retro"));
    assert_eq!(f.categories.all().await.len(), 1);

    let stored = f.categories.find_by_name("Retro").await.unwrap().unwrap();
    assert_eq!(stored.id(), retro.id());
}

#[tokio::test]
async fn test_update_without_payload_fails() {
    let f = fixture();
    let saved = f.service.save_product(&dto("Sofa", None)).await.unwrap();

    let err = f
        .service
        .update_product(&saved.id.unwrap(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, ProductError::UpdateFailed(_)));
    assert_eq!(AppError::from(err).status_code(), 500);
}

#[tokio::test]
async fn test_update_precondition_priority() {
    let f = fixture();
    let patch = dto("Lamp", None);

    let err = f
        .service
        .update_product(&ProductId(9), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ProductError::NotFound(_)));

    let err = f
        .service
        .update_product(&ProductId(9), Some(&patch))
        .await
        .unwrap_err();
    assert!(matches!(err, ProductError::NotFound(_)));

    let saved = f.service.save_product(&patch).await.unwrap();
    let id = saved.id.unwrap();
    f.service.delete_product(&id).await.unwrap();

    let err = f.service.update_product(&id, None).await.unwrap_err();
    assert!(matches!(err, ProductError::AlreadyDeleted(_)));

    let err = f.service.update_product(&id, Some(&patch)).await.unwrap_err();
    assert!(matches!(err, ProductError::AlreadyDeleted(_)));
}

#[tokio::test]
async fn test_update_to_taken_title_surfaces_store_conflict() {
    let f = fixture();
    f.service.save_product(&dto("Rug", None)).await.unwrap();
    let mat = f.service.save_product(&dto("Mat", None)).await.unwrap();

    let patch = ProductDto {
        title: Some("Rug".to_string()),
        ..Default::default()
    };
    let err = f
        .service
        .update_product(&mat.id.unwrap(), Some(&patch))
        .await
        .unwrap_err();

    assert!(matches!(err, ProductError::Store(ref inner) if inner.is_conflict()));
}

fn deleted_category(name: &str) -> Category {
    Category::from_parts(
        CategoryId(0),
        name.to_string(),
        Some("discontinued".to_string()),
        DeletionState::Deleted { on: Utc::now() },
        AuditInfo::new(),
    )
}
