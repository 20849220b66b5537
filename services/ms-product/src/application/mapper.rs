//! Product <-> ProductDto 转换

use crate::application::dto::ProductDto;
use crate::domain::Product;

/// DTO 转换为未保存的商品，不含 ID、分类与删除状态
pub fn to_entity(dto: &ProductDto) -> Product {
    Product::new(
        dto.title.clone().unwrap_or_default(),
        dto.description.clone(),
        dto.price,
        dto.image.clone(),
    )
}

/// 商品转换为 DTO，分类展平为名称
pub fn to_dto(product: &Product) -> ProductDto {
    ProductDto {
        id: product.id(),
        title: Some(product.title().to_string()),
        description: product.description().map(str::to_string),
        price: product.price(),
        image: product.image().map(str::to_string),
        deleted: product.is_deleted(),
        deleted_on: product.deleted_on(),
        category: product.category().map(|c| c.name().to_string()),
    }
}
