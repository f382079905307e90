use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Category, JournalCustomization, Product, ProductReview};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub category_id: Uuid,
    pub name: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    #[serde(default)]
    pub stock: i32,
    pub cover_type: Option<String>,
    pub size: Option<String>,
    pub pages: Option<i32>,
    pub paper_type: Option<String>,
    pub color: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_bestseller: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub category_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    /// Ends a sale; wins over `sale_price`.
    #[serde(default)]
    pub clear_sale_price: bool,
    pub stock: Option<i32>,
    pub is_available: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_new: Option<bool>,
    pub is_bestseller: Option<bool>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Serialize, ToSchema)]
pub struct HomePage {
    pub categories: Vec<Category>,
    pub featured: Vec<Product>,
    pub new_arrivals: Vec<Product>,
    pub bestsellers: Vec<Product>,
}

#[derive(Serialize, ToSchema)]
pub struct CategoryPage {
    pub category: Category,
    pub products: Vec<Product>,
}

#[derive(Serialize, ToSchema)]
pub struct ProductDetail {
    pub product: Product,
    pub category: Category,
    pub related: Vec<Product>,
    pub reviews: Vec<ProductReview>,
    /// Mean of approved ratings to one decimal place, 0 when there are none.
    pub average_rating: Decimal,
    pub review_count: i64,
}

#[derive(Serialize, ToSchema)]
pub struct SearchResults {
    pub query: String,
    pub products: Vec<Product>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ReviewRequest {
    pub name: String,
    pub email: String,
    pub rating: Option<i32>,
    pub comment: String,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ReviewList {
    #[schema(value_type = Vec<ProductReview>)]
    pub items: Vec<ProductReview>,
}

#[derive(Serialize, ToSchema)]
pub struct CustomizationOptions {
    pub product_id: Uuid,
    pub allow_cover_text: bool,
    pub allow_cover_material: bool,
    pub allow_cover_color: bool,
    pub allow_page_type: bool,
    pub allow_page_count: bool,
    pub materials: Vec<String>,
    pub colors: Vec<String>,
    pub page_types: Vec<String>,
    pub text_emboss_price: Decimal,
    pub leather_price: Decimal,
    pub vegan_leather_price: Decimal,
    pub extra_pages_price: Decimal,
    pub presets: Vec<JournalCustomization>,
}
