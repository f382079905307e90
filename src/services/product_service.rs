use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select, Set,
    sea_query::{Expr, Func, IntoColumnRef, LikeExpr, Query, SimpleExpr},
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::products::{
        CategoryPage, CustomizationOptions, HomePage, ProductDetail, ProductList, ReviewRequest,
        SearchResults,
    },
    entity::{
        categories::{self, Column as CategoryCol, Entity as Categories, Model as CategoryModel},
        customizable_products::{self, Column as CustomizableCol, Entity as CustomizableProducts},
        journal_customizations::{Column as PresetCol, Entity as JournalCustomizations},
        product_reviews::{ActiveModel as ReviewActive, Column as ReviewCol, Entity as ProductReviews},
        products::{self, Column as ProdCol, Entity as Products, Model as ProductModel},
    },
    error::{AppError, AppResult},
    models::{Category, JournalCustomization, Product, ProductReview},
    response::{ApiResponse, Meta},
    routes::params::{CATALOG_PAGE_SIZE, ProductQuery, ProductSort, SearchQuery},
    state::AppState,
};

const HOME_SECTION_SIZE: u64 = 8;
const RELATED_PRODUCTS: u64 = 4;

/// Lower-case, ASCII alphanumerics separated by single hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Mean of the ratings to one decimal place; zero when there are none.
pub fn average_rating(ratings: &[i32]) -> Decimal {
    if ratings.is_empty() {
        return Decimal::ZERO;
    }
    let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
    (Decimal::from(sum) / Decimal::from(ratings.len() as i64))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

fn split_options(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

const LIKE_ESCAPE: char = '!';

/// Escapes LIKE wildcards so user text matches literally under `ESCAPE '!'`.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '%' | '_') || ch == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

fn contains_ci<T: IntoColumnRef>(col: T, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

fn available() -> Select<Products> {
    Products::find().filter(ProdCol::IsAvailable.eq(true))
}

fn sorted(finder: Select<Products>, sort: ProductSort) -> Select<Products> {
    match sort {
        ProductSort::PriceLow => finder.order_by_asc(ProdCol::Price),
        ProductSort::PriceHigh => finder.order_by_desc(ProdCol::Price),
        ProductSort::Name => finder.order_by_asc(ProdCol::Name),
        ProductSort::Newest => finder.order_by_desc(ProdCol::CreatedAt),
    }
}

fn catalog_filters(query: &ProductQuery) -> Condition {
    let mut condition = Condition::all();

    if let Some(search) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        condition = condition.add(
            Condition::any()
                .add(contains_ci((Products, ProdCol::Name), search))
                .add(contains_ci((Products, ProdCol::Description), search))
                .add(contains_ci((Products, ProdCol::ShortDescription), search)),
        );
    }

    if let Some(slug) = query.category.as_deref().filter(|s| !s.is_empty()) {
        condition = condition.add(
            ProdCol::CategoryId.in_subquery(
                Query::select()
                    .column(CategoryCol::Id)
                    .from(Categories)
                    .and_where(CategoryCol::Slug.eq(slug))
                    .to_owned(),
            ),
        );
    }

    if let Some(min_price) = query.min_price {
        condition = condition.add(ProdCol::Price.gte(min_price));
    }
    if let Some(max_price) = query.max_price {
        condition = condition.add(ProdCol::Price.lte(max_price));
    }
    if let Some(cover_type) = query.cover_type.as_deref().filter(|s| !s.is_empty()) {
        condition = condition.add(ProdCol::CoverType.eq(cover_type));
    }
    if let Some(size) = query.size.as_deref().filter(|s| !s.is_empty()) {
        condition = condition.add(ProdCol::Size.eq(size));
    }
    if query.customizable == Some(true) {
        condition = condition.add(
            ProdCol::Id.in_subquery(
                Query::select()
                    .column(CustomizableCol::ProductId)
                    .from(CustomizableProducts)
                    .to_owned(),
            ),
        );
    }

    condition
}

async fn paginate(
    state: &AppState,
    finder: Select<Products>,
    page: i64,
    limit: i64,
    offset: i64,
) -> AppResult<(Vec<Product>, Meta)> {
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();
    Ok((items, Meta::new(page, limit, total)))
}

async fn active_categories(state: &AppState) -> AppResult<Vec<Category>> {
    Ok(Categories::find()
        .filter(CategoryCol::IsActive.eq(true))
        .order_by_asc(CategoryCol::DisplayOrder)
        .order_by_asc(CategoryCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Category::from)
        .collect())
}

async fn home_section(state: &AppState, flag: ProdCol) -> AppResult<Vec<Product>> {
    Ok(available()
        .filter(flag.eq(true))
        .order_by_desc(ProdCol::CreatedAt)
        .limit(HOME_SECTION_SIZE)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect())
}

pub async fn home(state: &AppState) -> AppResult<ApiResponse<HomePage>> {
    let data = HomePage {
        categories: active_categories(state).await?,
        featured: home_section(state, ProdCol::IsFeatured).await?,
        new_arrivals: home_section(state, ProdCol::IsNew).await?,
        bestsellers: home_section(state, ProdCol::IsBestseller).await?,
    };
    Ok(ApiResponse::success("Home", data, Some(Meta::empty())))
}

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<Vec<Category>>> {
    let items = active_categories(state).await?;
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Categories",
        items,
        Some(Meta::list(total)),
    ))
}

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination().normalize_with(CATALOG_PAGE_SIZE);
    let finder = sorted(
        available().filter(catalog_filters(&query)),
        query.sort.unwrap_or_default(),
    );

    let (items, meta) = paginate(state, finder, page, limit, offset).await?;
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

async fn active_category_by_slug(state: &AppState, slug: &str) -> AppResult<CategoryModel> {
    let category = Categories::find()
        .filter(CategoryCol::Slug.eq(slug))
        .filter(CategoryCol::IsActive.eq(true))
        .one(&state.orm)
        .await?;
    match category {
        Some(c) => Ok(c),
        None => Err(AppError::NotFound("Category")),
    }
}

pub async fn category_detail(
    state: &AppState,
    slug: &str,
    query: ProductQuery,
) -> AppResult<ApiResponse<CategoryPage>> {
    let category = active_category_by_slug(state, slug).await?;
    let (page, limit, offset) = query.pagination().normalize_with(CATALOG_PAGE_SIZE);
    let finder = sorted(
        available().filter(ProdCol::CategoryId.eq(category.id)),
        query.sort.unwrap_or_default(),
    );

    let (products, meta) = paginate(state, finder, page, limit, offset).await?;
    Ok(ApiResponse::success(
        category.name.clone(),
        CategoryPage {
            category: category.into(),
            products,
        },
        Some(meta),
    ))
}

async fn available_by_slug(state: &AppState, slug: &str) -> AppResult<ProductModel> {
    let product = available()
        .filter(ProdCol::Slug.eq(slug))
        .one(&state.orm)
        .await?;
    match product {
        Some(p) => Ok(p),
        None => Err(AppError::NotFound("Product")),
    }
}

pub async fn product_detail(state: &AppState, slug: &str) -> AppResult<ApiResponse<ProductDetail>> {
    let product = available_by_slug(state, slug).await?;

    let category = match Categories::find_by_id(product.category_id).one(&state.orm).await? {
        Some(c) => c,
        None => return Err(AppError::NotFound("Category")),
    };

    let related = available()
        .filter(ProdCol::CategoryId.eq(product.category_id))
        .filter(ProdCol::Id.ne(product.id))
        .order_by_desc(ProdCol::CreatedAt)
        .limit(RELATED_PRODUCTS)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let reviews = ProductReviews::find()
        .filter(ReviewCol::ProductId.eq(product.id))
        .filter(ReviewCol::IsApproved.eq(true))
        .order_by_desc(ReviewCol::CreatedAt)
        .all(&state.orm)
        .await?;
    let ratings: Vec<i32> = reviews.iter().map(|r| r.rating).collect();

    Ok(ApiResponse::success(
        product.name.clone(),
        ProductDetail {
            product: product.into(),
            category: category.into(),
            related,
            average_rating: average_rating(&ratings),
            review_count: reviews.len() as i64,
            reviews: reviews.into_iter().map(ProductReview::from).collect(),
        },
        Some(Meta::empty()),
    ))
}

/// Matches product name, description and category name. A blank query
/// returns nothing.
pub async fn search(state: &AppState, query: SearchQuery) -> AppResult<ApiResponse<SearchResults>> {
    let (page, limit, offset) = query.pagination().normalize_with(CATALOG_PAGE_SIZE);
    let q = query.q.as_deref().map(str::trim).unwrap_or_default().to_string();
    if q.is_empty() {
        return Ok(ApiResponse::success(
            "Search",
            SearchResults {
                query: q,
                products: Vec::new(),
            },
            Some(Meta::new(page, limit, 0)),
        ));
    }

    let finder = available()
        .join(JoinType::InnerJoin, products::Relation::Categories.def())
        .filter(
            Condition::any()
                .add(contains_ci((Products, ProdCol::Name), &q))
                .add(contains_ci((Products, ProdCol::Description), &q))
                .add(contains_ci((categories::Entity, CategoryCol::Name), &q)),
        )
        .order_by_desc(ProdCol::CreatedAt);

    let (products, meta) = paginate(state, finder, page, limit, offset).await?;
    Ok(ApiResponse::success(
        format!("Search results for \"{q}\""),
        SearchResults { query: q, products },
        Some(meta),
    ))
}

/// Stores a review for moderation; it is hidden until approved.
pub async fn submit_review(
    state: &AppState,
    slug: &str,
    payload: ReviewRequest,
) -> AppResult<ApiResponse<ProductReview>> {
    let product = available_by_slug(state, slug).await?;

    let rating = match payload.rating {
        Some(r) if (1..=5).contains(&r) => r,
        Some(_) => return Err(AppError::Validation("Rating must be between 1 and 5".into())),
        None => return Err(AppError::Validation("Please fill in all fields".into())),
    };
    if payload.name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.comment.trim().is_empty()
    {
        return Err(AppError::Validation("Please fill in all fields".into()));
    }

    let review = ReviewActive {
        id: Set(Uuid::new_v4()),
        product_id: Set(product.id),
        name: Set(payload.name.trim().to_string()),
        email: Set(payload.email.trim().to_string()),
        rating: Set(rating),
        comment: Set(payload.comment.trim().to_string()),
        is_approved: Set(false),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.orm,
        None,
        None,
        "review_submit",
        Some("product_reviews"),
        Some(serde_json::json!({ "review_id": review.id, "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Thank you for your review! It will be published after moderation.",
        review.into(),
        Some(Meta::empty()),
    ))
}

pub async fn customization_options(
    state: &AppState,
    slug: &str,
) -> AppResult<ApiResponse<CustomizationOptions>> {
    let product = available_by_slug(state, slug).await?;

    let options = CustomizableProducts::find()
        .filter(CustomizableCol::ProductId.eq(product.id))
        .one(&state.orm)
        .await?;
    let options: customizable_products::Model = match options {
        Some(o) => o,
        None => return Err(AppError::NotFound("Customization options")),
    };

    let presets = JournalCustomizations::find()
        .filter(PresetCol::ProductId.eq(product.id))
        .filter(PresetCol::IsActive.eq(true))
        .order_by_asc(PresetCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(JournalCustomization::from)
        .collect();

    Ok(ApiResponse::success(
        "Customization options",
        CustomizationOptions {
            product_id: product.id,
            allow_cover_text: options.allow_cover_text,
            allow_cover_material: options.allow_cover_material,
            allow_cover_color: options.allow_cover_color,
            allow_page_type: options.allow_page_type,
            allow_page_count: options.allow_page_count,
            materials: split_options(&options.available_materials),
            colors: split_options(&options.available_colors),
            page_types: split_options(&options.available_page_types),
            text_emboss_price: options.text_emboss_price,
            leather_price: options.leather_price,
            vegan_leather_price: options.vegan_leather_price,
            extra_pages_price: options.extra_pages_price,
            presets,
        },
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_quotes_wildcards() {
        assert_eq!(escape_like("50% off"), "50!% off");
        assert_eq!(escape_like("a_b"), "a!_b");
        assert_eq!(escape_like("wow!"), "wow!!");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Leather Journal A5"), "leather-journal-a5");
        assert_eq!(slugify("  Pens & Pencils!  "), "pens-pencils");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn average_rating_rounds_to_one_place() {
        assert_eq!(average_rating(&[]), Decimal::ZERO);
        assert_eq!(average_rating(&[5, 4]), Decimal::new(45, 1));
        // 13 / 3 = 4.333..
        assert_eq!(average_rating(&[5, 4, 4]), Decimal::new(43, 1));
        // 4.25 rounds up
        assert_eq!(average_rating(&[5, 4, 4, 4]), Decimal::new(43, 1));
    }

    #[test]
    fn option_lists_are_trimmed() {
        assert_eq!(
            split_options(" leather, vegan_leather ,,fabric"),
            vec!["leather", "vegan_leather", "fabric"]
        );
        assert!(split_options("").is_empty());
    }
}
