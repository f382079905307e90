mod common;

use common::{create_category, create_product, create_user, dec, setup_state};
use sea_orm::{ActiveModelTrait, Set};
use stationery_shop_api::{
    dto::products::ReviewRequest,
    entity::products,
    error::AppError,
    routes::params::{Pagination, ProductQuery, ProductSort, SearchQuery},
    services::{admin_service, product_service},
};

#[tokio::test]
async fn catalog_filters_and_sorts() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let journals = create_category(&state, "Journals").await?;
    let books = create_category(&state, "Books").await?;
    create_product(&state, &journals, "Dotted Journal", "22.00", None).await?;
    create_product(&state, &journals, "Travel Journal", "35.00", None).await?;
    let softcover = create_product(&state, &books, "Poetry Book", "9.00", None).await?;
    let hidden = create_product(&state, &books, "Retired Book", "5.00", None).await?;

    let mut active: products::ActiveModel = softcover.into();
    active.cover_type = Set(Some("softcover".to_string()));
    active.update(&state.orm).await?;
    let mut active: products::ActiveModel = hidden.into();
    active.is_available = Set(false);
    active.update(&state.orm).await?;

    let all = product_service::list_products(&state, ProductQuery::default()).await?;
    assert_eq!(all.meta.as_ref().and_then(|m| m.total), Some(3));
    assert_eq!(all.meta.as_ref().and_then(|m| m.per_page), Some(12));

    let by_category = product_service::list_products(
        &state,
        ProductQuery {
            category: Some("journals".into()),
            sort: Some(ProductSort::PriceLow),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("products");
    let names: Vec<_> = by_category.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Dotted Journal", "Travel Journal"]);

    let by_price = product_service::list_products(
        &state,
        ProductQuery {
            min_price: Some(dec("10")),
            max_price: Some(dec("30")),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("products");
    assert_eq!(by_price.items.len(), 1);
    assert_eq!(by_price.items[0].name, "Dotted Journal");

    let by_cover = product_service::list_products(
        &state,
        ProductQuery {
            cover_type: Some("softcover".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("products");
    assert_eq!(by_cover.items.len(), 1);
    assert_eq!(by_cover.items[0].name, "Poetry Book");

    let page = product_service::category_detail(&state, "books", ProductQuery::default())
        .await?
        .data
        .expect("category page");
    assert_eq!(page.category.name, "Books");
    assert_eq!(page.products.len(), 1);

    let missing = product_service::category_detail(&state, "pens", ProductQuery::default()).await;
    assert!(matches!(missing, Err(AppError::NotFound("Category"))));
    Ok(())
}

#[tokio::test]
async fn search_matches_name_and_category_case_insensitively() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let diaries = create_category(&state, "Diaries").await?;
    let notebooks = create_category(&state, "Notebooks").await?;
    create_product(&state, &diaries, "Daily Planner", "28.99", None).await?;
    create_product(&state, &notebooks, "Sketch Pad", "12.00", None).await?;

    let by_name = product_service::search(
        &state,
        SearchQuery {
            q: Some("PLANNER".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("results");
    assert_eq!(by_name.products.len(), 1);
    assert_eq!(by_name.products[0].name, "Daily Planner");

    let by_category = product_service::search(
        &state,
        SearchQuery {
            q: Some("notebook".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("results");
    assert_eq!(by_category.products.len(), 1);
    assert_eq!(by_category.products[0].name, "Sketch Pad");

    let blank = product_service::search(
        &state,
        SearchQuery {
            q: Some("   ".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("results");
    assert!(blank.products.is_empty());
    Ok(())
}

#[tokio::test]
async fn reviews_are_hidden_until_approved() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let journals = create_category(&state, "Journals").await?;
    let journal = create_product(&state, &journals, "Leather Journal", "40.00", Some("35.00")).await?;
    let admin = create_user(&state, "admin@example.com", "admin").await?;

    let review = |name: &str, rating: i32| ReviewRequest {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        rating: Some(rating),
        comment: "Lovely paper".to_string(),
    };

    let first = product_service::submit_review(&state, &journal.slug, review("Ann", 5))
        .await?
        .data
        .expect("review");
    assert!(!first.is_approved);
    let second = product_service::submit_review(&state, &journal.slug, review("Ben", 4))
        .await?
        .data
        .expect("review");

    let detail = product_service::product_detail(&state, &journal.slug)
        .await?
        .data
        .expect("detail");
    assert_eq!(detail.review_count, 0);
    assert_eq!(detail.average_rating, dec("0"));
    assert_eq!(detail.product.current_price, dec("35.00"));
    assert_eq!(detail.product.discount_percentage, 13);

    let pending = admin_service::list_pending_reviews(&state, &admin, Pagination::default())
        .await?
        .data
        .expect("pending");
    assert_eq!(pending.items.len(), 2);

    admin_service::approve_review(&state, &admin, first.id).await?;
    admin_service::approve_review(&state, &admin, second.id).await?;

    let detail = product_service::product_detail(&state, &journal.slug)
        .await?
        .data
        .expect("detail");
    assert_eq!(detail.review_count, 2);
    assert_eq!(detail.average_rating, dec("4.5"));

    let invalid = product_service::submit_review(&state, &journal.slug, review("Cy", 6)).await;
    assert!(matches!(invalid, Err(AppError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn product_without_options_is_not_customizable() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let books = create_category(&state, "Books").await?;
    let book = create_product(&state, &books, "Plain Book", "10.00", None).await?;

    let result = product_service::customization_options(&state, &book.slug).await;
    assert!(matches!(result, Err(AppError::NotFound("Customization options"))));

    let result = product_service::product_detail(&state, "no-such-product").await;
    assert!(matches!(result, Err(AppError::NotFound("Product"))));
    Ok(())
}

#[tokio::test]
async fn home_groups_flagged_products() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let diaries = create_category(&state, "Diaries").await?;
    let planner = create_product(&state, &diaries, "Daily Planner", "28.00", None).await?;
    create_product(&state, &diaries, "Plain Diary", "10.00", None).await?;

    let mut active: products::ActiveModel = planner.into();
    active.is_featured = Set(true);
    active.is_new = Set(true);
    active.update(&state.orm).await?;

    let home = product_service::home(&state).await?.data.expect("home");
    assert_eq!(home.categories.len(), 1);
    assert_eq!(home.featured.len(), 1);
    assert_eq!(home.featured[0].name, "Daily Planner");
    assert_eq!(home.new_arrivals.len(), 1);
    assert!(home.bestsellers.is_empty());

    let categories = product_service::list_categories(&state).await?;
    assert_eq!(categories.meta.as_ref().and_then(|m| m.total), Some(1));
    Ok(())
}

#[tokio::test]
async fn customization_options_list_trimmed_choices_and_presets() -> anyhow::Result<()> {
    use chrono::Utc;
    use stationery_shop_api::entity::{customizable_products, journal_customizations};
    use uuid::Uuid;

    let state = setup_state().await?;
    let journals = create_category(&state, "Journals").await?;
    let journal = create_product(&state, &journals, "Bullet Journal", "22.00", None).await?;

    customizable_products::ActiveModel {
        id: Set(Uuid::new_v4()),
        product_id: Set(journal.id),
        allow_cover_text: Set(true),
        allow_cover_material: Set(true),
        allow_cover_color: Set(false),
        allow_page_type: Set(true),
        allow_page_count: Set(false),
        available_materials: Set("standard, leather ,,vegan_leather".to_string()),
        available_colors: Set(String::new()),
        available_page_types: Set("lined,dotted".to_string()),
        text_emboss_price: Set(dec("5")),
        leather_price: Set(dec("15")),
        vegan_leather_price: Set(dec("10")),
        extra_pages_price: Set(dec("3")),
    }
    .insert(&state.orm)
    .await?;
    for (name, is_active) in [("Monogram", true), ("Retired Preset", false)] {
        journal_customizations::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(journal.id),
            name: Set(name.to_string()),
            cover_text: Set(String::new()),
            cover_material: Set("leather".to_string()),
            cover_color: Set("brown".to_string()),
            page_type: Set("dotted".to_string()),
            page_count: Set(200),
            additional_price: Set(dec("20")),
            is_active: Set(is_active),
            created_at: Set(Utc::now().into()),
        }
        .insert(&state.orm)
        .await?;
    }

    let options = product_service::customization_options(&state, &journal.slug)
        .await?
        .data
        .expect("options");
    assert_eq!(options.materials, ["standard", "leather", "vegan_leather"]);
    assert!(options.colors.is_empty());
    assert_eq!(options.page_types, ["lined", "dotted"]);
    assert_eq!(options.leather_price, dec("15"));
    assert_eq!(options.presets.len(), 1);
    assert_eq!(options.presets[0].name, "Monogram");

    let listed = product_service::list_products(
        &state,
        ProductQuery {
            customizable: Some(true),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("products");
    assert_eq!(listed.items.len(), 1);
    Ok(())
}

#[tokio::test]
async fn wildcard_characters_in_queries_match_literally() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let notebooks = create_category(&state, "Notebooks").await?;
    create_product(&state, &notebooks, "Grid Notebook", "9.00", None).await?;
    create_product(&state, &notebooks, "Ruled Notebook", "8.00", None).await?;

    for q in ["%", "_"] {
        let found = product_service::search(
            &state,
            SearchQuery {
                q: Some(q.into()),
                ..Default::default()
            },
        )
        .await?
        .data
        .expect("results");
        assert!(found.products.is_empty(), "search {q:?} matched {}", found.products.len());

        let listed = product_service::list_products(
            &state,
            ProductQuery {
                q: Some(q.into()),
                ..Default::default()
            },
        )
        .await?
        .data
        .expect("products");
        assert!(listed.items.is_empty(), "list {q:?} matched {}", listed.items.len());
    }

    create_product(&state, &notebooks, "100% Recycled Notebook", "7.00", None).await?;
    let found = product_service::search(
        &state,
        SearchQuery {
            q: Some("0% r".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("results");
    assert_eq!(found.products.len(), 1);
    assert_eq!(found.products[0].name, "100% Recycled Notebook");
    Ok(())
}

#[tokio::test]
async fn out_of_range_page_is_empty() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let books = create_category(&state, "Books").await?;
    create_product(&state, &books, "Atlas", "30.00", None).await?;

    let page = product_service::list_products(
        &state,
        ProductQuery {
            page: Some(i64::MAX),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(page.meta.as_ref().and_then(|m| m.total), Some(1));
    assert!(page.data.expect("products").items.is_empty());
    Ok(())
}
