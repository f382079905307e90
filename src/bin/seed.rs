use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use stationery_shop_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        categories, currencies, customizable_products, delivery_zones, journal_customizations,
        products, users,
    },
};
use uuid::Uuid;

/// (code, name, symbol, units per USD)
const CURRENCIES: &[(&str, &str, &str, &str)] = &[
    ("USD", "US Dollar", "$", "1.00"),
    ("EUR", "Euro", "€", "0.92"),
    ("GBP", "British Pound", "£", "0.79"),
    ("JPY", "Japanese Yen", "¥", "149.50"),
    ("CAD", "Canadian Dollar", "CA$", "1.36"),
    ("AUD", "Australian Dollar", "A$", "1.53"),
    ("INR", "Indian Rupee", "₹", "83.10"),
    ("ZAR", "South African Rand", "R", "18.90"),
    ("NGN", "Nigerian Naira", "₦", "1550.00"),
    ("KES", "Kenyan Shilling", "KSh", "153.50"),
    ("GHS", "Ghanaian Cedi", "GH₵", "14.80"),
    ("TZS", "Tanzanian Shilling", "TSh", "2520.00"),
    ("UGX", "Ugandan Shilling", "USh", "3800.00"),
    ("AED", "UAE Dirham", "AED", "3.67"),
];

/// (name, slug, description, icon, display order)
const CATEGORIES: &[(&str, &str, &str, &str, i32)] = &[
    ("Books", "books", "Beautiful handcrafted books for reading, collecting, and gifting.", "fa-book", 1),
    ("Diaries", "diaries", "Personal diaries to capture your daily thoughts, dreams, and memories.", "fa-book-open", 2),
    ("Journals", "journals", "Premium journals for writing, planning, and self-reflection.", "fa-pen-fancy", 3),
    ("Notebooks", "notebooks", "Quality notebooks for notes, sketches, and creative ideas.", "fa-book-reader", 4),
    ("Sticky Notes", "sticky-notes", "Colorful and fun sticky notes to keep you organized.", "fa-sticky-note", 5),
];

/// (name, description, base fee, per kg, free from, days min, days max)
const ZONES: &[(&str, &str, &str, &str, &str, i32, i32)] = &[
    ("Nairobi CBD", "Central Business District and immediate surroundings", "200.00", "0.00", "5000.00", 1, 2),
    ("Nairobi Metro", "Greater Nairobi area including Westlands, Kilimani, Upperhill, etc.", "300.00", "0.00", "7500.00", 1, 3),
    ("Nairobi Outskirts", "Outer Nairobi including Rongai, Kitengela, Ruiru, etc.", "450.00", "0.00", "10000.00", 2, 4),
    ("Major Towns", "Mombasa, Kisumu, Nakuru, Eldoret, Nyeri, and other major towns", "600.00", "50.00", "15000.00", 3, 5),
    ("Rest of Kenya", "All other locations within Kenya", "800.00", "75.00", "20000.00", 4, 7),
];

struct SampleProduct {
    category: &'static str,
    name: &'static str,
    slug: &'static str,
    short_description: &'static str,
    price: &'static str,
    sale_price: Option<&'static str>,
    cover_type: &'static str,
    size: &'static str,
    pages: i32,
    color: &'static str,
    stock: i32,
    featured: bool,
    new: bool,
    bestseller: bool,
}

const PRODUCTS: &[SampleProduct] = &[
    SampleProduct {
        category: "books",
        name: "Classic Leather Journal Book",
        slug: "classic-leather-journal-book",
        short_description: "Handcrafted leather book with premium ivory pages.",
        price: "45.99",
        sale_price: None,
        cover_type: "leather",
        size: "a5",
        pages: 200,
        color: "Brown",
        stock: 50,
        featured: true,
        new: false,
        bestseller: true,
    },
    SampleProduct {
        category: "books",
        name: "Vintage Poetry Book",
        slug: "vintage-poetry-book",
        short_description: "Elegant vintage design with gilded edges.",
        price: "35.99",
        sale_price: Some("29.99"),
        cover_type: "hardcover",
        size: "a5",
        pages: 150,
        color: "Burgundy",
        stock: 30,
        featured: false,
        new: true,
        bestseller: false,
    },
    SampleProduct {
        category: "diaries",
        name: "2026 Daily Planner Diary",
        slug: "2026-daily-planner-diary",
        short_description: "Complete 2026 planner with monthly and weekly views.",
        price: "28.99",
        sale_price: None,
        cover_type: "hardcover",
        size: "a5",
        pages: 400,
        color: "Navy Blue",
        stock: 100,
        featured: true,
        new: true,
        bestseller: false,
    },
    SampleProduct {
        category: "journals",
        name: "Dotted Bullet Journal",
        slug: "dotted-bullet-journal",
        short_description: "Dot grid pages for creative planning.",
        price: "22.99",
        sale_price: Some("18.99"),
        cover_type: "hardcover",
        size: "a5",
        pages: 240,
        color: "Black",
        stock: 80,
        featured: true,
        new: false,
        bestseller: true,
    },
    SampleProduct {
        category: "notebooks",
        name: "Spiral Sketch Notebook",
        slug: "spiral-sketch-notebook",
        short_description: "Heavyweight blank pages that lie flat.",
        price: "12.99",
        sale_price: None,
        cover_type: "spiral",
        size: "a4",
        pages: 120,
        color: "Kraft",
        stock: 150,
        featured: false,
        new: true,
        bestseller: false,
    },
    SampleProduct {
        category: "sticky-notes",
        name: "Pastel Sticky Notes Set",
        slug: "pastel-sticky-notes-set",
        short_description: "Six pads of soft pastel sticky notes.",
        price: "6.99",
        sale_price: None,
        cover_type: "softcover",
        size: "square",
        pages: 600,
        color: "Pastel Mix",
        stock: 300,
        featured: false,
        new: false,
        bestseller: true,
    },
];

fn dec(value: &str) -> anyhow::Result<Decimal> {
    value
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid decimal {value}: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let admin_id = ensure_user(&orm, "admin@example.com", "admin123", "admin").await?;
    let user_id = ensure_user(&orm, "user@example.com", "user12345", "user").await?;
    seed_currencies(&orm).await?;
    seed_categories(&orm).await?;
    seed_zones(&orm).await?;
    seed_products(&orm).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    orm: &DatabaseConnection,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    if let Some(existing) = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(orm)
        .await?
    {
        return Ok(existing.id);
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        role: Set(role.to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(orm)
    .await?;
    Ok(user.id)
}

async fn seed_currencies(orm: &DatabaseConnection) -> anyhow::Result<()> {
    for (code, name, symbol, rate) in CURRENCIES {
        let existing = currencies::Entity::find()
            .filter(currencies::Column::Code.eq(*code))
            .one(orm)
            .await?;
        match existing {
            Some(currency) => {
                let mut active: currencies::ActiveModel = currency.into();
                active.exchange_rate = Set(dec(rate)?);
                active.update(orm).await?;
            }
            None => {
                currencies::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    code: Set(code.to_string()),
                    name: Set(name.to_string()),
                    symbol: Set(symbol.to_string()),
                    exchange_rate: Set(dec(rate)?),
                    is_active: Set(true),
                }
                .insert(orm)
                .await?;
            }
        }
    }
    tracing::info!(count = CURRENCIES.len(), "currencies seeded");
    Ok(())
}

async fn seed_categories(orm: &DatabaseConnection) -> anyhow::Result<()> {
    for (name, slug, description, icon, order) in CATEGORIES {
        let exists = categories::Entity::find()
            .filter(categories::Column::Slug.eq(*slug))
            .one(orm)
            .await?
            .is_some();
        if exists {
            continue;
        }
        let now = Utc::now();
        categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            slug: Set(slug.to_string()),
            description: Set(description.to_string()),
            icon_class: Set(icon.to_string()),
            is_active: Set(true),
            display_order: Set(*order),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(orm)
        .await?;
    }
    tracing::info!(count = CATEGORIES.len(), "categories seeded");
    Ok(())
}

async fn seed_zones(orm: &DatabaseConnection) -> anyhow::Result<()> {
    for (position, (name, description, base, per_kg, free_from, min_days, max_days)) in
        ZONES.iter().enumerate()
    {
        let exists = delivery_zones::Entity::find()
            .filter(delivery_zones::Column::Name.eq(*name))
            .one(orm)
            .await?
            .is_some();
        if exists {
            continue;
        }
        delivery_zones::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            base_fee: Set(dec(base)?),
            per_kg_fee: Set(dec(per_kg)?),
            min_order_free_delivery: Set(Some(dec(free_from)?)),
            estimated_days_min: Set(*min_days),
            estimated_days_max: Set(*max_days),
            is_active: Set(true),
            display_order: Set(position as i32 + 1),
        }
        .insert(orm)
        .await?;
    }
    tracing::info!(count = ZONES.len(), "delivery zones seeded");
    Ok(())
}

async fn seed_products(orm: &DatabaseConnection) -> anyhow::Result<()> {
    for sample in PRODUCTS {
        let exists = products::Entity::find()
            .filter(products::Column::Slug.eq(sample.slug))
            .one(orm)
            .await?
            .is_some();
        if exists {
            continue;
        }

        let category = match categories::Entity::find()
            .filter(categories::Column::Slug.eq(sample.category))
            .one(orm)
            .await?
        {
            Some(c) => c,
            None => {
                tracing::warn!(slug = sample.category, "category missing, skipping product");
                continue;
            }
        };

        let now = Utc::now();
        let product = products::ActiveModel {
            id: Set(Uuid::new_v4()),
            category_id: Set(category.id),
            name: Set(sample.name.to_string()),
            slug: Set(sample.slug.to_string()),
            description: Set(sample.short_description.to_string()),
            short_description: Set(sample.short_description.to_string()),
            price: Set(dec(sample.price)?),
            sale_price: Set(sample.sale_price.map(dec).transpose()?),
            cover_type: Set(Some(sample.cover_type.to_string())),
            size: Set(Some(sample.size.to_string())),
            pages: Set(Some(sample.pages)),
            paper_type: Set(None),
            color: Set(Some(sample.color.to_string())),
            stock: Set(sample.stock),
            is_available: Set(true),
            is_featured: Set(sample.featured),
            is_new: Set(sample.new),
            is_bestseller: Set(sample.bestseller),
            meta_title: Set(sample.name.to_string()),
            meta_description: Set(sample.short_description.to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(orm)
        .await?;

        if sample.category == "journals" {
            customizable_products::ActiveModel {
                id: Set(Uuid::new_v4()),
                product_id: Set(product.id),
                allow_cover_text: Set(true),
                allow_cover_material: Set(true),
                allow_cover_color: Set(true),
                allow_page_type: Set(true),
                allow_page_count: Set(false),
                available_materials: Set("standard,leather,vegan_leather,fabric".to_string()),
                available_colors: Set("black,brown,navy,burgundy".to_string()),
                available_page_types: Set("blank,lined,dotted,grid".to_string()),
                text_emboss_price: Set(dec("5.00")?),
                leather_price: Set(dec("15.00")?),
                vegan_leather_price: Set(dec("10.00")?),
                extra_pages_price: Set(dec("3.00")?),
            }
            .insert(orm)
            .await?;

            journal_customizations::ActiveModel {
                id: Set(Uuid::new_v4()),
                product_id: Set(product.id),
                name: Set("Monogram Leather Edition".to_string()),
                cover_text: Set(String::new()),
                cover_material: Set("leather".to_string()),
                cover_color: Set("brown".to_string()),
                page_type: Set("dotted".to_string()),
                page_count: Set(240),
                additional_price: Set(dec("20.00")?),
                is_active: Set(true),
                created_at: Set(now.into()),
            }
            .insert(orm)
            .await?;
        }
    }
    tracing::info!(count = PRODUCTS.len(), "products seeded");
    Ok(())
}
