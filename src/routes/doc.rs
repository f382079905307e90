use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, Profile, RegisterRequest},
        cart::{AddToCartRequest, CartCount, UpdateCartItemRequest},
        contact::{ContactMessageList, ContactRequest, UpdateContactRequest},
        currency::{CurrencyList, PriceDisplay, SelectCurrencyRequest, UpsertCurrencyRequest},
        delivery::{CreateZoneRequest, FeeQuote, SelectZoneRequest, UpdateZoneRequest, ZoneList},
        orders::{CheckoutRequest, OrderList, OrderWithItems, UpdateOrderRequest},
        products::{
            CategoryPage, CreateProductRequest, CustomizationOptions, HomePage, ProductDetail,
            ProductList, ReviewList, ReviewRequest, SearchResults, UpdateProductRequest,
        },
        wishlist::WishlistCount,
    },
    models::{
        Cart, CartItem, Category, ContactMessage, Currency, DeliveryQuote, DeliveryZone,
        JournalCustomization, Order, OrderItem, OrderStatus, OrderTracking, PaymentStatus, Product,
        ProductReview, ProductSummary, User, Wishlist, WishlistAction, WishlistToggle,
    },
    response::{ApiResponse, Meta},
    routes::{
        admin, auth, cart, categories, contact, currency, delivery, health, orders, params,
        products, wishlist,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        auth::profile,
        auth::order_history,
        auth::order_detail,
        products::home,
        products::list_products,
        products::get_product,
        products::submit_review,
        products::customization_options,
        products::search,
        categories::list_categories,
        categories::get_category,
        currency::list_currencies,
        currency::current_currency,
        currency::select_currency,
        currency::convert_price,
        delivery::list_zones,
        delivery::select_zone,
        delivery::zone_fee,
        cart::view_cart,
        cart::cart_count,
        cart::add_to_cart,
        cart::update_cart_item,
        cart::remove_cart_item,
        wishlist::list_wishlist,
        wishlist::wishlist_count,
        wishlist::toggle_wishlist,
        wishlist::remove_from_wishlist,
        orders::checkout,
        orders::order_confirmation,
        orders::track_order,
        contact::submit_contact,
        admin::create_product,
        admin::update_product,
        admin::delete_product,
        admin::list_all_orders,
        admin::get_order_admin,
        admin::update_order,
        admin::list_pending_reviews,
        admin::approve_review,
        admin::create_zone,
        admin::update_zone,
        admin::upsert_currency,
        admin::list_contact_messages,
        admin::update_contact_message
    ),
    components(
        schemas(
            User,
            Category,
            Product,
            ProductSummary,
            ProductReview,
            JournalCustomization,
            Currency,
            DeliveryZone,
            DeliveryQuote,
            Cart,
            CartItem,
            Wishlist,
            WishlistAction,
            WishlistToggle,
            Order,
            OrderItem,
            OrderStatus,
            PaymentStatus,
            OrderTracking,
            ContactMessage,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            Profile,
            AddToCartRequest,
            UpdateCartItemRequest,
            CartCount,
            WishlistCount,
            SelectCurrencyRequest,
            UpsertCurrencyRequest,
            CurrencyList,
            PriceDisplay,
            SelectZoneRequest,
            CreateZoneRequest,
            UpdateZoneRequest,
            ZoneList,
            FeeQuote,
            CheckoutRequest,
            UpdateOrderRequest,
            OrderList,
            OrderWithItems,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            HomePage,
            CategoryPage,
            ProductDetail,
            SearchResults,
            ReviewRequest,
            ReviewList,
            CustomizationOptions,
            ContactRequest,
            UpdateContactRequest,
            ContactMessageList,
            params::Pagination,
            params::ProductQuery,
            params::ProductSort,
            params::SortOrder,
            params::OrderListQuery,
            Meta,
            ApiResponse<Cart>,
            ApiResponse<OrderWithItems>,
            ApiResponse<ProductList>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Catalog, search and reviews"),
        (name = "Currency", description = "Display currency"),
        (name = "Delivery", description = "Delivery zones and fees"),
        (name = "Cart", description = "Session cart"),
        (name = "Wishlist", description = "Session wishlist"),
        (name = "Orders", description = "Checkout and order tracking"),
        (name = "Contact", description = "Contact form"),
        (name = "Admin", description = "Admin endpoints"),
        (name = "Auth", description = "Authentication and account endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
