pub mod audit_logs;
pub mod cart_items;
pub mod carts;
pub mod categories;
pub mod contact_messages;
pub mod currencies;
pub mod customizable_products;
pub mod delivery_zones;
pub mod journal_customizations;
pub mod order_items;
pub mod orders;
pub mod product_reviews;
pub mod products;
pub mod sessions;
pub mod users;
pub mod wishlist_items;
pub mod wishlists;

pub use audit_logs::Entity as AuditLogs;
pub use cart_items::Entity as CartItems;
pub use carts::Entity as Carts;
pub use categories::Entity as Categories;
pub use contact_messages::Entity as ContactMessages;
pub use currencies::Entity as Currencies;
pub use customizable_products::Entity as CustomizableProducts;
pub use delivery_zones::Entity as DeliveryZones;
pub use journal_customizations::Entity as JournalCustomizations;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use product_reviews::Entity as ProductReviews;
pub use products::Entity as Products;
pub use sessions::Entity as Sessions;
pub use users::Entity as Users;
pub use wishlist_items::Entity as WishlistItems;
pub use wishlists::Entity as Wishlists;
