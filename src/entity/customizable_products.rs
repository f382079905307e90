use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "customizable_products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub product_id: Uuid,
    pub allow_cover_text: bool,
    pub allow_cover_material: bool,
    pub allow_cover_color: bool,
    pub allow_page_type: bool,
    pub allow_page_count: bool,
    /// Comma-separated option lists.
    pub available_materials: String,
    pub available_colors: String,
    pub available_page_types: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub text_emboss_price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub leather_price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub vegan_leather_price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub extra_pages_price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id",
        on_delete = "Cascade"
    )]
    Products,
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
