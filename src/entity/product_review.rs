use sea_orm::ActiveValue;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ProductReview")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "Rating")]
    pub rating: i32,
    #[sea_orm(column_name = "Comment", column_type = "Text", nullable)]
    pub comment: Option<String>,
    #[sea_orm(column_name = "ProductID")]
    pub product_id: i32,
    #[sea_orm(column_name = "UserID")]
    pub user_id: String,
    #[sea_orm(column_name = "createdAt", default_expr = "Expr::current_timestamp()")]
    pub created_at: DateTimeWithTimeZone,
    #[sea_orm(column_name = "updatedAt", default_expr = "Expr::current_timestamp()")]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::UserId",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

pub fn validate_rating(rating: i32) -> Result<(), DbErr> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(DbErr::Custom(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }
    Ok(())
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        match &self.rating {
            ActiveValue::Set(rating) | ActiveValue::Unchanged(rating) => validate_rating(*rating)?,
            ActiveValue::NotSet => {}
        }
        super::stamp(&mut self.created_at, &mut self.updated_at, insert);
        Ok(self)
    }
}
