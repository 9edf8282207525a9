pub mod cart;
pub mod cart_item;
pub mod comment;
pub mod order_item;
pub mod orders;
pub mod post;
pub mod product;
pub mod product_color;
pub mod product_review;
pub mod user;

pub use cart::Entity as Cart;
pub use cart_item::Entity as CartItem;
pub use comment::Entity as Comment;
pub use order_item::Entity as OrderItem;
pub use orders::Entity as Orders;
pub use post::Entity as Post;
pub use product::Entity as Product;
pub use product_color::Entity as ProductColor;
pub use product_review::Entity as ProductReview;
pub use user::Entity as User;

use chrono::Utc;
use sea_orm::ActiveValue;
use sea_orm::entity::prelude::DateTimeWithTimeZone;

/// Fill `createdAt` on insert and bump `updatedAt` on every save.
pub(crate) fn stamp(
    created_at: &mut ActiveValue<DateTimeWithTimeZone>,
    updated_at: &mut ActiveValue<DateTimeWithTimeZone>,
    insert: bool,
) {
    let now: DateTimeWithTimeZone = Utc::now().into();
    if insert && created_at.is_not_set() {
        *created_at = ActiveValue::Set(now);
    }
    *updated_at = ActiveValue::Set(now);
}
