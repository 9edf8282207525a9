//! Explicit relationship table.
//!
//! Every foreign key in the schema is listed here once, with its on-delete policy.
//! Migrations build their `FOREIGN KEY` clauses from these records and the entity
//! `Relation` enums repeat the same policy for the ORM.

use std::collections::BTreeSet;

use sea_orm::sea_query::{Alias, ForeignKey, ForeignKeyAction, ForeignKeyCreateStatement};
use serde::Serialize;

/// Behavior when the referenced (parent) row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnDelete {
    /// Delete the referencing rows.
    Cascade,
    /// Keep the referencing rows and clear the foreign key.
    SetNull,
}

impl OnDelete {
    pub fn action(self) -> ForeignKeyAction {
        match self {
            OnDelete::Cascade => ForeignKeyAction::Cascade,
            OnDelete::SetNull => ForeignKeyAction::SetNull,
        }
    }
}

/// A many-to-one edge: `child.foreign_key` references `parent.parent_key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Association {
    pub name: &'static str,
    pub child: &'static str,
    pub foreign_key: &'static str,
    pub parent: &'static str,
    pub parent_key: &'static str,
    pub on_delete: OnDelete,
}

impl Association {
    /// `FOREIGN KEY` clause for the child's `CREATE TABLE`.
    pub fn foreign_key(&self) -> ForeignKeyCreateStatement {
        ForeignKey::create()
            .name(self.name)
            .from(Alias::new(self.child), Alias::new(self.foreign_key))
            .to(Alias::new(self.parent), Alias::new(self.parent_key))
            .on_delete(self.on_delete.action())
            .on_update(ForeignKeyAction::Cascade)
            .to_owned()
    }

    /// A set-null edge needs a nullable foreign key column.
    pub fn requires_nullable_key(&self) -> bool {
        self.on_delete == OnDelete::SetNull
    }
}

pub const PRODUCT_CREATOR: Association = Association {
    name: "fk_Product_UserID",
    child: "Product",
    foreign_key: "UserID",
    parent: "User",
    parent_key: "UserID",
    on_delete: OnDelete::SetNull,
};

pub const PRODUCT_COLOR_PRODUCT: Association = Association {
    name: "fk_ProductColor_ProductID",
    child: "ProductColor",
    foreign_key: "ProductID",
    parent: "Product",
    parent_key: "id",
    on_delete: OnDelete::Cascade,
};

pub const PRODUCT_REVIEW_PRODUCT: Association = Association {
    name: "fk_ProductReview_ProductID",
    child: "ProductReview",
    foreign_key: "ProductID",
    parent: "Product",
    parent_key: "id",
    on_delete: OnDelete::Cascade,
};

pub const PRODUCT_REVIEW_AUTHOR: Association = Association {
    name: "fk_ProductReview_UserID",
    child: "ProductReview",
    foreign_key: "UserID",
    parent: "User",
    parent_key: "UserID",
    on_delete: OnDelete::Cascade,
};

pub const CART_OWNER: Association = Association {
    name: "fk_carts_UserID",
    child: "carts",
    foreign_key: "UserID",
    parent: "User",
    parent_key: "UserID",
    on_delete: OnDelete::Cascade,
};

pub const CART_ITEM_CART: Association = Association {
    name: "fk_cart_items_cartId",
    child: "cart_items",
    foreign_key: "cartId",
    parent: "carts",
    parent_key: "id",
    on_delete: OnDelete::Cascade,
};

pub const CART_ITEM_PRODUCT: Association = Association {
    name: "fk_cart_items_productId",
    child: "cart_items",
    foreign_key: "productId",
    parent: "Product",
    parent_key: "id",
    on_delete: OnDelete::Cascade,
};

pub const ORDER_BUYER: Association = Association {
    name: "fk_orders_UserID",
    child: "orders",
    foreign_key: "UserID",
    parent: "User",
    parent_key: "UserID",
    on_delete: OnDelete::SetNull,
};

pub const ORDER_ITEM_ORDER: Association = Association {
    name: "fk_order_items_orderId",
    child: "order_items",
    foreign_key: "orderId",
    parent: "orders",
    parent_key: "id",
    on_delete: OnDelete::Cascade,
};

pub const ORDER_ITEM_PRODUCT: Association = Association {
    name: "fk_order_items_productId",
    child: "order_items",
    foreign_key: "productId",
    parent: "Product",
    parent_key: "id",
    on_delete: OnDelete::SetNull,
};

pub const POST_AUTHOR: Association = Association {
    name: "fk_Post_UserID",
    child: "Post",
    foreign_key: "UserID",
    parent: "User",
    parent_key: "UserID",
    on_delete: OnDelete::Cascade,
};

pub const COMMENT_AUTHOR: Association = Association {
    name: "fk_Comment_UserID",
    child: "Comment",
    foreign_key: "UserID",
    parent: "User",
    parent_key: "UserID",
    on_delete: OnDelete::Cascade,
};

pub const COMMENT_POST: Association = Association {
    name: "fk_Comment_PostID",
    child: "Comment",
    foreign_key: "PostID",
    parent: "Post",
    parent_key: "PostID",
    on_delete: OnDelete::Cascade,
};

pub const ASSOCIATIONS: &[Association] = &[
    PRODUCT_CREATOR,
    PRODUCT_COLOR_PRODUCT,
    PRODUCT_REVIEW_PRODUCT,
    PRODUCT_REVIEW_AUTHOR,
    CART_OWNER,
    CART_ITEM_CART,
    CART_ITEM_PRODUCT,
    ORDER_BUYER,
    ORDER_ITEM_ORDER,
    ORDER_ITEM_PRODUCT,
    POST_AUTHOR,
    COMMENT_AUTHOR,
    COMMENT_POST,
];

/// Read-only view over a relationship table.
#[derive(Debug, Clone, Copy)]
pub struct AssociationGraph {
    edges: &'static [Association],
}

impl Default for AssociationGraph {
    fn default() -> Self {
        Self::new(ASSOCIATIONS)
    }
}

impl AssociationGraph {
    pub fn new(edges: &'static [Association]) -> Self {
        Self { edges }
    }

    pub fn edges(&self) -> &'static [Association] {
        self.edges
    }

    /// Edges whose parent is `table`.
    pub fn children_of<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'static Association> + 'a {
        self.edges.iter().filter(move |edge| edge.parent == table)
    }

    /// Edges whose child is `table`.
    pub fn parents_of<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'static Association> + 'a {
        self.edges.iter().filter(move |edge| edge.child == table)
    }

    pub fn policy(&self, child: &str, foreign_key: &str) -> Option<OnDelete> {
        self.edges
            .iter()
            .find(|edge| edge.child == child && edge.foreign_key == foreign_key)
            .map(|edge| edge.on_delete)
    }

    /// Tables that lose rows, directly or transitively, when a row of `table` is deleted.
    pub fn cascade_closure(&self, table: &str) -> BTreeSet<&'static str> {
        let mut reached = BTreeSet::new();
        let mut pending: Vec<&str> = vec![table];
        while let Some(current) = pending.pop() {
            for edge in self.children_of(current) {
                if edge.on_delete == OnDelete::Cascade && reached.insert(edge.child) {
                    pending.push(edge.child);
                }
            }
        }
        reached
    }

    /// Foreign keys cleared when a row of `table`, or anything it cascades to, is deleted.
    pub fn nullified_by(&self, table: &str) -> Vec<&'static Association> {
        let mut sources: BTreeSet<&str> = self.cascade_closure(table).into_iter().collect();
        sources.insert(table);
        self.edges
            .iter()
            .filter(|edge| edge.on_delete == OnDelete::SetNull && sources.contains(edge.parent))
            .collect()
    }
}
