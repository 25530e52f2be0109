//! Post entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Number of characters shown when a post stands in for itself in lists.
const DISPLAY_LABEL_CHARS: usize = 15;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Post text content.
    #[sea_orm(column_type = "Text")]
    pub text: String,

    /// Author user ID.
    #[sea_orm(indexed)]
    pub author_id: String,

    /// Group this post belongs to, if any.
    #[sea_orm(nullable, indexed)]
    pub group_id: Option<String>,

    /// Stored image reference, if any.
    #[sea_orm(nullable)]
    pub image_url: Option<String>,

    /// Publication timestamp. Assigned on insert, never updated.
    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// Human-readable label: the first 15 characters of the text.
    #[must_use]
    pub fn display_label(&self) -> String {
        self.text.chars().take(DISPLAY_LABEL_CHARS).collect()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,

    #[sea_orm(
        belongs_to = "super::group::Entity",
        from = "Column::GroupId",
        to = "super::group::Column::Id",
        on_delete = "SetNull"
    )]
    Group,

    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post_with_text(text: &str) -> Model {
        Model {
            id: "p1".to_string(),
            text: text.to_string(),
            author_id: "u1".to_string(),
            group_id: None,
            image_url: None,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_display_label_truncates_to_fifteen_chars() {
        let post = post_with_text("a post that is much longer than fifteen characters");
        assert_eq!(post.display_label(), "a post that is ");
    }

    #[test]
    fn test_display_label_short_text_is_unchanged() {
        let post = post_with_text("Тестовый пост");
        assert_eq!(post.display_label(), "Тестовый пост");
    }

    #[test]
    fn test_display_label_counts_characters_not_bytes() {
        let post = post_with_text("Запись для проверки заголовка");
        assert_eq!(post.display_label(), "Запись для пров");
        assert_eq!(post.display_label().chars().count(), 15);
    }
}
