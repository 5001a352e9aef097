use crate::database::manager::{Database, DatabaseError};
use crate::database::models::{Bookmark, BookmarkInput, BookmarkWithCategory};
use crate::database::repository::OrderedTable;

/// Category id meaning "no filter" when listing bookmarks
pub const ALL_CATEGORIES: i64 = 0;

const INSERT_COLUMNS: &[&str] = &[
    "title",
    "url",
    "description",
    "account",
    "password",
    "category_id",
    "icon",
];

const RETURNING_COLUMNS: &str = r#"id, title, url,
    COALESCE(description, '') AS description,
    COALESCE(account, '') AS account,
    COALESCE(password, '') AS password,
    category_id,
    COALESCE(icon, '') AS icon,
    "order""#;

const LIST_COLUMNS: &str = r#"b.id, b.title, b.url,
    COALESCE(b.description, '') AS description,
    COALESCE(b.account, '') AS account,
    COALESCE(b.password, '') AS password,
    b.category_id,
    COALESCE(b.icon, '') AS icon,
    b."order" AS "order",
    c.name AS category_name"#;

impl Database {
    /// Bookmarks ascending by display order, optionally limited to one category.
    /// With `redact_secrets` the credential fields come back blank.
    pub async fn list_bookmarks(
        &self,
        category_id: i64,
        redact_secrets: bool,
    ) -> Result<Vec<BookmarkWithCategory>, DatabaseError> {
        let mut bookmarks = if category_id == ALL_CATEGORIES {
            let sql = format!(
                r#"SELECT {LIST_COLUMNS}
                   FROM bookmarks b
                   LEFT JOIN categories c ON b.category_id = c.id
                   ORDER BY b."order" ASC, b.id ASC"#
            );
            sqlx::query_as::<_, BookmarkWithCategory>(&sql)
                .fetch_all(self.pool())
                .await?
        } else {
            let sql = format!(
                r#"SELECT {LIST_COLUMNS}
                   FROM bookmarks b
                   LEFT JOIN categories c ON b.category_id = c.id
                   WHERE b.category_id = ?
                   ORDER BY b."order" ASC, b.id ASC"#
            );
            sqlx::query_as::<_, BookmarkWithCategory>(&sql)
                .bind(category_id)
                .fetch_all(self.pool())
                .await?
        };

        if redact_secrets {
            bookmarks.iter_mut().for_each(BookmarkWithCategory::redact);
        }
        Ok(bookmarks)
    }

    /// Append a bookmark after every existing bookmark, across all categories
    pub async fn create_bookmark(&self, input: &BookmarkInput) -> Result<Bookmark, DatabaseError> {
        let sql = OrderedTable::Bookmarks.append_sql(INSERT_COLUMNS, RETURNING_COLUMNS);
        let bookmark = sqlx::query_as::<_, Bookmark>(&sql)
            .bind(&input.title)
            .bind(&input.url)
            .bind(input.description.as_deref())
            .bind(input.account.as_deref())
            .bind(input.password.as_deref())
            .bind(input.category_id)
            .bind(input.icon.as_deref())
            .fetch_one(self.pool())
            .await?;
        Ok(bookmark)
    }

    /// Overwrite every field except `order`. Unknown ids are not an error.
    pub async fn update_bookmark(&self, id: i64, input: &BookmarkInput) -> Result<(), DatabaseError> {
        sqlx::query(
            "UPDATE bookmarks SET title = ?, url = ?, description = ?, account = ?,
             password = ?, category_id = ?, icon = ? WHERE id = ?",
        )
        .bind(&input.title)
        .bind(&input.url)
        .bind(input.description.as_deref())
        .bind(input.account.as_deref())
        .bind(input.password.as_deref())
        .bind(input.category_id)
        .bind(input.icon.as_deref())
        .bind(id)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    pub async fn delete_bookmark(&self, id: i64) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM bookmarks WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    pub async fn reorder_bookmarks(&self, ids: &[i64]) -> Result<(), DatabaseError> {
        self.reorder(OrderedTable::Bookmarks, ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::ALL_CATEGORIES;
    use crate::database::models::BookmarkInput;
    use crate::database::Database;

    fn input(title: &str, category_id: i64) -> BookmarkInput {
        BookmarkInput {
            title: title.to_string(),
            url: format!("https://{title}.example.com"),
            category_id,
            ..Default::default()
        }
    }

    async fn with_categories(names: &[&str]) -> Database {
        let db = Database::in_memory().await.unwrap();
        for name in names {
            db.create_category(name).await.unwrap();
        }
        db
    }

    #[tokio::test]
    async fn create_round_trips_through_listing() {
        let db = with_categories(&["Work"]).await;
        let full = BookmarkInput {
            title: "Mail".into(),
            url: "https://mail.example.com".into(),
            description: Some("inbox".into()),
            account: Some("me@example.com".into()),
            password: Some("hunter2".into()),
            category_id: 1,
            icon: Some("mail.png".into()),
        };
        let created = db.create_bookmark(&full).await.unwrap();
        assert_eq!(created.order, 1);
        assert_eq!(created.title, "Mail");
        assert_eq!(created.description, "inbox");

        let listed = db.list_bookmarks(ALL_CATEGORIES, false).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].bookmark, created);
        assert_eq!(listed[0].category_name.as_deref(), Some("Work"));
    }

    #[tokio::test]
    async fn absent_optional_fields_render_empty() {
        let db = with_categories(&["Work"]).await;
        let created = db.create_bookmark(&input("bare", 1)).await.unwrap();
        assert_eq!(created.description, "");
        assert_eq!(created.account, "");
        assert_eq!(created.password, "");
        assert_eq!(created.icon, "");
    }

    #[tokio::test]
    async fn order_is_global_across_categories() {
        let db = with_categories(&["Work", "Home"]).await;
        let a = db.create_bookmark(&input("a", 1)).await.unwrap();
        let b = db.create_bookmark(&input("b", 2)).await.unwrap();
        let c = db.create_bookmark(&input("c", 1)).await.unwrap();
        assert_eq!((a.order, b.order, c.order), (1, 2, 3));
    }

    #[tokio::test]
    async fn listing_filters_by_category() {
        let db = with_categories(&["Work", "Home"]).await;
        for (title, category_id) in [("a", 1), ("b", 2), ("c", 1)] {
            db.create_bookmark(&input(title, category_id)).await.unwrap();
        }
        db.reorder_bookmarks(&[3, 2, 1]).await.unwrap();

        let work = db.list_bookmarks(1, false).await.unwrap();
        let titles: Vec<&str> = work.iter().map(|b| b.bookmark.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "a"]);

        let all = db.list_bookmarks(ALL_CATEGORIES, false).await.unwrap();
        let titles: Vec<&str> = all.iter().map(|b| b.bookmark.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b", "a"]);

        assert!(db.list_bookmarks(42, false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn redaction_blanks_credentials() {
        let db = with_categories(&["Work"]).await;
        let secret = BookmarkInput {
            account: Some("me".into()),
            password: Some("pw".into()),
            ..input("vault", 1)
        };
        db.create_bookmark(&secret).await.unwrap();

        let redacted = db.list_bookmarks(ALL_CATEGORIES, true).await.unwrap();
        assert_eq!(redacted[0].bookmark.account, "");
        assert_eq!(redacted[0].bookmark.password, "");

        let verbatim = db.list_bookmarks(ALL_CATEGORIES, false).await.unwrap();
        assert_eq!(verbatim[0].bookmark.account, "me");
        assert_eq!(verbatim[0].bookmark.password, "pw");
    }

    #[tokio::test]
    async fn update_keeps_order_and_ignores_unknown_id() {
        let db = with_categories(&["Work", "Home"]).await;
        db.create_bookmark(&input("a", 1)).await.unwrap();
        db.create_bookmark(&input("b", 1)).await.unwrap();

        let moved = BookmarkInput {
            description: Some("moved".into()),
            ..input("b2", 2)
        };
        db.update_bookmark(2, &moved).await.unwrap();
        db.update_bookmark(404, &moved).await.unwrap();

        let home = db.list_bookmarks(2, false).await.unwrap();
        assert_eq!(home.len(), 1);
        assert_eq!(home[0].bookmark.title, "b2");
        assert_eq!(home[0].bookmark.description, "moved");
        assert_eq!(home[0].bookmark.order, 2);
        assert_eq!(home[0].category_name.as_deref(), Some("Home"));
    }

    #[tokio::test]
    async fn create_in_missing_category_fails() {
        let db = with_categories(&[]).await;
        assert!(db.create_bookmark(&input("orphan", 9)).await.is_err());
    }

    #[tokio::test]
    async fn delete_removes_single_row() {
        let db = with_categories(&["Work"]).await;
        db.create_bookmark(&input("a", 1)).await.unwrap();
        db.create_bookmark(&input("b", 1)).await.unwrap();
        db.delete_bookmark(1).await.unwrap();
        db.delete_bookmark(1).await.unwrap();
        let left = db.list_bookmarks(ALL_CATEGORIES, false).await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].bookmark.title, "b");
        assert_eq!(db.list_categories().await.unwrap().len(), 1);
    }
}
