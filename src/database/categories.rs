use crate::database::manager::{Database, DatabaseError};
use crate::database::models::Category;
use crate::database::repository::OrderedTable;

impl Database {
    /// All categories, ascending by display order
    pub async fn list_categories(&self) -> Result<Vec<Category>, DatabaseError> {
        let categories = sqlx::query_as::<_, Category>(
            r#"SELECT id, name, "order" FROM categories ORDER BY "order" ASC, id ASC"#,
        )
        .fetch_all(self.pool())
        .await?;
        Ok(categories)
    }

    /// Append a category after all existing ones
    pub async fn create_category(&self, name: &str) -> Result<Category, DatabaseError> {
        let sql = OrderedTable::Categories.append_sql(&["name"], r#"id, name, "order""#);
        let category = sqlx::query_as::<_, Category>(&sql)
            .bind(name)
            .fetch_one(self.pool())
            .await?;
        Ok(category)
    }

    /// Rename a category. Unknown ids are not an error.
    pub async fn update_category(&self, id: i64, name: &str) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE categories SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    /// Delete a category together with every bookmark filed under it
    pub async fn delete_category(&self, id: i64) -> Result<(), DatabaseError> {
        let mut tx = self.begin().await?;
        sqlx::query("DELETE FROM bookmarks WHERE category_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn reorder_categories(&self, ids: &[i64]) -> Result<(), DatabaseError> {
        self.reorder(OrderedTable::Categories, ids).await
    }
}
