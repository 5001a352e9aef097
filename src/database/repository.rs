use crate::database::manager::{Database, DatabaseError};

/// A table whose rows carry a display `"order"` column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderedTable {
    Categories,
    Bookmarks,
}

impl OrderedTable {
    pub fn name(self) -> &'static str {
        match self {
            OrderedTable::Categories => "categories",
            OrderedTable::Bookmarks => "bookmarks",
        }
    }

    /// `INSERT` that places the new row after every existing one (`max(order) + 1`, or 1
    /// for an empty table). The max is read inside the insert statement itself, so two
    /// concurrent appends cannot observe the same value.
    pub fn append_sql(self, columns: &[&str], returning: &str) -> String {
        let placeholders = vec!["?"; columns.len()].join(", ");
        format!(
            r#"INSERT INTO {table} ({columns}, "order")
               VALUES ({placeholders}, (SELECT COALESCE(MAX("order"), 0) + 1 FROM {table}))
               RETURNING {returning}"#,
            table = self.name(),
            columns = columns.join(", "),
        )
    }

    fn reorder_sql(self) -> String {
        format!(r#"UPDATE {} SET "order" = ? WHERE id = ?"#, self.name())
    }
}

impl Database {
    /// Give `ids[i]` the order `i + 1`, all or nothing. Unknown ids match no row;
    /// rows not listed keep their current order.
    pub async fn reorder(&self, table: OrderedTable, ids: &[i64]) -> Result<(), DatabaseError> {
        let sql = table.reorder_sql();
        let mut tx = self.begin().await?;
        for (position, id) in ids.iter().enumerate() {
            sqlx::query(&sql)
                .bind(position as i64 + 1)
                .bind(*id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
