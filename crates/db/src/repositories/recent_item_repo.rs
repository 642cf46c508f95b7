//! Repository for the `recent_items` table.

use sqlx::PgPool;
use senpai_core::category::Category;
use senpai_core::recent;
use senpai_core::types::DbId;

use crate::models::recent_item::{RecentItem, RecordViewRequest};

/// Column list for `recent_items` queries.
const COLUMNS: &str = "id, user_id, category, item_id, title, link, created_at";

/// Maintains the bounded per-category view history of each user.
pub struct RecentItemRepo;

impl RecentItemRepo {
    /// Record a view and trim the history to the newest
    /// [`recent::MAX_RECENT_ITEMS`] rows.
    ///
    /// Runs in one transaction that first locks the owning `users` row, so
    /// concurrent views by the same user are applied one after another:
    ///
    /// 1. delete the previous row for the same item, if any
    /// 2. insert the view with a fresh timestamp
    /// 3. delete the oldest rows beyond the limit
    ///
    /// Returns `RowNotFound` if the user does not exist.
    pub async fn record_view(
        pool: &PgPool,
        user_id: DbId,
        category: Category,
        input: &RecordViewRequest,
    ) -> Result<RecentItem, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query_scalar::<_, DbId>("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        sqlx::query(
            "DELETE FROM recent_items \
             WHERE user_id = $1 AND category = $2 AND item_id = $3",
        )
        .bind(user_id)
        .bind(category.as_str())
        .bind(&input.item_id)
        .execute(&mut *tx)
        .await?;

        let insert_query = format!(
            "INSERT INTO recent_items (user_id, category, item_id, title, link, created_at) \
             VALUES ($1, $2, $3, $4, $5, clock_timestamp()) \
             RETURNING {COLUMNS}"
        );
        let item = sqlx::query_as::<_, RecentItem>(&insert_query)
            .bind(user_id)
            .bind(category.as_str())
            .bind(&input.item_id)
            .bind(&input.title)
            .bind(&input.link)
            .fetch_one(&mut *tx)
            .await?;

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM recent_items WHERE user_id = $1 AND category = $2",
        )
        .bind(user_id)
        .bind(category.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let excess = recent::overflow(count);
        if excess > 0 {
            let trimmed = sqlx::query(
                "DELETE FROM recent_items WHERE id IN ( \
                    SELECT id FROM recent_items \
                    WHERE user_id = $1 AND category = $2 \
                    ORDER BY created_at ASC, id ASC \
                    LIMIT $3)",
            )
            .bind(user_id)
            .bind(category.as_str())
            .bind(excess)
            .execute(&mut *tx)
            .await?;
            tracing::debug!(
                user_id,
                category = %category,
                trimmed = trimmed.rows_affected(),
                "Trimmed recent items"
            );
        }

        tx.commit().await?;
        Ok(item)
    }

    /// List a user's recent items in one category, newest first.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        category: Category,
    ) -> Result<Vec<RecentItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recent_items \
             WHERE user_id = $1 AND category = $2 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, RecentItem>(&query)
            .bind(user_id)
            .bind(category.as_str())
            .fetch_all(pool)
            .await
    }

    /// Clear a user's history in one category. Returns the number of rows
    /// deleted.
    pub async fn clear(
        pool: &PgPool,
        user_id: DbId,
        category: Category,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recent_items WHERE user_id = $1 AND category = $2")
            .bind(user_id)
            .bind(category.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
