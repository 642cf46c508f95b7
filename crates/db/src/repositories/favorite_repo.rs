//! Repository for the `favorites` table.

use sqlx::PgPool;
use senpai_core::category::Category;
use senpai_core::types::DbId;

use crate::models::favorite::{CreateFavorite, Favorite, FavoriteCounts};

/// Column list for `favorites` queries.
const COLUMNS: &str = "id, user_id, category, item_id, title, image, metadata, created_at";

/// Provides insert/list/delete operations for favorites of every category.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Insert a favorite, returning the created row.
    ///
    /// A duplicate `(user_id, category, item_id)` violates
    /// `uq_favorites_user_category_item`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        category: Category,
        input: &CreateFavorite,
    ) -> Result<Favorite, sqlx::Error> {
        let query = format!(
            "INSERT INTO favorites (user_id, category, item_id, title, image, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(user_id)
            .bind(category.as_str())
            .bind(&input.item_id)
            .bind(&input.title)
            .bind(&input.image)
            .bind(&input.metadata)
            .fetch_one(pool)
            .await
    }

    /// Whether the user already saved this item in the category.
    pub async fn exists(
        pool: &PgPool,
        user_id: DbId,
        category: Category,
        item_id: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS( \
                SELECT 1 FROM favorites \
                WHERE user_id = $1 AND category = $2 AND item_id = $3)",
        )
        .bind(user_id)
        .bind(category.as_str())
        .bind(item_id)
        .fetch_one(pool)
        .await
    }

    /// List a user's favorites in one category, oldest first.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        category: Category,
    ) -> Result<Vec<Favorite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM favorites \
             WHERE user_id = $1 AND category = $2 \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(user_id)
            .bind(category.as_str())
            .fetch_all(pool)
            .await
    }

    /// Delete a favorite. Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        user_id: DbId,
        category: Category,
        item_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM favorites \
             WHERE user_id = $1 AND category = $2 AND item_id = $3",
        )
        .bind(user_id)
        .bind(category.as_str())
        .bind(item_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count a user's favorites per category.
    pub async fn count_by_category(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<FavoriteCounts, sqlx::Error> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT category, COUNT(*) FROM favorites \
             WHERE user_id = $1 \
             GROUP BY category",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let mut counts = FavoriteCounts::default();
        for (category, count) in rows {
            match Category::parse(&category) {
                Ok(Category::Anime) => counts.anime = count,
                Ok(Category::Game) => counts.games = count,
                Ok(Category::Music) => counts.music = count,
                Err(_) => {
                    tracing::warn!(user_id, %category, "Ignoring favorite with unknown category");
                }
            }
        }
        Ok(counts)
    }
}
