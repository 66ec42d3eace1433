//! Repository for comics and their panels.

use pilakon_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::comic::{Comic, CreateComic, CreatePanel, Panel};

/// Column list for `comics` queries.
const COMIC_COLUMNS: &str = "id, title, user_id, created_at, updated_at";

/// Column list for `panels` queries.
const PANEL_COLUMNS: &str = "\
    id, comic_id, image_url, text, width, text_position, text_style, \
    \"order\", created_at";

/// Provides comic listing and panel access.
pub struct ComicRepo;

impl ComicRepo {
    /// Insert a comic owned by `input.user_id`.
    pub async fn create(pool: &PgPool, input: &CreateComic) -> Result<Comic, sqlx::Error> {
        let query = format!(
            "INSERT INTO comics (title, user_id) VALUES ($1, $2) RETURNING {COMIC_COLUMNS}"
        );
        sqlx::query_as::<_, Comic>(&query)
            .bind(&input.title)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    /// List a user's comics, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: UserId) -> Result<Vec<Comic>, sqlx::Error> {
        let query = format!(
            "SELECT {COMIC_COLUMNS} FROM comics WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Comic>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a comic only if it belongs to `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: UserId,
    ) -> Result<Option<Comic>, sqlx::Error> {
        let query = format!("SELECT {COMIC_COLUMNS} FROM comics WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Comic>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Append a panel to a comic.
    pub async fn create_panel(pool: &PgPool, input: &CreatePanel) -> Result<Panel, sqlx::Error> {
        let query = format!(
            "INSERT INTO panels (\
                comic_id, image_url, text, width, text_position, text_style, \"order\"\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {PANEL_COLUMNS}"
        );
        sqlx::query_as::<_, Panel>(&query)
            .bind(input.comic_id)
            .bind(&input.image_url)
            .bind(input.text.as_deref())
            .bind(&input.width)
            .bind(&input.text_position)
            .bind(&input.text_style)
            .bind(input.order)
            .fetch_one(pool)
            .await
    }

    /// List a comic's panels in display order.
    pub async fn list_panels(pool: &PgPool, comic_id: DbId) -> Result<Vec<Panel>, sqlx::Error> {
        let query = format!(
            "SELECT {PANEL_COLUMNS} FROM panels WHERE comic_id = $1 \
             ORDER BY \"order\" ASC, created_at ASC"
        );
        sqlx::query_as::<_, Panel>(&query)
            .bind(comic_id)
            .fetch_all(pool)
            .await
    }
}
