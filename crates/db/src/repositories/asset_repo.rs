//! Repository for the `assets` table and the asset listing read.

use pilakon_core::asset_query::{
    AssetQuerySpec, Predicate, SortKey, SortOrder, SortSpec, TextField,
};
use pilakon_core::types::{DbId, UserId};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::asset::{Asset, AssetListingRow, CreateAsset};

/// Column list for `assets` queries.
const ASSET_COLUMNS: &str = "\
    id, name, description, file_path, public_url, category_id, tags, \
    file_size, mime_type, uploaded_by, is_public, created_at, updated_at";

/// Same columns qualified with the `a` alias used by the listing join.
const LISTING_ASSET_COLUMNS: &str = "\
    a.id, a.name, a.description, a.file_path, a.public_url, a.category_id, a.tags, \
    a.file_size, a.mime_type, a.uploaded_by, a.is_public, a.created_at, a.updated_at";

/// Provides CRUD operations and the filtered listing for assets.
pub struct AssetRepo;

impl AssetRepo {
    /// Insert a new asset row.
    pub async fn create(pool: &PgPool, input: &CreateAsset) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets (\
                name, description, file_path, public_url, category_id, \
                tags, file_size, mime_type, uploaded_by, is_public\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {ASSET_COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(&input.name)
            .bind(input.description.as_deref())
            .bind(&input.file_path)
            .bind(&input.public_url)
            .bind(input.category_id)
            .bind(Json(&input.tags))
            .bind(input.file_size)
            .bind(input.mime_type.as_deref())
            .bind(input.uploaded_by)
            .bind(input.is_public)
            .fetch_one(pool)
            .await
    }

    /// Find an asset by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {ASSET_COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether an asset exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM assets WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Run the asset listing described by `spec`.
    ///
    /// `viewer` only drives the favorite marker; it never narrows the result.
    pub async fn list(
        pool: &PgPool,
        spec: &AssetQuerySpec,
        viewer: Option<UserId>,
    ) -> Result<Vec<AssetListingRow>, sqlx::Error> {
        let query = render_listing_sql(spec);

        // $1 is always the viewer id; NULL never matches a favorite row.
        let mut q = sqlx::query_as::<_, AssetListingRow>(&query).bind(viewer);

        // Bind predicate parameters in the same order they were rendered.
        for predicate in &spec.filters {
            match predicate {
                Predicate::IsPublic => {}
                Predicate::CategoryIs(category_id) => q = q.bind(*category_id),
                Predicate::TextMatch { pattern, .. } => q = q.bind(pattern.as_str()),
            }
        }

        q.fetch_all(pool).await
    }
}

/// Render the listing SELECT for `spec` with positional parameters.
///
/// `$1` is reserved for the viewer id; each parameterised predicate takes
/// the next index in order.
fn render_listing_sql(spec: &AssetQuerySpec) -> String {
    let mut conditions = Vec::with_capacity(spec.filters.len());
    let mut bind_idx = 2u32;

    for predicate in &spec.filters {
        match predicate {
            Predicate::IsPublic => conditions.push("a.is_public = TRUE".to_string()),
            Predicate::CategoryIs(_) => {
                conditions.push(format!("a.category_id = ${bind_idx}"));
                bind_idx += 1;
            }
            Predicate::TextMatch { any_of, .. } => {
                let alternatives: Vec<String> = any_of
                    .iter()
                    .map(|field| format!("{} ILIKE ${bind_idx}", text_column(*field)))
                    .collect();
                conditions.push(format!("({})", alternatives.join(" OR ")));
                bind_idx += 1;
            }
        }
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    format!(
        "SELECT {LISTING_ASSET_COLUMNS}, \
            c.name AS category_name, \
            (f.id IS NOT NULL) AS is_favorite \
         FROM assets a \
         LEFT JOIN asset_categories c ON c.id = a.category_id \
         LEFT JOIN user_favorites f ON f.asset_id = a.id AND f.user_id = $1 \
         {where_clause} \
         ORDER BY {order_by}",
        order_by = render_order_by(&spec.sort),
    )
}

fn text_column(field: TextField) -> &'static str {
    match field {
        TextField::AssetName => "a.name",
        TextField::AssetDescription => "a.description",
        TextField::CategoryName => "c.name",
    }
}

/// Primary sort column plus an id tie-breaker in the same direction, so the
/// descending listing is the exact reverse of the ascending one.
///
/// Text columns compare bytewise (`COLLATE "C"`) so the order does not depend
/// on the database locale.
fn render_order_by(sort: &SortSpec) -> String {
    let column = match sort.key {
        SortKey::Name => "a.name COLLATE \"C\"",
        SortKey::Size => "a.file_size",
        SortKey::Category => "c.name COLLATE \"C\"",
        SortKey::CreatedAt => "a.created_at",
    };
    let direction = match sort.order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    let nulls = if sort.nulls_last { " NULLS LAST" } else { "" };

    format!("{column} {direction}{nulls}, a.id {direction}")
}

#[cfg(test)]
mod tests {
    use pilakon_core::asset_query::{build_query_spec, AssetQuery};

    use super::*;

    #[test]
    fn default_listing_is_public_newest_first() {
        let sql = render_listing_sql(&build_query_spec(&AssetQuery::default()));

        assert!(sql.contains("WHERE a.is_public = TRUE ORDER BY"));
        assert!(sql.ends_with("ORDER BY a.created_at DESC, a.id DESC"));
        assert!(sql.contains("f.user_id = $1"));
        assert!(!sql.contains("$2"));
    }

    #[test]
    fn category_and_search_take_sequential_binds() {
        let query = AssetQuery {
            search: Some("dragon".into()),
            category: Some(uuid::Uuid::new_v4()),
            ..AssetQuery::default()
        };
        let sql = render_listing_sql(&build_query_spec(&query));

        assert!(sql.contains(
            "WHERE a.is_public = TRUE AND a.category_id = $2 AND \
             (a.name ILIKE $3 OR a.description ILIKE $3 OR c.name ILIKE $3)"
        ));
    }

    #[test]
    fn search_without_category_uses_second_bind() {
        let query = AssetQuery {
            search: Some("castle".into()),
            ..AssetQuery::default()
        };
        let sql = render_listing_sql(&build_query_spec(&query));

        assert!(sql.contains("(a.name ILIKE $2 OR a.description ILIKE $2 OR c.name ILIKE $2)"));
    }

    #[test]
    fn nullable_sorts_put_nulls_last() {
        let query = AssetQuery {
            sort_by: SortKey::Size,
            sort_order: SortOrder::Asc,
            ..AssetQuery::default()
        };
        let sql = render_listing_sql(&build_query_spec(&query));
        assert!(sql.ends_with("ORDER BY a.file_size ASC NULLS LAST, a.id ASC"));

        let query = AssetQuery {
            sort_by: SortKey::Category,
            ..AssetQuery::default()
        };
        let sql = render_listing_sql(&build_query_spec(&query));
        assert!(sql.ends_with("ORDER BY c.name COLLATE \"C\" DESC NULLS LAST, a.id DESC"));
    }
}
