//! Asset listing query builder.
//!
//! Turns the raw `?search=&category=&sortBy=&sortOrder=` parameters of the
//! asset browser into an immutable [`AssetQuerySpec`]: an explicit AND list
//! of predicates plus exactly one sort key. The repository layer renders the
//! spec to SQL; everything here is pure so it can be tested without a
//! database.

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Sentinel category value meaning "no category filter".
pub const CATEGORY_ALL: &str = "all";

/// Display name for assets that have no category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Fields searched by the free-text filter. A row matches when ANY of them
/// contains the search text.
pub const TEXT_MATCH_FIELDS: [TextField; 3] = [
    TextField::AssetName,
    TextField::AssetDescription,
    TextField::CategoryName,
];

// ---------------------------------------------------------------------------
// Raw request parameters
// ---------------------------------------------------------------------------

/// Query string parameters accepted by `GET /api/assets`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Column the listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Size,
    Category,
    CreatedAt,
}

impl SortKey {
    /// Parse a `sortBy` value. Unknown values fall back to [`SortKey::CreatedAt`].
    pub fn parse(value: &str) -> Self {
        match value {
            "name" => Self::Name,
            "size" => Self::Size,
            "category" => Self::Category,
            _ => Self::CreatedAt,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Size => "size",
            Self::Category => "category",
            Self::CreatedAt => "created_at",
        }
    }

    /// Direction actually applied. Creation time is always newest first.
    pub fn effective_order(self, requested: SortOrder) -> SortOrder {
        match self {
            Self::CreatedAt => SortOrder::Desc,
            _ => requested,
        }
    }

    /// Whether the sorted column can be NULL (no size recorded, no category).
    pub fn is_nullable(self) -> bool {
        matches!(self, Self::Size | Self::Category)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse a `sortOrder` value. Anything other than `asc` is descending.
    pub fn parse(value: &str) -> Self {
        if value == "asc" {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

/// The single ordering applied to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
    /// NULL values go after all non-NULL values, in both directions.
    pub nulls_last: bool,
}

// ---------------------------------------------------------------------------
// Validated query
// ---------------------------------------------------------------------------

/// A validated asset listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetQuery {
    /// Free-text filter; `None` when absent or empty.
    pub search: Option<String>,
    /// Category filter; `None` means all categories.
    pub category: Option<DbId>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl Default for AssetQuery {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            sort_by: SortKey::CreatedAt,
            sort_order: SortOrder::Desc,
        }
    }
}

impl AssetQuery {
    /// Validate raw query parameters.
    ///
    /// Empty values behave like absent ones. A category that is neither
    /// `"all"` nor a UUID is rejected. `sortOrder` is ignored when sorting
    /// by creation time.
    pub fn from_params(params: &AssetListParams) -> Result<Self, CoreError> {
        let search = params
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let category = match params.category.as_deref() {
            None | Some("") | Some(CATEGORY_ALL) => None,
            Some(raw) => Some(raw.parse::<DbId>().map_err(|_| {
                CoreError::Validation(format!("Invalid category id '{raw}'"))
            })?),
        };

        let sort_by = params
            .sort_by
            .as_deref()
            .map(SortKey::parse)
            .unwrap_or(SortKey::CreatedAt);

        let sort_order = params
            .sort_order
            .as_deref()
            .map(SortOrder::parse)
            .unwrap_or(SortOrder::Desc);
        let sort_order = sort_by.effective_order(sort_order);

        Ok(Self {
            search,
            category,
            sort_by,
            sort_order,
        })
    }
}

// ---------------------------------------------------------------------------
// Query specification
// ---------------------------------------------------------------------------

/// A column the free-text filter looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    AssetName,
    AssetDescription,
    CategoryName,
}

/// One conjunct of the listing's WHERE clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `is_public = true`. Always present.
    IsPublic,
    /// Exact match on the asset's category id.
    CategoryIs(DbId),
    /// Case-insensitive substring match on ANY of `any_of`.
    ///
    /// `pattern` is a ready-to-bind `ILIKE` pattern with wildcards escaped.
    TextMatch {
        pattern: String,
        any_of: Vec<TextField>,
    },
}

/// Immutable description of an asset listing read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetQuerySpec {
    /// Combined with AND.
    pub filters: Vec<Predicate>,
    pub sort: SortSpec,
}

/// Map a validated request to its query specification.
pub fn build_query_spec(query: &AssetQuery) -> AssetQuerySpec {
    let mut filters = vec![Predicate::IsPublic];

    if let Some(category_id) = query.category {
        filters.push(Predicate::CategoryIs(category_id));
    }

    if let Some(search) = query.search.as_deref() {
        filters.push(Predicate::TextMatch {
            pattern: like_pattern(search),
            any_of: TEXT_MATCH_FIELDS.to_vec(),
        });
    }

    AssetQuerySpec {
        filters,
        sort: SortSpec {
            key: query.sort_by,
            order: query.sort_by.effective_order(query.sort_order),
            nulls_last: query.sort_by.is_nullable(),
        },
    }
}

/// Build a `%...%` `ILIKE` pattern matching `search` literally.
///
/// `\`, `%` and `_` are escaped with a backslash, PostgreSQL's default LIKE
/// escape character.
pub fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for ch in search.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Category label shown for a listed asset.
pub fn display_category(name: Option<&str>) -> &str {
    name.unwrap_or(UNCATEGORIZED)
}
