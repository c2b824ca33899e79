use super::ContentError;
use quire_domain::config::ContentConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::{IntoParams, ToSchema};

/// Which entries a request may see.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PublicationState {
    /// Published entries only.
    #[default]
    Live,
    /// Drafts and published entries.
    Preview,
}

/// Query string accepted by the content endpoints.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContentQuery {
    /// 1-based page number.
    #[serde(rename = "pagination[page]")]
    pub page: Option<u32>,
    /// Entries per page, capped by the server limit.
    #[serde(rename = "pagination[pageSize]")]
    pub page_size: Option<u32>,
    /// Comma separated `field[:asc|desc]` list.
    pub sort: Option<String>,
    #[serde(rename = "publicationState")]
    pub publication_state: Option<PublicationState>,
}

impl ContentQuery {
    #[must_use]
    pub fn preview() -> Self {
        Self { publication_state: Some(PublicationState::Preview), ..Self::default() }
    }

    #[must_use]
    pub fn state(&self) -> PublicationState {
        self.publication_state.unwrap_or_default()
    }

    /// Resolves `(page, page_size)` against the configured limits.
    #[must_use]
    pub fn page(&self, limits: &ContentConfig) -> (u32, u32) {
        let max = limits.max_page_size.max(1);
        let page = self.page.unwrap_or(1).max(1);
        let size = self.page_size.unwrap_or(limits.default_page_size).clamp(1, max);
        (page, size)
    }

    /// Parses `sort` into columns, accepting only `id`, the timestamps, and `sortable`.
    ///
    /// # Errors
    /// [`ContentError::Validation`] for an unknown field or direction.
    pub fn sort_fields(&self, sortable: &[&str]) -> Result<Vec<SortField>, ContentError> {
        let Some(raw) = self.sort.as_deref() else {
            return Ok(Vec::new());
        };

        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| SortField::parse(part, sortable))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        })
    }
}

/// A whitelisted sort column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    /// Storage path, e.g. `attributes.title` or `created_at`.
    pub column: String,
    pub direction: SortDirection,
}

impl SortField {
    fn parse(part: &str, sortable: &[&str]) -> Result<Self, ContentError> {
        let (field, direction) = part.split_once(':').unwrap_or((part, "asc"));

        let direction = match direction.to_ascii_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => {
                return Err(ContentError::Validation {
                    message: format!("Invalid sort direction '{other}'").into(),
                    context: Some(part.to_owned().into()),
                });
            },
        };

        let column = match field {
            "id" => "id".to_owned(),
            "createdAt" => "created_at".to_owned(),
            "updatedAt" => "updated_at".to_owned(),
            "publishedAt" => "published_at".to_owned(),
            attr if sortable.contains(&attr) => format!("attributes.{attr}"),
            other => {
                return Err(ContentError::Validation {
                    message: format!("Cannot sort by '{other}'").into(),
                    context: Some(part.to_owned().into()),
                });
            },
        };

        Ok(Self { column, direction })
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column, self.direction)
    }
}
