//! Query-string deserialization for paginated list endpoints.

use crudlayer_core::page::PageRequest;
use serde::Deserialize;

/// The `?page=&limit=` pair as it arrives on a list endpoint.
///
/// Both fields are optional; normalization (defaults, floors, the limit
/// ceiling) happens in the repository, so handlers pass this through
/// untouched.
///
/// ```ignore
/// async fn list_users(Query(query): Query<PageQuery>) -> Result<ApiResponse<Page<User>>, ApiError> {
///     let page = users.paginate(doc! {}, query.into()).await?;
///     Ok(ApiResponse::ok(page))
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl From<PageQuery> for PageRequest {
    fn from(query: PageQuery) -> Self {
        PageRequest {
            page: query.page,
            limit: query.limit,
        }
    }
}
