use sea_orm::DbErr;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum DaoLayerError {
    #[error("Database error: {0}")]
    Db(DbErr),
    #[error("{} not found (id={id})", short_entity_name(.entity))]
    NotFound { entity: &'static str, id: Uuid },
    #[error("Invalid pagination: page={page} page_size={page_size}")]
    InvalidPagination { page: u64, page_size: u64 },
}

pub type DaoResult<T> = Result<T, DaoLayerError>;

/// `std::any::type_name` yields the full module path; clients only need the
/// entity's own name.
fn short_entity_name(entity: &str) -> &str {
    entity
        .trim_end_matches("::Entity")
        .rsplit("::")
        .next()
        .unwrap_or(entity)
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::DaoLayerError;

    #[test]
    fn not_found_display_uses_short_entity_name() {
        let id = Uuid::new_v4();
        let err = DaoLayerError::NotFound {
            entity: "korsvagen_server::db::entities::page::Entity",
            id,
        };
        assert_eq!(err.to_string(), format!("page not found (id={id})"));
    }
}
