use sea_orm::entity::prelude::DateTimeWithTimeZone;

/// Write access to the columns every table shares. Implemented by the
/// `BaseEntity` derive; `DaoBase` uses it to stamp ids and timestamps
/// without knowing the concrete active model.
pub trait BaseColumnsActiveModel {
    fn set_id(&mut self, id: uuid::Uuid);
    fn set_created_at(&mut self, ts: DateTimeWithTimeZone);
    fn set_updated_at(&mut self, ts: DateTimeWithTimeZone);

    /// Fills in all three base columns for a freshly inserted row.
    fn stamp_new(&mut self, id: uuid::Uuid, now: DateTimeWithTimeZone) {
        self.set_id(id);
        self.set_created_at(now);
        self.set_updated_at(now);
    }
}

/// Names the `created_at` column so pagination can default to newest-first.
pub trait HasCreatedAtColumn: sea_orm::EntityTrait {
    fn created_at_column() -> Self::Column;
}
