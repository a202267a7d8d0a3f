//! Audit fields shared by every record.
//!
//! Each table carries `created_at`, `updated_at` and `is_active` columns. The
//! [`Auditable`] trait gives the active models a uniform way to stamp them, so
//! business logic never has to remember which fields to touch on a mutation.

use sea_orm::{Set, prelude::DateTimeUtc};

/// Uniform access to the audit columns of an active model.
pub trait Auditable {
    /// Stamps a record that is about to be inserted: `created_at = now`,
    /// no `updated_at`, active.
    fn stamp_created(&mut self, now: DateTimeUtc);

    /// Records a mutation by setting `updated_at = now`.
    fn touch(&mut self, now: DateTimeUtc);

    /// Soft-deletes the record. Rows are never removed while referenced.
    fn deactivate(&mut self, now: DateTimeUtc);
}

macro_rules! impl_auditable {
    ($($model:ty),+ $(,)?) => {
        $(
            impl Auditable for $model {
                fn stamp_created(&mut self, now: DateTimeUtc) {
                    self.created_at = Set(now);
                    self.updated_at = Set(None);
                    self.is_active = Set(true);
                }

                fn touch(&mut self, now: DateTimeUtc) {
                    self.updated_at = Set(Some(now));
                }

                fn deactivate(&mut self, now: DateTimeUtc) {
                    self.is_active = Set(false);
                    self.touch(now);
                }
            }
        )+
    };
}

impl_auditable!(
    super::customer::ActiveModel,
    super::staff::ActiveModel,
    super::role::ActiveModel,
    super::shift::ActiveModel,
    super::ticket::ActiveModel,
    super::ticket_assign::ActiveModel,
    super::ticket_reply::ActiveModel,
    super::evaluation::ActiveModel,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::role;
    use sea_orm::ActiveValue;

    #[test]
    fn test_stamp_created_sets_defaults() {
        let now = chrono::Utc::now();
        let mut model = role::ActiveModel::default();
        model.stamp_created(now);

        assert_eq!(model.created_at, ActiveValue::Set(now));
        assert_eq!(model.updated_at, ActiveValue::Set(None));
        assert_eq!(model.is_active, ActiveValue::Set(true));
    }

    #[test]
    fn test_deactivate_touches_updated_at() {
        let now = chrono::Utc::now();
        let mut model = role::ActiveModel::default();
        model.deactivate(now);

        assert_eq!(model.is_active, ActiveValue::Set(false));
        assert_eq!(model.updated_at, ActiveValue::Set(Some(now)));
    }
}
