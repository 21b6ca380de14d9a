/// Macro to generate common From implementations for service errors
///
/// Maps `sqlx::Error` onto the service error taxonomy: unique constraint
/// violations become the conflict variant (the database is the final
/// authority on uniqueness, the service-level checks are pre-checks),
/// missing rows become the not-found variant, anything else is internal.
///
/// Usage:
/// ```ignore
/// impl_service_error_conversions!(EntryServiceError, InternalServerError, NotFound);
/// impl_service_error_conversions!(UserServiceError, InternalServerError, NotFound, Conflict);
/// ```
#[macro_export]
macro_rules! impl_service_error_conversions {
  ($error_type:ty, $internal_variant:ident, $not_found_variant:ident) => {
    impl From<sqlx::Error> for $error_type {
      fn from(err: sqlx::Error) -> Self {
        match err {
          sqlx::Error::RowNotFound => <$error_type>::$not_found_variant("Record not found".to_string()),
          other => <$error_type>::$internal_variant(format!("Database error: {}", other)),
        }
      }
    }
  };

  ($error_type:ty, $internal_variant:ident, $not_found_variant:ident, $conflict_variant:ident) => {
    impl From<sqlx::Error> for $error_type {
      fn from(err: sqlx::Error) -> Self {
        match err {
          sqlx::Error::RowNotFound => <$error_type>::$not_found_variant("Record not found".to_string()),
          sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            <$error_type>::$conflict_variant(format!("Uniqueness violation: {}", db_err))
          }
          other => <$error_type>::$internal_variant(format!("Database error: {}", other)),
        }
      }
    }
  };
}
