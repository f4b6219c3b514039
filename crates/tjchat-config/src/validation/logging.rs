//! Validation for the `[logging]` section.

use crate::schema::TjchatConfig;

use super::helpers::validate_range;

pub(crate) fn validate_logging(errors: &mut Vec<String>, config: &TjchatConfig) {
    validate_range(
        errors,
        "logging.backup_count",
        u64::from(config.logging.backup_count),
        0,
        100,
    );
}
