//! Startup profile rules.

use chrono::Datelike;

use crate::error::CoreError;
use crate::types::Timestamp;

pub const STAGE_IDEA: &str = "idea";
pub const STAGE_MVP: &str = "mvp";
pub const STAGE_EARLY_REVENUE: &str = "early_revenue";
pub const STAGE_GROWTH: &str = "growth";
pub const STAGE_SCALE: &str = "scale";

/// All valid startup stages, earliest first.
pub const VALID_STAGES: &[&str] = &[
    STAGE_IDEA,
    STAGE_MVP,
    STAGE_EARLY_REVENUE,
    STAGE_GROWTH,
    STAGE_SCALE,
];

/// Maximum length of a startup name.
pub const MAX_NAME_LEN: usize = 120;

/// Earliest accepted founding year.
pub const MIN_FOUNDED_YEAR: i32 = 1900;

/// Validate a startup name (non-empty, bounded length).
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Startup name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Startup name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a stage against the known set.
pub fn validate_stage(stage: &str) -> Result<(), CoreError> {
    if VALID_STAGES.contains(&stage) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid stage '{stage}'. Must be one of: {}",
            VALID_STAGES.join(", ")
        )))
    }
}

/// Validate the founding year is not before 1900 or in the future.
pub fn validate_founded_year(year: Option<i32>, now: Timestamp) -> Result<(), CoreError> {
    match year {
        Some(y) if y < MIN_FOUNDED_YEAR || y > now.year() => Err(CoreError::Validation(format!(
            "Founded year must be between {MIN_FOUNDED_YEAR} and {}",
            now.year()
        ))),
        _ => Ok(()),
    }
}

/// Validate team size is at least one person.
pub fn validate_team_size(size: Option<i32>) -> Result<(), CoreError> {
    if size.is_some_and(|s| s < 1) {
        return Err(CoreError::Validation("Team size must be at least 1".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn name_bounds() {
        assert!(validate_name("Acme").is_ok());
        assert!(validate_name("  ").is_err());
        assert!(validate_name(&"n".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn stages() {
        for stage in VALID_STAGES {
            assert!(validate_stage(stage).is_ok());
        }
        assert!(validate_stage("unicorn").is_err());
    }

    #[test]
    fn founded_year_range() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        assert!(validate_founded_year(Some(2026), now).is_ok());
        assert!(validate_founded_year(None, now).is_ok());
        assert!(validate_founded_year(Some(2027), now).is_err());
        assert!(validate_founded_year(Some(1899), now).is_err());
    }

    #[test]
    fn team_size_positive() {
        assert!(validate_team_size(Some(1)).is_ok());
        assert!(validate_team_size(Some(0)).is_err());
        assert!(validate_team_size(None).is_ok());
    }
}
