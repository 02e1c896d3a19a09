//! Profile field validation for founders and investors.

use crate::error::CoreError;
use crate::types::Amount;

/// Maximum length of a profile bio.
pub const MAX_BIO_LEN: usize = 2_000;

/// Validate that an optional URL field uses an HTTP(S) scheme.
pub fn validate_url(field: &str, url: Option<&str>) -> Result<(), CoreError> {
    match url {
        Some(u) if !(u.starts_with("https://") || u.starts_with("http://")) => {
            Err(CoreError::Validation(format!(
                "'{field}' must start with http:// or https://"
            )))
        }
        _ => Ok(()),
    }
}

/// Validate an EVM-style wallet address (`0x` followed by 40 hex digits).
pub fn validate_wallet_address(address: &str) -> Result<(), CoreError> {
    let valid = address
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Wallet address must be 0x followed by 40 hex characters".into(),
        ))
    }
}

/// Validate an investor's ticket size range.
pub fn validate_ticket_range(
    min_ticket: Option<Amount>,
    max_ticket: Option<Amount>,
) -> Result<(), CoreError> {
    if min_ticket.is_some_and(|m| m < 0) || max_ticket.is_some_and(|m| m < 0) {
        return Err(CoreError::Validation(
            "Ticket sizes must not be negative".into(),
        ));
    }
    if let (Some(min), Some(max)) = (min_ticket, max_ticket) {
        if min > max {
            return Err(CoreError::Validation(
                "Minimum ticket cannot exceed maximum ticket".into(),
            ));
        }
    }
    Ok(())
}

/// Validate a bio's length.
pub fn validate_bio(bio: Option<&str>) -> Result<(), CoreError> {
    if bio.is_some_and(|b| b.chars().count() > MAX_BIO_LEN) {
        return Err(CoreError::Validation(format!(
            "Bio must be at most {MAX_BIO_LEN} characters"
        )));
    }
    Ok(())
}
