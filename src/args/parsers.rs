use std::time::Duration;

use super::types::PositiveUsize;
use crate::error::{AppError, AppResult, ValidationError};

/// Splits a `Name:Value` header on its first colon.
///
/// # Errors
///
/// Returns an error when the value has no colon or the name is empty.
pub fn parse_header(s: &str) -> Result<(String, String), ValidationError> {
    let (key, value) = s
        .split_once(':')
        .ok_or_else(|| ValidationError::InvalidHeaderFormat {
            value: s.to_owned(),
        })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ValidationError::EmptyHeaderName {
            value: s.to_owned(),
        });
    }
    Ok((key.to_owned(), value.trim().to_owned()))
}

pub(super) fn parse_positive_usize(s: &str) -> AppResult<PositiveUsize> {
    s.parse::<PositiveUsize>().map_err(AppError::from)
}

pub(crate) fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    let value = s.trim();
    if value.is_empty() {
        return Err(AppError::validation(ValidationError::DurationEmpty));
    }

    let digits_len = value.chars().take_while(char::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(AppError::validation(
            ValidationError::InvalidDurationFormat {
                value: value.to_owned(),
            },
        ));
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part.parse().map_err(|err| {
        AppError::validation(ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })
    })?;

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    let duration = match unit {
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => {
            let secs = number
                .checked_mul(60)
                .ok_or_else(|| AppError::validation(ValidationError::DurationOverflow))?;
            Duration::from_secs(secs)
        }
        "h" => {
            let secs = number
                .checked_mul(60)
                .and_then(|seconds| seconds.checked_mul(60))
                .ok_or_else(|| AppError::validation(ValidationError::DurationOverflow))?;
            Duration::from_secs(secs)
        }
        _ => {
            return Err(AppError::validation(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            }));
        }
    };

    if duration.is_zero() {
        return Err(AppError::validation(ValidationError::DurationZero));
    }

    Ok(duration)
}
