use crate::errors::ForecastError;

/// Validates a US ZIP code, either five digits or ZIP+4 (e.g. 10001 or 10001-1234).
/// Returns the trimmed code.
///
/// # Arguments
///
/// * 'input' - ZIP code as entered by the user
pub fn validate_zip_code(input: &str) -> Result<String, ForecastError> {
    let zip_code = input.trim();
    if zip_code.is_empty() {
        return Err(ForecastError::InvalidInput("ZIP code is required.".to_string()));
    }

    let (base, extension) = match zip_code.split_once('-') {
        Some((base, extension)) => (base, Some(extension)),
        None => (zip_code, None),
    };

    if !all_digits(base, 5) || extension.is_some_and(|e| !all_digits(e, 4)) {
        return Err(ForecastError::InvalidInput(
            "Please enter a valid US ZIP code (5 digits, e.g., 10001).".to_string()));
    }

    Ok(zip_code.to_string())
}

/// Returns the five digit base of a validated ZIP code
pub fn base_zip(zip_code: &str) -> &str {
    zip_code.split_once('-').map_or(zip_code, |(base, _)| base)
}

fn all_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}
