use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for category colors
    /// `#RRGGBB` or `#RRGGBBAA`, case-insensitive hex digits
    /// - Valid: "#FFFFFF", "#1e90ffcc"
    /// - Invalid: "FFFFFF", "#FFF", "#GGGGGG"
    pub static ref HEX_COLOR_REGEX: Regex =
        Regex::new(r"^#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap();

    /// Regex for usernames: letters, digits and `@.+-_`
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[\w.@+-]+$").unwrap();
}

const ALLOWED_URL_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

/// Reject URLs whose scheme could not be followed from a link on the page
/// (`javascript:`, `data:` and the like parse as valid URLs).
pub fn validate_url_scheme(url: &str) -> Result<(), ValidationError> {
    let scheme = url.split_once("://").map(|(scheme, _)| scheme);

    match scheme {
        Some(s) if ALLOWED_URL_SCHEMES.iter().any(|a| a.eq_ignore_ascii_case(s)) => Ok(()),
        _ => {
            let mut err = ValidationError::new("url_scheme");
            err.message = Some("URL must use http, https, ftp or ftps".into());
            Err(err)
        }
    }
}

/// Reject values that are empty once surrounding whitespace is removed
/// (the stored value is trimmed).
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Must not be blank".into());
        return Err(err);
    }
    Ok(())
}
