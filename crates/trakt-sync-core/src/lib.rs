mod card;
mod error;
pub mod form;
mod media;

pub use card::{
    POSTER_URL, ResultCard, SEARCH_BASE, SyncOutcome, SyncReport, TITLE_ERROR, TITLE_RECORDED,
    TITLE_SETUP, TITLE_UNCHANGED, deep_link, render_card,
};
pub use error::{SyncError, SyncResult};
pub use media::{MediaType, RawParameters, SyncParameters};

pub fn validate_url(url: &str) -> SyncResult<()> {
    let parsed = url::Url::parse(url)
        .map_err(|err| SyncError::InvalidInput(format!("invalid url: {err}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SyncError::InvalidInput(format!(
            "invalid url: unsupported scheme '{}'",
            parsed.scheme()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_url;
    use crate::SyncError;

    #[test]
    fn test_validate_url_valid() {
        assert!(validate_url("https://api.trakt.tv").is_ok());
        assert!(validate_url("http://127.0.0.1:1234").is_ok());
    }

    #[test]
    fn test_validate_url_invalid() {
        let result = validate_url("not-a-url");
        assert!(matches!(result, Err(SyncError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_url_rejects_other_schemes() {
        match validate_url("ftp://api.trakt.tv") {
            Err(SyncError::InvalidInput(msg)) => assert!(msg.contains("ftp")),
            _ => panic!("Expected InvalidInput error"),
        }
    }
}
