use regex::Regex;

/// Extracts the numeric id from a TMDB movie page URL, e.g.
/// `https://www.themoviedb.org/movie/27205-inception`.
pub fn parse_tmdb_movie_id(input: &str) -> Option<u64> {
    let regex = Regex::new(r"themoviedb\.org/(?:[a-z]{2}(?:-[A-Z]{2})?/)?movie/(\d+)").ok()?;
    let captures = regex.captures(input)?;
    captures.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::parse_tmdb_movie_id;

    #[test]
    fn parses_movie_url_with_slug() {
        let url = "https://www.themoviedb.org/movie/27205-inception";
        assert_eq!(parse_tmdb_movie_id(url), Some(27205));
    }

    #[test]
    fn parses_movie_url_with_query() {
        let url = "https://www.themoviedb.org/movie/603?language=ja-JP";
        assert_eq!(parse_tmdb_movie_id(url), Some(603));
    }

    #[test]
    fn ignores_tv_urls() {
        let url = "https://www.themoviedb.org/tv/1399-game-of-thrones/season/1/episode/1";
        assert_eq!(parse_tmdb_movie_id(url), None);
    }
}
