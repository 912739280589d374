/// TMDB (The Movie Database) provider
///
/// Uses the v3 `/search/movie` endpoint with api-key query authentication.
/// Results come back as a paged envelope; only the first page is consumed,
/// matching the "last query/result pair" scope of the search feature.
use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{Title, TmdbMovie},
    services::providers::SearchProvider,
};

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

#[async_trait::async_trait]
impl SearchProvider for TmdbProvider {
    async fn search(&self, query: &str) -> AppResult<Vec<Title>> {
        let url = format!("{}/3/search/movie", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("include_adult", "false"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let search_response: SearchResponse = response.json().await?;
        let titles: Vec<Title> = search_response.results.into_iter().map(Title::from).collect();

        tracing::info!(
            query = %query,
            results = titles.len(),
            provider = "tmdb",
            "Title search completed"
        );

        Ok(titles)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmdb_movie_deserialization() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "release_date": "2010-07-15",
            "overview": "Cobb, a skilled thief...",
            "poster_path": "/inception.jpg"
        }"#;

        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 27205);
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.release_date, Some("2010-07-15".to_string()));
    }

    #[test]
    fn test_title_conversion_extracts_year() {
        let movie = TmdbMovie {
            id: 27205,
            title: "Inception".to_string(),
            release_date: Some("2010-07-15".to_string()),
            overview: Some("Cobb, a skilled thief...".to_string()),
            poster_path: Some("/inception.jpg".to_string()),
        };

        let title = Title::from(movie);
        assert_eq!(title.release_year, Some(2010));
        assert_eq!(title.title, "Inception");
    }

    #[test]
    fn test_title_conversion_handles_missing_date() {
        let movie = TmdbMovie {
            id: 1,
            title: "Unreleased".to_string(),
            release_date: None,
            overview: None,
            poster_path: None,
        };

        let title = Title::from(movie);
        assert_eq!(title.release_year, None);
    }

    #[test]
    fn test_title_conversion_handles_empty_date_and_overview() {
        let json = r#"{
            "id": 2,
            "title": "Obscure",
            "release_date": "",
            "overview": ""
        }"#;

        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        let title = Title::from(movie);
        assert_eq!(title.release_year, None);
        assert_eq!(title.overview, None);
    }

    #[test]
    fn test_search_response_tolerates_missing_results() {
        let envelope: SearchResponse = serde_json::from_str(r#"{"page": 1}"#).unwrap();
        assert!(envelope.results.is_empty());
    }
}
