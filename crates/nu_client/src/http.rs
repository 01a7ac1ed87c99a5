use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use nu_core::dates::api_date;
use nu_core::{
    ArticleRecord, DailyResource, Envelope, Error, NewsApi, PageQuery, RawArticle, Result,
};

use crate::config::ClientConfig;

/// Plain GET client for the newsup backend.
#[derive(Debug, Clone)]
pub struct HttpNewsApi {
    client: Client,
    base_url: Url,
}

impl HttpNewsApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// Appends percent-encoded path segments to the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_data<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let envelope: Envelope<T> = response.json().await?;
        unwrap_envelope(envelope, &url)
    }
}

fn unwrap_envelope<T>(envelope: Envelope<T>, url: &Url) -> Result<T> {
    envelope.data.ok_or_else(|| Error::MissingData(url.to_string()))
}

#[async_trait]
impl NewsApi for HttpNewsApi {
    async fn articles_by_date(
        &self,
        source: &str,
        date: NaiveDate,
        page: Option<PageQuery>,
    ) -> Result<Vec<RawArticle>> {
        let date = api_date(date);
        let mut url = self.endpoint(&["api", "articles", source, "by-date", &date])?;
        if let Some(page) = page {
            url.query_pairs_mut()
                .append_pair("page", &page.page.to_string())
                .append_pair("limit", &page.limit.to_string());
        }
        self.get_data(url).await
    }

    async fn article_by_id(&self, source: &str, id: &str) -> Result<ArticleRecord> {
        let url = self.endpoint(&["api", "articles", "by-id", source, id])?;
        self.get_data(url).await
    }

    async fn resources_by_date(&self, date: NaiveDate) -> Result<Vec<DailyResource>> {
        let date = api_date(date);
        let url = self.endpoint(&["api", "resources", "by-date", &date])?;
        self.get_data(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const HINDU_BY_DATE: &str = "/api/articles/The%20Hindu/by-date/05-03-2025";

    fn api(base_url: &str) -> HttpNewsApi {
        HttpNewsApi::new(&ClientConfig::default().with_base_url(base_url)).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let api = api("https://example.com/");
        let url = api
            .endpoint(&["api", "articles", "The Hindu", "by-date", "05-03-2025"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/api/articles/The%20Hindu/by-date/05-03-2025"
        );

        let url = api.endpoint(&["api", "articles", "by-id", "a/b", "7"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/articles/by-id/a%2Fb/7");
    }

    #[test]
    fn test_envelope_without_data_fails() {
        let url = Url::parse("https://example.com/x").unwrap();
        let envelope: Envelope<Vec<RawArticle>> = serde_json::from_str(r#"{"message": "ok"}"#).unwrap();
        assert!(matches!(unwrap_envelope(envelope, &url), Err(Error::MissingData(_))));

        let envelope: Envelope<Vec<RawArticle>> =
            serde_json::from_str(r#"{"data": [{"title": "A"}]}"#).unwrap();
        assert_eq!(unwrap_envelope(envelope, &url).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_by_date_requests_source_and_date_path() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", HINDU_BY_DATE)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": [{"articleId": 1, "title": "Budget"}, {"articleId": 2}]}"#)
            .create_async()
            .await;

        let articles = api(&server.url())
            .articles_by_date("The Hindu", date(), None)
            .await
            .unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title.as_deref(), Some("Budget"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_by_date_carries_page_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", HINDU_BY_DATE)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("limit".into(), "25".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"data": []}"#)
            .create_async()
            .await;

        let page = Some(PageQuery { page: 1, limit: 25 });
        let articles = api(&server.url())
            .articles_by_date("The Hindu", date(), page)
            .await
            .unwrap();
        assert!(articles.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_404_maps_to_not_found() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", HINDU_BY_DATE)
            .with_status(404)
            .create_async()
            .await;

        let err = api(&server.url())
            .articles_by_date("The Hindu", date(), None)
            .await
            .unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {}", err);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/articles/by-id/The%20Hindu/1")
            .with_status(500)
            .create_async()
            .await;

        let err = api(&server.url()).article_by_id("The Hindu", "1").await.unwrap_err();
        assert!(matches!(err, Error::Status { status: 500, .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_article_envelope_is_decoded() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/articles/by-id/Indian%20Express/65f0")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"title": "Budget 2025", "category": "Economy"}}"#)
            .create_async()
            .await;

        let record = api(&server.url())
            .article_by_id("Indian Express", "65f0")
            .await
            .unwrap();
        assert_eq!(record.title.as_deref(), Some("Budget 2025"));
        assert_eq!(record.category.as_deref(), Some("Economy"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_resources_path_and_missing_data() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/resources/by-date/05-03-2025")
            .with_status(200)
            .with_body(r#"{"message": "nothing here"}"#)
            .create_async()
            .await;

        let err = api(&server.url()).resources_by_date(date()).await.unwrap_err();
        assert!(matches!(err, Error::MissingData(_)));
        mock.assert_async().await;
    }
}
