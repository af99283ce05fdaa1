use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, time::Duration};

use crate::error::FetchError;

const USER_AGENT: &str = concat!("eink-weather/", env!("CARGO_PKG_VERSION"));

/// Byte source for provider responses.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// GETs `url` and returns the body of a successful response.
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).user_agent(USER_AGENT).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let res = self.http.get(url).send().await?;

        let status = res.status();
        let body = res.bytes().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_body(&String::from_utf8_lossy(&body)),
            });
        }

        Ok(body.to_vec())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        location::Location,
        provider::{AirQualityRequest, Request, fetch},
    };
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport() -> HttpTransport {
        HttpTransport::new(Duration::from_secs(5)).expect("client builds")
    }

    #[test]
    fn truncate_body_limits_length() {
        assert_eq!(truncate_body("short"), "short");
        let long = "é".repeat(300);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }

    #[tokio::test]
    async fn fetch_populates_response_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed/geo:52.23;21.01/"))
            .and(query_param("token", "TOKEN"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "data": {"iaqi": {"pm25": {"v": 12}}}
            })))
            .mount(&server)
            .await;

        let mut request: Request = AirQualityRequest::with_endpoint(server.uri(), "TOKEN").into();
        request.build_path(&Location::new("Warsaw", 52.2297, 21.0122));

        fetch(&transport(), &mut request).await.expect("fetch succeeds");
        assert!(request.has_response());
    }

    #[tokio::test]
    async fn http_error_leaves_response_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let mut request = AirQualityRequest::with_endpoint(server.uri(), "TOKEN");
        request.build_path(&Location::new("Warsaw", 52.2297, 21.0122));

        let err = request.fetch(&transport()).await.unwrap_err();
        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream down");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(request.response().is_none());
    }

    #[tokio::test]
    async fn unbuilt_path_is_rejected_before_network() {
        let mut request = AirQualityRequest::with_endpoint("http://127.0.0.1:1", "TOKEN");
        let err = request.fetch(&transport()).await.unwrap_err();
        assert!(matches!(err, FetchError::PathNotBuilt));
    }
}
