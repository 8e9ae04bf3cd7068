use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

/// Shared connection to the reminders server. Every request carries the
/// `x-api-key` header.
pub(crate) struct BaseClient {
    http: Client,
    address: String,
    api_key: String,
}

#[derive(Debug)]
pub enum APIError {
    Network,
    MalformedResponse,
    /// The server answered with another status than expected, together with
    /// the error message it returned
    UnexpectedStatusCode(StatusCode, String),
}
pub type APIResponse<T> = Result<T, APIError>;

impl BaseClient {
    pub fn new(address: String, api_key: String) -> Self {
        Self {
            http: Client::new(),
            address: address.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/api/v1/{}", self.address, path);
        self.http
            .request(method, &url)
            .header("x-api-key", self.api_key.as_str())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = req.send().await.map_err(|_| APIError::Network)?;
        read_response(res, expected_status_code).await
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.send(self.request(Method::GET, &path), expected_status_code)
            .await
    }

    pub async fn post<T: DeserializeOwned, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let req = self.request(Method::POST, &path).json(&body);
        self.send(req, expected_status_code).await
    }
}

async fn read_response<T: DeserializeOwned>(
    res: Response,
    expected_status_code: StatusCode,
) -> APIResponse<T> {
    let status = res.status();
    if status != expected_status_code {
        let message = res.text().await.unwrap_or_default();
        return Err(APIError::UnexpectedStatusCode(status, message));
    }
    res.json::<T>()
        .await
        .map_err(|_| APIError::MalformedResponse)
}
