pub mod error;

pub use error::ApiError;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::model::{
    Book, BookId, CreateBookRequest, GenreDto, PageQuery, PagedBooks, StatusDto,
    UpdateBookRequest,
};

pub type ApiResult<T> = Result<T, ApiError>;

const MAX_ERROR_BODY: usize = 200;

/// Remote book service surface.
#[async_trait]
pub trait BookApi: Send + Sync {
    async fn fetch_books(&self) -> ApiResult<Vec<Book>>;
    async fn fetch_page(&self, query: &PageQuery) -> ApiResult<PagedBooks>;
    async fn fetch_book(&self, id: BookId) -> ApiResult<Book>;
    async fn create_book(&self, payload: &CreateBookRequest) -> ApiResult<Book>;
    async fn update_book(&self, payload: &UpdateBookRequest) -> ApiResult<Book>;
    async fn delete_book(&self, id: BookId) -> ApiResult<()>;
    async fn fetch_statuses(&self) -> ApiResult<Vec<StatusDto>>;
    async fn fetch_genres(&self) -> ApiResult<Vec<GenreDto>>;
}

pub struct ApiService {
    client: Client,
    base_url: Url,
}

impl ApiService {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Transport(format!("invalid base URL '{base_url}': {e}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().gzip(true).build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Transport(format!("invalid endpoint '{path}': {e}")))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = Self::check(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let body = body.trim();
        let message = if body.is_empty() {
            status.canonical_reason().unwrap_or("Unknown status").to_string()
        } else {
            body.chars().take(MAX_ERROR_BODY).collect()
        };

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl BookApi for ApiService {
    async fn fetch_books(&self) -> ApiResult<Vec<Book>> {
        let url = self.endpoint("Books")?;
        debug!("GET {}", url);
        self.send_json(self.client.get(url)).await
    }

    async fn fetch_page(&self, query: &PageQuery) -> ApiResult<PagedBooks> {
        let mut url = self.endpoint("Books/paged")?;
        url.query_pairs_mut().extend_pairs(query.query_pairs());
        debug!("GET {}", url);
        self.send_json(self.client.get(url)).await
    }

    async fn fetch_book(&self, id: BookId) -> ApiResult<Book> {
        let url = self.endpoint(&format!("Books/{id}"))?;
        debug!("GET {}", url);
        self.send_json(self.client.get(url)).await
    }

    async fn create_book(&self, payload: &CreateBookRequest) -> ApiResult<Book> {
        let url = self.endpoint("Books/createBook")?;
        debug!("POST {}", url);
        self.send_json(self.client.post(url).json(payload)).await
    }

    async fn update_book(&self, payload: &UpdateBookRequest) -> ApiResult<Book> {
        let url = self.endpoint("Books/updateBook")?;
        debug!("POST {} (id {})", url, payload.id);
        self.send_json(self.client.post(url).json(payload)).await
    }

    async fn delete_book(&self, id: BookId) -> ApiResult<()> {
        let url = self.endpoint(&format!("Books/{id}"))?;
        debug!("DELETE {}", url);
        Self::check(self.client.delete(url).send().await?).await?;
        Ok(())
    }

    async fn fetch_statuses(&self) -> ApiResult<Vec<StatusDto>> {
        let url = self.endpoint("Lookups/statuses")?;
        self.send_json(self.client.get(url)).await
    }

    async fn fetch_genres(&self) -> ApiResult<Vec<GenreDto>> {
        let url = self.endpoint("Lookups/Genres")?;
        self.send_json(self.client.get(url)).await
    }
}
