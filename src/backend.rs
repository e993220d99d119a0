use crate::config::Config;
use crate::errors::AppError;
use crate::models::{WorkoutRecord, WorkoutSubmission, WorkoutsResponse};
use reqwest::Client;
use tracing::{debug, warn};

/// HTTP client for the workout API that owns the data.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

/// CSV export as handed back by the backend.
#[derive(Debug)]
pub struct Export {
    pub content_type: String,
    pub disposition: Option<String>,
    pub body: Vec<u8>,
}

impl BackendClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(config.backend_timeout)
            .build()
            .map_err(AppError::internal)?;
        Ok(Self {
            http,
            base_url: config.backend_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET /api/workouts`. A payload with `success: false` is an error.
    pub async fn fetch_workouts(&self) -> Result<Vec<WorkoutRecord>, AppError> {
        let response = self.http.get(self.url("/api/workouts")).send().await?;
        let status = response.status();
        let payload: WorkoutsResponse = response.json().await?;

        if !payload.success {
            let reason = payload.error.unwrap_or_else(|| status.to_string());
            return Err(AppError::bad_gateway(format!(
                "backend could not list workouts: {reason}"
            )));
        }

        debug!(count = payload.workouts.len(), "fetched workouts");
        Ok(payload.workouts)
    }

    /// `POST /api/workouts`. The backend answers with an HTML fragment for
    /// both success and failure, so the body is returned whatever the status.
    pub async fn submit_workout(&self, submission: &WorkoutSubmission) -> Result<String, AppError> {
        let response = self
            .http
            .post(self.url("/api/workouts"))
            .form(submission)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(%status, date = %submission.date, "backend rejected workout");
        }
        Ok(body)
    }

    /// `GET /export`.
    pub async fn export(&self) -> Result<Export, AppError> {
        let response = self.http.get(self.url("/export")).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::bad_gateway(format!("backend export failed: {status}")));
        }

        let header = |name: reqwest::header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let content_type =
            header(reqwest::header::CONTENT_TYPE).unwrap_or_else(|| "text/csv".to_string());
        let disposition = header(reqwest::header::CONTENT_DISPOSITION);
        let body = response.bytes().await?.to_vec();

        Ok(Export {
            content_type,
            disposition,
            body,
        })
    }
}
