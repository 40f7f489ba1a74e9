//! OpenRosa submission client.
//!
//! One POST per record, token auth, XML carried as the multipart file
//! part `xml_submission_file` the way OpenRosa servers expect it. No
//! retries and no explicit timeout; the run is sequential and a stuck
//! request is visible to the operator.

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};

use crate::error::SubmitError;

/// Client bound to one submission endpoint and one API token.
#[derive(Debug, Clone)]
pub struct KoboClient {
    http: reqwest::Client,
    endpoint: String,
    auth_header: String,
}

/// What the server said about one submission.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub status: u16,
    pub body: String,
}

impl SubmissionOutcome {
    /// The server accepted the submission (200 or 201 in practice).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl KoboClient {
    pub fn new(endpoint: impl Into<String>, api_token: &str) -> Self {
        KoboClient {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            auth_header: format!("Token {}", api_token),
        }
    }

    /// POST one submission document and collect the server's verdict.
    ///
    /// Non-2xx responses are returned as an outcome; only transport-level
    /// failures become errors.
    pub async fn submit(&self, xml: String) -> Result<SubmissionOutcome, SubmitError> {
        let network = |source: reqwest::Error| SubmitError::Network {
            endpoint: self.endpoint.clone(),
            source,
        };

        let part = Part::bytes(xml.into_bytes())
            .file_name("data.xml")
            .mime_str("text/xml")
            .map_err(network)?;
        let form = Form::new().part("xml_submission_file", part);

        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, &self.auth_header)
            .multipart(form)
            .send()
            .await
            .map_err(network)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(network)?;

        Ok(SubmissionOutcome { status, body })
    }
}
