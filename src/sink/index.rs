//! Search index output
//!
//! One synchronous POST per certificate. There is no batching and no retry:
//! a transport failure ends the run, an error status is logged and skipped.

use crate::config::IndexTarget;
use crate::models::ParsedCertificate;
use crate::sink::{CertificateSink, Delivery};
use crate::utils::SinkError;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};

/// POSTs each certificate as a JSON document to an index endpoint
#[derive(Debug)]
pub struct IndexSink {
    client: Client,
    url: Url,
}

impl IndexSink {
    pub fn new(target: &IndexTarget) -> Result<Self, SinkError> {
        // No request timeout is configured
        let client = Client::builder()
            .user_agent(target.user_agent.as_str())
            .build()
            .map_err(SinkError::Client)?;

        Ok(Self {
            client,
            url: target.url.clone(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn transport_error(&self, source: reqwest::Error) -> SinkError {
        SinkError::Transport {
            url: self.url.to_string(),
            source,
        }
    }
}

impl CertificateSink for IndexSink {
    async fn emit(&mut self, cert: &ParsedCertificate) -> Result<Delivery, SinkError> {
        let body = serde_json::to_vec(cert)?;

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        if status.as_u16() > 299 {
            tracing::warn!("{}\t{}", status, text);
            return Ok(Delivery::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        tracing::debug!("Indexed {} ({})", cert.display_name(), status);
        Ok(Delivery::Accepted {
            status: status.as_u16(),
        })
    }
}
