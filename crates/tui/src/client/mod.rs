use api_types::{
    campaign::Campaign,
    donation::{Donation, DonationNew},
};
use reqwest::{StatusCode, Url};

use crate::error::{AppError, Result};

/// How a backend call failed, classified at the call boundary.
///
/// Validation and auth problems never reach the network; everything that
/// does come back maps onto one of these and ultimately onto a banner
/// message, so no failure is dropped silently.
#[derive(Debug)]
pub enum ClientError {
    /// 404: the resource does not exist (e.g. a donation with no receipt).
    NotFound,
    /// Any other 4xx: the backend refused the request and said why.
    Rejected(String),
    /// 5xx: the backend failed while handling the request.
    Server(String),
    /// No response at all.
    Transport(reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// `GET /campaign/all` — every campaign, active or not; ordering and
    /// filtering happen client-side.
    pub async fn campaigns_all(&self) -> std::result::Result<Vec<Campaign>, ClientError> {
        let endpoint = self.join("campaign/all")?;

        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<Vec<Campaign>>().await.map_err(ClientError::Transport);
        }

        Err(classify(res.status(), read_error_body(res).await))
    }

    /// `POST /donation/add` — the single write call of a submission; no
    /// automatic retries, a retry is the donor pressing submit again.
    pub async fn donation_add(
        &self,
        payload: &DonationNew,
    ) -> std::result::Result<Donation, ClientError> {
        let endpoint = self.join("donation/add")?;

        let res = self
            .http
            .post(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<Donation>().await.map_err(ClientError::Transport);
        }

        Err(classify(res.status(), read_error_body(res).await))
    }

    /// `GET /donation/by-donor/{donorId}` — the donor's donations, each
    /// joined with its campaign.
    pub async fn donations_by_donor(
        &self,
        donor_id: i64,
    ) -> std::result::Result<Vec<Donation>, ClientError> {
        let endpoint = self.join(&format!("donation/by-donor/{donor_id}"))?;

        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res
                .json::<Vec<Donation>>()
                .await
                .map_err(ClientError::Transport);
        }

        Err(classify(res.status(), read_error_body(res).await))
    }

    /// `GET /donation/summary/{donorId}` — the server-computed lifetime
    /// total, in major units.
    pub async fn donation_summary(&self, donor_id: i64) -> std::result::Result<f64, ClientError> {
        let endpoint = self.join(&format!("donation/summary/{donor_id}"))?;

        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<f64>().await.map_err(ClientError::Transport);
        }

        Err(classify(res.status(), read_error_body(res).await))
    }

    /// `GET /donation/receipt/{donationId}` — the immutable receipt bytes.
    /// 404 means "no receipt for this donation", distinct from a backend
    /// failure to generate one.
    pub async fn donation_receipt(
        &self,
        donation_id: i64,
    ) -> std::result::Result<Vec<u8>, ClientError> {
        let endpoint = self.join(&format!("donation/receipt/{donation_id}"))?;

        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            let bytes = res.bytes().await.map_err(ClientError::Transport)?;
            return Ok(bytes.to_vec());
        }

        Err(classify(res.status(), read_error_body(res).await))
    }

    fn join(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }
}

/// The backend reports errors as plain-text bodies.
async fn read_error_body(res: reqwest::Response) -> String {
    res.text()
        .await
        .ok()
        .filter(|body| !body.trim().is_empty())
        .unwrap_or_else(|| "unknown error".to_string())
}

fn classify(status: StatusCode, body: String) -> ClientError {
    tracing::warn!("backend returned {status}: {body}");
    match status {
        StatusCode::NOT_FOUND => ClientError::NotFound,
        status if status.is_server_error() => ClientError::Server(body),
        _ => ClientError::Rejected(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_maps_statuses() {
        assert!(matches!(
            classify(StatusCode::NOT_FOUND, "Donation not found".to_string()),
            ClientError::NotFound
        ));
        assert!(matches!(
            classify(StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()),
            ClientError::Server(_)
        ));
        assert!(matches!(
            classify(StatusCode::BAD_REQUEST, "Campaign not found".to_string()),
            ClientError::Rejected(_)
        ));
    }
}
