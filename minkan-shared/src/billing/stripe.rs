/// Stripe REST client
///
/// Talks to the two Stripe endpoints the billing flow needs, using
/// form-encoded requests authenticated with the secret key. Only the
/// session `url` field of each response is consumed.

use serde::Deserialize;

use super::{BillingError, BillingProvider, CheckoutSession};

const DEFAULT_BASE_URL: &str = "https://api.stripe.com";

/// Stripe API client
#[derive(Debug, Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
    /// Price the checkout session subscribes to
    price_id: String,
    base_url: String,
}

/// The subset of a Stripe session response the billing flow reads
#[derive(Debug, Deserialize)]
struct SessionResponse {
    url: String,
}

impl StripeClient {
    /// Creates a client for the production Stripe API
    pub fn new(secret_key: impl Into<String>, price_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key: secret_key.into(),
            price_id: price_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL, for tests against a local stub
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn post_session(
        &self,
        path: &str,
        form: &[(String, String)],
    ) -> Result<String, BillingError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.secret_key)
            .form(form)
            .send()
            .await
            .map_err(|e| BillingError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BillingError::ProviderError {
                status: status.as_u16(),
                message,
            });
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| BillingError::InvalidResponse(e.to_string()))?;

        Ok(session.url)
    }
}

#[async_trait::async_trait]
impl BillingProvider for StripeClient {
    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<String, BillingError> {
        let form = vec![
            ("customer".to_string(), customer_id.to_string()),
            ("return_url".to_string(), return_url.to_string()),
        ];

        self.post_session("/v1/billing_portal/sessions", &form).await
    }

    async fn create_checkout_session(
        &self,
        session: CheckoutSession,
    ) -> Result<String, BillingError> {
        let form = vec![
            ("mode".to_string(), "subscription".to_string()),
            ("success_url".to_string(), session.success_url),
            ("cancel_url".to_string(), session.cancel_url),
            ("customer_email".to_string(), session.customer_email),
            ("billing_address_collection".to_string(), "auto".to_string()),
            ("payment_method_types[0]".to_string(), "card".to_string()),
            ("line_items[0][price]".to_string(), self.price_id.clone()),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            // The webhook reads this back to know which organization paid.
            ("metadata[orgId]".to_string(), session.org_id.to_string()),
        ];

        self.post_session("/v1/checkout/sessions", &form).await
    }
}
