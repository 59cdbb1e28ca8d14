/// Billing endpoints
///
/// # Endpoints
///
/// - `GET /v1/billing` - subscription status for the organization
/// - `POST /v1/billing/redirect` - returns a URL to send the user to:
///   the billing portal when the organization already has a customer on
///   file, otherwise a checkout session for the subscription price
///
/// Provider failures surface as 500 with the detail kept in the server
/// log; the client only learns that billing is unavailable.

use axum::{extract::State, Extension, Json};
use minkan_shared::{
    auth::middleware::AuthContext,
    billing::{BillingError, BillingProvider, CheckoutSession},
    models::org_subscription::OrgSubscription,
};
use serde::{Deserialize, Serialize};

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Subscription status response
#[derive(Debug, Serialize, Deserialize)]
pub struct BillingStatusResponse {
    /// Whether the organization has an active subscription
    pub subscribed: bool,

    /// Price the organization is on, when subscribed
    pub price_id: Option<String>,

    /// End of the current billing period, when known
    pub current_period_end: Option<chrono::DateTime<chrono::Utc>>,
}

/// Redirect response
#[derive(Debug, Serialize, Deserialize)]
pub struct BillingRedirectResponse {
    /// Provider URL to redirect the user to
    pub url: String,
}

/// Returns the organization's subscription status
pub async fn billing_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<BillingStatusResponse>> {
    let sub = OrgSubscription::find_by_org(&state.db, auth.org_id).await?;

    let response = match sub {
        Some(sub) => BillingStatusResponse {
            subscribed: sub.is_active(),
            price_id: sub.stripe_price_id,
            current_period_end: sub.stripe_current_period_end,
        },
        None => BillingStatusResponse {
            subscribed: false,
            price_id: None,
            current_period_end: None,
        },
    };

    Ok(Json(response))
}

/// Picks the provider session for the caller's billing state
///
/// A stored customer ID means the organization has checked out before and
/// gets the portal, with the session's success URL doubling as the portal
/// return URL. Anyone else gets a checkout session carrying the
/// organization ID as metadata, so the provider's webhooks can attribute
/// the purchase.
async fn provider_redirect(
    billing: &dyn BillingProvider,
    customer_id: Option<String>,
    session: CheckoutSession,
) -> Result<String, BillingError> {
    match customer_id {
        Some(customer_id) => {
            billing
                .create_portal_session(&customer_id, &session.success_url)
                .await
        }
        None => billing.create_checkout_session(session).await,
    }
}

/// Creates a billing portal or checkout session and returns its URL
pub async fn billing_redirect(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<BillingRedirectResponse>> {
    let return_url = state.config.api.app_url.clone();

    let sub = OrgSubscription::find_by_org(&state.db, auth.org_id).await?;
    let customer_id = sub.and_then(|s| s.stripe_customer_id);

    let actor = super::audit_actor(&state.db, auth.user_id).await?;
    let session = CheckoutSession {
        success_url: return_url.clone(),
        cancel_url: return_url,
        customer_email: actor.email,
        org_id: auth.org_id,
    };

    let url = provider_redirect(state.billing.as_ref(), customer_id, session)
        .await
        .map_err(|e| {
            tracing::error!("Billing session creation failed: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(BillingRedirectResponse { url }))
}

#[cfg(test)]
mod tests {
    use minkan_shared::billing::mock::{MockBillingProvider, RecordedCall};
    use uuid::Uuid;

    use super::*;

    fn session_for(org_id: Uuid) -> CheckoutSession {
        CheckoutSession {
            success_url: "https://app.example.com".to_string(),
            cancel_url: "https://app.example.com".to_string(),
            customer_email: "owner@example.com".to_string(),
            org_id,
        }
    }

    #[tokio::test]
    async fn test_existing_customer_gets_portal() {
        let mock = MockBillingProvider::new();

        let url = provider_redirect(
            &mock,
            Some("cus_42".to_string()),
            session_for(Uuid::new_v4()),
        )
        .await
        .unwrap();

        assert_eq!(url, "https://billing.example.com/portal/cus_42");
        assert_eq!(
            mock.calls(),
            vec![RecordedCall::Portal {
                customer_id: "cus_42".to_string(),
                return_url: "https://app.example.com".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_first_checkout_carries_org_id() {
        let mock = MockBillingProvider::new();
        let org_id = Uuid::new_v4();

        let url = provider_redirect(&mock, None, session_for(org_id))
            .await
            .unwrap();

        assert_eq!(url, format!("https://billing.example.com/checkout/{}", org_id));
        assert_eq!(
            mock.calls(),
            vec![RecordedCall::Checkout {
                customer_email: "owner@example.com".to_string(),
                org_id,
            }]
        );
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let mock = MockBillingProvider::failing("provider down");

        let result = provider_redirect(&mock, None, session_for(Uuid::new_v4())).await;

        assert!(matches!(result, Err(BillingError::RequestFailed(_))));
    }
}
