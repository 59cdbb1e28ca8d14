/// Billing provider abstraction
///
/// The API never talks to the payment provider directly; it goes through
/// the [`BillingProvider`] trait so handlers can be tested against
/// [`mock::MockBillingProvider`] without network access. The production
/// implementation is [`stripe::StripeClient`], a thin form-encoded REST
/// client.
///
/// The billing flow has exactly two outcomes: an organization that has
/// checked out before (it has a customer ID on file) gets a billing
/// portal session to manage its subscription; one that has not gets a
/// checkout session tagged with its organization ID so the provider's
/// webhook can attribute the completed purchase.

use async_trait::async_trait;

pub mod mock;
pub mod stripe;

/// Error type for billing operations
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    /// Request to the payment provider failed
    #[error("Billing provider request failed: {0}")]
    RequestFailed(String),

    /// Provider returned an error response
    #[error("Billing provider returned {status}: {message}")]
    ProviderError { status: u16, message: String },

    /// Provider response could not be parsed
    #[error("Unexpected billing provider response: {0}")]
    InvalidResponse(String),
}

/// Input for creating a checkout session for a first-time subscriber
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    /// Where the provider redirects after successful payment
    pub success_url: String,

    /// Where the provider redirects on cancel
    pub cancel_url: String,

    /// Billing email prefilled at checkout
    pub customer_email: String,

    /// Organization the purchase is for, carried as session metadata so
    /// the webhook can attribute it
    pub org_id: uuid::Uuid,
}

/// Payment provider operations needed by the billing routes
#[async_trait]
pub trait BillingProvider: Send + Sync {
    /// Creates a billing portal session for an existing customer and
    /// returns the URL to redirect the user to
    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<String, BillingError>;

    /// Creates a checkout session for a first-time subscriber and returns
    /// the URL to redirect the user to
    async fn create_checkout_session(
        &self,
        session: CheckoutSession,
    ) -> Result<String, BillingError>;
}
