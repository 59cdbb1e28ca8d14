/// Mock billing provider for tests
///
/// Records every call and returns deterministic URLs, so handler tests
/// can assert both what was requested and that nothing was requested at
/// all (for example, that a rejected request never reached billing).

use std::sync::Mutex;

use uuid::Uuid;

use super::{BillingError, BillingProvider, CheckoutSession};

/// A recorded call to the mock provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Portal {
        customer_id: String,
        return_url: String,
    },
    Checkout {
        customer_email: String,
        org_id: Uuid,
    },
}

/// In-memory billing provider that records calls
#[derive(Debug, Default)]
pub struct MockBillingProvider {
    calls: Mutex<Vec<RecordedCall>>,
    /// When set, every call fails with this message
    fail_with: Option<String>,
}

impl MockBillingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock where every call fails
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(message.into()),
        }
    }

    /// Returns all recorded calls in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: RecordedCall) -> Result<(), BillingError> {
        self.calls.lock().unwrap().push(call);

        match &self.fail_with {
            Some(message) => Err(BillingError::RequestFailed(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl BillingProvider for MockBillingProvider {
    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<String, BillingError> {
        self.record(RecordedCall::Portal {
            customer_id: customer_id.to_string(),
            return_url: return_url.to_string(),
        })?;

        Ok(format!("https://billing.example.com/portal/{}", customer_id))
    }

    async fn create_checkout_session(
        &self,
        session: CheckoutSession,
    ) -> Result<String, BillingError> {
        let org_id = session.org_id;
        self.record(RecordedCall::Checkout {
            customer_email: session.customer_email,
            org_id,
        })?;

        Ok(format!("https://billing.example.com/checkout/{}", org_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_portal_calls() {
        let mock = MockBillingProvider::new();

        let url = mock
            .create_portal_session("cus_123", "https://app.example.com")
            .await
            .unwrap();

        assert_eq!(url, "https://billing.example.com/portal/cus_123");
        assert_eq!(mock.call_count(), 1);
        assert_eq!(
            mock.calls()[0],
            RecordedCall::Portal {
                customer_id: "cus_123".to_string(),
                return_url: "https://app.example.com".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_mock_records_checkout_calls() {
        let mock = MockBillingProvider::new();
        let org_id = Uuid::new_v4();

        let url = mock
            .create_checkout_session(CheckoutSession {
                success_url: "https://app.example.com".to_string(),
                cancel_url: "https://app.example.com".to_string(),
                customer_email: "owner@example.com".to_string(),
                org_id,
            })
            .await
            .unwrap();

        assert_eq!(url, format!("https://billing.example.com/checkout/{}", org_id));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failing_mock_still_records() {
        let mock = MockBillingProvider::failing("provider down");

        let result = mock.create_portal_session("cus_123", "https://x").await;

        assert!(matches!(result, Err(BillingError::RequestFailed(_))));
        assert_eq!(mock.call_count(), 1);
    }
}
