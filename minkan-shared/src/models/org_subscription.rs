/// Organization subscription model
///
/// Tracks the billing state of an organization against the payment
/// provider. An organization without a row (or without a customer id) has
/// never checked out; the billing redirect sends it to a checkout session
/// instead of the billing portal.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE org_subscriptions (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     org_id UUID NOT NULL UNIQUE REFERENCES organizations(id) ON DELETE CASCADE,
///     stripe_customer_id VARCHAR(255) UNIQUE,
///     stripe_subscription_id VARCHAR(255) UNIQUE,
///     stripe_price_id VARCHAR(255),
///     stripe_current_period_end TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Grace period added to the period end when deciding whether a
/// subscription is still active, so a renewal in flight does not lock the
/// organization out.
fn grace() -> Duration {
    Duration::days(1)
}

/// Subscription record for an organization
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrgSubscription {
    /// Unique record ID
    pub id: Uuid,

    /// Organization this subscription belongs to (unique)
    pub org_id: Uuid,

    /// Payment provider customer ID, present after first checkout
    pub stripe_customer_id: Option<String>,

    /// Payment provider subscription ID
    pub stripe_subscription_id: Option<String>,

    /// Price the organization is subscribed to
    pub stripe_price_id: Option<String>,

    /// End of the current billing period
    pub stripe_current_period_end: Option<DateTime<Utc>>,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl OrgSubscription {
    /// Finds the subscription record for an organization
    pub async fn find_by_org(pool: &PgPool, org_id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sub = sqlx::query_as::<_, OrgSubscription>(
            r#"
            SELECT id, org_id, stripe_customer_id, stripe_subscription_id,
                   stripe_price_id, stripe_current_period_end, created_at, updated_at
            FROM org_subscriptions
            WHERE org_id = $1
            "#,
        )
        .bind(org_id)
        .fetch_optional(pool)
        .await?;

        Ok(sub)
    }

    /// Whether the subscription is currently active
    ///
    /// Active means a price is attached and the period end (plus one day
    /// of grace) is still in the future.
    pub fn is_active(&self) -> bool {
        match (&self.stripe_price_id, self.stripe_current_period_end) {
            (Some(_), Some(period_end)) => period_end + grace() > Utc::now(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(
        price: Option<&str>,
        period_end: Option<DateTime<Utc>>,
    ) -> OrgSubscription {
        OrgSubscription {
            id: Uuid::new_v4(),
            org_id: Uuid::new_v4(),
            stripe_customer_id: Some("cus_123".to_string()),
            stripe_subscription_id: Some("sub_123".to_string()),
            stripe_price_id: price.map(String::from),
            stripe_current_period_end: period_end,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_active_within_period() {
        let sub = sample(Some("price_123"), Some(Utc::now() + Duration::days(20)));
        assert!(sub.is_active());
    }

    #[test]
    fn test_active_within_grace() {
        // Period ended two hours ago; the one-day grace keeps it active.
        let sub = sample(Some("price_123"), Some(Utc::now() - Duration::hours(2)));
        assert!(sub.is_active());
    }

    #[test]
    fn test_inactive_after_grace() {
        let sub = sample(Some("price_123"), Some(Utc::now() - Duration::days(2)));
        assert!(!sub.is_active());
    }

    #[test]
    fn test_inactive_without_price() {
        let sub = sample(None, Some(Utc::now() + Duration::days(20)));
        assert!(!sub.is_active());
    }
}
