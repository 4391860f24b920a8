//! Billing API.
//!
//! Endpoint: `GET /api/billing/info/`
//!
//! Response (abridged):
//! ```json
//! {
//!   "total_credits_left": 2450,
//!   "period": "month",
//!   "monthly_limit": 2500,
//!   "monthly_usage": 50
//! }
//! ```

use crate::client::SunoClient;
use crate::error::Result;
use crate::types::BillingInfo;
use crate::wire::BillingResponse;

impl SunoClient {
    /// Get the remaining credit balance and usage for the current period.
    pub fn billing_info(&mut self) -> Result<BillingInfo> {
        self.refresh_token(false)?;
        let resp: BillingResponse = self.get_json("/api/billing/info/")?;
        Ok(resp.into())
    }
}
