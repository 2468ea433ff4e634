//! Destinations for signed bids beyond the in-memory history.

use async_trait::async_trait;
use tracing::trace;

use auction_house_types::BidRecord;

use crate::error::SinkError;

/// Receives every signed bid after it is appended to the history.
///
/// Implementations would forward bids to a backend store or submit them to
/// the auction contract. Neither exists yet; the session only ships with
/// [`DiscardSink`].
#[async_trait]
pub trait BidSink: Send + Sync {
    async fn submit(&self, record: &BidRecord) -> Result<(), SinkError>;
}

/// Keeps bids in memory only.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

#[async_trait]
impl BidSink for DiscardSink {
    async fn submit(&self, record: &BidRecord) -> Result<(), SinkError> {
        trace!(from = %record.from, bid_amount = record.bid_amount, "Bid kept in memory only");
        Ok(())
    }
}
