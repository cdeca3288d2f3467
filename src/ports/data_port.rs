//! Price data access port trait.

use crate::domain::error::StockbenchError;
use crate::domain::price_bar::PriceBar;
use chrono::NaiveDate;

pub trait PriceDataPort {
    /// Daily bars for `symbol` with `start <= date <= end`, sorted by date.
    /// Dates are exchange-local calendar dates with no timezone attached.
    fn fetch_daily(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, StockbenchError>;

    /// Short provider name for log output.
    fn name(&self) -> &'static str;
}
