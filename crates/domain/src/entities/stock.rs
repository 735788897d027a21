use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point-in-time view of a listed equity as supplied by the data provider.
///
/// Yield and payout are fractions (0.04 for 4%). Every market field is
/// optional; a missing value excludes the stock from any filter that needs it
/// and contributes nothing to the health score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub symbol: String,
    pub name: String,
    pub sector: Option<String>,
    pub market_cap: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub dividend_yield: Option<Decimal>,
    pub payout_ratio: Option<Decimal>,
}

impl StockSnapshot {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            sector: None,
            market_cap: None,
            current_price: None,
            dividend_yield: None,
            payout_ratio: None,
        }
    }

    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    #[must_use]
    pub fn with_market_cap(mut self, market_cap: Decimal) -> Self {
        self.market_cap = Some(market_cap);
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.current_price = Some(price);
        self
    }

    #[must_use]
    pub fn with_dividend_yield(mut self, dividend_yield: Decimal) -> Self {
        self.dividend_yield = Some(dividend_yield);
        self
    }

    #[must_use]
    pub fn with_payout_ratio(mut self, payout_ratio: Decimal) -> Self {
        self.payout_ratio = Some(payout_ratio);
        self
    }
}
