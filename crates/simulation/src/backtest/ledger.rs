use super::config::DividendAttribution;
use crate::market_data::MarketSeries;
use chrono::NaiveDate;
use divscan_domain::enums::TransactionAction;
use divscan_domain::value_objects::Transaction;
use rust_decimal::Decimal;

/// Chronological log of simulated trades.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    transactions: Vec<Transaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a trade.
    pub fn record(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Returns all trades.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn into_transactions(self) -> Vec<Transaction> {
        self.transactions
    }

    pub fn count_by_action(&self, action: TransactionAction) -> usize {
        self.transactions
            .iter()
            .filter(|t| t.action == action)
            .count()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Date the shares bought in `buy` were sold, if they were.
    fn sale_date(&self, buy: &Transaction) -> Option<NaiveDate> {
        self.transactions
            .iter()
            .filter(|t| {
                t.action == TransactionAction::Sell && t.symbol == buy.symbol && t.date > buy.date
            })
            .map(|t| t.date)
            .min()
    }

    /// Total dividends credited to the logged purchases.
    ///
    /// Each BUY earns `shares × amount` for every payment of its symbol dated
    /// strictly after the purchase. Under
    /// [`DividendAttribution::OwnershipWindow`] payments after the matching
    /// sale are excluded.
    pub fn attribute_dividends(
        &self,
        series: &[MarketSeries],
        attribution: DividendAttribution,
    ) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.action == TransactionAction::Buy)
            .map(|buy| {
                let Some(symbol_series) = series.iter().find(|s| s.symbol == buy.symbol) else {
                    return Decimal::ZERO;
                };
                let until = match attribution {
                    DividendAttribution::AllSubsequent => None,
                    DividendAttribution::OwnershipWindow => self.sale_date(buy),
                };
                let per_share: Decimal = symbol_series
                    .payments()
                    .filter(|(date, _)| *date > buy.date && until.is_none_or(|end| *date <= end))
                    .map(|(_, amount)| amount)
                    .sum();
                Decimal::from(buy.shares) * per_share
            })
            .sum()
    }
}
