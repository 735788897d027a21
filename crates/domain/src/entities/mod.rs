pub mod dividend_history;
pub mod financial_metrics;
pub mod holding;
pub mod stock;

// Re-export for easier access
pub use dividend_history::DividendHistoryRecord;
pub use financial_metrics::FinancialMetrics;
pub use holding::PortfolioHolding;
pub use stock::StockSnapshot;
