//! Plain-text table rendering for command output.

use crate::analysis::StockAnalysis;
use chrono::Month;
use divscan_domain::value_objects::{BacktestResult, Percentage, RiskAssessment, ScanResult};
use prettytable::{Table, row};
use rust_decimal::Decimal;
use std::fmt::Write;

const MISSING: &str = "-";

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

fn pct(fraction: Decimal) -> String {
    Percentage::from_fraction(fraction).to_string()
}

fn opt_pct(fraction: Option<Decimal>) -> String {
    opt(fraction.map(Percentage::from_fraction))
}

fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

fn month_name(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or_else(|| month.to_string(), |m| m.name().to_string())
}

/// Renders scan results as one row per stock.
pub fn scan_table(title: &str, results: &[ScanResult]) -> String {
    let mut table = Table::new();
    table.set_titles(row![
        "#", "Symbol", "Name", "Sector", "Price", "Yield", "Payout", "Health", "Growth Yrs",
        "Next Ex-Div"
    ]);
    for (rank, result) in results.iter().enumerate() {
        let snapshot = &result.snapshot;
        table.add_row(row![
            rank + 1,
            snapshot.symbol,
            snapshot.name,
            opt(snapshot.sector.as_deref()),
            opt(snapshot.current_price.map(money)),
            opt_pct(snapshot.dividend_yield),
            opt_pct(snapshot.payout_ratio),
            result.health_score.round_dp(1),
            result.consecutive_growth_years,
            opt(result.estimated_next_ex_dividend_date)
        ]);
    }
    format!("{title} ({} matches)\n{table}", results.len())
}

/// Renders a risk assessment: summary, factor breakdown, VaR and
/// recommendations.
pub fn risk_report(assessment: &RiskAssessment) -> String {
    let breakdown = &assessment.breakdown;
    let scores = &breakdown.factor_scores;
    let var = &assessment.value_at_risk;

    let mut summary = Table::new();
    summary.set_titles(row!["Factor", "Level", "Detail", "Score"]);
    summary.add_row(row![
        "Concentration",
        breakdown.concentration_risk,
        format!("max {}", breakdown.max_concentration),
        scores.concentration
    ]);
    summary.add_row(row![
        "Diversification",
        MISSING,
        format!("score {}", breakdown.diversification_score.round_dp(1)),
        scores.diversification.round_dp(2)
    ]);
    summary.add_row(row![
        "Sustainability",
        breakdown.sustainability_risk,
        format!(
            "min {} / avg {}",
            breakdown.min_sustainability.round_dp(1),
            breakdown.avg_sustainability.round_dp(1)
        ),
        scores.sustainability
    ]);
    summary.add_row(row![
        "Yield",
        breakdown.yield_risk,
        format!(
            "weighted {} / max {}",
            pct(breakdown.weighted_avg_yield),
            pct(breakdown.max_yield)
        ),
        scores.yield_risk
    ]);
    summary.add_row(row![
        "Overall",
        assessment.overall_risk,
        MISSING,
        assessment.risk_score.round_dp(2)
    ]);

    let mut var_table = Table::new();
    var_table.set_titles(row!["Confidence", "VaR", "Max Loss"]);
    var_table.add_row(row!["95%", money(var.var_95), pct(var.max_loss_95)]);
    var_table.add_row(row!["99%", money(var.var_99), pct(var.max_loss_99)]);

    let mut out = String::new();
    let _ = writeln!(out, "Portfolio Risk: {}", assessment.overall_risk);
    let _ = writeln!(out, "{summary}");
    let _ = writeln!(
        out,
        "Value at Risk ({} trials, allocation {})",
        var.trials,
        money(var.total_allocation)
    );
    let _ = writeln!(out, "{var_table}");
    let _ = writeln!(out, "Recommendations:");
    for recommendation in &assessment.recommendations {
        let _ = writeln!(out, "  * {recommendation}");
    }
    out
}

/// Renders a backtest summary followed by its trade log.
pub fn backtest_report(result: &BacktestResult) -> String {
    let mut summary = Table::new();
    summary.add_row(row!["Period", format!("{} to {}", result.start_date, result.end_date)]);
    summary.add_row(row!["Initial Capital", money(result.initial_capital)]);
    summary.add_row(row!["Final Value", money(result.final_value)]);
    summary.add_row(row!["Total Dividends", money(result.total_dividends)]);
    summary.add_row(row!["Total Return", pct(result.total_return)]);
    summary.add_row(row!["Annualized Return", pct(result.annualized_return)]);
    summary.add_row(row!["Sharpe Ratio", opt(result.sharpe_ratio.map(|s| s.round_dp(2)))]);
    summary.add_row(row!["Max Drawdown", pct(result.max_drawdown)]);
    summary.add_row(row!["Yield on Cost", pct(result.dividend_yield_on_cost)]);
    summary.add_row(row![
        "Rebalances",
        format!(
            "{} executed, {} skipped",
            result.rebalance_count, result.skipped_rebalances
        )
    ]);

    let mut trades = Table::new();
    trades.set_titles(row!["Date", "Action", "Symbol", "Shares", "Price", "Notional"]);
    for tx in &result.transactions {
        trades.add_row(row![
            tx.date,
            tx.action,
            tx.symbol,
            tx.shares,
            money(tx.price),
            money(tx.notional())
        ]);
    }

    format!(
        "Backtest Results\n{summary}\nTransactions ({})\n{trades}",
        result.transaction_count()
    )
}

/// Renders the single-stock analysis.
pub fn analysis_report(analysis: &StockAnalysis) -> String {
    let snapshot = &analysis.snapshot;
    let score = &analysis.score;

    let mut health = Table::new();
    health.set_titles(row!["Component", "Points"]);
    health.add_row(row!["Yield", score.yield_points]);
    health.add_row(row!["Payout", score.payout_points]);
    health.add_row(row!["Growth", score.growth_points.round_dp(2)]);
    health.add_row(row!["Financials", score.financial_points]);
    health.add_row(row!["Coverage", score.coverage_points]);
    health.add_row(row!["Total", score.total().round_dp(2)]);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} - {} ({})",
        snapshot.symbol,
        snapshot.name,
        opt(snapshot.sector.as_deref())
    );
    let _ = writeln!(
        out,
        "Yield {} | Payout {} | Price {}",
        opt_pct(snapshot.dividend_yield),
        opt_pct(snapshot.payout_ratio),
        opt(snapshot.current_price.map(money))
    );
    let _ = writeln!(out, "{health}");

    let stats = &analysis.stats;
    let _ = writeln!(
        out,
        "Last dividend {} | Avg growth {} | Growth streak {} | Next ex-div {}",
        opt(stats.last_dividend_amount),
        opt_pct(stats.avg_growth_rate),
        stats.consecutive_growth_years,
        opt(stats.estimated_next_ex_dividend_date)
    );

    let safety = &analysis.safety;
    let _ = writeln!(
        out,
        "Safety {}/100 ({}): {}",
        safety.score,
        safety.rating,
        safety.rating.recommendation()
    );

    match &analysis.forecast {
        Some(forecast) => {
            let _ = writeln!(
                out,
                "Forecast {} on {} ({:?} confidence, {} payments)",
                forecast.predicted_amount, forecast.predicted_date, forecast.confidence, forecast.basis
            );
        }
        None => {
            let _ = writeln!(out, "Forecast unavailable: fewer than two payments");
        }
    }

    if let Some(seasonality) = &analysis.seasonality {
        let best: Vec<String> = seasonality.best_months.iter().map(|m| month_name(*m)).collect();
        let _ = writeln!(out, "Strongest months: {}", best.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use divscan_domain::entities::{FinancialMetrics, PortfolioHolding, StockSnapshot};
    use divscan_domain::value_objects::Transaction;
    use divscan_simulation::risk::assess_risk;
    use rust_decimal_macros::dec;

    fn scan_result(symbol: &str) -> ScanResult {
        ScanResult {
            snapshot: StockSnapshot {
                symbol: symbol.to_string(),
                name: format!("{symbol} Inc"),
                sector: None,
                market_cap: None,
                current_price: Some(dec!(42.5)),
                dividend_yield: Some(dec!(0.045)),
                payout_ratio: None,
            },
            metrics: FinancialMetrics::default(),
            health_score: dec!(61.25),
            last_dividend_amount: None,
            avg_growth_rate: None,
            consecutive_growth_years: 3,
            estimated_next_ex_dividend_date: NaiveDate::from_ymd_opt(2024, 9, 1),
            scanned_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_scan_table_lists_each_result() {
        let text = scan_table("High Yield Scanner", &[scan_result("MO"), scan_result("T")]);
        assert!(text.starts_with("High Yield Scanner (2 matches)"));
        assert!(text.contains("MO Inc"));
        assert!(text.contains("4.5%"));
        assert!(text.contains("42.50"));
        assert!(text.contains("2024-09-01"));
    }

    #[test]
    fn test_risk_report_has_recommendations() {
        let holdings = vec![
            PortfolioHolding::new("ITC", dec!(60000), dec!(60)),
            PortfolioHolding::new("TCS", dec!(40000), dec!(40)),
        ];
        let assessment = assess_risk(&holdings).unwrap();
        let text = risk_report(&assessment);
        assert!(text.contains("Reduce concentration in ITC (60.0%)"));
        assert!(text.contains("Value at Risk (10000 trials"));
    }

    #[test]
    fn test_backtest_report_shows_trades() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let result = BacktestResult {
            initial_capital: dec!(10000),
            final_value: dec!(10500),
            total_dividends: dec!(300),
            total_return: dec!(0.08),
            annualized_return: dec!(0.08),
            sharpe_ratio: None,
            max_drawdown: dec!(0.05),
            dividend_yield_on_cost: dec!(0.03),
            rebalance_count: 1,
            skipped_rebalances: 0,
            start_date: date,
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            transactions: vec![Transaction::buy(date, "ITC", 20, dec!(450))],
            portfolio_history: Vec::new(),
        };
        let text = backtest_report(&result);
        assert!(text.contains("Transactions (1)"));
        assert!(text.contains("BUY"));
        assert!(text.contains("9000.00"));
        assert!(text.contains("8.0%"));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(3), "March");
        assert_eq!(month_name(13), "13");
    }
}
