//! Statement kinds.

use crate::error::FieldError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The financial statements Tally knows how to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    /// Balance sheet (statement of financial position)
    BalanceSheet,
    /// Income statement (statement of operations)
    IncomeStatement,
    /// Cash flow statement
    CashFlow,
    /// Disaggregation of revenue
    RevenueBreakdown,
    /// Statement of stockholders' equity
    StockholdersEquity,
    /// Earnings per share note
    EarningsPerShare,
}

impl StatementKind {
    /// Every kind, in output order.
    pub const ALL: [Self; 6] = [
        Self::BalanceSheet,
        Self::IncomeStatement,
        Self::CashFlow,
        Self::RevenueBreakdown,
        Self::StockholdersEquity,
        Self::EarningsPerShare,
    ];

    /// Snake-case identifier, also used for output file names.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BalanceSheet => "balance_sheet",
            Self::IncomeStatement => "income_statement",
            Self::CashFlow => "cash_flow",
            Self::RevenueBreakdown => "revenue_breakdown",
            Self::StockholdersEquity => "stockholders_equity",
            Self::EarningsPerShare => "earnings_per_share",
        }
    }

    /// Human-readable title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::BalanceSheet => "Balance Sheet",
            Self::IncomeStatement => "Income Statement",
            Self::CashFlow => "Cash Flow Statement",
            Self::RevenueBreakdown => "Revenue Breakdown",
            Self::StockholdersEquity => "Stockholders' Equity",
            Self::EarningsPerShare => "Earnings Per Share",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatementKind {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "balance_sheet" | "balance" => Ok(Self::BalanceSheet),
            "income_statement" | "income" | "operations" => Ok(Self::IncomeStatement),
            "cash_flow" | "cash_flows" | "cashflow" => Ok(Self::CashFlow),
            "revenue_breakdown" | "revenue" => Ok(Self::RevenueBreakdown),
            "stockholders_equity" | "equity" => Ok(Self::StockholdersEquity),
            "earnings_per_share" | "eps" => Ok(Self::EarningsPerShare),
            _ => Err(FieldError::UnknownStatement(s.to_string())),
        }
    }
}
