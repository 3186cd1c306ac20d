//! Choosing the sheet that holds each statement.
//!
//! Sheet names are matched case-insensitively against keyword groups. Groups
//! are tried in priority order; the first group with any matching sheet
//! supplies the candidates, in workbook order.

use serde::{Deserialize, Serialize};
use tally_fields::{FilingMetadata, StatementKind};

/// Which keyword profile a filing is read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingProfile {
    /// Quarterly reports (10-Q)
    #[default]
    Quarterly,
    /// Annual reports (10-K)
    Annual,
}

impl FilingProfile {
    /// Picks the profile from what the file name says about the filing.
    pub fn detect(metadata: &FilingMetadata) -> Self {
        let annual = [&metadata.form_code, &metadata.document_type].into_iter().flatten().any(|s| {
            let s = s.to_lowercase();
            s.contains("10-k") || s.contains("annual")
        });
        if annual { Self::Annual } else { Self::Quarterly }
    }
}

/// Keyword rules for picking a statement's sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetSelector {
    /// Keyword groups in priority order
    pub groups: &'static [&'static [&'static str]],
    /// When non-empty, a sheet must also contain one of these
    pub require_any: &'static [&'static str],
    /// Sheets containing any of these are never chosen
    pub exclude: &'static [&'static str],
}

impl SheetSelector {
    /// Candidate sheets in the order they should be tried.
    pub fn candidates(&self, sheet_names: &[String]) -> Vec<String> {
        let allowed: Vec<(&String, String)> = sheet_names
            .iter()
            .map(|name| (name, name.to_lowercase()))
            .filter(|(_, lower)| self.is_allowed(lower))
            .collect();

        self.groups
            .iter()
            .map(|group| {
                allowed
                    .iter()
                    .filter(|(_, lower)| group.iter().any(|k| lower.contains(k)))
                    .map(|(name, _)| (*name).clone())
                    .collect::<Vec<_>>()
            })
            .find(|matches| !matches.is_empty())
            .unwrap_or_default()
    }

    fn is_allowed(&self, lower: &str) -> bool {
        let required = self.require_any.is_empty() || self.require_any.iter().any(|k| lower.contains(k));
        required && !self.exclude.iter().any(|k| lower.contains(k))
    }
}

const QUARTERLY_BALANCE: SheetSelector = SheetSelector {
    groups: &[
        &["part i  financial informat", "unaudited consolidated bal", "consolidated balance sheets"],
        &["balance", "assets"],
    ],
    require_any: &[],
    exclude: &[],
};

const ANNUAL_BALANCE: SheetSelector = SheetSelector {
    groups: &[&["balance", "consolidated balance", "in thousands except share"]],
    require_any: &["balance", "assets"],
    exclude: &[],
};

const QUARTERLY_INCOME: SheetSelector = SheetSelector {
    groups: &[&["operations", "income", "statement of operations", "unaudited consolidated sta", "unaudited statements"]],
    require_any: &[],
    exclude: &["cash", "equity"],
};

const ANNUAL_INCOME: SheetSelector = SheetSelector {
    groups: &[&["operations", "income", "statement"]],
    require_any: &["operations"],
    exclude: &["cash"],
};

const CASH_FLOW: SheetSelector = SheetSelector {
    groups: &[&["cash flow", "cash", "consolidated statements of cash"]],
    require_any: &[],
    exclude: &[],
};

const STOCKHOLDERS_EQUITY: SheetSelector = SheetSelector {
    groups: &[&["equity", "stockholders", "shareholders", "consolidated statements of stockholders"]],
    require_any: &[],
    exclude: &[],
};

const REVENUE_BREAKDOWN: SheetSelector = SheetSelector {
    groups: &[&["revenue", "disaggregation", "disaggregation of revenue"]],
    require_any: &[],
    exclude: &[],
};

const EARNINGS_PER_SHARE: SheetSelector = SheetSelector {
    groups: &[&["earnings per share", "eps", "note 3 earnings"]],
    require_any: &[],
    exclude: &[],
};

/// The selector for a statement under a filing profile.
pub const fn selector_for(kind: StatementKind, profile: FilingProfile) -> SheetSelector {
    match (kind, profile) {
        (StatementKind::BalanceSheet, FilingProfile::Quarterly) => QUARTERLY_BALANCE,
        (StatementKind::BalanceSheet, FilingProfile::Annual) => ANNUAL_BALANCE,
        (StatementKind::IncomeStatement, FilingProfile::Quarterly) => QUARTERLY_INCOME,
        (StatementKind::IncomeStatement, FilingProfile::Annual) => ANNUAL_INCOME,
        (StatementKind::CashFlow, _) => CASH_FLOW,
        (StatementKind::StockholdersEquity, _) => STOCKHOLDERS_EQUITY,
        (StatementKind::RevenueBreakdown, _) => REVENUE_BREAKDOWN,
        (StatementKind::EarningsPerShare, _) => EARNINGS_PER_SHARE,
    }
}
