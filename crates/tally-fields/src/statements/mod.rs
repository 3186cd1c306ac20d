//! Field dictionaries, one module per statement.

pub mod balance_sheet;
pub mod cash_flow;
pub mod earnings_per_share;
pub mod income_statement;
pub mod revenue_breakdown;
pub mod stockholders_equity;
