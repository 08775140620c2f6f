//! Financial data-access layer
//!
//! The relational store is a collaborator: this module defines the typed
//! interface the dashboard routes proxy ([`FinancialStore`]) and a seeded
//! in-memory implementation. The actual relational schema stays out of
//! scope.

pub mod memory;
pub mod types;

pub use memory::InMemoryStore;
pub use types::{
    ActivityRecord, BudgetItem, CashFlowRow, Department, ExpenseRow, ForecastRow, KpiRecord,
    NewActivity, Period, Region, ReportRecord, RevenueRow,
};

use async_trait::async_trait;

/// Typed getters/creators over the financial store
///
/// Getters take optional enum filters; `None` means "all".
#[async_trait]
pub trait FinancialStore: Send + Sync {
    async fn get_kpis(
        &self,
        period: Option<Period>,
        department: Option<Department>,
        region: Option<Region>,
    ) -> Vec<KpiRecord>;

    async fn get_budget_items(
        &self,
        period: Option<Period>,
        department: Option<Department>,
    ) -> Vec<BudgetItem>;

    async fn get_reports(&self, period: Option<Period>) -> Vec<ReportRecord>;

    async fn get_activities(&self, limit: usize) -> Vec<ActivityRecord>;

    async fn create_activity(&self, activity: NewActivity) -> ActivityRecord;

    async fn get_revenue(&self, period: Option<Period>, region: Option<Region>) -> Vec<RevenueRow>;

    async fn get_expenses(
        &self,
        period: Option<Period>,
        department: Option<Department>,
    ) -> Vec<ExpenseRow>;

    async fn get_forecasts(&self, period: Option<Period>) -> Vec<ForecastRow>;

    async fn get_cash_flow(&self, period: Option<Period>) -> Vec<CashFlowRow>;
}
