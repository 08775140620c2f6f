//! In-memory store implementation
//!
//! Seeded with a plausible dataset so the dashboard endpoints return
//! something useful without a database. Activities are the only mutable
//! table (the one creator the interface exposes).

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use super::types::{
    ActivityRecord, BudgetItem, CashFlowRow, Department, ExpenseRow, ForecastRow, KpiRecord,
    NewActivity, Period, Region, ReportRecord, RevenueRow,
};
use super::FinancialStore;

pub struct InMemoryStore {
    kpis: Vec<KpiRecord>,
    budget: Vec<BudgetItem>,
    reports: Vec<ReportRecord>,
    activities: RwLock<Vec<ActivityRecord>>,
    revenue: Vec<RevenueRow>,
    expenses: Vec<ExpenseRow>,
    forecasts: Vec<ForecastRow>,
    cash_flow: Vec<CashFlowRow>,
}

impl InMemoryStore {
    pub fn seeded() -> Self {
        let now = Utc::now();

        let kpis = vec![
            KpiRecord {
                id: "kpi-revenue-m".to_string(),
                name: "Revenue".to_string(),
                value: 1_245_000.0,
                unit: "USD".to_string(),
                change_pct: 8.2,
                period: Period::Monthly,
                department: Department::Sales,
                region: Region::NorthAmerica,
            },
            KpiRecord {
                id: "kpi-margin-q".to_string(),
                name: "Gross Margin".to_string(),
                value: 61.4,
                unit: "%".to_string(),
                change_pct: -1.1,
                period: Period::Quarterly,
                department: Department::Finance,
                region: Region::Europe,
            },
            KpiRecord {
                id: "kpi-burn-m".to_string(),
                name: "Burn Rate".to_string(),
                value: 310_000.0,
                unit: "USD".to_string(),
                change_pct: 2.4,
                period: Period::Monthly,
                department: Department::Operations,
                region: Region::NorthAmerica,
            },
            KpiRecord {
                id: "kpi-arr-y".to_string(),
                name: "ARR".to_string(),
                value: 14_900_000.0,
                unit: "USD".to_string(),
                change_pct: 23.7,
                period: Period::Yearly,
                department: Department::Sales,
                region: Region::AsiaPacific,
            },
        ];

        let budget = vec![
            BudgetItem {
                id: "bud-cloud".to_string(),
                category: "Cloud Infrastructure".to_string(),
                allocated: 120_000.0,
                spent: 87_300.0,
                period: Period::Quarterly,
                department: Department::Engineering,
            },
            BudgetItem {
                id: "bud-ads".to_string(),
                category: "Paid Acquisition".to_string(),
                allocated: 200_000.0,
                spent: 214_500.0,
                period: Period::Quarterly,
                department: Department::Marketing,
            },
            BudgetItem {
                id: "bud-travel".to_string(),
                category: "Travel".to_string(),
                allocated: 30_000.0,
                spent: 9_800.0,
                period: Period::Monthly,
                department: Department::Sales,
            },
        ];

        let reports = vec![
            ReportRecord {
                id: "rep-q2".to_string(),
                title: "Q2 Financial Review".to_string(),
                summary: "Revenue ahead of plan; marketing overspend flagged".to_string(),
                period: Period::Quarterly,
                created_at: now - Duration::days(12),
            },
            ReportRecord {
                id: "rep-jul".to_string(),
                title: "July Close".to_string(),
                summary: "Month closed with positive operating cash flow".to_string(),
                period: Period::Monthly,
                created_at: now - Duration::days(3),
            },
        ];

        let activities = vec![
            ActivityRecord {
                id: format!("act-{}", Uuid::new_v4()),
                user: "maria".to_string(),
                action: "report.published".to_string(),
                detail: "Q2 Financial Review".to_string(),
                timestamp: now - Duration::hours(30),
            },
            ActivityRecord {
                id: format!("act-{}", Uuid::new_v4()),
                user: "deepak".to_string(),
                action: "budget.updated".to_string(),
                detail: "Paid Acquisition reforecast".to_string(),
                timestamp: now - Duration::hours(6),
            },
        ];

        let revenue = vec![
            RevenueRow {
                period_label: "2026-05".to_string(),
                amount: 1_150_000.0,
                period: Period::Monthly,
                region: Region::NorthAmerica,
            },
            RevenueRow {
                period_label: "2026-06".to_string(),
                amount: 1_190_000.0,
                period: Period::Monthly,
                region: Region::NorthAmerica,
            },
            RevenueRow {
                period_label: "2026-06".to_string(),
                amount: 415_000.0,
                period: Period::Monthly,
                region: Region::Europe,
            },
            RevenueRow {
                period_label: "2026-Q2".to_string(),
                amount: 3_480_000.0,
                period: Period::Quarterly,
                region: Region::NorthAmerica,
            },
        ];

        let expenses = vec![
            ExpenseRow {
                period_label: "2026-06".to_string(),
                amount: 520_000.0,
                category: "Payroll".to_string(),
                period: Period::Monthly,
                department: Department::Engineering,
            },
            ExpenseRow {
                period_label: "2026-06".to_string(),
                amount: 71_500.0,
                category: "Paid Acquisition".to_string(),
                period: Period::Monthly,
                department: Department::Marketing,
            },
        ];

        let forecasts = vec![
            ForecastRow {
                period_label: "2026-08".to_string(),
                projected: 1_260_000.0,
                lower: 1_180_000.0,
                upper: 1_340_000.0,
                period: Period::Monthly,
            },
            ForecastRow {
                period_label: "2026-09".to_string(),
                projected: 1_310_000.0,
                lower: 1_200_000.0,
                upper: 1_420_000.0,
                period: Period::Monthly,
            },
        ];

        let cash_flow = vec![
            CashFlowRow {
                period_label: "2026-06".to_string(),
                inflow: 1_220_000.0,
                outflow: 940_000.0,
                period: Period::Monthly,
            },
            CashFlowRow {
                period_label: "2026-07".to_string(),
                inflow: 1_260_000.0,
                outflow: 1_010_000.0,
                period: Period::Monthly,
            },
        ];

        Self {
            kpis,
            budget,
            reports,
            activities: RwLock::new(activities),
            revenue,
            expenses,
            forecasts,
            cash_flow,
        }
    }
}

fn matches<T: PartialEq + Copy>(filter: Option<T>, value: T) -> bool {
    filter.map_or(true, |f| f == value)
}

#[async_trait]
impl FinancialStore for InMemoryStore {
    async fn get_kpis(
        &self,
        period: Option<Period>,
        department: Option<Department>,
        region: Option<Region>,
    ) -> Vec<KpiRecord> {
        self.kpis
            .iter()
            .filter(|k| {
                matches(period, k.period)
                    && matches(department, k.department)
                    && matches(region, k.region)
            })
            .cloned()
            .collect()
    }

    async fn get_budget_items(
        &self,
        period: Option<Period>,
        department: Option<Department>,
    ) -> Vec<BudgetItem> {
        self.budget
            .iter()
            .filter(|b| matches(period, b.period) && matches(department, b.department))
            .cloned()
            .collect()
    }

    async fn get_reports(&self, period: Option<Period>) -> Vec<ReportRecord> {
        self.reports
            .iter()
            .filter(|r| matches(period, r.period))
            .cloned()
            .collect()
    }

    async fn get_activities(&self, limit: usize) -> Vec<ActivityRecord> {
        let activities = self.activities.read();
        let mut sorted: Vec<ActivityRecord> = activities.clone();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sorted.truncate(limit);
        sorted
    }

    async fn create_activity(&self, activity: NewActivity) -> ActivityRecord {
        let record = ActivityRecord {
            id: format!("act-{}", Uuid::new_v4()),
            user: activity.user,
            action: activity.action,
            detail: activity.detail,
            timestamp: Utc::now(),
        };
        self.activities.write().push(record.clone());
        record
    }

    async fn get_revenue(&self, period: Option<Period>, region: Option<Region>) -> Vec<RevenueRow> {
        self.revenue
            .iter()
            .filter(|r| matches(period, r.period) && matches(region, r.region))
            .cloned()
            .collect()
    }

    async fn get_expenses(
        &self,
        period: Option<Period>,
        department: Option<Department>,
    ) -> Vec<ExpenseRow> {
        self.expenses
            .iter()
            .filter(|e| matches(period, e.period) && matches(department, e.department))
            .cloned()
            .collect()
    }

    async fn get_forecasts(&self, period: Option<Period>) -> Vec<ForecastRow> {
        self.forecasts
            .iter()
            .filter(|f| matches(period, f.period))
            .cloned()
            .collect()
    }

    async fn get_cash_flow(&self, period: Option<Period>) -> Vec<CashFlowRow> {
        self.cash_flow
            .iter()
            .filter(|c| matches(period, c.period))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_kpi_filters_compose() {
        let store = InMemoryStore::seeded();

        let all = store.get_kpis(None, None, None).await;
        assert!(all.len() >= 4);

        let monthly_sales = store
            .get_kpis(Some(Period::Monthly), Some(Department::Sales), None)
            .await;
        assert!(monthly_sales
            .iter()
            .all(|k| k.period == Period::Monthly && k.department == Department::Sales));
        assert!(!monthly_sales.is_empty());
    }

    #[tokio::test]
    async fn test_activities_newest_first_and_limited() {
        let store = InMemoryStore::seeded();
        let activities = store.get_activities(1).await;
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].action, "budget.updated");
    }

    #[tokio::test]
    async fn test_create_activity_appends() {
        let store = InMemoryStore::seeded();
        let created = store
            .create_activity(NewActivity {
                user: "kim".to_string(),
                action: "anomaly.reviewed".to_string(),
                detail: String::new(),
            })
            .await;

        let newest = store.get_activities(1).await;
        assert_eq!(newest[0].id, created.id);
    }

    #[tokio::test]
    async fn test_revenue_region_filter() {
        let store = InMemoryStore::seeded();
        let europe = store.get_revenue(None, Some(Region::Europe)).await;
        assert!(europe.iter().all(|r| r.region == Region::Europe));
        assert!(!europe.is_empty());
    }
}
