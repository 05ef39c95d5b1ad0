// One-call recomputation of every derived view.
//
// Filter once, then run each aggregator over the same immutable subset.
// Nothing is cached; callers recompute whenever rows or config change.
use crate::dates::DayOrder;
use crate::filter::{branch_options, filter_rows, sku_options, FilterParams};
use crate::focus::{AchievementMatrix, FocusRow, FocusSlots};
use crate::kpi::compute_kpis;
use crate::pareto::{outlet_pareto, top_outlet_contributions};
use crate::products::{product_performance, top_product_contributions, TOP_PRODUCTS};
use crate::series::daily_series;
use crate::team::{roster, sales_team_performance};
use crate::types::{
    Contribution, DailyPoint, KpiSnapshot, OutletPareto, ProductPerformance, SalesRow,
    SalesTeamPerformance,
};

/// Caller-held parameters of a recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardConfig {
    pub filter: FilterParams,
    pub focus: FocusSlots,
    pub day_order: DayOrder,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Selector lists, taken from all rows.
    pub branches: Vec<String>,
    pub skus: Vec<String>,
    pub filtered: Vec<SalesRow>,
    pub kpi: KpiSnapshot,
    pub daily: Vec<DailyPoint>,
    pub products: Vec<ProductPerformance>,
    pub team: Vec<SalesTeamPerformance>,
    pub pareto: Vec<OutletPareto>,
    pub achievements: AchievementMatrix,
    pub focus_grid: Vec<FocusRow>,
    pub top_products: Vec<Contribution>,
    pub top_outlets: Vec<Contribution>,
}

impl Dashboard {
    pub fn compute(rows: &[SalesRow], config: &DashboardConfig) -> Dashboard {
        let filtered = filter_rows(rows, &config.filter);
        log::debug!("filter kept {} of {} rows", filtered.len(), rows.len());

        let kpi = compute_kpis(&filtered);
        let team = sales_team_performance(&filtered);
        let achievements = AchievementMatrix::build(&filtered);
        let focus_grid = achievements.grid(&roster(&team), &config.focus);
        let pareto = outlet_pareto(&filtered);
        log::debug!(
            "{} representatives, {} outlets in the working set",
            team.len(),
            pareto.len()
        );

        Dashboard {
            branches: branch_options(rows),
            skus: sku_options(rows),
            daily: daily_series(&filtered, config.day_order),
            products: product_performance(&filtered, TOP_PRODUCTS),
            top_products: top_product_contributions(&filtered, kpi.total_omset),
            top_outlets: top_outlet_contributions(&filtered, kpi.total_omset),
            kpi,
            team,
            pareto,
            achievements,
            focus_grid,
            filtered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::BranchFilter;
    use crate::types::{InvoiceDate, Status};

    fn row(branch: &str, user: &str, outlet: &str, status: &str, value: f64) -> SalesRow {
        SalesRow {
            branch_code: branch.into(),
            user_code: user.into(),
            retailer_code: outlet.into(),
            invoice_no: format!("{}-{}", user, outlet),
            sku_code: "P1".into(),
            invoice_date: InvoiceDate::Serial(44927.0),
            status: Status::parse(status),
            line_value: value,
            invoice_qty: 1.0,
            ..SalesRow::default()
        }
    }

    #[test]
    fn branch_lists_ignore_the_filter() {
        let rows = vec![row("JKT", "S1", "O1", "I", 10.0), row("BDG", "S2", "O2", "I", 20.0)];
        let config = DashboardConfig {
            filter: FilterParams {
                search: String::new(),
                branch: BranchFilter::parse("JKT"),
            },
            ..DashboardConfig::default()
        };
        let d = Dashboard::compute(&rows, &config);
        assert_eq!(d.branches, vec!["BDG", "JKT"]);
        assert_eq!(d.filtered.len(), 1);
        assert_eq!(d.kpi.total_omset, 10.0);
        assert_eq!(d.team.len(), 1);
    }

    #[test]
    fn focus_grid_follows_team_order() {
        let rows = vec![
            row("JKT", "S1", "O1", "I", 10.0),
            row("JKT", "S2", "O2", "I", 20.0),
            row("JKT", "S2", "O3", "I", 20.0),
        ];
        let config = DashboardConfig {
            focus: FocusSlots::from_codes(&["P1"]).unwrap(),
            ..DashboardConfig::default()
        };
        let d = Dashboard::compute(&rows, &config);
        assert_eq!(d.focus_grid[0].user_code, "S2");
        assert_eq!(d.focus_grid[0].cells[0], Some(2));
        assert_eq!(d.focus_grid[1].cells[0], Some(1));
        assert_eq!(d.focus_grid[1].cells[1], None);
    }

    #[test]
    fn empty_rows_give_empty_views() {
        let d = Dashboard::compute(&[], &DashboardConfig::default());
        assert_eq!(d.kpi, KpiSnapshot::default());
        assert!(d.daily.is_empty());
        assert!(d.products.is_empty());
        assert!(d.team.is_empty());
        assert!(d.pareto.is_empty());
        assert!(d.focus_grid.is_empty());
        assert!(d.top_products.is_empty());
        assert!(d.branches.is_empty());
    }
}
