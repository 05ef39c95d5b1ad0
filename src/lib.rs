//! Sales-transaction aggregation: net revenue KPIs, daily series, product
//! and sales-team rankings, outlet Pareto and product-focus achievement.
//!
//! Rows are normalized once ([`normalize`]), filtered ([`filter`]) and then
//! fed to independent, side-effect-free aggregators. [`dashboard::Dashboard`]
//! runs all of them in one call.
pub mod config;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod filter;
pub mod focus;
pub mod kpi;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod pareto;
pub mod products;
pub mod report;
pub mod series;
pub mod team;
pub mod types;
pub mod util;

pub use dashboard::{Dashboard, DashboardConfig};
pub use error::ReportError;
pub use types::{RawRecord, RawValue, SalesRow, Status};
