//! Analytics module - statistics, synthetic series, and the view builder.

mod analytics_model;
mod analytics_service;
pub mod series;
pub mod stats;


// Re-export the public interface
pub use analytics_model::{
    ConcentrationMetrics, HoldingRow, RiskMetrics, ViewInput, ViewState,
};
pub use analytics_service::{build_view_state, DashboardService};
pub use series::{
    portfolio_returns, return_series, to_curve, CurvePoint, SeriesRng, SyntheticMarket,
};
