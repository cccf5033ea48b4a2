mod chart;
mod tables;

pub use chart::render_forecast_chart;
pub use tables::{
    format_cumulative_table, format_estimates_table, format_fit_table, print_cumulative_table,
    print_estimates_table, print_fit_table,
};
