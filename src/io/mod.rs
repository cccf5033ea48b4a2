mod csv_io;
mod report;
mod urr;

pub use csv_io::{read_production_csv, read_production_csv_from_bytes, write_production_csv};
pub use report::{read_report_json, write_report_json};
pub use urr::{UrrEstimate, UrrTable};
