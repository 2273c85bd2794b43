mod csv_exporter;

pub use csv_exporter::{CsvExporter, ExportError, PAGES_CSV_HEADER, PROJECTS_CSV_HEADER};
