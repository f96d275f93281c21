pub mod capture_source;
