pub mod cycle;
pub mod monitor_use_case;
pub mod pipeline_logger;
