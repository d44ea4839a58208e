// src/logging.rs

use crate::errors::{ShopclerkError, ShopclerkResult};
use crate::models::ApiCallLog;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use log::info;

/// Starts the file logger under `logs/`. The returned handle must stay
/// alive for the lifetime of the process.
pub fn init_logging(log_level: &str) -> ShopclerkResult<LoggerHandle> {
    Logger::try_with_str(log_level)
        .map_err(|e| ShopclerkError::config_error(format!("Invalid log level: {}", e)))?
        .log_to_file(
            FileSpec::default()
                .directory("logs")
                .basename("shopclerk")
                .suppress_timestamp(),
        )
        .append()
        .format(flexi_logger::detailed_format)
        .start()
        .map_err(|e| ShopclerkError::initialization(format!("Failed to start logger: {}", e)))
}

/// Writes one line per Claude API call to the log.
pub fn log_api_call(call: &ApiCallLog) {
    info!(
        "[api] {} - {} - Status: {} - Time: {}ms",
        call.endpoint, call.request_summary, call.response_status, call.response_time_ms
    );
}
