use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError, health::entities::DatabaseHealthStatus,
};

#[cfg_attr(test, mockall::automock)]
pub trait HealthCheckRepository: Send + Sync {
    /// Round-trips the database and returns the latency in milliseconds.
    fn health(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;
}

pub trait HealthCheckService: Send + Sync {
    fn readiness(&self) -> impl Future<Output = Result<DatabaseHealthStatus, CoreError>> + Send;
}
