pub mod control_routes;
pub mod health_routes;
pub mod log_routes;
