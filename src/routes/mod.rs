pub mod system_routes;
pub mod time_routes;
