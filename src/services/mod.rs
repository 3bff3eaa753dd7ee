pub mod time_service;
