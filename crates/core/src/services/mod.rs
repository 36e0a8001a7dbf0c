pub mod health_service;
pub mod invest_service;
pub mod money_service;
