pub mod catalog;
pub mod consumption_ledger;
pub mod geocoding_service;
pub mod irradiance_service;
pub mod sizing_engine;
