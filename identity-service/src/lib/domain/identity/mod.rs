pub mod errors;
pub mod models;
pub mod ports;
pub mod response;
pub mod service;
pub mod validation;
