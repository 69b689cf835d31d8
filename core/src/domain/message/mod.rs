pub mod entities;
pub mod outcome;
pub mod ports;
pub mod services;
pub mod validation;
