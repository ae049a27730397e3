//! rootwalk application layer: ports, the record cache and the iterative
//! resolution use case.
pub mod ports;
pub mod services;
pub mod use_cases;
