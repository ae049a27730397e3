//! rootwalk infrastructure: wire codec, UDP transport and the adapters
//! behind the application ports.
pub mod dns;
pub mod system;
