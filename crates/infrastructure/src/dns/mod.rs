pub mod forwarding;
pub mod name_server_client;
pub mod transport;

pub use name_server_client::UdpNameServerClient;
