mod clock;
mod name_server_client;

pub use clock::Clock;
pub use name_server_client::NameServerClient;
