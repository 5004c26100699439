use boostlink_client::SyncClient;
use boostlink_server::SyncServer;
use boostlink_shared::{Protocol, Schema, ValueKind};

/// Makes `log` output visible under `--nocapture`. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The attribute contract used across the integration tests: the shape a
/// boost/creature mod would register.
pub fn boost_schema() -> Schema {
    Schema::new()
        .attribute("hp", ValueKind::Int)
        .attribute("multiplier", ValueKind::Float)
        .attribute("shiny", ValueKind::Bool)
        .attribute("label", ValueKind::Text)
}

pub fn boost_protocol() -> Protocol {
    Protocol::builder().schema(boost_schema())
}

/// A server that has gone through its startup lifecycle.
pub fn started_server() -> SyncServer {
    init_logging();
    let mut server = SyncServer::new(boost_protocol());
    server.on_server_starting();
    server
}

pub fn client() -> SyncClient {
    init_logging();
    SyncClient::new(boost_protocol())
}
