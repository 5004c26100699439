use log::debug;

use boostlink_client::SyncClient;
use boostlink_server::SyncServer;
use boostlink_shared::PlayerId;

/// Moves every envelope queued for `player` into the client and ticks the
/// client so they get applied. Returns how many envelopes were delivered.
pub fn deliver_to_client(server: &mut SyncServer, player: PlayerId, client: &mut SyncClient) -> usize {
    let envelopes = server.outgoing_for(player);
    let count = envelopes.len();
    debug!("delivering {count} envelopes to {player}'s client");
    for bytes in envelopes {
        client.receive(bytes);
    }
    client.on_tick();
    count
}

/// Like [`deliver_to_client`], but every envelope arrives twice — the shape
/// retransmission takes on an unreliable link.
pub fn deliver_to_client_duplicated(
    server: &mut SyncServer,
    player: PlayerId,
    client: &mut SyncClient,
) -> usize {
    let envelopes = server.outgoing_for(player);
    let count = envelopes.len();
    for bytes in envelopes {
        client.receive(bytes.clone());
        client.receive(bytes);
    }
    client.on_tick();
    count
}

/// Discards everything queued for `player`, simulating loss of the whole
/// burst. Returns how many envelopes were lost.
pub fn drop_outgoing(server: &mut SyncServer, player: PlayerId) -> usize {
    let lost = server.outgoing_for(player).len();
    debug!("dropping {lost} envelopes queued for {player}");
    lost
}

/// Moves everything the client queued into the server and ticks the server
/// so it gets dispatched.
pub fn deliver_to_server(client: &mut SyncClient, player: PlayerId, server: &mut SyncServer) -> usize {
    let envelopes = client.outgoing();
    let count = envelopes.len();
    debug!("delivering {count} envelopes from {player} to the server");
    for bytes in envelopes {
        server.receive(player, bytes);
    }
    server.on_tick();
    count
}
