/// The HUD keep-fresh loop: periodic snapshot pushes to players with the
/// overlay on, and the toggle message that turns the pushes off.
use boostlink_shared::{EntityId, PlayerId, Protocol, Value};
use boostlink_test::helpers::{packet_exchange::deliver_to_client, test_protocol};

fn tick_n(server: &mut boostlink_server::SyncServer, n: u64) {
    for _ in 0..n {
        server.on_tick();
    }
}

#[test]
fn hud_interval_pushes_snapshots_of_visible_entities() {
    let mut server = test_protocol::started_server();
    let player = PlayerId(1);

    let visible = server
        .spawn(None, vec![("hp".into(), Value::Int(100))])
        .unwrap();
    // a second entity that is never revealed and never pushed
    server.spawn(None, vec![]).unwrap();
    server.player_join(player);
    server.reveal(player, visible);
    server.outgoing_for(player);

    // nothing before the interval elapses
    tick_n(&mut server, 39);
    assert_eq!(server.pending_for(player), 0);

    server.on_tick();
    assert_eq!(server.current_tick(), 40);
    assert_eq!(server.pending_for(player), 1);

    tick_n(&mut server, 40);
    assert_eq!(server.pending_for(player), 2);
}

#[test]
fn revealing_a_nonexistent_entity_leaves_no_scope_entry() {
    let mut server = test_protocol::started_server();
    let player = PlayerId(1);
    server.player_join(player);

    assert!(!server.reveal(player, EntityId(999)));
    assert_eq!(server.pending_for(player), 0);

    // the id must not linger in the scope set for the interval to re-probe
    tick_n(&mut server, 80);
    assert_eq!(server.pending_for(player), 0);
}

#[test]
fn hud_toggle_reaches_the_client_and_stops_pushes() {
    let mut server = test_protocol::started_server();
    let mut client = test_protocol::client();
    let player = PlayerId(1);

    let entity = server
        .spawn(None, vec![("hp".into(), Value::Int(100))])
        .unwrap();
    server.player_join(player);
    server.reveal(player, entity);
    deliver_to_client(&mut server, player, &mut client);
    assert!(client.hud_enabled());

    server.set_hud(player, false);
    deliver_to_client(&mut server, player, &mut client);
    assert!(!client.hud_enabled());

    // with the HUD off, the interval skips this player entirely
    tick_n(&mut server, 80);
    assert_eq!(server.pending_for(player), 0);

    server.set_hud(player, true);
    deliver_to_client(&mut server, player, &mut client);
    assert!(client.hud_enabled());

    tick_n(&mut server, 40);
    assert_eq!(server.pending_for(player), 1);
}

#[test]
fn custom_interval_is_honored() {
    let protocol = Protocol::builder()
        .schema(test_protocol::boost_schema())
        .hud_push_interval(5);
    let mut server = boostlink_server::SyncServer::new(protocol);
    server.on_server_starting();
    let player = PlayerId(1);

    let entity = server
        .spawn(None, vec![("hp".into(), Value::Int(1))])
        .unwrap();
    server.player_join(player);
    server.reveal(player, entity);
    server.outgoing_for(player);

    tick_n(&mut server, 5);
    assert_eq!(server.pending_for(player), 1);
    tick_n(&mut server, 5);
    assert_eq!(server.pending_for(player), 2);
}

#[test]
fn pushed_snapshot_refreshes_a_stale_replica() {
    let mut server = test_protocol::started_server();
    let mut client = test_protocol::client();
    let player = PlayerId(1);

    let entity = server
        .spawn(None, vec![("hp".into(), Value::Int(100))])
        .unwrap();
    server.player_join(player);
    server.reveal(player, entity);
    deliver_to_client(&mut server, player, &mut client);

    // a delta is lost; the replica is stuck at version 0
    server
        .mutate(entity, vec![("hp".into(), Value::Int(40))])
        .unwrap();
    server.outgoing_for(player);

    // the next HUD push carries the full current state
    tick_n(&mut server, 40);
    deliver_to_client(&mut server, player, &mut client);

    let replica = client.entity(entity).unwrap();
    assert_eq!(replica.version(), 1);
    assert_eq!(replica.attribute("hp"), Some(&Value::Int(40)));
}
