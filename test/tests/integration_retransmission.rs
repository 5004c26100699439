/// Retransmission is the normal face of an unreliable link: duplicate
/// delivery of any delta must be a silent no-op.
use std::{cell::RefCell, rc::Rc};

use boostlink_shared::{EventKind, PlayerId, Value};
use boostlink_test::helpers::{
    packet_exchange::{deliver_to_client, deliver_to_client_duplicated},
    test_protocol,
};

#[test]
fn duplicated_delivery_applies_once() {
    let mut server = test_protocol::started_server();
    let mut client = test_protocol::client();
    let player = PlayerId(1);

    let entity = server
        .spawn(None, vec![("hp".into(), Value::Int(100))])
        .unwrap();
    server.player_join(player);
    server.reveal(player, entity);
    server
        .mutate(entity, vec![("hp".into(), Value::Int(80))])
        .unwrap();

    let changes = Rc::new(RefCell::new(0u32));
    let counter = changes.clone();
    client.events().subscribe(
        EventKind::StateChanged,
        Box::new(move |_, _| {
            *counter.borrow_mut() += 1;
            Ok(())
        }),
    );

    // every envelope (baseline snapshot + delta) arrives twice
    deliver_to_client_duplicated(&mut server, player, &mut client);

    let replica = client.entity(entity).unwrap();
    assert_eq!(replica.version(), 1);
    assert_eq!(replica.attribute("hp"), Some(&Value::Int(80)));
    // one apply per distinct message, not per delivery
    assert_eq!(*changes.borrow(), 2);
    // the duplicates did not push the replica into requesting a snapshot
    assert_eq!(client.pending_outgoing(), 0);
}

#[test]
fn replaying_an_old_burst_changes_nothing() {
    let mut server = test_protocol::started_server();
    let mut client = test_protocol::client();
    let player = PlayerId(1);

    let entity = server
        .spawn(None, vec![("hp".into(), Value::Int(100))])
        .unwrap();
    server.player_join(player);
    server.reveal(player, entity);

    server
        .mutate(entity, vec![("hp".into(), Value::Int(90))])
        .unwrap();
    let first_burst = server.outgoing_for(player);
    for bytes in &first_burst {
        client.receive(bytes.clone());
    }
    client.on_tick();

    server
        .mutate(entity, vec![("hp".into(), Value::Int(80))])
        .unwrap();
    deliver_to_client(&mut server, player, &mut client);
    assert_eq!(client.entity(entity).unwrap().version(), 2);

    // a stale retransmit of the very first burst arrives late
    for bytes in first_burst {
        client.receive(bytes);
    }
    client.on_tick();

    let replica = client.entity(entity).unwrap();
    assert_eq!(replica.version(), 2);
    assert_eq!(replica.attribute("hp"), Some(&Value::Int(80)));
    assert_eq!(client.pending_outgoing(), 0);
}
