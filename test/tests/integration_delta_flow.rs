/// End-to-end delta flow: server mutation → broadcast → client replica,
/// with the local event bus notified on each side.
use std::{cell::RefCell, rc::Rc};

use boostlink_shared::{Event, EventKind, PlayerId, Value};
use boostlink_test::helpers::{packet_exchange::deliver_to_client, test_protocol};

#[test]
fn mutation_reaches_the_replica() {
    let mut server = test_protocol::started_server();
    let mut client = test_protocol::client();
    let player = PlayerId(1);

    let entity = server
        .spawn(None, vec![("hp".into(), Value::Int(100))])
        .unwrap();
    server.player_join(player);
    assert!(server.reveal(player, entity));

    let delta = server
        .mutate(entity, vec![("hp".into(), Value::Int(80))])
        .unwrap();
    assert_eq!(delta.base, 0);
    assert_eq!(delta.target, 1);
    assert_eq!(delta.changes, vec![("hp".to_string(), Value::Int(80))]);

    let versions = Rc::new(RefCell::new(Vec::new()));
    let seen = versions.clone();
    client.events().subscribe(
        EventKind::StateChanged,
        Box::new(move |event, _| {
            if let Event::StateChanged { version, .. } = event {
                seen.borrow_mut().push(*version);
            }
            Ok(())
        }),
    );

    // the reveal baseline snapshot plus the hp delta
    let delivered = deliver_to_client(&mut server, player, &mut client);
    assert_eq!(delivered, 2);

    let replica = client.entity(entity).unwrap();
    assert_eq!(replica.version(), 1);
    assert_eq!(replica.attribute("hp"), Some(&Value::Int(80)));
    assert_eq!(*versions.borrow(), vec![0, 1]);
}

#[test]
fn invisible_entities_are_not_broadcast() {
    let mut server = test_protocol::started_server();
    let mut client = test_protocol::client();
    let player = PlayerId(1);

    let hidden = server.spawn(None, vec![]).unwrap();
    server.player_join(player);
    // never revealed

    server
        .mutate(hidden, vec![("hp".into(), Value::Int(5))])
        .unwrap();
    let delivered = deliver_to_client(&mut server, player, &mut client);
    assert_eq!(delivered, 0);
    assert!(client.entity(hidden).is_none());
}

#[test]
fn partial_delta_leaves_other_attributes_intact() {
    let mut server = test_protocol::started_server();
    let mut client = test_protocol::client();
    let player = PlayerId(1);

    let entity = server
        .spawn(
            None,
            vec![
                ("hp".into(), Value::Int(100)),
                ("label".into(), Value::Text("Mew".into())),
            ],
        )
        .unwrap();
    server.player_join(player);
    server.reveal(player, entity);

    server
        .mutate(entity, vec![("hp".into(), Value::Int(80))])
        .unwrap();
    deliver_to_client(&mut server, player, &mut client);

    let replica = client.entity(entity).unwrap();
    assert_eq!(replica.attribute("hp"), Some(&Value::Int(80)));
    assert_eq!(replica.attribute("label"), Some(&Value::Text("Mew".into())));
}

#[test]
fn multiple_attributes_arrive_in_one_delta() {
    let mut server = test_protocol::started_server();
    let mut client = test_protocol::client();
    let player = PlayerId(1);

    let entity = server.spawn(None, vec![]).unwrap();
    server.player_join(player);
    server.reveal(player, entity);

    server
        .mutate(
            entity,
            vec![
                ("hp".into(), Value::Int(50)),
                ("shiny".into(), Value::Bool(true)),
                ("label".into(), Value::Text("Eevee".into())),
            ],
        )
        .unwrap();
    deliver_to_client(&mut server, player, &mut client);

    let replica = client.entity(entity).unwrap();
    assert_eq!(replica.attribute("hp"), Some(&Value::Int(50)));
    assert_eq!(replica.attribute("shiny"), Some(&Value::Bool(true)));
    assert_eq!(
        replica.attribute("label"),
        Some(&Value::Text("Eevee".into()))
    );
}
