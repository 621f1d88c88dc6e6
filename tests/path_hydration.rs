//! Builds the wire bytes for a `PATH` structure the way a server would
//! emit it (nodes/relationships as generic structures tagged by
//! signature) and checks that decoding rehydrates segments and binds
//! relationships the way §8's worked example describes.

use boltwire::packstream::graph::signature;
use boltwire::packstream::packer::Packer;
use boltwire::packstream::unpacker::Unpacker;
use boltwire::packstream::value::{Map, Structure, Value};

fn node_structure(id: i64, label: &str) -> Value {
    Value::Structure(Structure::new(
        signature::NODE,
        vec![
            Value::int(id),
            Value::list(vec![Value::string(label)]),
            Value::Map(Map::new()),
        ],
    ))
}

fn unbound_relationship_structure(id: i64, rel_type: &str) -> Value {
    Value::Structure(Structure::new(
        signature::UNBOUND_RELATIONSHIP,
        vec![Value::int(id), Value::string(rel_type), Value::Map(Map::new())],
    ))
}

fn path_structure() -> Value {
    Value::Structure(Structure::new(
        signature::PATH,
        vec![
            Value::list(vec![
                node_structure(1, "A"),
                node_structure(2, "B"),
                node_structure(3, "C"),
            ]),
            Value::list(vec![
                unbound_relationship_structure(10, "R1"),
                unbound_relationship_structure(20, "R2"),
            ]),
            Value::list(vec![
                Value::int(1),
                Value::int(1),
                Value::int(-2),
                Value::int(2),
            ]),
        ],
    ))
}

#[test]
fn path_hydration_matches_the_documented_worked_example() {
    let mut bytes = Vec::new();
    Packer::new(true).pack(&path_structure(), &mut bytes).unwrap();

    let mut cursor = std::io::Cursor::new(bytes);
    let path = match Unpacker::default().unpack(&mut cursor).unwrap() {
        Value::Path(p) => p,
        other => panic!("expected Path, got {:?}", other),
    };

    assert_eq!(path.start.identity.value(), 1);
    assert_eq!(path.end.identity.value(), 3);
    assert_eq!(path.segments.len(), 2);

    let first = &path.segments[0];
    assert_eq!(first.start.identity.value(), 1);
    assert_eq!(first.end.identity.value(), 2);
    assert_eq!(first.rel.identity.value(), 10);
    assert_eq!(first.rel.start_node_id.value(), 1);
    assert_eq!(first.rel.end_node_id.value(), 2);

    let second = &path.segments[1];
    assert_eq!(second.start.identity.value(), 2);
    assert_eq!(second.end.identity.value(), 3);
    assert_eq!(second.rel.identity.value(), 20);
    // r2 is traversed backwards: bound (C.id, B.id).
    assert_eq!(second.rel.start_node_id.value(), 3);
    assert_eq!(second.rel.end_node_id.value(), 2);
}

#[test]
fn wrong_node_field_count_is_a_protocol_error() {
    let bad_node = Value::Structure(Structure::new(
        signature::NODE,
        vec![Value::int(1)], // missing labels and properties
    ));
    let mut bytes = Vec::new();
    Packer::new(true).pack(&bad_node, &mut bytes).unwrap();

    let mut cursor = std::io::Cursor::new(bytes);
    let err = Unpacker::default().unpack(&mut cursor).unwrap_err();
    match err {
        boltwire::BoltStreamError::Protocol(
            boltwire::error::ProtocolError::WrongStructSize {
                struct_name,
                expected,
                actual,
                ..
            },
        ) => {
            assert_eq!(struct_name, "Node");
            assert_eq!(expected, 3);
            assert_eq!(actual, 1);
        }
        other => panic!("expected WrongStructSize, got {:?}", other),
    }
}
