//! End-to-end byte-sequence scenarios and round-trip properties
//! spanning the Packer, Unpacker, and Bolt request constructors.

use boltwire::bolt::messages;
use boltwire::packstream::graph::Node;
use boltwire::packstream::packer::Packer;
use boltwire::packstream::unpacker::Unpacker;
use boltwire::packstream::value::{Map, Value};
use test_case::test_case;

fn pack(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    Packer::new(true).pack(value, &mut buf).unwrap();
    buf
}

fn unpack(bytes: &[u8]) -> Value {
    let mut cursor = std::io::Cursor::new(bytes.to_vec());
    Unpacker::default().unpack(&mut cursor).unwrap()
}

#[test]
fn pack_null_and_unpack_null() {
    assert_eq!(pack(&Value::Null), vec![0xC0]);
    assert_eq!(unpack(&[0xC0]), Value::Null);
}

#[test_case(1, vec![0x01]; "one")]
#[test_case(-16, vec![0xF0]; "smallest tiny")]
#[test_case(-17, vec![0xC8, 0xEF]; "just below tiny")]
#[test_case(200, vec![0xC9, 0x00, 0xC8]; "int16")]
fn pack_integer_matches_documented_bytes(value: i64, expected: Vec<u8>) {
    assert_eq!(pack(&Value::int(value)), expected);
}

#[test]
fn pack_hello_string() {
    assert_eq!(
        pack(&Value::string("hello")),
        vec![0x85, 0x68, 0x65, 0x6C, 0x6C, 0x6F]
    );
}

#[test]
fn pack_small_list() {
    let list = Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]);
    assert_eq!(pack(&list), vec![0x93, 0x01, 0x02, 0x03]);
}

#[test]
fn pack_small_map() {
    let mut map = Map::new();
    map.insert("k", Value::string("v"));
    assert_eq!(pack(&Value::Map(map)), vec![0xA1, 0x81, 0x6B, 0x81, 0x76]);
}

#[test]
fn init_message_matches_documented_bytes() {
    let msg = messages::init("x", Map::new());
    assert_eq!(
        pack(&Value::Structure(msg)),
        vec![0xB2, 0x01, 0x81, 0x78, 0xA0]
    );
}

#[test]
fn unpacking_a_node_matches_documented_example() {
    let bytes = [
        0xB3, 0x4E, 0x2A, 0x91, 0x86, 0x50, 0x65, 0x72, 0x73, 0x6F, 0x6E, 0xA0,
    ];
    match unpack(&bytes) {
        Value::Node(Node {
            identity,
            labels,
            properties,
        }) => {
            assert_eq!(identity.value(), 42);
            assert_eq!(labels, vec!["Person".to_string()]);
            assert!(properties.is_empty());
        }
        other => panic!("expected Node, got {:?}", other),
    }
}

#[test_case(Value::Null)]
#[test_case(Value::Bool(true))]
#[test_case(Value::Bool(false))]
#[test_case(Value::int(-17))]
#[test_case(Value::int(200))]
#[test_case(Value::int(i64::MIN))]
#[test_case(Value::int(i64::MAX))]
#[test_case(Value::Float(3.5))]
#[test_case(Value::string("hello, world"))]
#[test_case(Value::list(vec![Value::int(1), Value::string("two"), Value::Null]))]
fn pack_then_unpack_round_trips(value: Value) {
    let bytes = pack(&value);
    assert_eq!(unpack(&bytes), value);
}

#[test]
fn map_round_trips_with_last_write_wins_on_duplicate_keys() {
    let mut map = Map::new();
    map.insert("a", Value::int(1));
    map.insert("a", Value::int(2));
    assert_eq!(map.len(), 1);
    let bytes = pack(&Value::Map(map));
    match unpack(&bytes) {
        Value::Map(decoded) => assert_eq!(decoded.get("a"), Some(&Value::int(2))),
        other => panic!("expected Map, got {:?}", other),
    }
}

#[test]
fn byte_array_round_trips_when_peer_supports_them() {
    let value = Value::Bytes(bytes::Bytes::from_static(b"raw-bytes"));
    let bytes = pack(&value);
    assert_eq!(unpack(&bytes), value);
}

#[test_case(0; "empty")]
#[test_case(15; "largest tiny")]
#[test_case(16; "smallest list8")]
#[test_case(255; "largest list8")]
#[test_case(256; "smallest list16")]
#[test_case(65535; "largest list16")]
#[test_case(65536; "smallest list32")]
fn list_size_class_boundaries_round_trip(len: usize) {
    let items: Vec<Value> = (0..len as i64).map(Value::int).collect();
    let value = Value::list(items);
    let bytes = pack(&value);
    assert_eq!(unpack(&bytes), value);
}

#[test_case(0; "empty")]
#[test_case(15; "largest tiny")]
#[test_case(16; "smallest map8")]
#[test_case(255; "largest map8")]
#[test_case(256; "smallest map16")]
#[test_case(65535; "largest map16")]
#[test_case(65536; "smallest map32")]
fn map_size_class_boundaries_round_trip(len: usize) {
    let mut map = Map::new();
    for i in 0..len {
        map.insert(format!("k{i}"), Value::int(i as i64));
    }
    let value = Value::Map(map);
    let bytes = pack(&value);
    assert_eq!(unpack(&bytes), value);
}

#[test_case(0; "empty")]
#[test_case(15; "largest tiny")]
#[test_case(16; "smallest bytes8")]
#[test_case(255; "largest bytes8")]
#[test_case(256; "smallest bytes16")]
#[test_case(65535; "largest bytes16")]
#[test_case(65536; "smallest bytes32")]
fn bytes_size_class_boundaries_round_trip(len: usize) {
    let value = Value::Bytes(bytes::Bytes::from(vec![0xCDu8; len]));
    let bytes = pack(&value);
    assert_eq!(unpack(&bytes), value);
}

#[test_case(255; "largest struct8")]
#[test_case(256; "smallest struct16")]
fn struct_size_class_boundary_round_trip(len: usize) {
    use boltwire::packstream::value::Structure;

    let fields: Vec<Value> = (0..len as i64).map(Value::int).collect();
    let value = Value::Structure(Structure::new(0x01, fields));
    let bytes = pack(&value);
    assert_eq!(unpack(&bytes), value);
}
