//! # Tile Id Tests

use tilegraph_core::common::TileId;

#[test]
fn test_offset() {
    assert_eq!(TileId::new(4).offset(0), TileId(4));
    assert_eq!(TileId::new(4).offset(2), TileId(6));
}

#[test]
fn test_display_is_bare_number() {
    assert_eq!(TileId(17).to_string(), "17");
    assert_eq!(TileId::from(3).val(), 3);
}

#[test]
fn test_serializes_as_number() {
    assert_eq!(serde_json::to_string(&TileId(5)).unwrap(), "5");
}
