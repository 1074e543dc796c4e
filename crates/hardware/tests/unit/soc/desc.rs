//! # Tile Descriptor Tests
//!
//! Tests for the descriptor word layout and the descriptors assigned to planned tiles.

use pretty_assertions::assert_eq;
use rstest::rstest;
use tilegraph_core::common::MemSize;
use tilegraph_core::config::Isa;
use tilegraph_core::soc::desc::{TileDesc, TileIsa, TileType, attr};
use tilegraph_core::soc::TileKind;

use crate::common::harness::{hw_env, plan, tiles_env};

#[test]
fn test_layout() {
    let desc = TileDesc::new(TileType::Mem, TileIsa::None, MemSize::from_mib(3072), 0);
    assert_eq!(desc.value(), 0x2 | (3072 << 20));

    let desc = TileDesc::new(
        TileType::CompImem,
        TileIsa::RiscV,
        MemSize::from_mib(32),
        attr::KECACC,
    );
    assert_eq!(desc.value(), (3 << 3) | (8 << 7) | (32 << 20));
}

#[test]
fn test_low_bits_of_size_dropped() {
    let desc = TileDesc::new(TileType::CompImem, TileIsa::X86, MemSize::from_bytes(0x1FFF), 0);
    assert_eq!(desc.mem_size(), MemSize::from_bytes(0x1000));
    assert_eq!(desc.tile_type(), Some(TileType::CompImem));
    assert_eq!(desc.isa(), Some(TileIsa::X86));
}

#[test]
fn test_unknown_encodings() {
    let desc = TileDesc::from_raw(0x7 | (0xF << 3));
    assert_eq!(desc.tile_type(), None);
    assert_eq!(desc.isa(), None);
    assert!(!desc.is_programmable());
}

#[rstest]
#[case(TileIsa::None, false, false)]
#[case(TileIsa::X86, true, false)]
#[case(TileIsa::Arm, true, false)]
#[case(TileIsa::RiscV, true, false)]
#[case(TileIsa::AccelCopy, false, false)]
#[case(TileIsa::IdeDev, false, true)]
#[case(TileIsa::NicDev, false, true)]
#[case(TileIsa::SerialDev, false, true)]
fn test_isa_queries(#[case] isa: TileIsa, #[case] programmable: bool, #[case] device: bool) {
    let desc = TileDesc::new(TileType::CompImem, isa, MemSize::from_bytes(0), 0);
    assert_eq!(desc.is_programmable(), programmable);
    assert_eq!(desc.is_device(), device);
    assert_eq!(desc.supports_tilemux(), !device);
}

#[test]
fn test_memory_tile_queries() {
    let desc = TileDesc::new(TileType::Mem, TileIsa::None, MemSize::from_mib(3072), 0);
    assert!(!desc.supports_activities());
    assert!(!desc.supports_tilemux());
    assert!(!desc.has_internal_mem());
}

#[test]
fn test_display_is_hex() {
    let desc = TileDesc::from_raw(0x2_0000_0002);
    assert_eq!(desc.to_string(), "0x200000002");
}

#[test]
fn test_planned_descriptors() {
    let topology = plan(&hw_env(), "c0,c1");
    let descs = topology.descriptors();
    assert_eq!(descs.len(), topology.len());

    for (spec, desc) in topology.tiles().iter().zip(&descs) {
        match spec.kind() {
            TileKind::Core => {
                assert_eq!(desc.isa(), Some(TileIsa::RiscV));
                assert_eq!(desc.attr(), 0);
                assert_eq!(desc.mem_size(), MemSize::from_mib(32));
                assert!(desc.has_internal_mem());
            }
            TileKind::KecAcc => {
                assert_eq!(desc.isa(), Some(TileIsa::RiscV));
                assert_eq!(desc.attr(), attr::KECACC);
                assert_eq!(desc.mem_size(), MemSize::from_mib(32));
            }
            TileKind::Serial => {
                assert_eq!(desc.isa(), Some(TileIsa::SerialDev));
                assert!(desc.is_device());
                assert!(desc.supports_activities());
            }
            TileKind::Memory => {
                assert_eq!(desc.tile_type(), Some(TileType::Mem));
                assert_eq!(desc.mem_size(), MemSize::from_mib(3072));
            }
        }
    }
}

#[rstest]
#[case(Isa::X86_64, TileIsa::X86)]
#[case(Isa::Arm, TileIsa::Arm)]
#[case(Isa::Riscv, TileIsa::RiscV)]
fn test_isa_only_changes_programmable_descriptors(#[case] isa: Isa, #[case] tile_isa: TileIsa) {
    let mut env = tiles_env(1);
    env.isa = isa;
    let topology = plan(&env, "a");
    let descs = topology.descriptors();
    assert_eq!(descs[0].isa(), Some(tile_isa));
    assert_eq!(descs[1].isa(), Some(tile_isa));
    assert_eq!(descs[2].isa(), Some(TileIsa::SerialDev));
    assert_eq!(descs[3].isa(), Some(TileIsa::None));
}
