//! # Configuration Tests
//!
//! Tests for reading the environment snapshot, its validation errors, and the platform
//! parameters derived from it.

use std::env::VarError;
use std::ffi::OsString;

use pretty_assertions::assert_eq;
use rstest::rstest;
use tilegraph_core::common::constants::MAX_TILES;
use tilegraph_core::common::{ConfigError, TileId};
use tilegraph_core::config::{EnvConfig, Isa, Options, PlatformConfig};

#[test]
fn test_defaults_with_only_tiles_set() {
    let env = EnvConfig::from_pairs([("M3_GEM5_TILES", "3")]).unwrap();
    assert_eq!(
        env,
        EnvConfig {
            target: None,
            tiles: 3,
            fs_image: None,
            fs_num: 1,
            isa: Isa::Riscv,
        }
    );
}

#[test]
fn test_all_variables_read() {
    let env = EnvConfig::from_pairs([
        ("M3_TARGET", "gem5"),
        ("M3_GEM5_TILES", "4"),
        ("M3_GEM5_FS", "build/default.img"),
        ("M3_GEM5_FSNUM", "7"),
        ("M3_ISA", "x86_64"),
    ])
    .unwrap();
    assert_eq!(env.target.as_deref(), Some("gem5"));
    assert_eq!(env.tiles, 4);
    assert_eq!(env.fs_image.as_deref(), Some("build/default.img"));
    assert_eq!(env.fs_num, 7);
    assert_eq!(env.isa, Isa::X86_64);
}

#[test]
fn test_missing_tiles() {
    let err = EnvConfig::from_pairs([("M3_TARGET", "hw")]).unwrap_err();
    assert_eq!(
        err,
        ConfigError::MissingVar {
            name: "M3_GEM5_TILES"
        }
    );
}

#[rstest]
#[case("")]
#[case("-1")]
#[case("two")]
#[case("2x")]
#[case("+2")]
#[case("99999999999")]
fn test_invalid_tiles(#[case] value: &str) {
    let err = EnvConfig::from_pairs([("M3_GEM5_TILES", value)]).unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidInteger {
            name: "M3_GEM5_TILES",
            value: value.to_string(),
        }
    );
}

#[test]
fn test_tiles_whitespace_trimmed() {
    let env = EnvConfig::from_pairs([("M3_GEM5_TILES", " 2\n")]).unwrap();
    assert_eq!(env.tiles, 2);
}

#[test]
fn test_zero_tiles_parses() {
    assert_eq!(EnvConfig::from_pairs([("M3_GEM5_TILES", "0")]).unwrap().tiles, 0);
}

#[test]
fn test_invalid_fs_num() {
    let err = EnvConfig::from_pairs([("M3_GEM5_TILES", "2"), ("M3_GEM5_FSNUM", "one")])
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidInteger {
            name: "M3_GEM5_FSNUM",
            value: "one".to_string(),
        }
    );
}

#[test]
fn test_tiles_checked_before_fs_num() {
    let err = EnvConfig::from_pairs([("M3_GEM5_TILES", "x"), ("M3_GEM5_FSNUM", "y")])
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidInteger {
            name: "M3_GEM5_TILES",
            ..
        }
    ));
}

#[test]
fn test_empty_fs_is_absent() {
    let env = EnvConfig::from_pairs([("M3_GEM5_TILES", "2"), ("M3_GEM5_FS", "")]).unwrap();
    assert!(env.fs_image.is_none());
}

#[rstest]
#[case("x86_64", Isa::X86_64)]
#[case("arm", Isa::Arm)]
#[case("riscv", Isa::Riscv)]
fn test_isa_parse(#[case] value: &str, #[case] isa: Isa) {
    let env = EnvConfig::from_pairs([("M3_GEM5_TILES", "1"), ("M3_ISA", value)]).unwrap();
    assert_eq!(env.isa, isa);
    assert_eq!(isa.to_string(), value);
}

#[test]
fn test_invalid_isa() {
    let err = EnvConfig::from_pairs([("M3_GEM5_TILES", "1"), ("M3_ISA", "mips")]).unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidIsa {
            value: "mips".to_string()
        }
    );
}

#[test]
fn test_lookup_is_called_per_variable() {
    let env = EnvConfig::from_lookup(|name| match name {
        "M3_GEM5_TILES" => Some("5".to_string()),
        "M3_TARGET" => Some("hw".to_string()),
        _ => None,
    })
    .unwrap();
    assert!(env.is_hw_target());
    assert_eq!(env.tiles, 5);
}

#[rstest]
#[case(Some("hw"), 128)]
#[case(Some("gem5"), 192)]
#[case(Some("host"), 192)]
#[case(Some("HW"), 192)]
#[case(Some(""), 192)]
#[case(None, 192)]
fn test_endpoint_count_by_target(#[case] target: Option<&str>, #[case] eps: u32) {
    let mut pairs = vec![("M3_GEM5_TILES", "2")];
    if let Some(target) = target {
        pairs.push(("M3_TARGET", target));
    }
    let platform = PlatformConfig::from(&EnvConfig::from_pairs(pairs).unwrap());
    assert_eq!(platform.num_eps, eps);
}

#[test]
fn test_derived_numbers() {
    let platform = PlatformConfig::from(&EnvConfig::from_pairs([("M3_GEM5_TILES", "3")]).unwrap());
    assert_eq!(platform.num_tiles, 3);
    assert_eq!(platform.num_kecacc, 1);
    assert_eq!(platform.num_mem, 1);
    assert_eq!(platform.first_kecacc_no(), TileId(3));
    assert_eq!(platform.serial_tile_no(), TileId(4));
    assert_eq!(platform.mem_tile_no(), TileId(5));
    assert_eq!(platform.total_tiles(), 6);
}

#[test]
fn test_options_commands_keep_positions() {
    let options = Options::with_cmd("a,,c");
    assert_eq!(options.commands(), vec!["a", "", "c"]);
    assert_eq!(Options::with_cmd("").commands(), vec![""]);
}

#[test]
fn test_options_serde_skips_empty_extra() {
    let json = serde_json::to_string(&Options::with_cmd("a,b")).unwrap();
    assert_eq!(json, r#"{"cmd":"a,b"}"#);
    let back: Options = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Options::with_cmd("a,b"));
}

/// Lookup with `std::env::var` semantics where `bad` holds a non-Unicode value.
fn vars_with_non_unicode(
    bad: &'static str,
) -> impl Fn(&str) -> Result<String, VarError> {
    move |name: &str| match name {
        _ if name == bad => Err(VarError::NotUnicode(OsString::from("/img/a.fs"))),
        "M3_GEM5_TILES" => Ok("1".to_string()),
        _ => Err(VarError::NotPresent),
    }
}

#[rstest]
#[case("M3_GEM5_FS")]
#[case("M3_GEM5_TILES")]
#[case("M3_GEM5_FSNUM")]
#[case("M3_TARGET")]
#[case("M3_ISA")]
fn test_non_unicode_value_is_rejected(#[case] name: &'static str) {
    let err = EnvConfig::from_vars(vars_with_non_unicode(name)).unwrap_err();
    assert_eq!(err, ConfigError::NotUnicode { name });
    assert!(err.to_string().contains(name));
}

#[test]
fn test_from_vars_treats_not_present_as_unset() {
    let env = EnvConfig::from_vars(|name| match name {
        "M3_GEM5_TILES" => Ok("2".to_string()),
        _ => Err(VarError::NotPresent),
    })
    .unwrap();
    assert_eq!(env, EnvConfig::from_pairs([("M3_GEM5_TILES", "2")]).unwrap());
}

#[test]
fn test_tile_count_leaves_room_for_fixed_tiles() {
    let err = EnvConfig::from_pairs([("M3_GEM5_TILES", "4294967295")]).unwrap_err();
    assert_eq!(
        err,
        ConfigError::TooManyTiles {
            value: u32::MAX,
            max: MAX_TILES,
        }
    );

    let env = EnvConfig::from_pairs([("M3_GEM5_TILES", MAX_TILES.to_string())]).unwrap();
    let platform = PlatformConfig::from(&env);
    assert_eq!(platform.mem_tile_no(), TileId(u32::MAX - 1));
    assert_eq!(platform.total_tiles(), u32::MAX);
}

#[test]
fn test_derived_numbers_saturate() {
    let mut platform = PlatformConfig::from(&EnvConfig::from_pairs([("M3_GEM5_TILES", "1")]).unwrap());
    platform.num_tiles = u32::MAX;
    assert_eq!(platform.serial_tile_no(), TileId(u32::MAX));
    assert_eq!(platform.mem_tile_no(), TileId(u32::MAX));
    assert_eq!(platform.total_tiles(), u32::MAX);
}
