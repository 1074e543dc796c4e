//! # Build Recipe Tests
//!
//! Tests for the directory recipes run against the recording environment, and for the
//! breadth-first expansion of sub-directory builds.

use pretty_assertions::assert_eq;
use rstest::rstest;
use tilegraph_core::recipe::recipes::{APP_DIRS, FS_INODES};
use tilegraph_core::recipe::{
    Artifact, BuildEnv, BuildGraph, BuildTarget, Decl, Recipe, RecipeError, RecordingEnv,
};

fn run(recipe: Recipe, target: BuildTarget) -> (BuildGraph, RecordingEnv) {
    let env = RecordingEnv::new(target).at(recipe.dir());
    let mut graph = BuildGraph::new();
    recipe.build(&mut graph, &env);
    (graph, env)
}

#[test]
fn test_apps_declares_every_app_in_order() {
    let (graph, _) = run(Recipe::Apps, BuildTarget::Gem5);
    let dirs: Vec<_> = graph.sub_dirs().collect();
    let expected: Vec<_> = APP_DIRS.iter().map(|d| format!("src/apps/{d}")).collect();
    assert_eq!(dirs, expected);
    assert_eq!(dirs.len(), 31);
}

#[test]
fn test_kecacc_builds_and_installs_library() {
    let (graph, env) = run(Recipe::KecaccXkcp, BuildTarget::Hw);
    assert_eq!(
        graph.decls(),
        &[
            Decl::StaticLib {
                dir: "src/libs/crypto/kecacc-xkcp".to_string(),
                out: "libkecacc-xkcp".to_string(),
                ins: vec![
                    "kecacc-xkcp.cc".to_string(),
                    "xkcp/KeccakP-1600-opt64.c".to_string()
                ],
                cxx_flags: vec!["-std=c++17".to_string(), "-Wno-sign-conversion".to_string()],
            },
            Decl::Install {
                dest: "build/hw/lib".to_string(),
                artifact: Artifact {
                    path: "src/libs/crypto/kecacc-xkcp/libkecacc-xkcp.a".to_string(),
                },
            },
        ]
    );
    assert!(env.cxx_flags.is_empty());
}

#[test]
fn test_vasnd_adds_flac_include_locally() {
    let (graph, env) = run(Recipe::Vasnd, BuildTarget::Gem5);
    match graph.decls() {
        [Decl::Exe {
            out,
            ins,
            libs,
            cpp_path,
            ..
        }] => {
            assert_eq!(out, "vasnd");
            assert_eq!(ins, &["encoder.cc", "vasnd.cc"]);
            assert_eq!(libs, &["flac"]);
            assert_eq!(cpp_path, &["src/include", "src/libs/flac/include"]);
        }
        other => panic!("unexpected declarations {other:?}"),
    }
    assert_eq!(env.cpp_path, vec!["src/include".to_string()]);
}

#[rstest]
#[case(BuildTarget::Host, 160 * 1024)]
#[case(BuildTarget::Gem5, 32 * 1024)]
#[case(BuildTarget::Hw, 32 * 1024)]
fn test_fs_blocks_by_target(#[case] target: BuildTarget, #[case] expected: u64) {
    let (graph, _) = run(Recipe::FsDefault, target);
    assert_eq!(
        graph.decls(),
        &[Decl::FsImage {
            dir: "src/fs/default".to_string(),
            out: "default.img".to_string(),
            src: "src/fs/default".to_string(),
            blocks: expected,
            inodes: FS_INODES,
        }]
    );
}

#[test]
fn test_for_dir() {
    for recipe in Recipe::ALL {
        assert_eq!(Recipe::for_dir(recipe.dir()), Some(recipe));
    }
    assert_eq!(Recipe::for_dir("src/fs/default/"), Some(Recipe::FsDefault));
    assert_eq!(Recipe::for_dir("src/libs"), None);
}

#[test]
fn test_expand_follows_sub_builds() {
    let env = RecordingEnv::new(BuildTarget::Gem5);
    let mut graph = BuildGraph::new();
    let ran = graph.expand(&env, "src/apps");

    assert_eq!(ran, 1);
    assert_eq!(graph.decls().len(), APP_DIRS.len());
    assert_eq!(graph.expand(&env, "src/nowhere"), 0);
    assert_eq!(graph.decls().len(), APP_DIRS.len());
}

#[test]
fn test_recording_env_accessors() {
    let mut env = RecordingEnv::new(BuildTarget::Host);
    assert_eq!(env.target(), BuildTarget::Host);
    assert_eq!(env.lib_dir(), "build/host/lib");
    env.cxx_flags_mut().push("-O2".to_string());
    env.cpp_path_mut().clear();
    assert_eq!(env.cxx_flags, vec!["-O2".to_string()]);
    assert!(env.cpp_path.is_empty());
}

#[rstest]
#[case("host", BuildTarget::Host)]
#[case("gem5", BuildTarget::Gem5)]
#[case("hw", BuildTarget::Hw)]
fn test_target_round_trip(#[case] name: &str, #[case] target: BuildTarget) {
    assert_eq!(name.parse::<BuildTarget>(), Ok(target));
    assert_eq!(target.to_string(), name);
}

#[test]
fn test_unknown_target() {
    assert_eq!(
        "fpga".parse::<BuildTarget>(),
        Err(RecipeError::UnknownTarget {
            value: "fpga".to_string()
        })
    );
}

#[test]
fn test_require_recipe() {
    assert_eq!(Recipe::require("src/apps/"), Ok(Recipe::Apps));
    assert_eq!(
        Recipe::require("src/libs"),
        Err(RecipeError::NoRecipe {
            dir: "src/libs".to_string()
        })
    );
}

#[test]
fn test_decl_display() {
    let decl = Decl::SubBuild {
        dir: "src/apps/hello".to_string(),
    };
    assert_eq!(decl.to_string(), "subdir  src/apps/hello");
}
