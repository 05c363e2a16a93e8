//! Live endpoint smoke tests. These talk to the real catalog services, so they
//! are all ignored by default and meant to be run by hand (or a scheduled job)
//! to detect when an API shape changes underneath us.
//!
//! The CurseForge tests need `CURSEFORGE_API_KEY` set in the environment.

use mc_mod_updater_rs_catalog::{
    curseforge::{CurseForgeClient, CurseForgeLookup},
    fabric_meta::FabricMetaClient,
    modrinth::{ModrinthClient, ModrinthLookup},
};
use mc_mod_updater_rs_utils::types::ModLoader;

static WELL_KNOWN_MOD_SLUG: &str = "sodium";
static TEST_GAME_VERSION: &str = "1.20.1";

fn curseforge_client() -> CurseForgeClient {
    let api_key = std::env::var("CURSEFORGE_API_KEY")
        .expect("CURSEFORGE_API_KEY must be set to run the live CurseForge tests");

    CurseForgeClient::new(api_key).unwrap()
}

#[tokio::test]
#[ignore = "hits the live CurseForge API"]
async fn minecraft_version_catalog_is_descending_and_nonempty() {
    let catalog = curseforge_client().minecraft_versions().await.unwrap();

    assert!(!catalog.is_empty());

    // An old release must rank below a version that came out later.
    let old_pos = catalog.position("1.16.5").unwrap();
    let newer_pos = catalog.position(TEST_GAME_VERSION).unwrap();
    assert!(newer_pos < old_pos);
}

#[tokio::test]
#[ignore = "hits the live CurseForge API"]
async fn curseforge_slug_search_finds_a_well_known_mod() {
    let hits = curseforge_client()
        .search_by_slug("1.20", ModLoader::Fabric, WELL_KNOWN_MOD_SLUG)
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].slug, WELL_KNOWN_MOD_SLUG);
    assert!(!hits[0].latest_files.is_empty());
}

#[tokio::test]
#[ignore = "hits the live Modrinth API"]
async fn modrinth_query_search_finds_a_well_known_mod() {
    let client = ModrinthClient::new().unwrap();
    let hits = client
        .search_by_query(TEST_GAME_VERSION, ModLoader::Fabric, WELL_KNOWN_MOD_SLUG)
        .await
        .unwrap();

    assert!(hits.iter().any(|h| h.slug == WELL_KNOWN_MOD_SLUG));
}

#[tokio::test]
#[ignore = "hits the live Modrinth API"]
async fn modrinth_file_listing_returns_jars() {
    let client = ModrinthClient::new().unwrap();
    let hits = client
        .search_by_query(TEST_GAME_VERSION, ModLoader::Fabric, WELL_KNOWN_MOD_SLUG)
        .await
        .unwrap();
    let project_id = &hits[0].project_id;

    let versions = client
        .files_for_project(project_id, TEST_GAME_VERSION, ModLoader::Fabric)
        .await
        .unwrap();

    assert!(!versions.is_empty());
    assert!(versions[0].files[0].filename.ends_with(".jar"));
}

#[tokio::test]
#[ignore = "hits the live Fabric meta service"]
async fn fabric_meta_lists_a_stable_installer() {
    let url = FabricMetaClient::new()
        .unwrap()
        .stable_installer_url()
        .await
        .unwrap();

    assert!(url.ends_with(".jar"));
}
