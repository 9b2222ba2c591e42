mod common;

use common::{TestWorkspace, catalog_cmd, restaurants_csv};
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;

fn fixture_arg() -> String {
    restaurants_csv().to_str().expect("utf-8 path").to_string()
}

fn json_stdout(args: &[&str]) -> Value {
    let output = catalog_cmd().args(args).output().expect("run binary");
    assert!(output.status.success(), "{:?}", output);
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn routes_lists_ids_newest_first() {
    catalog_cmd()
        .args(["routes", "-i", &fixture_arg()])
        .assert()
        .success()
        .stdout("12\n7\n3\n1\n");
}

#[test]
fn list_json_pages_and_resolves_covers() {
    let input = fixture_arg();
    let value = json_stdout(&["list", "-i", &input, "--json"]);
    assert_eq!(value["total_items"], 4);
    assert_eq!(value["total_pages"], 1);
    assert_eq!(value["pages"], serde_json::json!([1]));
    let items = value["items"].as_array().expect("items");
    assert_eq!(items[0]["id"], 12);
    assert_eq!(items[0]["average_check"], 1200);
    assert_eq!(items[0]["cover_url"], "/posts/12/1.jpg");
    assert_eq!(items[1]["title"], "Бар \"Ржавый якорь\"");
    assert_eq!(items[1]["average_check"], Value::Null);
    assert_eq!(items[1]["cover_url"], Value::Null);
}

#[test]
fn list_second_page_with_small_page_size() {
    let input = fixture_arg();
    let value = json_stdout(&[
        "list",
        "-i",
        &input,
        "--page-size",
        "3",
        "--page",
        "2",
        "--json",
    ]);
    assert_eq!(value["page"], 2);
    assert_eq!(value["total_pages"], 2);
    let ids = value["items"]
        .as_array()
        .expect("items")
        .iter()
        .map(|item| item["id"].as_i64().expect("id"))
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![1]);
}

#[test]
fn list_filters_by_tag_and_search() {
    let input = fixture_arg();
    catalog_cmd()
        .args(["list", "-i", &input, "--tag", "#Кофейня"])
        .assert()
        .success()
        .stdout(contains("Coffee Room").and(contains("Пышечная").not()))
        .stdout(contains("‹ [1] ›"));

    catalog_cmd()
        .args(["list", "-i", &input, "-s", "ПЫШ"])
        .assert()
        .success()
        .stdout(contains("Пышечная, та самая").and(contains("Coffee Room").not()));
}

#[test]
fn list_orders_metro_tags_first() {
    catalog_cmd()
        .args(["list", "-i", &fixture_arg(), "-s", "coffee"])
        .assert()
        .success()
        .stdout(contains("Невский проспект, Кофейня, Завтраки"));
}

#[test]
fn list_falls_back_to_empty_catalog_when_dataset_is_missing() {
    let workspace = TestWorkspace::new();
    let missing = workspace.path().join("absent.csv");
    catalog_cmd()
        .args(["list", "-i", missing.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("No restaurants found"));
}

#[test]
fn show_prints_detail_view() {
    catalog_cmd()
        .args(["show", "-i", &fixture_arg(), "--id", "3"])
        .assert()
        .success()
        .stdout(contains("#3 Пышечная, та самая"))
        .stdout(contains("Average check: 400 ₽"))
        .stdout(contains("Metro: Садовая"))
        .stdout(contains("Cuisine: Пекарня"))
        .stdout(contains("  [video] /posts/3/2.mp4"))
        .stdout(contains("Легендарные пышки. Сладкий кофе из бака..."));
}

#[test]
fn show_unknown_id_fails() {
    catalog_cmd()
        .args(["show", "-i", &fixture_arg(), "--id", "99"])
        .assert()
        .failure()
        .stderr(contains("Restaurant 99 not found"));
}

#[test]
fn show_uses_configured_asset_prefix() {
    let workspace = TestWorkspace::new();
    let config = workspace.write(
        "catalog.yaml",
        &format!(
            "dataset: {}\nasset_prefix: https://cdn.example.com/posts\n",
            fixture_arg()
        ),
    );
    let value = json_stdout(&["show", "-c", config.to_str().unwrap(), "--id", "12", "--json"]);
    assert_eq!(
        value["media_urls"],
        serde_json::json!([
            "https://cdn.example.com/posts/12/1.jpg",
            "https://cdn.example.com/posts/12/2.jpg"
        ])
    );
    assert_eq!(value["cuisine_tags"], serde_json::json!(["#Кофейня", "#Завтраки"]));
    assert_eq!(value["metro_tags"], serde_json::json!(["#Невский_проспект"]));
    assert_eq!(value["website_link"], "https://coffeeroom.example");
}

#[test]
fn missing_dataset_argument_is_reported() {
    catalog_cmd()
        .args(["routes"])
        .assert()
        .failure()
        .stderr(contains("No dataset given"));
}

#[test]
fn unknown_config_key_is_rejected() {
    let workspace = TestWorkspace::new();
    let config = workspace.write("bad.yaml", "page_sise: 3\n");
    catalog_cmd()
        .args(["list", "-c", config.to_str().unwrap(), "-i", &fixture_arg()])
        .assert()
        .failure()
        .stderr(contains("Loading config"));
}

#[test]
fn tags_counts_with_facets() {
    catalog_cmd()
        .args(["tags", "-i", &fixture_arg()])
        .assert()
        .success()
        .stdout(contains("#Садовая").and(contains("metro")))
        .stdout(contains("cuisine"));
}

#[test]
fn suggest_needs_two_characters() {
    let input = fixture_arg();
    catalog_cmd()
        .args(["suggest", "-i", &input, "х"])
        .assert()
        .success()
        .stdout("");
    catalog_cmd()
        .args(["suggest", "-i", &input, "хи"])
        .assert()
        .success()
        .stdout("1\tХинкальная №1\n");
}

#[test]
fn check_reports_dropped_rows_and_coercions() {
    let value = json_stdout(&["check", "-i", &fixture_arg(), "--json"]);
    assert_eq!(value["records"], 4);
    assert_eq!(
        value["dropped"],
        serde_json::json!({"empty_key": 1, "invalid_id": 1})
    );
    let coercions = value["coercions"].as_array().expect("coercions");
    assert_eq!(coercions.len(), 1);
    assert_eq!(coercions[0]["record_id"], 7);
    assert_eq!(coercions[0]["raw"], "₽");
    assert_eq!(value["fingerprint"].as_str().expect("hex").len(), 64);
}

#[test]
fn check_fails_on_unreadable_dataset() {
    let workspace = TestWorkspace::new();
    let missing = workspace.path().join("absent.csv");
    catalog_cmd()
        .args(["check", "-i", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("Checking"));
}

#[test]
fn stdin_dataset_is_supported() {
    catalog_cmd()
        .args(["routes", "-i", "-"])
        .write_stdin("id,title_2gis\n5,Five\n9,Nine\n")
        .assert()
        .success()
        .stdout("9\n5\n");
}

#[test]
fn quote_aware_flag_keeps_multiline_text() {
    let workspace = TestWorkspace::new();
    let csv = workspace.write(
        "multiline.csv",
        "id,title_2gis,text_html\n1,First,\"Line one.\nLine two, still quoted.\"\n2,Second,\n",
    );
    let path = csv.to_str().unwrap();

    catalog_cmd()
        .args(["routes", "-i", path, "--quote-aware"])
        .assert()
        .success()
        .stdout("2\n1\n");

    let value = json_stdout(&["check", "-i", path, "--json"]);
    assert_eq!(value["records"], 2);
    assert_eq!(value["dropped"]["invalid_id"], 1);
}

#[test]
fn windows_1251_dataset_decodes_with_explicit_encoding() {
    let workspace = TestWorkspace::new();
    let (bytes, _, _) = encoding_rs::WINDOWS_1251.encode("id,title_2gis\n4,Пышки\n");
    let csv = workspace.write_bytes("cp1251.csv", &bytes);
    catalog_cmd()
        .args([
            "suggest",
            "-i",
            csv.to_str().unwrap(),
            "--input-encoding",
            "windows-1251",
            "пыш",
        ])
        .assert()
        .success()
        .stdout("4\tПышки\n");
}
