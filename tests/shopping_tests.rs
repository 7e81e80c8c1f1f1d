//! Shopping list command tests
//!
//! Drives `smart-kitchen shopping` against seeded state in an isolated home
//! and checks that mutations persist between invocations.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

mod common;
use common::fixtures;

fn get_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_smart-kitchen"))
}

#[test]
fn test_shopping_show_with_empty_list_reports_empty() {
    let home = fixtures::app_home().expect("Failed to create app home");

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .arg("shopping")
        .assert()
        .success()
        .stdout(predicate::str::contains("Your shopping list is empty."));
}

#[test]
fn test_shopping_show_lists_entries_items_and_count() {
    let home = fixtures::app_home().expect("Failed to create app home");
    fixtures::seed_shopping_list(&home, "local", fixtures::sample_shopping_list_json())
        .expect("Failed to seed shopping list");

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .arg("shopping")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tomato Soup"))
        .stdout(predicate::str::contains("Bruschetta"))
        .stdout(predicate::str::contains("Tomato"))
        .stdout(predicate::str::contains("Basil"))
        .stdout(predicate::str::contains("Baguette"))
        .stdout(predicate::str::contains("4 servings"))
        .stdout(predicate::str::contains("3 items"));
}

#[test]
fn test_shopping_remove_item_persists_across_invocations() {
    let home = fixtures::app_home().expect("Failed to create app home");
    let doc = fixtures::seed_shopping_list(&home, "local", fixtures::sample_shopping_list_json())
        .expect("Failed to seed shopping list");

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .arg("shopping")
        .arg("remove")
        .arg("Tomato Soup")
        .arg("Basil")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed Basil from Tomato Soup."));

    let contents = fs::read_to_string(&doc).expect("Failed to read shopping list document");
    assert!(!contents.contains("Basil"));
    assert!(contents.contains("Tomato"));

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .arg("shopping")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 items"));
}

#[test]
fn test_shopping_remove_item_requires_exact_case() {
    let home = fixtures::app_home().expect("Failed to create app home");
    let doc = fixtures::seed_shopping_list(&home, "local", fixtures::sample_shopping_list_json())
        .expect("Failed to seed shopping list");

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .arg("shopping")
        .arg("remove")
        .arg("Tomato Soup")
        .arg("basil")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No item named 'basil' under 'Tomato Soup'.",
        ))
        .stdout(predicate::str::contains(
            "Item names match exactly, including case.",
        ));

    let contents = fs::read_to_string(&doc).expect("Failed to read shopping list document");
    assert!(contents.contains("Basil"));
}

#[test]
fn test_shopping_removing_last_item_drops_the_entry() {
    let home = fixtures::app_home().expect("Failed to create app home");
    let doc = fixtures::seed_shopping_list(&home, "local", fixtures::sample_shopping_list_json())
        .expect("Failed to seed shopping list");

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .arg("shopping")
        .arg("remove")
        .arg("Bruschetta")
        .arg("Baguette")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed Baguette from Bruschetta."));

    let contents = fs::read_to_string(&doc).expect("Failed to read shopping list document");
    assert!(!contents.contains("Bruschetta"));
}

#[test]
fn test_shopping_remove_recipe_drops_whole_entry() {
    let home = fixtures::app_home().expect("Failed to create app home");
    let doc = fixtures::seed_shopping_list(&home, "local", fixtures::sample_shopping_list_json())
        .expect("Failed to seed shopping list");

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .arg("shopping")
        .arg("remove-recipe")
        .arg("Tomato Soup")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed Tomato Soup from the list."));

    let contents = fs::read_to_string(&doc).expect("Failed to read shopping list document");
    assert!(!contents.contains("Tomato Soup"));
    assert!(contents.contains("Bruschetta"));
}

#[test]
fn test_shopping_remove_recipe_with_unknown_name_reports_missing() {
    let home = fixtures::app_home().expect("Failed to create app home");
    fixtures::seed_shopping_list(&home, "local", fixtures::sample_shopping_list_json())
        .expect("Failed to seed shopping list");

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .arg("shopping")
        .arg("remove-recipe")
        .arg("Ratatouille")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entry named 'Ratatouille'."));
}

#[test]
fn test_shopping_clear_empties_the_list() {
    let home = fixtures::app_home().expect("Failed to create app home");
    fixtures::seed_shopping_list(&home, "local", fixtures::sample_shopping_list_json())
        .expect("Failed to seed shopping list");

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .arg("shopping")
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Shopping list cleared."));

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .arg("shopping")
        .assert()
        .success()
        .stdout(predicate::str::contains("Your shopping list is empty."));
}

#[test]
fn test_shopping_list_follows_signed_in_namespace() {
    let home = fixtures::app_home().expect("Failed to create app home");
    fixtures::seed_session(&home, "user-123", "cook@example.com")
        .expect("Failed to seed session");
    fixtures::seed_shopping_list(&home, "local", fixtures::sample_shopping_list_json())
        .expect("Failed to seed shopping list");
    fixtures::seed_shopping_list(
        &home,
        "user-123",
        r#"[
  {
    "recipeName": "Shakshuka",
    "items": [{ "name": "Eggs", "quantity": "4" }],
    "servings": "2 servings"
  }
]"#,
    )
    .expect("Failed to seed shopping list");

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .arg("shopping")
        .assert()
        .success()
        .stdout(predicate::str::contains("Shakshuka"))
        .stdout(predicate::str::contains("1 item"))
        .stdout(predicate::str::contains("Tomato Soup").not());
}
