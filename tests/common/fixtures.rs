//! Test fixture helpers for isolated application homes
//!
//! Provides utilities for setting up realistic application state: config
//! files, persisted shopping-list and favorites documents, and stored auth
//! sessions, all under a throwaway home directory.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

/// Creates an empty application home
///
/// # Returns
///
/// A TempDir to pass to the binary via `SMART_KITCHEN_HOME` - it must be
/// kept alive for the duration of the test
pub fn app_home() -> anyhow::Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Path of the data directory under an application home, created on demand
pub fn data_dir(home: &TempDir) -> anyhow::Result<PathBuf> {
    let dir = home.path().join(".smart-kitchen");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Writes a config file into the application home
pub fn write_config(home: &TempDir, contents: &str) -> anyhow::Result<PathBuf> {
    let path = home.path().join("smart-kitchen.toml");
    fs::write(&path, contents)?;
    Ok(path)
}

/// Writes a config file with an `[auth]` table pointing at an unroutable
/// endpoint, so account commands fail fast instead of hanging
pub fn write_auth_config(home: &TempDir) -> anyhow::Result<PathBuf> {
    write_config(
        home,
        r#"
[auth]
base_url = "http://127.0.0.1:1"
anon_key = "test-anon-key"
"#,
    )
}

/// Seeds a persisted shopping-list document for `namespace`
pub fn seed_shopping_list(home: &TempDir, namespace: &str, json: &str) -> anyhow::Result<PathBuf> {
    let path = data_dir(home)?.join(format!("shopping-list.{}.json", namespace));
    fs::write(&path, json)?;
    Ok(path)
}

/// Seeds a persisted favorites document for `namespace`
pub fn seed_favorites(home: &TempDir, namespace: &str, json: &str) -> anyhow::Result<PathBuf> {
    let path = data_dir(home)?.join(format!("favorites.{}.json", namespace));
    fs::write(&path, json)?;
    Ok(path)
}

/// Seeds a stored auth session for the given user
pub fn seed_session(home: &TempDir, user_id: &str, email: &str) -> anyhow::Result<PathBuf> {
    let path = data_dir(home)?.join("auth-session.local.json");
    fs::write(
        &path,
        format!(
            r#"{{
  "access_token": "header.payload.signature",
  "refresh_token": "refresh-token",
  "user": {{
    "id": "{}",
    "email": "{}"
  }}
}}"#,
            user_id, email
        ),
    )?;
    Ok(path)
}

/// A shopping-list document with two entries and three items total
pub fn sample_shopping_list_json() -> &'static str {
    r#"[
  {
    "recipeName": "Tomato Soup",
    "items": [
      { "name": "Tomato", "quantity": "6" },
      { "name": "Basil", "quantity": "1 bunch" }
    ],
    "servings": "4 servings"
  },
  {
    "recipeName": "Bruschetta",
    "items": [
      { "name": "Baguette", "quantity": "1" }
    ],
    "servings": "2 servings"
  }
]"#
}

/// A favorites document with a single easy recipe
pub fn sample_favorites_json() -> &'static str {
    r#"[
  {
    "recipeName": "Tomato Soup",
    "difficulty": "Easy",
    "prepTime": "30 min",
    "calories": 210,
    "servings": "4 servings",
    "ingredients": [
      { "name": "Tomato", "quantity": "6" },
      { "name": "Basil", "quantity": "1 bunch" }
    ],
    "steps": [
      "Simmer the tomatoes.",
      "Blend until smooth and top with basil."
    ]
  }
]"#
}

/// Creates a small placeholder image file inside the home
pub fn sample_image(home: &TempDir) -> anyhow::Result<PathBuf> {
    let path = home.path().join("fridge.jpg");
    fs::write(&path, b"\xff\xd8\xff\xe0fake-jpeg-bytes")?;
    Ok(path)
}
