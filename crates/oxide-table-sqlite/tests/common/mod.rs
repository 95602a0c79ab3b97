#![allow(dead_code)]

use oxide_table_sqlite::prelude::*;

pub const SECRET: &str = "lorem-ipsum";

pub const FRUIT_COLUMNS: [(&str, &str); 4] = [
    ("id", "INTEGER PRIMARY KEY"),
    ("name", "TEXT"),
    ("price", "INTEGER"),
    ("stock", "INTEGER"),
];

/// In-memory database with the passphrase installed.
pub async fn admin_database() -> Database {
    let config = DatabaseConfig::in_memory().passphrase(SECRET);
    Database::connect(&config)
        .await
        .unwrap_or_else(|e| panic!("Failed to open database: {e}"))
}

/// In-memory database holding an empty `tbl_fruit`.
pub async fn fruit_database() -> Database {
    let mut db = admin_database().await;
    let created = db
        .create_table("tbl_fruit", FRUIT_COLUMNS, SECRET)
        .await
        .unwrap_or_else(|e| panic!("Failed to create tbl_fruit: {e}"));
    assert!(created);
    db
}

/// `tbl_fruit` with apple and banana inserted.
pub async fn stocked_fruit_database() -> Database {
    let db = fruit_database().await;
    let inserted = db
        .table("tbl_fruit")
        .unwrap()
        .insert([(1, "apple", 500, 5), (2, "banana", 400, 150)])
        .unwrap()
        .execute()
        .await
        .unwrap();
    assert!(inserted);
    db
}

pub fn text(value: &str) -> SqlValue {
    SqlValue::Text(value.to_string())
}
