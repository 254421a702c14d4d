// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::commands::transactions::{insert_tx, query_rows};
use billfold::models::TxKind;
use billfold::utils::set_active_user;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn setup() -> (Connection, i64) {
    let mut conn = Connection::open_in_memory().unwrap();
    billfold::db::init_schema(&mut conn).unwrap();
    conn.execute("INSERT INTO users(name) VALUES('alice')", [])
        .unwrap();
    set_active_user(&conn, "alice").unwrap();
    let user_id: i64 = conn
        .query_row("SELECT id FROM users WHERE name='alice'", [], |r| r.get(0))
        .unwrap();
    (conn, user_id)
}

fn list_args(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["billfold", "tx", "list"];
    argv.extend_from_slice(args);
    billfold::cli::build_cli()
        .get_matches_from(argv)
        .subcommand_matches("tx")
        .unwrap()
        .subcommand_matches("list")
        .unwrap()
        .clone()
}

#[test]
fn list_returns_typed_kinds_newest_first() {
    let (conn, user_id) = setup();
    insert_tx(
        &conn,
        user_id,
        TxKind::Income,
        Decimal::from(500),
        None,
        d(2024, 6, 1),
        "salary",
        None,
    )
    .unwrap();
    insert_tx(
        &conn,
        user_id,
        TxKind::Expense,
        Decimal::from(40),
        None,
        d(2024, 6, 10),
        "groceries",
        None,
    )
    .unwrap();

    let rows = query_rows(&conn, &list_args(&[])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].kind, "EXPENSE");
    assert_eq!(rows[0].description, "groceries");
    assert_eq!(rows[1].kind, "INCOME");
}

#[test]
fn month_filter_and_limit_narrow_the_listing() {
    let (conn, user_id) = setup();
    insert_tx(&conn, user_id, TxKind::Expense, Decimal::from(10), None, d(2024, 5, 20), "", None)
        .unwrap();
    insert_tx(&conn, user_id, TxKind::Expense, Decimal::from(20), None, d(2024, 6, 5), "", None)
        .unwrap();
    insert_tx(&conn, user_id, TxKind::Expense, Decimal::from(30), None, d(2024, 6, 25), "", None)
        .unwrap();

    let june = query_rows(&conn, &list_args(&["--month", "2024-06"])).unwrap();
    assert_eq!(june.len(), 2);
    assert!(june.iter().all(|r| r.date.starts_with("2024-06")));

    let capped = query_rows(&conn, &list_args(&["--limit", "1"])).unwrap();
    assert_eq!(capped.len(), 1);
    assert_eq!(capped[0].date, "2024-06-25");
}

#[test]
fn listing_is_scoped_to_the_active_user() {
    let (conn, _alice) = setup();
    conn.execute("INSERT INTO users(name) VALUES('bob')", [])
        .unwrap();
    let bob: i64 = conn
        .query_row("SELECT id FROM users WHERE name='bob'", [], |r| r.get(0))
        .unwrap();
    insert_tx(&conn, bob, TxKind::Income, Decimal::from(999), None, d(2024, 6, 1), "", None)
        .unwrap();

    let rows = query_rows(&conn, &list_args(&[])).unwrap();
    assert!(rows.is_empty());
}
