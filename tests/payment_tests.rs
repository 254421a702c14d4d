// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::commands::debts::pay_installment;
use rusqlite::{params, Connection};

fn setup() -> (Connection, i64) {
    let mut conn = Connection::open_in_memory().unwrap();
    billfold::db::init_schema(&mut conn).unwrap();
    conn.execute("INSERT INTO users(name) VALUES('alice')", [])
        .unwrap();
    let user_id: i64 = conn
        .query_row("SELECT id FROM users WHERE name='alice'", [], |r| r.get(0))
        .unwrap();
    (conn, user_id)
}

fn add_debt(conn: &Connection, user_id: i64, total: &str, n_total: i64, n_paid: i64) -> i64 {
    conn.execute(
        "INSERT INTO debts(user_id, creditor, total_amount, installments_total, installments_paid, amount_paid, start_date)
         VALUES (?1, 'Acme Bank', ?2, ?3, ?4, '0', '2024-01-15')",
        params![user_id, total, n_total, n_paid],
    )
    .unwrap();
    conn.last_insert_rowid()
}

fn tx_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap()
}

#[test]
fn paying_updates_debt_and_records_one_expense() {
    let (mut conn, user_id) = setup();
    let debt_id = add_debt(&conn, user_id, "120000", 12, 0);

    let payment = pay_installment(&mut conn, user_id, debt_id).unwrap().unwrap();
    assert_eq!(payment.installment_no, 1);
    assert_eq!(payment.amount, rust_decimal::Decimal::from(10000));

    let (n_paid, amount_paid): (i64, String) = conn
        .query_row(
            "SELECT installments_paid, amount_paid FROM debts WHERE id=?1",
            params![debt_id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(n_paid, 1);
    assert_eq!(amount_paid, "10000");

    assert_eq!(tx_count(&conn), 1);
    let (kind, amount, description, linked): (String, String, String, Option<i64>) = conn
        .query_row(
            "SELECT kind, amount, description, debt_id FROM transactions",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .unwrap();
    assert_eq!(kind, "EXPENSE");
    assert_eq!(amount, "10000");
    assert!(description.contains("1/12"));
    assert!(description.contains("Acme Bank"));
    assert_eq!(linked, Some(debt_id));
}

#[test]
fn paying_a_fully_paid_debt_changes_nothing() {
    let (mut conn, user_id) = setup();
    let debt_id = add_debt(&conn, user_id, "120000", 12, 12);

    assert!(pay_installment(&mut conn, user_id, debt_id).unwrap().is_none());

    let n_paid: i64 = conn
        .query_row(
            "SELECT installments_paid FROM debts WHERE id=?1",
            params![debt_id],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(n_paid, 12);
    assert_eq!(tx_count(&conn), 0);
}

#[test]
fn successive_payments_count_up() {
    let (mut conn, user_id) = setup();
    let debt_id = add_debt(&conn, user_id, "120000", 12, 0);

    for expected in 1..=3 {
        let p = pay_installment(&mut conn, user_id, debt_id).unwrap().unwrap();
        assert_eq!(p.installment_no, expected);
    }
    let amount_paid: String = conn
        .query_row(
            "SELECT amount_paid FROM debts WHERE id=?1",
            params![debt_id],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(amount_paid, "30000");
    assert_eq!(tx_count(&conn), 3);
}

#[test]
fn cannot_pay_another_users_debt() {
    let (mut conn, user_id) = setup();
    conn.execute("INSERT INTO users(name) VALUES('bob')", [])
        .unwrap();
    let bob: i64 = conn
        .query_row("SELECT id FROM users WHERE name='bob'", [], |r| r.get(0))
        .unwrap();
    let debt_id = add_debt(&conn, user_id, "120000", 12, 0);

    assert!(pay_installment(&mut conn, bob, debt_id).is_err());
    assert_eq!(tx_count(&conn), 0);
}
