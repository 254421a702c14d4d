// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::insert_tx;
use crate::models::{Debt, TxKind};
use crate::utils::{current_user, fmt_amount, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("pay", sub)) => pay(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn load_debts(conn: &Connection, user_id: i64) -> Result<Vec<Debt>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, creditor, total_amount, installments_total, installments_paid,
                amount_paid, start_date
         FROM debts WHERE user_id=?1 ORDER BY id",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut debts = Vec::new();
    while let Some(r) = rows.next()? {
        debts.push(debt_from_row(r)?);
    }
    Ok(debts)
}

/// Every debt in the store, across users. Used by `doctor`.
pub fn load_all_debts(conn: &Connection) -> Result<Vec<Debt>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, creditor, total_amount, installments_total, installments_paid,
                amount_paid, start_date
         FROM debts ORDER BY id",
    )?;
    let mut rows = stmt.query([])?;
    let mut debts = Vec::new();
    while let Some(r) = rows.next()? {
        debts.push(debt_from_row(r)?);
    }
    Ok(debts)
}

fn debt_from_row(r: &rusqlite::Row<'_>) -> Result<Debt> {
    let total_s: String = r.get(3)?;
    let paid_s: String = r.get(6)?;
    let date_s: String = r.get(7)?;
    Ok(Debt {
        id: r.get(0)?,
        user_id: r.get(1)?,
        creditor: r.get(2)?,
        total_amount: parse_decimal(&total_s)?,
        installments_total: r.get(4)?,
        installments_paid: r.get(5)?,
        amount_paid: parse_decimal(&paid_s)?,
        start_date: parse_date(&date_s)?,
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = current_user(conn)?;
    let creditor = sub.get_one::<String>("creditor").unwrap();
    let total = parse_decimal(sub.get_one::<String>("total").unwrap())?;
    let installments: i64 = *sub.get_one::<i64>("installments").unwrap();
    let start = match sub.get_one::<String>("start") {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };
    conn.execute(
        "INSERT INTO debts(user_id, creditor, total_amount, installments_total, start_date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, creditor, total.to_string(), installments, start.to_string()],
    )?;
    println!(
        "Added debt '{}': {} in {} installments starting {}",
        creditor, total, installments, start
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = current_user(conn)?;
    let debts = load_debts(conn, user_id)?;
    if maybe_print_json(json_flag, jsonl_flag, &debts)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = debts
        .iter()
        .map(|d| {
            vec![
                d.id.to_string(),
                d.creditor.clone(),
                fmt_amount(&d.total_amount),
                fmt_amount(&d.installment_amount()),
                format!("{}/{}", d.installments_paid, d.installments_total),
                format!("{}%", d.percent_complete()),
                d.next_due_date()
                    .map(|x| x.to_string())
                    .unwrap_or_else(|| "paid off".into()),
                fmt_amount(&d.remaining_amount()),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Creditor", "Total", "Installment", "Paid", "%", "Next due", "Remaining"],
            rows,
        )
    );
    Ok(())
}

/// Outcome of a successful installment payment.
pub struct Payment {
    pub creditor: String,
    pub installment_no: i64,
    pub installments_total: i64,
    pub amount: Decimal,
}

/// Pay the next installment of a debt owned by `user_id`: bump the paid
/// counter and amount, and record the matching expense transaction, all in
/// one database transaction. Returns None (and changes nothing) when the
/// debt is already fully paid.
pub fn pay_installment(
    conn: &mut Connection,
    user_id: i64,
    debt_id: i64,
) -> Result<Option<Payment>> {
    let tx = conn.transaction()?;

    let debt = {
        let mut stmt = tx.prepare(
            "SELECT id, user_id, creditor, total_amount, installments_total, installments_paid,
                    amount_paid, start_date
             FROM debts WHERE id=?1 AND user_id=?2",
        )?;
        stmt.query_row(params![debt_id, user_id], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, i64>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, i64>(4)?,
                r.get::<_, i64>(5)?,
                r.get::<_, String>(6)?,
                r.get::<_, String>(7)?,
            ))
        })
        .optional()?
    };
    let Some((id, owner, creditor, total_s, n_total, n_paid, paid_s, start_s)) = debt else {
        anyhow::bail!("Debt {} not found for current user", debt_id);
    };
    let debt = Debt {
        id,
        user_id: owner,
        creditor,
        total_amount: parse_decimal(&total_s)?,
        installments_total: n_total,
        installments_paid: n_paid,
        amount_paid: parse_decimal(&paid_s)?,
        start_date: parse_date(&start_s)?,
    };

    if debt.installments_paid >= debt.installments_total {
        return Ok(None);
    }

    let amount = debt.installment_amount();
    let new_paid = debt.installments_paid + 1;
    let new_amount_paid = debt.amount_paid + amount;
    tx.execute(
        "UPDATE debts SET installments_paid=?1, amount_paid=?2 WHERE id=?3",
        params![new_paid, new_amount_paid.to_string(), debt.id],
    )?;

    let description = format!(
        "Installment {}/{} - {}",
        new_paid, debt.installments_total, debt.creditor
    );
    insert_tx(
        &tx,
        user_id,
        TxKind::Expense,
        amount,
        None,
        chrono::Local::now().date_naive(),
        &description,
        Some(debt.id),
    )?;

    tx.commit().context("Commit installment payment")?;
    Ok(Some(Payment {
        creditor: debt.creditor,
        installment_no: new_paid,
        installments_total: debt.installments_total,
        amount,
    }))
}

fn pay(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = current_user(conn)?;
    let debt_id: i64 = *sub.get_one::<i64>("id").unwrap();
    match pay_installment(conn, user_id, debt_id)? {
        Some(p) => println!(
            "Paid installment {}/{} of '{}' ({})",
            p.installment_no,
            p.installments_total,
            p.creditor,
            fmt_amount(&p.amount)
        ),
        None => println!("Debt {} is already fully paid", debt_id),
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = current_user(conn)?;
    let debt_id: i64 = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute(
        "DELETE FROM debts WHERE id=?1 AND user_id=?2",
        params![debt_id, user_id],
    )?;
    if n == 0 {
        anyhow::bail!("Debt {} not found for current user", debt_id);
    }
    println!("Deleted debt {}", debt_id);
    Ok(())
}
