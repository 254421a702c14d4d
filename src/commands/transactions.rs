// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxKind;
use crate::utils::{
    current_user, id_for_category, maybe_print_json, parse_date, parse_decimal, parse_month,
    pretty_table,
};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("income", sub)) => add(conn, sub, TxKind::Income)?,
        Some(("expense", sub)) => add(conn, sub, TxKind::Expense)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Insert one transaction row; also used when an installment payment
/// generates its expense.
pub fn insert_tx(
    conn: &Connection,
    user_id: i64,
    kind: TxKind,
    amount: Decimal,
    category_id: Option<i64>,
    date: NaiveDate,
    description: &str,
    debt_id: Option<i64>,
) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions(user_id, kind, amount, category_id, date, description, debt_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user_id,
            kind.as_str(),
            amount.to_string(),
            category_id,
            date.to_string(),
            description,
            debt_id
        ],
    )?;
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches, kind: TxKind) -> Result<()> {
    let user_id = current_user(conn)?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.as_str())
        .unwrap_or("");
    let category_id = if let Some(cat) = sub.get_one::<String>("category") {
        Some(id_for_category(conn, cat)?)
    } else {
        None
    };

    insert_tx(conn, user_id, kind, amount, category_id, date, description, None)?;
    println!("Recorded {} of {} on {}", kind.as_str(), amount, date);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Kind", "Amount", "Category", "Description"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let user_id = current_user(conn)?;
    let mut sql = String::from(
        "SELECT t.date, t.kind, t.amount, c.name, t.description FROM transactions t LEFT JOIN categories c ON t.category_id=c.id WHERE t.user_id=?",
    );
    let mut params_vec: Vec<String> = vec![user_id.to_string()];

    if let Some(month) = sub.get_one::<String>("month") {
        parse_month(month)?;
        sql.push_str(" AND substr(t.date,1,7)=?");
        params_vec.push(month.into());
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let date: String = r.get(0)?;
        let kind_s: String = r.get(1)?;
        let kind = kind_s.parse::<TxKind>()?;
        let amount: String = r.get(2)?;
        let category: Option<String> = r.get(3)?;
        let description: Option<String> = r.get(4)?;
        data.push(TransactionRow {
            date,
            kind: kind.as_str().to_string(),
            amount,
            category: category.unwrap_or_default(),
            description: description.unwrap_or_default(),
        });
    }
    Ok(data)
}
