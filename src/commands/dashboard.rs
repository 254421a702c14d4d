// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::debts::load_debts;
use crate::fiscal;
use crate::projection::{
    expense_series, project_month, ChartSeries, MonthProjection, MONTH_ABBR, WEEKDAY_ABBR,
};
use crate::utils::{current_user, fmt_amount, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rusqlite::{params, Connection};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Serialize)]
pub struct Dashboard {
    pub year: i32,
    pub month: u32,
    pub fiscal_start: NaiveDate,
    pub fiscal_end: NaiveDate,
    pub total_income: Decimal,
    pub real_expenses: Decimal,
    /// Whole-unit figures for display; fractional cents are dropped here only.
    pub pending_this_month: i64,
    pub projected_expenses: i64,
    pub balance: i64,
    pub projection: MonthProjection,
    pub series: ChartSeries,
    pub prev: (i32, u32),
    pub next: (i32, u32),
}

fn sum_in_window(
    conn: &Connection,
    user_id: i64,
    kind: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Decimal> {
    let mut stmt = conn.prepare(
        "SELECT amount FROM transactions WHERE user_id=?1 AND kind=?2 AND date>=?3 AND date<=?4",
    )?;
    let mut rows = stmt.query(params![user_id, kind, start.to_string(), end.to_string()])?;
    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let s: String = r.get(0)?;
        total += parse_decimal(&s)?;
    }
    Ok(total)
}

fn all_expenses(conn: &Connection, user_id: i64) -> Result<Vec<(NaiveDate, Decimal)>> {
    let mut stmt = conn
        .prepare("SELECT date, amount FROM transactions WHERE user_id=?1 AND kind='EXPENSE'")?;
    let mut rows = stmt.query(params![user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let d: String = r.get(0)?;
        let a: String = r.get(1)?;
        out.push((crate::utils::parse_date(&d)?, parse_decimal(&a)?));
    }
    Ok(out)
}

fn trunc(d: Decimal) -> i64 {
    d.trunc().to_i64().unwrap_or(0)
}

/// Assemble the whole dashboard for (year, month) as seen on `today`:
/// fiscal-window income/expense sums, this month's projected installments,
/// the calendar grid, and the real+projected expense chart series.
pub fn build(
    conn: &Connection,
    user_id: i64,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<Dashboard> {
    // Mid-month reference pins the fiscal window to the viewed month.
    let reference = NaiveDate::from_ymd_opt(year, month, 15).unwrap_or(today);
    let (fiscal_start, fiscal_end) = fiscal::window(reference);

    let total_income = sum_in_window(conn, user_id, "INCOME", fiscal_start, fiscal_end)?;
    let real_expenses = sum_in_window(conn, user_id, "EXPENSE", fiscal_start, fiscal_end)?;

    let debts = load_debts(conn, user_id)?;
    let projection = project_month(&debts, year, month, today);
    let series = expense_series(&all_expenses(conn, user_id)?, &debts);

    let pending_this_month = trunc(projection.pending_total);
    let projected_expenses = trunc(real_expenses) + pending_this_month;
    let balance = trunc(total_income) - projected_expenses;

    let prev = if month == 1 { (year - 1, 12) } else { (year, month - 1) };
    let next = if month == 12 { (year + 1, 1) } else { (year, month + 1) };

    Ok(Dashboard {
        year,
        month,
        fiscal_start,
        fiscal_end,
        total_income,
        real_expenses,
        pending_this_month,
        projected_expenses,
        balance,
        projection,
        series,
        prev,
        next,
    })
}

fn parse_viewed(sub: &clap::ArgMatches, today: NaiveDate) -> Option<(i32, u32)> {
    let year = match sub.get_one::<String>("year") {
        Some(s) => s.parse::<i32>().ok()?,
        None => today.year(),
    };
    let month = match sub.get_one::<String>("month") {
        Some(s) => s.parse::<u32>().ok()?,
        None => today.month(),
    };
    NaiveDate::from_ymd_opt(year, month, 1)?;
    Some((year, month))
}

/// Viewed (year, month) from the query args. Absent args default to today's
/// components; any unparsable or out-of-range value drops the whole pair
/// back to today.
pub fn viewed_month(sub: &clap::ArgMatches, today: NaiveDate) -> (i32, u32) {
    parse_viewed(sub, today).unwrap_or((today.year(), today.month()))
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = current_user(conn)?;
    let today = chrono::Local::now().date_naive();
    let (year, month) = viewed_month(sub, today);

    let dash = build(conn, user_id, year, month, today)?;
    if maybe_print_json(json_flag, jsonl_flag, &dash)? {
        return Ok(());
    }

    println!("{} {}", MONTH_ABBR[month as usize - 1], year);
    println!(
        "Fiscal window: {} to {}",
        dash.fiscal_start, dash.fiscal_end
    );
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses (projected)", "To pay this month", "Balance"],
            vec![vec![
                trunc(dash.total_income).to_string(),
                dash.projected_expenses.to_string(),
                dash.pending_this_month.to_string(),
                dash.balance.to_string(),
            ]],
        )
    );

    let weeks: Vec<Vec<String>> = dash
        .projection
        .weeks
        .iter()
        .map(|week| {
            week.iter()
                .map(|cell| match cell {
                    None => String::new(),
                    Some(day) => {
                        let mut text = if day.is_today {
                            format!("[{}]", day.number)
                        } else {
                            day.number.to_string()
                        };
                        for ev in &day.events {
                            let mark = match ev.status.as_str() {
                                "paid" => "✓",
                                _ => "○",
                            };
                            text.push_str(&format!(
                                "\n{} {} {}",
                                mark,
                                ev.creditor,
                                fmt_amount(&ev.amount)
                            ));
                        }
                        text
                    }
                })
                .collect()
        })
        .collect();
    println!("{}", pretty_table(&WEEKDAY_ABBR, weeks));

    if !dash.series.labels.is_empty() {
        let rows = dash
            .series
            .labels
            .iter()
            .zip(dash.series.values.iter())
            .map(|(l, v)| vec![l.clone(), fmt_amount(v)])
            .collect();
        println!("{}", pretty_table(&["Month", "Expenses (real + projected)"], rows));
    }

    println!(
        "Prev: --year {} --month {} | Next: --year {} --month {}",
        dash.prev.0, dash.prev.1, dash.next.0, dash.next.1
    );
    Ok(())
}
