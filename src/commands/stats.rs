// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::debts::load_debts;
use crate::models::Debt;
use crate::projection::ChartSeries;
use crate::utils::{current_user, fmt_amount, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

/// Per-creditor installment amounts for debts that still have installments
/// left, as a chart-ready label/value pair.
pub fn pending_by_creditor(debts: &[Debt]) -> ChartSeries {
    let mut series = ChartSeries::default();
    for d in debts {
        if d.installments_paid < d.installments_total {
            series.labels.push(d.creditor.clone());
            series.values.push(d.installment_amount());
        }
    }
    series
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let user_id = current_user(conn)?;
    let series = pending_by_creditor(&load_debts(conn, user_id)?);
    if maybe_print_json(json_flag, jsonl_flag, &series)? {
        return Ok(());
    }
    let rows = series
        .labels
        .iter()
        .zip(series.values.iter())
        .map(|(l, v)| vec![l.clone(), fmt_amount(v)])
        .collect();
    println!("{}", pretty_table(&["Creditor", "Installment"], rows));
    Ok(())
}
