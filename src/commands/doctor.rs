// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::debts::load_all_debts;
use crate::models::Debt;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Bookkeeping problems for one debt. `amount_paid` and `installments_paid`
/// are stored independently and can drift apart if one is mutated without
/// the other; a cent of tolerance absorbs rounding on uneven installments.
pub fn issues_for(debt: &Debt) -> Vec<String> {
    let mut issues = Vec::new();
    if debt.installments_paid > debt.installments_total {
        issues.push("paid_count_over_total".to_string());
    }
    if debt.amount_paid > debt.total_amount {
        issues.push("amount_paid_over_total".to_string());
    }
    let expected = debt.installment_amount() * Decimal::from(debt.installments_paid);
    let tolerance = Decimal::new(1, 2);
    if (debt.amount_paid - expected).abs() > tolerance {
        issues.push("amount_paid_drift".to_string());
    }
    issues
}

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();
    for debt in load_all_debts(conn)? {
        for issue in issues_for(&debt) {
            rows.push(vec![
                issue,
                format!("debt {} ({})", debt.id, debt.creditor),
            ]);
        }
    }
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
