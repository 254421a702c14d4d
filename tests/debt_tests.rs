// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::models::{add_months, Debt, TxKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn debt(total: &str, n_total: i64, n_paid: i64, paid: &str, start: NaiveDate) -> Debt {
    Debt {
        id: 1,
        user_id: 1,
        creditor: "Acme Bank".into(),
        total_amount: total.parse().unwrap(),
        installments_total: n_total,
        installments_paid: n_paid,
        amount_paid: paid.parse().unwrap(),
        start_date: start,
    }
}

#[test]
fn estimated_end_is_start_plus_total_minus_one_months() {
    let dbt = debt("120000", 12, 0, "0", d(2024, 1, 15));
    assert_eq!(dbt.estimated_end_date(), d(2024, 12, 15));
}

#[test]
fn percent_complete_after_three_of_twelve() {
    let dbt = debt("120000", 12, 3, "30000", d(2024, 1, 15));
    assert_eq!(dbt.percent_complete(), 25);
}

#[test]
fn percent_is_zero_when_no_installments() {
    let dbt = debt("100", 0, 0, "0", d(2024, 1, 15));
    assert_eq!(dbt.percent_complete(), 0);
}

#[test]
fn installment_amount_is_zero_when_no_installments() {
    let dbt = debt("100", 0, 0, "0", d(2024, 1, 15));
    assert_eq!(dbt.installment_amount(), Decimal::ZERO);
}

#[test]
fn next_due_advances_with_paid_installments() {
    let dbt = debt("120000", 12, 3, "30000", d(2024, 1, 15));
    assert_eq!(dbt.next_due_date(), Some(d(2024, 4, 15)));
}

#[test]
fn next_due_is_none_when_fully_paid() {
    let dbt = debt("120000", 12, 12, "120000", d(2024, 1, 15));
    assert_eq!(dbt.next_due_date(), None);
}

#[test]
fn remaining_amount_is_total_minus_paid() {
    let dbt = debt("120000", 12, 3, "30000", d(2024, 1, 15));
    assert_eq!(dbt.remaining_amount(), Decimal::from(90000));
}

#[test]
fn tx_kind_parses_stored_values_and_rejects_garbage() {
    assert_eq!("INCOME".parse::<TxKind>().unwrap(), TxKind::Income);
    assert_eq!("EXPENSE".parse::<TxKind>().unwrap(), TxKind::Expense);
    assert!("TRANSFER".parse::<TxKind>().is_err());
    assert!("income".parse::<TxKind>().is_err());
}

#[test]
fn month_arithmetic_clamps_to_shorter_months() {
    assert_eq!(add_months(d(2024, 1, 31), 1), d(2024, 2, 29));
    assert_eq!(add_months(d(2023, 1, 31), 1), d(2023, 2, 28));
    assert_eq!(add_months(d(2024, 3, 31), 1), d(2024, 4, 30));
    assert_eq!(add_months(d(2024, 3, 15), -1), d(2024, 2, 15));
}
