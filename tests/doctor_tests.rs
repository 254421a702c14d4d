// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::commands::doctor::issues_for;
use billfold::models::Debt;
use chrono::NaiveDate;

fn debt(total: &str, n_total: i64, n_paid: i64, paid: &str) -> Debt {
    Debt {
        id: 1,
        user_id: 1,
        creditor: "Acme".into(),
        total_amount: total.parse().unwrap(),
        installments_total: n_total,
        installments_paid: n_paid,
        amount_paid: paid.parse().unwrap(),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    }
}

#[test]
fn consistent_debt_has_no_issues() {
    assert!(issues_for(&debt("1200", 12, 3, "300")).is_empty());
}

#[test]
fn uneven_installments_stay_within_tolerance() {
    // 1000 / 3 = 333.33..., paid amounts recorded at 2dp
    assert!(issues_for(&debt("1000", 3, 1, "333.33")).is_empty());
}

#[test]
fn drifted_amount_paid_is_flagged() {
    let issues = issues_for(&debt("1200", 12, 2, "150"));
    assert_eq!(issues, vec!["amount_paid_drift".to_string()]);
}

#[test]
fn overcounted_installments_are_flagged() {
    let issues = issues_for(&debt("1200", 12, 13, "1300"));
    assert!(issues.contains(&"paid_count_over_total".to_string()));
    assert!(issues.contains(&"amount_paid_over_total".to_string()));
}
