// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "INCOME",
            TxKind::Expense => "EXPENSE",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid transaction kind '{0}', expected INCOME or EXPENSE")]
pub struct ParseTxKindError(String);

impl FromStr for TxKind {
    type Err = ParseTxKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INCOME" => Ok(TxKind::Income),
            "EXPENSE" => Ok(TxKind::Expense),
            other => Err(ParseTxKindError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub kind: TxKind,
    pub amount: Decimal,
    pub category_id: Option<i64>,
    pub date: NaiveDate,
    pub description: String,
    pub debt_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    pub id: i64,
    pub user_id: i64,
    pub creditor: String,
    pub total_amount: Decimal,
    pub installments_total: i64,
    pub installments_paid: i64,
    pub amount_paid: Decimal,
    pub start_date: NaiveDate,
}

/// Shift a date by whole months, clamping to the end of shorter months
/// (Jan 31 + 1 month = Feb 28/29). Negative offsets walk backwards.
pub fn add_months(date: NaiveDate, months: i64) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new((-months) as u32))
    };
    shifted.unwrap_or(date)
}

impl Debt {
    /// Value of a single installment; zero when no installments are defined.
    pub fn installment_amount(&self) -> Decimal {
        if self.installments_total > 0 {
            self.total_amount / Decimal::from(self.installments_total)
        } else {
            Decimal::ZERO
        }
    }

    /// Date the last installment falls due.
    pub fn estimated_end_date(&self) -> NaiveDate {
        add_months(self.start_date, self.installments_total - 1)
    }

    /// Due date of the next unpaid installment, or None when fully paid.
    pub fn next_due_date(&self) -> Option<NaiveDate> {
        if self.installments_paid >= self.installments_total {
            return None;
        }
        Some(add_months(self.start_date, self.installments_paid))
    }

    pub fn percent_complete(&self) -> i64 {
        if self.installments_total == 0 {
            return 0;
        }
        self.installments_paid * 100 / self.installments_total
    }

    pub fn remaining_amount(&self) -> Decimal {
        self.total_amount - self.amount_paid
    }

    pub fn installments_remaining(&self) -> i64 {
        self.installments_total - self.installments_paid
    }
}
