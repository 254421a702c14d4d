// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{add_months, Debt};

pub const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const WEEKDAY_ABBR: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentStatus {
    Paid,
    Pending,
}

impl InstallmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallmentStatus::Paid => "paid",
            InstallmentStatus::Pending => "pending",
        }
    }
}

/// One installment falling due on a given day of the projected month.
#[derive(Debug, Clone, Serialize)]
pub struct InstallmentEvent {
    pub debt_id: i64,
    pub creditor: String,
    pub status: InstallmentStatus,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub number: u32,
    pub is_today: bool,
    pub events: Vec<InstallmentEvent>,
}

/// Monday-first week rows; `None` marks cells outside the month.
pub type Week = Vec<Option<CalendarDay>>;

#[derive(Debug, Default, Serialize)]
pub struct MonthProjection {
    /// Sum of installments still pending in the projected month.
    pub pending_total: Decimal,
    /// Installments grouped by day of month.
    pub events: BTreeMap<u32, Vec<InstallmentEvent>>,
    pub weeks: Vec<Week>,
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Paid/pending classification for an installment due on `due` as seen on
/// `today`. Precedence, first match wins:
/// 1. due in a calendar month strictly before today's month -> paid;
/// 2. due strictly after today -> pending;
/// 3. due in today's month, on or before today -> paid when the debt is
///    fully paid or its next due date has already advanced past `due`,
///    pending otherwise.
fn classify(due: NaiveDate, today: NaiveDate, debt: &Debt) -> InstallmentStatus {
    let due_month = (due.year(), due.month());
    let today_month = (today.year(), today.month());
    if due < today && due_month < today_month {
        return InstallmentStatus::Paid;
    }
    if due > today {
        return InstallmentStatus::Pending;
    }
    let advanced = debt.next_due_date().map(|next| next > due).unwrap_or(false);
    if advanced || debt.installments_paid >= debt.installments_total {
        InstallmentStatus::Paid
    } else {
        InstallmentStatus::Pending
    }
}

/// Project which installments fall due in (year, month), classify them, sum
/// the still-pending ones, and lay the month out as a Monday-first grid.
pub fn project_month(debts: &[Debt], year: i32, month: u32, today: NaiveDate) -> MonthProjection {
    let mut proj = MonthProjection::default();
    let num_days = days_in_month(year, month);
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return proj;
    };

    for debt in debts {
        // Debts starting on the 29th-31st land on the last day of shorter months.
        let due_day = debt.start_date.day().min(num_days);
        let Some(due) = NaiveDate::from_ymd_opt(year, month, due_day) else {
            continue;
        };
        if due < debt.start_date || due > debt.estimated_end_date() {
            continue;
        }
        let status = classify(due, today, debt);
        let amount = debt.installment_amount();
        if status == InstallmentStatus::Pending {
            proj.pending_total += amount;
        }
        proj.events.entry(due_day).or_default().push(InstallmentEvent {
            debt_id: debt.id,
            creditor: debt.creditor.clone(),
            status,
            amount,
        });
    }

    let mut week: Week = vec![None; first.weekday().num_days_from_monday() as usize];
    for day in 1..=num_days {
        let is_today = day == today.day() && month == today.month() && year == today.year();
        week.push(Some(CalendarDay {
            number: day,
            is_today,
            events: proj.events.get(&day).cloned().unwrap_or_default(),
        }));
        if week.len() == 7 {
            proj.weeks.push(std::mem::take(&mut week));
        }
    }
    if !week.is_empty() {
        week.resize(7, None);
        proj.weeks.push(week);
    }
    proj
}

/// Parallel label/value arrays for the chart collaborator.
#[derive(Debug, Default, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
}

/// Month-bucketed expense totals: every historical real expense, plus each
/// debt's remaining installments projected forward one month at a time from
/// its next due date. Keys come out chronologically sorted.
pub fn expense_series(real_expenses: &[(NaiveDate, Decimal)], debts: &[Debt]) -> ChartSeries {
    let mut buckets: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();

    for (date, amount) in real_expenses {
        *buckets.entry((date.year(), date.month())).or_default() += *amount;
    }

    for debt in debts {
        let remaining = debt.installments_remaining();
        if remaining <= 0 {
            continue;
        }
        let from = debt.next_due_date().unwrap_or(debt.start_date);
        let amount = debt.installment_amount();
        for i in 0..remaining {
            let due = add_months(from, i);
            *buckets.entry((due.year(), due.month())).or_default() += amount;
        }
    }

    let mut series = ChartSeries::default();
    for ((year, month), total) in buckets {
        series
            .labels
            .push(format!("{} {}", MONTH_ABBR[month as usize - 1], year));
        series.values.push(total);
    }
    series
}
