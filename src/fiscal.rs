// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};

/// Day of month the billing period rolls over.
pub const CUTOFF_DAY: u32 = 5;

/// Start of the fiscal period containing `reference`: the 5th of the current
/// calendar month, or of the previous month when the reference day falls
/// before the cutoff. Day 5 exists in every month, so no clamping is needed.
pub fn window_start(reference: NaiveDate) -> NaiveDate {
    let (year, month) = if reference.day() < CUTOFF_DAY {
        if reference.month() == 1 {
            (reference.year() - 1, 12)
        } else {
            (reference.year(), reference.month() - 1)
        }
    } else {
        (reference.year(), reference.month())
    };
    // Safe: (year, month, 5) is always a valid date.
    NaiveDate::from_ymd_opt(year, month, CUTOFF_DAY).unwrap_or(reference)
}

/// Inclusive fiscal window for `reference`: starts on the 5th, ends on the
/// 4th of the following calendar month.
pub fn window(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = window_start(reference);
    let (end_year, end_month) = if start.month() == 12 {
        (start.year() + 1, 1)
    } else {
        (start.year(), start.month() + 1)
    };
    let end = NaiveDate::from_ymd_opt(end_year, end_month, CUTOFF_DAY - 1).unwrap_or(start);
    (start, end)
}
