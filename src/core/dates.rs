//! 發票日期辨識
//!
//! OCR 行通常是一整行的日期（`12 Mar 2024`、`12/03/2024`、`2024-03-12`），
//! 這裡只接受整行都是日期的情況，避免把金額或數量誤判為日期。

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

static WEEKDAY_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(mon|tue|tues|wed|thu|thur|thurs|fri|sat|sun)[a-z]*\.?,?\s+").unwrap()
});

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})$").unwrap());

static NUMERIC_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})[-/.](\d{1,2})[-/.](\d{4}|\d{2})$").unwrap());

static DAY_MONTH_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2})(?:st|nd|rd|th)?[\s\-/.]*([a-z]{3,9})\.?[\s\-/.,]*(\d{4}|\d{2})$")
        .unwrap()
});

static MONTH_NAME_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z]{3,9})\.?\s*(\d{1,2})(?:st|nd|rd|th)?,?\s*(\d{4}|\d{2})$").unwrap()
});

/// 純數字日期的日、月順序
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// 12/03/2024 = 12 Mar 2024（澳洲慣例）
    #[default]
    DayFirst,
    /// 03/12/2024 = 12 Mar 2024
    MonthFirst,
}

pub fn parse_date(text: &str, order: DateOrder) -> Option<NaiveDate> {
    let trimmed = text
        .trim()
        .trim_matches(|c: char| matches!(c, ',' | ';' | ':' | '(' | ')' | '[' | ']'))
        .trim();
    let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    let candidate = WEEKDAY_PREFIX.replace(&collapsed, "");
    let candidate = candidate.trim_end_matches('.');

    if let Some(caps) = ISO_DATE.captures(candidate) {
        return build_date(&caps[1], &caps[2], &caps[3]);
    }

    if let Some(caps) = NUMERIC_DATE.captures(candidate) {
        let (first, second, year) = (&caps[1], &caps[2], &caps[3]);
        return match order {
            DateOrder::DayFirst => {
                build_date(year, second, first).or_else(|| build_date(year, first, second))
            }
            DateOrder::MonthFirst => {
                build_date(year, first, second).or_else(|| build_date(year, second, first))
            }
        };
    }

    if let Some(caps) = DAY_MONTH_NAME.captures(candidate) {
        let month = month_number(&caps[2])?;
        return build_date(&caps[3], &month.to_string(), &caps[1]);
    }

    if let Some(caps) = MONTH_NAME_DAY.captures(candidate) {
        let month = month_number(&caps[1])?;
        return build_date(&caps[3], &month.to_string(), &caps[2]);
    }

    None
}

/// 輸出格式固定為 `05 Mar 2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// 從 `start` 的下一行開始，在 `window` 範圍內找第一個日期
pub fn find_date_in_window(
    lines: &[String],
    start: usize,
    window: usize,
    order: DateOrder,
) -> Option<String> {
    let end = (start + window).min(lines.len());
    lines
        .iter()
        .take(end)
        .skip(start + 1)
        .find_map(|line| parse_date(line, order))
        .map(format_date)
}

fn month_number(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    if name == "sept" {
        return Some(9);
    }
    MONTHS
        .iter()
        .position(|full| name.len() >= 3 && full.starts_with(name.as_str()))
        .map(|idx| idx as u32 + 1)
}

fn build_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let mut year: i32 = year.parse().ok()?;
    if year < 100 {
        year += 2000;
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}
