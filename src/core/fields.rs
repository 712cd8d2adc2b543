use crate::core::address::extract_supplier_address;
use crate::core::dates::{find_date_in_window, format_date, parse_date, DateOrder};
use crate::core::items::extract_items;
use crate::domain::model::{
    Customer, InvoiceData, InvoiceDetails, PaymentTerms, Supplier, Totals,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static INVOICE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]{2}\.\d{3}-\d{2}\.INV-\d{4}").unwrap());
static DUE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Due Date[:\s]+(\d{1,2} \w+ \d{4})").unwrap());
static ABN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)ABN[\s:]*([\d ]{11,20})").unwrap());
static INCLUDES_GST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)INCLUDES GST[^\d]*(\d+\.\d+)").unwrap());
static DECIMAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+\.\d+)").unwrap());
static MONEY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d+\.\d{2}\b").unwrap());

/// `includes gst` 之後最多往下看幾行（含自己）
const GST_LOOKAHEAD: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// 純數字日期的日、月順序
    #[serde(default)]
    pub date_order: DateOrder,
    /// `Invoice Date` 標籤後要搜尋日期的行數範圍
    #[serde(default = "default_date_window")]
    pub date_window: usize,
}

fn default_date_window() -> usize {
    6
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            date_order: DateOrder::default(),
            date_window: default_date_window(),
        }
    }
}

/// 將 OCR 文字行轉成結構化的發票資料
pub fn extract_invoice_fields(lines: &[String], settings: &ExtractionSettings) -> InvoiceData {
    let safe: Vec<String> = lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    let full = safe.join(" ");

    let due_date = DUE_DATE.captures(&full).map(|caps| caps[1].to_string());
    let invoice_details = InvoiceDetails {
        invoice_number: INVOICE_NUMBER.find(&full).map(|m| m.as_str().to_string()),
        invoice_date: extract_invoice_date(&safe, settings),
        due_date: due_date.clone(),
    };

    let supplier = Supplier {
        name: safe
            .iter()
            .find(|line| line.to_lowercase().contains("pty"))
            .map(|line| line.replace("TIA", "T/A")),
        address: extract_supplier_address(&safe),
        abn: extract_abn(&full),
    };

    let customer = Customer {
        name: safe
            .iter()
            .position(|line| line.to_lowercase().contains("customer"))
            .and_then(|idx| safe.get(idx + 1))
            .cloned(),
    };

    let items = extract_items(&safe);

    let gst_amount = extract_gst_amount(&full, &safe);
    let total = MONEY
        .find_iter(&full)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .last();
    let subtotal = match (total, gst_amount) {
        (Some(total), Some(gst)) if total != 0.0 && gst != 0.0 => Some(round2(total - gst)),
        _ => None,
    };
    let gst_percent = items.iter().find_map(|item| item.gst_percent.clone());

    tracing::debug!(
        lines = safe.len(),
        items = items.len(),
        total = ?total,
        "Extracted invoice fields"
    );

    InvoiceData {
        invoice_details,
        supplier,
        customer,
        items,
        totals: Totals {
            total,
            gst_amount,
            gst_percent,
            subtotal,
        },
        payment_terms: PaymentTerms {
            amount_due: total,
            due_date,
        },
    }
}

/// 先找 `Invoice Date` 標籤附近的日期，找不到再取第一個可解析的日期行
fn extract_invoice_date(safe: &[String], settings: &ExtractionSettings) -> Option<String> {
    let labelled = safe
        .iter()
        .position(|line| line.to_lowercase().contains("invoice date"))
        .and_then(|idx| find_date_in_window(safe, idx, settings.date_window, settings.date_order));

    labelled.or_else(|| {
        safe.iter()
            .find_map(|line| parse_date(line, settings.date_order))
            .map(format_date)
    })
}

fn extract_abn(full: &str) -> Option<String> {
    ABN.captures(full).map(|caps| caps[1].replace(' ', ""))
}

fn extract_gst_amount(full: &str, safe: &[String]) -> Option<f64> {
    if let Some(caps) = INCLUDES_GST.captures(full) {
        return caps[1].parse().ok();
    }

    let idx = safe
        .iter()
        .position(|line| line.to_lowercase().contains("includes gst"))?;

    safe.iter()
        .skip(idx)
        .take(GST_LOOKAHEAD)
        .find_map(|line| DECIMAL.captures(line))
        .and_then(|caps| caps[1].parse().ok())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
