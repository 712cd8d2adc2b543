use crate::domain::model::LineItem;
use regex::Regex;
use std::sync::LazyLock;

/// 每個明細需要的數值欄位數：數量、單價、GST%、小計
const VALUES_PER_ITEM: usize = 4;

static NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+(\.\d{1,2})?$").unwrap());
static PERCENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+%$").unwrap());
static HEADER_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(item|description|quantity|gst|amount)").unwrap());

fn is_value_token(line: &str) -> bool {
    NUMERIC.is_match(line) || PERCENT.is_match(line)
}

fn is_header(low: &str) -> bool {
    low.contains("unit price") || (low.contains("description") && low.contains("quantity"))
}

fn is_description_noise(line: &str) -> bool {
    let low = line.to_lowercase();
    HEADER_LABEL.is_match(&low) || low.contains("amount aud") || low.contains("tixperts-")
}

/// 明細表擷取
///
/// OCR 會把表格拆成一格一行，所以先收集表頭之後、`customer` 之前的行，
/// 再依序累積，湊滿四個數值就輸出一筆明細。最後不完整的一組會被丟棄。
pub fn extract_items(lines: &[String]) -> Vec<LineItem> {
    let mut bucket: Vec<&str> = Vec::new();
    let mut after_header = false;

    for line in lines.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
        let low = line.to_lowercase();

        if is_header(&low) {
            after_header = true;
            continue;
        }

        if after_header {
            if low.contains("customer") {
                break;
            }
            bucket.push(line);
        }
    }

    let mut items = Vec::new();
    let mut group: Vec<&str> = Vec::new();

    for line in bucket {
        group.push(line);

        let values: Vec<&str> = group.iter().copied().filter(|x| is_value_token(x)).collect();
        if values.len() < VALUES_PER_ITEM {
            continue;
        }

        let description = group
            .iter()
            .copied()
            .filter(|x| !values.contains(x) && !is_description_noise(x))
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        items.push(LineItem {
            description,
            quantity: values[0].to_string(),
            unit_price: values[1].to_string(),
            gst_percent: PERCENT.is_match(values[2]).then(|| values[2].to_string()),
            line_total: values[3].to_string(),
        });

        group.clear();
    }

    items
}
