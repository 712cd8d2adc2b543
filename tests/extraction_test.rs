mod common;

use anyhow::Result;
use common::{stub_processor, tixperts_invoice_lines};
use invoice_ocr::core::dates::DateOrder;
use invoice_ocr::core::fields::extract_invoice_fields;
use invoice_ocr::{ExtractionSettings, LocalOutput};
use tempfile::TempDir;

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

/// 完整發票：所有欄位都應該被擷取
#[test]
fn test_full_invoice_extraction() {
    let data = extract_invoice_fields(&tixperts_invoice_lines(), &ExtractionSettings::default());

    assert_eq!(
        data.invoice_details.invoice_number.as_deref(),
        Some("TX.482-07.INV-0193")
    );
    assert_eq!(data.invoice_details.invoice_date.as_deref(), Some("14 Feb 2025"));
    assert_eq!(data.invoice_details.due_date.as_deref(), Some("28 Feb 2025"));

    assert_eq!(
        data.supplier.name.as_deref(),
        Some("TixPerts Pty Ltd T/A Ticket Experts")
    );
    assert_eq!(
        data.supplier.address,
        "Level 3, 230 Elizabeth Street, Melbourne VIC 3000, Australia"
    );
    assert_eq!(data.supplier.abn.as_deref(), Some("51824753556"));
    assert_eq!(data.customer.name.as_deref(), Some("Jordan Lee"));

    assert_eq!(data.items.len(), 2);
    assert_eq!(data.items[0].description, "General Admission");
    assert_eq!(data.items[0].quantity, "2");
    assert_eq!(data.items[0].unit_price, "38.50");
    assert_eq!(data.items[0].line_total, "77.00");
    assert_eq!(data.items[1].description, "Booking Fee");

    assert_eq!(data.totals.total, Some(81.0));
    assert_eq!(data.totals.gst_amount, Some(7.36));
    assert_eq!(data.totals.gst_percent.as_deref(), Some("10%"));
    assert_eq!(data.totals.subtotal, Some(73.64));

    assert_eq!(data.payment_terms.amount_due, Some(81.0));
    assert_eq!(data.payment_terms.due_date.as_deref(), Some("28 Feb 2025"));
}

/// 沒有標籤的日期、數字日期順序、GST 在後面幾行
#[test]
fn test_sparse_receipt_extraction() {
    let input = lines(&[
        "Corner Cafe Pty. Ltd.",
        "  ",
        "03/04/2025",
        "Total includes GST 10%",
        "on all items",
        "1.20",
        "TOTAL 13.20",
    ]);

    let day_first = extract_invoice_fields(&input, &ExtractionSettings::default());
    assert_eq!(day_first.invoice_details.invoice_date.as_deref(), Some("03 Apr 2025"));
    assert_eq!(day_first.invoice_details.invoice_number, None);
    assert_eq!(day_first.supplier.name.as_deref(), Some("Corner Cafe Pty. Ltd."));
    assert_eq!(day_first.supplier.address, "");
    assert_eq!(day_first.totals.gst_amount, Some(1.2));
    assert_eq!(day_first.totals.total, Some(13.2));
    assert_eq!(day_first.totals.subtotal, Some(12.0));
    assert_eq!(day_first.totals.gst_percent, None);
    assert!(day_first.items.is_empty());

    let month_first = extract_invoice_fields(
        &input,
        &ExtractionSettings {
            date_order: DateOrder::MonthFirst,
            date_window: 6,
        },
    );
    assert_eq!(month_first.invoice_details.invoice_date.as_deref(), Some("04 Mar 2025"));
}

/// JSON 形狀：所有鍵都存在，缺值為 null
#[test]
fn test_json_shape_keeps_null_fields() -> Result<()> {
    let data = extract_invoice_fields(&lines(&["TAX INVOICE"]), &ExtractionSettings::default());
    let json = serde_json::to_value(&data)?;

    assert!(json["invoice_details"]["invoice_number"].is_null());
    assert!(json["customer"]["name"].is_null());
    assert_eq!(json["supplier"]["address"], "");
    assert!(json["items"].as_array().unwrap().is_empty());
    assert!(json["totals"]["subtotal"].is_null());
    assert!(json["payment_terms"]["amount_due"].is_null());
    Ok(())
}

/// 經過處理流程再寫到檔案
#[tokio::test]
async fn test_process_file_and_write_outputs() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let pdf_path = temp_dir.path().join("invoice.pdf");
    tokio::fs::write(&pdf_path, b"%PDF-1.5\n%stub").await?;

    let processor = stub_processor(tixperts_invoice_lines());
    let result = processor.process_file(&pdf_path).await?;
    assert_eq!(result.raw_text, tixperts_invoice_lines());

    let json_path = temp_dir.path().join("out/result.json");
    let csv_path = temp_dir.path().join("out/items.csv");
    let writer = LocalOutput::new();
    writer.write_json(&result, Some(&json_path))?;
    writer.write_items_csv(&result.extracted.items, &csv_path)?;

    let json: serde_json::Value = serde_json::from_str(&tokio::fs::read_to_string(&json_path).await?)?;
    assert_eq!(json["extracted"]["supplier"]["abn"], "51824753556");

    let csv = tokio::fs::read_to_string(&csv_path).await?;
    assert!(csv.contains("General Admission,2,38.50,10%,77.00"));
    assert!(csv.contains("Booking Fee,1,4.00,10%,4.00"));
    Ok(())
}
