use serde::{Deserialize, Serialize};

/// `POST /extract-invoice` 的回應內容：OCR 原始行與抽取出的欄位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub raw_text: Vec<String>,
    pub extracted: InvoiceData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceData {
    pub invoice_details: InvoiceDetails,
    pub supplier: Supplier,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    pub totals: Totals,
    pub payment_terms: PaymentTerms,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDetails {
    pub invoice_number: Option<String>,
    /// 格式為 `DD Mon YYYY`
    pub invoice_date: Option<String>,
    /// 保留發票上的原始寫法
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: Option<String>,
    pub address: String,
    pub abn: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: Option<String>,
}

/// 明細行。數值欄位保留 OCR 讀到的字串，不做轉換
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub gst_percent: Option<String>,
    pub line_total: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total: Option<f64>,
    pub gst_amount: Option<f64>,
    pub gst_percent: Option<String>,
    pub subtotal: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentTerms {
    pub amount_due: Option<f64>,
    pub due_date: Option<String>,
}
