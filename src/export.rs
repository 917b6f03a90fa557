//! CSV export of orders and products.
//!
//! Columns are fixed and always preceded by a header row. Fields containing a comma,
//! a double quote or a line break are quoted, with embedded quotes doubled, so names
//! like `Mug, large` survive a spreadsheet import.

use crate::model::{Catalog, Order, Product};
use crate::pricing::display_name;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const ORDERS_FILE: &str = "orders.csv";
pub const PRODUCTS_FILE: &str = "products.csv";

/// One row per line item; order-level columns repeat on every row of the order.
pub const ORDER_HEADER: [&str; 11] = [
    "訂單編號",
    "姓名",
    "電話",
    "商品",
    "數量",
    "單價",
    "小計",
    "帳號後五碼",
    "寄送方式",
    "狀態",
    "總金額",
];

pub const PRODUCT_HEADER: [&str; 3] = ["商品", "價格", "庫存"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Quotes `field` if it contains a separator, a quote or a line break.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn push_row<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(field.as_ref()));
    }
    out.push('\n');
}

/// Orders in the order given. Product names come from `catalog` when the product
/// still exists.
pub fn orders_csv(orders: &[Order], catalog: &Catalog) -> String {
    let mut out = String::new();
    push_row(&mut out, &ORDER_HEADER);

    for order in orders {
        let draft = &order.draft;
        let id = order.id.0.to_string();
        let total = draft.total_amount().to_string();
        for line in draft.line_items() {
            push_row(
                &mut out,
                &[
                    id.as_str(),
                    draft.customer_name.as_str(),
                    draft.phone.as_str(),
                    display_name(catalog, line).as_str(),
                    line.quantity().to_string().as_str(),
                    line.unit_price().to_string().as_str(),
                    line.subtotal().to_string().as_str(),
                    draft.account_last5.as_str(),
                    draft.shipping_method.as_str(),
                    draft.status.as_str(),
                    total.as_str(),
                ],
            );
        }
    }
    out
}

pub fn products_csv(products: &[Product]) -> String {
    let mut out = String::new();
    push_row(&mut out, &PRODUCT_HEADER);
    for product in products {
        push_row(
            &mut out,
            &[
                product.name.clone(),
                product.unit_price.to_string(),
                product.stock_quantity.to_string(),
            ],
        );
    }
    out
}

/// Writes `contents` to `dir/file_name`, creating `dir` if needed.
pub async fn write_export(
    dir: &Path,
    file_name: &str,
    contents: &str,
) -> Result<PathBuf, ExportError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

    let path = dir.join(file_name);
    tokio::fs::write(&path, contents)
        .await
        .map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
    info!(path = %path.display(), bytes = contents.len(), "Export written");
    Ok(path)
}
