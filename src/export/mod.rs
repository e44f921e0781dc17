use chrono::Utc;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use uuid::Uuid;

use crate::domain::order::{ExportError, Order};

// ============================================================================
// Order Export - delimited record files for type A orders
// ============================================================================
//
// File layout:
//   ID,Type,Amount,Flag,Status,Priority
//   <one data row>
//   ,,,,Note,High value order          (only for high value orders)
//
// File names embed the user id, a millisecond timestamp and a random
// suffix so back-to-back exports for the same user never overwrite.
//
// ============================================================================

pub const HEADER: [&str; 6] = ["ID", "Type", "Amount", "Flag", "Status", "Priority"];
pub const HIGH_VALUE_NOTE: [&str; 6] = ["", "", "", "", "Note", "High value order"];

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

fn default_directory() -> PathBuf { PathBuf::from("exports") }
fn default_file_prefix() -> String { "orders_type_A".to_string() }

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            file_prefix: default_file_prefix(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CsvExporter {
    config: ExportConfig,
}

impl CsvExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn directory(&self) -> &Path {
        &self.config.directory
    }

    /// Build a fresh, collision-resistant file path for `user_id`.
    pub fn next_file_path(&self, user_id: i64) -> PathBuf {
        let timestamp = Utc::now().format("%Y%m%dT%H%M%S%.3f");
        let suffix = Uuid::new_v4().simple().to_string();
        let name = format!(
            "{}_{}_{}_{}.csv",
            self.config.file_prefix,
            user_id,
            timestamp,
            &suffix[..8]
        );
        self.config.directory.join(name)
    }

    /// Write one order to a new file and return its path.
    ///
    /// The row reflects the order exactly as passed in; callers export
    /// before priority assignment.
    pub async fn export(
        &self,
        user_id: i64,
        order: &Order,
        high_value: bool,
    ) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.config.directory)
            .await
            .map_err(|source| ExportError::Directory {
                path: self.config.directory.clone(),
                source,
            })?;

        let path = self.next_file_path(user_id);
        let contents = render(order, high_value);

        write_file(&path, contents.as_bytes())
            .await
            .map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(
            user_id = user_id,
            order_id = order.id,
            path = %path.display(),
            high_value = high_value,
            "Exported order"
        );

        Ok(path)
    }
}

async fn write_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let file = File::create(path).await?;
    let mut writer = BufWriter::new(file);
    writer.write_all(contents).await?;
    writer.flush().await?;
    Ok(())
}

/// Render the full file body for one order.
pub fn render(order: &Order, high_value: bool) -> String {
    let mut out = String::new();
    push_row(&mut out, &HEADER);

    let id = order.id.to_string();
    let amount = order.amount.to_string();
    let flag = if order.flag { "true" } else { "false" };
    push_row(
        &mut out,
        &[
            id.as_str(),
            order.order_type.as_str(),
            amount.as_str(),
            flag,
            order.status.as_str(),
            order.priority.as_str(),
        ],
    );

    if high_value {
        push_row(&mut out, &HIGH_VALUE_NOTE);
    }
    out
}

fn push_row(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str("\r\n");
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn exporter(dir: &Path) -> CsvExporter {
        CsvExporter::new(ExportConfig {
            directory: dir.to_path_buf(),
            file_prefix: "orders_type_A".to_string(),
        })
    }

    #[test]
    fn test_render_without_note() {
        let order = Order::new(1, "A", Decimal::from(100), false);
        let body = render(&order, false);

        assert_eq!(
            body,
            "ID,Type,Amount,Flag,Status,Priority\r\n1,A,100,false,new,low\r\n"
        );
    }

    #[test]
    fn test_render_with_note() {
        let order = Order::new(3, "A", Decimal::new(1505, 1), true);
        let body = render(&order, true);
        let lines: Vec<&str> = body.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "3,A,150.5,true,new,low");
        assert_eq!(lines[2], ",,,,Note,High value order");
    }

    #[test]
    fn test_field_quoting() {
        let mut out = String::new();
        push_row(&mut out, &["a,b", "say \"hi\"", "plain"]);
        assert_eq!(out, "\"a,b\",\"say \"\"hi\"\"\",plain\r\n");
    }

    #[test]
    fn test_file_name_embeds_user_id_and_is_unique() {
        let dir = TempDir::new().unwrap();
        let exporter = exporter(dir.path());

        let first = exporter.next_file_path(42);
        let second = exporter.next_file_path(42);

        let name = first.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("orders_type_A_42_"));
        assert!(name.ends_with(".csv"));
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_export_writes_file() {
        let dir = TempDir::new().unwrap();
        let exporter = exporter(dir.path());
        let order = Order::new(9, "A", Decimal::from(20), false);

        let path = exporter.export(5, &order, false).await.unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();

        assert!(path.starts_with(dir.path()));
        assert_eq!(contents.lines().count(), 2);
        assert_eq!(contents.lines().nth(1), Some("9,A,20,false,new,low"));
    }

    #[tokio::test]
    async fn test_export_fails_when_directory_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();

        let exporter = exporter(&blocker);
        let order = Order::new(9, "A", Decimal::from(20), false);

        let result = exporter.export(5, &order, false).await;
        assert!(result.is_err());
    }
}
