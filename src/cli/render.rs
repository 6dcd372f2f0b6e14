//! Terminal output: tables, rupiah amounts, dates, and action feedback.

use crate::{
    core::line_total,
    entities::{Barang, ItemPenjualan, Pelanggan, Penjualan},
    errors::Result,
    screens::Feedback,
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use serde_json::json;

const BULAN: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Formats an amount the way the clients display money: `Rp 1.250.000`.
#[must_use]
pub fn format_rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("Rp -{grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

/// Long Indonesian date, e.g. `1 Mei 2024`.
#[must_use]
pub fn format_tanggal(date: NaiveDate) -> String {
    let bulan = BULAN[date.month0() as usize];
    format!("{} {bulan} {}", date.day(), date.year())
}

/// A record that can be printed as a table row.
pub trait Tabular {
    /// Column titles, in display order.
    fn headers() -> &'static [&'static str];
    /// This record's cells, one per header.
    fn row(&self) -> Vec<String>;
}

impl Tabular for Barang {
    fn headers() -> &'static [&'static str] {
        &["Kode", "Nama", "Kategori", "Harga"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.kode.clone(),
            self.nama.clone(),
            self.kategori.clone(),
            format_rupiah(self.harga),
        ]
    }
}

impl Tabular for Pelanggan {
    fn headers() -> &'static [&'static str] {
        &["ID", "Nama", "Domisili", "Jenis Kelamin"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id_pelanggan.clone(),
            self.nama.clone(),
            self.domisili.clone(),
            self.jenis_kelamin.label().to_string(),
        ]
    }
}

impl Tabular for Penjualan {
    fn headers() -> &'static [&'static str] {
        &["Nota", "Tanggal", "Pelanggan", "Subtotal"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id_nota.clone(),
            format_tanggal(self.tgl),
            self.nama_pelanggan().to_string(),
            format_rupiah(self.subtotal),
        ]
    }
}

impl Tabular for ItemPenjualan {
    fn headers() -> &'static [&'static str] {
        &["Kode", "Barang", "Harga", "Qty", "Jumlah"]
    }

    fn row(&self) -> Vec<String> {
        let harga = self
            .barang
            .as_ref()
            .map_or_else(|| "-".to_string(), |b| format_rupiah(b.harga));
        let jumlah = line_total(self).map_or_else(|| "-".to_string(), format_rupiah);
        vec![
            self.kode_barang.clone(),
            self.nama_barang().to_string(),
            harga,
            self.qty.to_string(),
            jumlah,
        ]
    }
}

/// Renders records as an aligned text table.
#[must_use]
pub fn table<'a, T, I>(records: I) -> String
where
    T: Tabular + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let headers = T::headers();
    let rows: Vec<Vec<String>> = records.into_iter().map(Tabular::row).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    let mut lines = vec![
        render_line(headers.iter().copied(), &widths),
        render_line(rule.iter().map(String::as_str), &widths),
    ];
    lines.extend(
        rows.iter()
            .map(|row| render_line(row.iter().map(String::as_str), &widths)),
    );
    lines.join("\n")
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Prints records as a table, or as pretty JSON.
pub fn print_records<T: Tabular + Serialize>(records: &[&T], json: bool) -> Result<()> {
    if json {
        return print_json(&records);
    }
    if records.is_empty() {
        println!("Tidak ada data.");
    } else {
        println!("{}", table(records.iter().copied()));
    }
    Ok(())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints the outcome of an action; failures go to stderr.
pub fn print_feedback(feedback: &Feedback, json: bool) -> Result<()> {
    if json {
        let errors = match feedback {
            Feedback::Invalid(errors) => Some(
                errors
                    .iter()
                    .map(|(field, message)| (field.to_string(), json!(message)))
                    .collect::<serde_json::Map<_, _>>(),
            ),
            _ => None,
        };
        return print_json(&json!({
            "success": feedback.is_success(),
            "message": feedback.message(),
            "errors": errors,
        }));
    }

    match feedback {
        Feedback::Saved(message) | Feedback::Deleted(message) => println!("✅ {message}"),
        Feedback::Invalid(errors) => {
            eprintln!("❌ Data tidak valid:");
            for (field, message) in errors.iter() {
                eprintln!("   • {field}: {message}");
            }
        }
        Feedback::Cancelled => println!("Dibatalkan."),
        Feedback::Busy => eprintln!("⚠️ Permintaan sebelumnya masih diproses."),
        Feedback::StillReferenced { title, message } => eprintln!("⚠️ {title}\n{message}"),
        Feedback::Failed(message) => eprintln!("❌ {message}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{barang, item};

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(0), "Rp 0");
        assert_eq!(format_rupiah(950), "Rp 950");
        assert_eq!(format_rupiah(50_000), "Rp 50.000");
        assert_eq!(format_rupiah(1_250_000), "Rp 1.250.000");
        assert_eq!(format_rupiah(-5_000), "Rp -5.000");
    }

    #[test]
    fn test_format_tanggal() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap_or_default();
        assert_eq!(format_tanggal(date), "1 Mei 2024");
    }

    #[test]
    fn test_table_aligns_columns() {
        let records = [
            barang("B1", "Mouse", "Elektronik", 50_000),
            barang("B22", "Keyboard", "Elektronik", 150_000),
        ];
        let rendered = table(records.iter());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Kode  Nama      Kategori    Harga");
        assert_eq!(lines[2], "B1    Mouse     Elektronik  Rp 50.000");
        assert_eq!(lines[3], "B22   Keyboard  Elektronik  Rp 150.000");
    }

    #[test]
    fn test_unresolved_item_row_uses_placeholders() {
        let row = item("N1", "B9", 3, None).row();
        assert_eq!(row, vec!["B9", "-", "-", "3", "-"]);
    }
}
