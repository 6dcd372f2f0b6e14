//! Client-side search over master-data lists.
//!
//! A search term matches a record when any of the record's searchable fields
//! contains the term, ignoring case. The filtered view keeps the source
//! order; an empty (or whitespace-only) term keeps every record.

use crate::entities::{Barang, Pelanggan};

/// Records that expose a fixed set of free-text fields to search.
pub trait Searchable {
    /// Fields checked by [`matches_term`], in display order.
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Barang {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.kode.as_str(), self.nama.as_str(), self.kategori.as_str()]
    }
}

impl Searchable for Pelanggan {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.id_pelanggan.as_str(),
            self.nama.as_str(),
            self.domisili.as_str(),
        ]
    }
}

/// True if any searchable field contains `term`, case-insensitively.
#[must_use]
pub fn matches_term<T: Searchable>(record: &T, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    needle.is_empty()
        || record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
}

/// Returns the records matching `term`, preserving their order.
#[must_use]
pub fn filter_by_term<'a, T: Searchable>(records: &'a [T], term: &str) -> Vec<&'a T> {
    if term.trim().is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|record| matches_term(*record, term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entities::JenisKelamin,
        test_utils::{barang, pelanggan},
    };

    #[test]
    fn test_partial_name_matches_and_unknown_term_does_not() {
        let list = vec![barang("B1", "Mouse", "Elektronik", 50_000)];
        let found = filter_by_term(&list, "mou");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kode, "B1");
        assert!(filter_by_term(&list, "xyz").is_empty());
    }

    #[test]
    fn test_empty_term_returns_everything_in_order() {
        let list = vec![
            barang("B2", "Keyboard", "Elektronik", 150_000),
            barang("B1", "Mouse", "Elektronik", 50_000),
            barang("B3", "Meja", "Furniture", 700_000),
        ];
        let all = filter_by_term(&list, "");
        let kodes: Vec<&str> = all.iter().map(|b| b.kode.as_str()).collect();
        assert_eq!(kodes, vec!["B2", "B1", "B3"]);
        assert_eq!(filter_by_term(&list, "   ").len(), 3);
    }

    #[test]
    fn test_matching_ignores_case_on_every_field() {
        let list = vec![
            barang("ELK-01", "Mouse", "Elektronik", 50_000),
            barang("FRN-01", "Meja", "Furniture", 700_000),
        ];
        assert_eq!(filter_by_term(&list, "elk").len(), 1);
        assert_eq!(filter_by_term(&list, "MOUSE").len(), 1);
        assert_eq!(filter_by_term(&list, "furNITure")[0].kode, "FRN-01");
    }

    #[test]
    fn test_pelanggan_matches_id_name_and_domisili_only() {
        let list = vec![
            pelanggan("PLG01", "Andi", "Bandung", JenisKelamin::Pria),
            pelanggan("PLG02", "Siti", "Jakarta", JenisKelamin::Wanita),
        ];
        assert_eq!(filter_by_term(&list, "plg02")[0].nama, "Siti");
        assert_eq!(filter_by_term(&list, "bandung")[0].nama, "Andi");
        // Gender is not a searchable field
        assert!(filter_by_term(&list, "wanita").is_empty());
    }
}
