//! Per-record text block shown in marker popups.
//!
//! Layout is positional: the first sixteen fields always appear, the
//! planning-history fields only when filled in. Reordering the source columns
//! changes what is shown.

use crate::records::{NOT_AVAILABLE, SiteRecord, SiteTable};

/// Fields listed for every record.
pub const ALWAYS_SHOWN: std::ops::RangeInclusive<usize> = 0..=15;

/// Fields listed only when their value is not `"N/A"`: 16..=33, then the
/// display coordinates at 35. Geometry (34) and search text (36) never show.
pub const SHOWN_IF_PRESENT: &[usize] = &[
    16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 35,
];

/// `"label: value"` lines for `record`, in field order.
pub fn popup_lines(sites: &SiteTable, record: &SiteRecord) -> Vec<String> {
    let mut lines = Vec::new();
    let mut push = |index: usize, skip_unavailable: bool| {
        let (Some(label), Some(value)) = (sites.label(index), sites.field_text(record, index))
        else {
            return;
        };
        if skip_unavailable && value == NOT_AVAILABLE {
            return;
        }
        lines.push(format!("{label}: {value}"));
    };

    for index in ALWAYS_SHOWN {
        push(index, false);
    }
    for &index in SHOWN_IF_PRESENT {
        push(index, true);
    }
    lines
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;
    use crate::records::FieldValue;

    fn record_with(columns: usize, set: &[(usize, &str)]) -> (SiteTable, SiteRecord) {
        let table = SiteTable {
            columns: (0..columns).map(|i| format!("Field {i}")).collect(),
            records: Vec::new(),
        };
        let mut values: Vec<FieldValue> = (0..columns)
            .map(|i| FieldValue::Text(format!("v{i}")))
            .collect();
        for &(i, v) in set {
            values[i] = FieldValue::Text(v.to_string());
        }
        let record = SiteRecord {
            values,
            geometry: Point::new(-4.0, 57.0),
            coordinates: "57.00000, -4.00000".into(),
            search_text: "everything".into(),
        };
        (table, record)
    }

    #[test]
    fn unavailable_optional_field_is_omitted() {
        let (table, record) = record_with(34, &[(20, NOT_AVAILABLE), (21, "Greenfield")]);
        let lines = popup_lines(&table, &record);
        assert!(!lines.iter().any(|l| l.starts_with("Field 20:")));
        let matching: Vec<&String> = lines.iter().filter(|l| l.starts_with("Field 21:")).collect();
        assert_eq!(matching, vec!["Field 21: Greenfield"]);
    }

    #[test]
    fn leading_fields_always_appear() {
        let (table, record) = record_with(34, &[(3, NOT_AVAILABLE)]);
        let lines = popup_lines(&table, &record);
        assert!(lines.contains(&"Field 3: N/A".to_string()));
        assert!(lines[0].starts_with("Field 0:"));
    }

    #[test]
    fn geometry_and_search_text_never_appear() {
        let (table, record) = record_with(34, &[]);
        let lines = popup_lines(&table, &record);
        assert!(!lines.iter().any(|l| l.starts_with("geometry")));
        assert!(!lines.iter().any(|l| l.contains("everything")));
        assert_eq!(lines.last().map(String::as_str), Some("Coordinates: 57.00000, -4.00000"));
        assert_eq!(lines.len(), 35);
    }
}
