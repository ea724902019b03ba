//! Loader for `density,temperature,vcf` CSV files

use std::io::Read;

use tracing::info;

use vcf_domain::model::ReferenceEntry;

use super::{parse_number, ImportError, ParsedRows};

/// Parse CSV rows of `density,temperature,vcf`.
///
/// A first line with no numeric field is taken as a header. Extra columns
/// are ignored. Rows that are not valid UTF-8 are skipped.
pub fn parse_csv<R: Read>(reader: R) -> Result<ParsedRows, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut parsed = ParsedRows::default();

    for (idx, result) in reader.byte_records().enumerate() {
        let record = result?;
        let line = record.position().map_or(idx as u64 + 1, |p| p.line());

        let fields = match record
            .iter()
            .map(std::str::from_utf8)
            .collect::<Result<Vec<&str>, _>>()
        {
            Ok(fields) => fields,
            Err(e) => {
                parsed.rows += 1;
                let raw: Vec<_> = record.iter().map(String::from_utf8_lossy).collect();
                parsed.skip(
                    format!("line {}: {}", line, raw.join(",")),
                    format!("invalid UTF-8: {}", e),
                );
                continue;
            }
        };

        if idx == 0 && fields.iter().all(|f| parse_number(f).is_err()) {
            continue;
        }
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }

        parsed.rows += 1;
        let raw = fields.join(",");
        if fields.len() < 3 {
            parsed.skip(
                format!("line {}: {}", line, raw),
                format!("expected 3 fields, found {}", fields.len()),
            );
            continue;
        }

        let entry = parse_number(fields[0]).and_then(|density| {
            Ok(ReferenceEntry::new(
                density,
                parse_number(fields[1])?,
                parse_number(fields[2])?,
            ))
        });
        match entry {
            Ok(entry) => parsed.entries.push(entry),
            Err(reason) => parsed.skip(format!("line {}: {}", line, raw), reason),
        }
    }

    info!(
        entries = parsed.entries.len(),
        skipped = parsed.skipped.len(),
        "parsed CSV reference data"
    );
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_header() {
        let data = "density,temperature,vcf\n850.0,20.0,0.9915\n850.5, 20.25 ,0.9912\n";
        let parsed = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(parsed.rows, 2);
        assert_eq!(
            parsed.entries,
            vec![
                ReferenceEntry::new(850.0, 20.0, 0.9915),
                ReferenceEntry::new(850.5, 20.25, 0.9912),
            ]
        );
    }

    #[test]
    fn test_without_header() {
        let data = "850.0,20.0,0.9915\n";
        let parsed = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(parsed.entries.len(), 1);
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let data = "density,temperature,vcf\n850.0,20.0\n850.0,x,0.99\n\n851.0,20.0,0.9905,extra\n";
        let parsed = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(parsed.entries, vec![ReferenceEntry::new(851.0, 20.0, 0.9905)]);
        assert_eq!(parsed.skipped.len(), 2);
        assert_eq!(parsed.skipped[0].raw, "line 2: 850.0,20.0");
        assert!(parsed.skipped[1].reason.contains("'x'"));
    }

    #[test]
    fn test_invalid_utf8_row_is_skipped() {
        let data: &[u8] = b"850.0,20.0,0.9915\n851.0,20.0,0.99\xE9\n852.0,20.0,0.9900\n";
        let parsed = parse_csv(data).unwrap();
        assert_eq!(
            parsed.entries,
            vec![
                ReferenceEntry::new(850.0, 20.0, 0.9915),
                ReferenceEntry::new(852.0, 20.0, 0.99),
            ]
        );
        assert_eq!(parsed.rows, 3);
        assert_eq!(parsed.skipped.len(), 1);
        assert!(parsed.skipped[0].raw.starts_with("line 2: 851.0,20.0,0.99"));
        assert!(parsed.skipped[0].reason.starts_with("invalid UTF-8"));
    }

    #[test]
    fn test_malformed_first_row_is_not_a_header() {
        let data = "abc,20.0,0.99\n850.0,20.0,0.9915\n";
        let parsed = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(parsed.entries, vec![ReferenceEntry::new(850.0, 20.0, 0.9915)]);
        assert_eq!(parsed.rows, 2);
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.skipped[0].raw, "line 1: abc,20.0,0.99");
    }
}
