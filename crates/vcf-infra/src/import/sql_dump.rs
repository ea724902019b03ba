//! Parser for SQL dumps of the VCF reference table
//!
//! Only `INSERT INTO <table> (<columns>) VALUES (...), (...);` statements are
//! read. The table name decides the tuple layout; statements for other
//! tables are ignored.

use regex::Regex;
use tracing::{debug, info};

use vcf_domain::model::ReferenceEntry;

use super::{parse_number, ImportError, ParsedRows};

const INSERT_PATTERN: &str = r"(?is)INSERT\s+INTO\s+`?(\w+)`?\s*\([^)]+\)\s+VALUES\s*([^;]+);";
const TUPLE_PATTERN: &str = r"\(([^)]+)\)";

/// Column layout of a value tuple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShape {
    /// `(id, density, temperature, vcf, class, vcf2)`
    Legacy,
    /// `(density, temperature, vcf)`
    Triple,
}

impl RowShape {
    pub fn for_table(table: &str) -> Option<Self> {
        match table {
            "table60b" => Some(RowShape::Legacy),
            "calculator_vcftable" => Some(RowShape::Triple),
            _ => None,
        }
    }

    /// Field positions of density, temperature and vcf
    fn columns(&self) -> [usize; 3] {
        match self {
            RowShape::Legacy => [1, 2, 3],
            RowShape::Triple => [0, 1, 2],
        }
    }

    fn extract(&self, fields: &[&str]) -> Result<ReferenceEntry, String> {
        let [d, t, v] = self.columns();
        let field = |idx: usize| {
            fields
                .get(idx)
                .copied()
                .ok_or_else(|| format!("missing field {} of {:?} row", idx, self))
        };

        let values = (
            parse_number(field(d)?)?,
            parse_number(field(t)?)?,
            parse_number(field(v)?)?,
        );
        Ok(values.into())
    }
}

/// Extract reference entries from SQL dump text
pub fn parse_sql_dump(content: &str) -> Result<ParsedRows, ImportError> {
    let insert_re = Regex::new(INSERT_PATTERN)?;
    let tuple_re = Regex::new(TUPLE_PATTERN)?;
    let whitespace_re = Regex::new(r"\s+")?;

    let mut parsed = ParsedRows::default();

    for caps in insert_re.captures_iter(content) {
        parsed.statements += 1;
        let table = &caps[1];

        let Some(shape) = RowShape::for_table(table) else {
            debug!(table, "ignoring INSERT for unrelated table");
            continue;
        };

        let values_block = whitespace_re.replace_all(caps[2].trim(), " ");
        let tuples: Vec<&str> = tuple_re
            .captures_iter(&values_block)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();
        info!(table, tuples = tuples.len(), "found value tuples");

        for values in tuples {
            parsed.rows += 1;
            let fields: Vec<&str> = values.split(',').collect();
            if fields.len() < 3 {
                parsed.skip(values, format!("expected at least 3 fields, found {}", fields.len()));
                continue;
            }

            match shape.extract(&fields) {
                Ok(entry) => parsed.entries.push(entry),
                Err(reason) => parsed.skip(values, reason),
            }
        }
    }

    info!(
        statements = parsed.statements,
        entries = parsed.entries.len(),
        skipped = parsed.skipped.len(),
        "parsed SQL dump"
    );
    Ok(parsed)
}
