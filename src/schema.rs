//! Explicit MAF column schema.
//!
//! The caller names which concrete column carries each role; the mapping is
//! resolved against a header once at the boundary, never re-derived per
//! call, and never guessed by string-matching heuristics.

use crate::error::{FilterError, Result};

/// Role-to-column-name mapping for a MAF-style table.
#[derive(Debug, Clone)]
pub struct MafSchema {
    pub chrom: String,
    pub pos: String,
    pub ref_allele: String,
    pub alt_allele: String,
    /// Reference-supporting read count column, if the table carries one.
    pub n_ref: Option<String>,
    /// Alternate-supporting read count column.
    pub n_alt: Option<String>,
}

impl Default for MafSchema {
    /// Column names of an already-standardized MAF.
    fn default() -> Self {
        MafSchema {
            chrom: "chr".to_string(),
            pos: "pos".to_string(),
            ref_allele: "ref".to_string(),
            alt_allele: "newbase".to_string(),
            n_ref: Some("n_ref".to_string()),
            n_alt: Some("n_alt".to_string()),
        }
    }
}

/// Column indices after resolving a schema against a concrete header.
#[derive(Debug, Clone)]
pub struct ResolvedSchema {
    pub chrom: usize,
    pub pos: usize,
    pub ref_allele: usize,
    pub alt_allele: usize,
    pub n_ref: Option<usize>,
    pub n_alt: Option<usize>,
}

impl MafSchema {
    /// Resolve the schema against a header row. A missing required column
    /// fails before any row is read; count columns are optional and simply
    /// resolve to `None` when absent.
    pub fn resolve(&self, header: &[&str]) -> Result<ResolvedSchema> {
        let find = |name: &str| header.iter().position(|h| *h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                FilterError::Schema(format!("required column '{}' not found in header", name))
            })
        };
        Ok(ResolvedSchema {
            chrom: require(&self.chrom)?,
            pos: require(&self.pos)?,
            ref_allele: require(&self.ref_allele)?,
            alt_allele: require(&self.alt_allele)?,
            n_ref: self.n_ref.as_deref().and_then(find),
            n_alt: self.n_alt.as_deref().and_then(find),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default_schema() {
        let header = ["chr", "pos", "ref", "newbase", "n_ref", "n_alt"];
        let resolved = MafSchema::default().resolve(&header).unwrap();
        assert_eq!(resolved.chrom, 0);
        assert_eq!(resolved.alt_allele, 3);
        assert_eq!(resolved.n_alt, Some(5));
    }

    #[test]
    fn test_missing_required_column() {
        let header = ["chr", "ref", "newbase"];
        let err = MafSchema::default().resolve(&header).unwrap_err();
        assert!(err.to_string().contains("pos"));
    }

    #[test]
    fn test_count_columns_are_optional() {
        let header = ["chr", "pos", "ref", "newbase"];
        let resolved = MafSchema::default().resolve(&header).unwrap();
        assert_eq!(resolved.n_ref, None);
        assert_eq!(resolved.n_alt, None);
    }

    #[test]
    fn test_caller_supplied_names() {
        let schema = MafSchema {
            chrom: "Chromosome".to_string(),
            pos: "Start_Position".to_string(),
            ref_allele: "Reference_Allele".to_string(),
            alt_allele: "Tumor_Seq_Allele2".to_string(),
            n_ref: None,
            n_alt: None,
        };
        let header = [
            "Chromosome",
            "Start_Position",
            "Reference_Allele",
            "Tumor_Seq_Allele2",
        ];
        assert!(schema.resolve(&header).is_ok());
    }
}
