//! Chromosome name to integer code conversion.
//!
//! Codes: 1-22 autosomes, 23 = X, 24 = Y, 0 = mitochondrial. Both the
//! `"chr"`-prefixed and bare forms of a name are accepted.

pub const CHR_MT: u8 = 0;
pub const CHR_X: u8 = 23;
pub const CHR_Y: u8 = 24;

/// Result of encoding a chromosome name. Unrecognized names pass through
/// unchanged rather than erroring; this leniency is part of the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChromCode {
    Mapped(u8),
    Passthrough(String),
}

impl ChromCode {
    pub fn code(&self) -> Option<u8> {
        match self {
            ChromCode::Mapped(c) => Some(*c),
            ChromCode::Passthrough(_) => None,
        }
    }
}

/// Map a chromosome name to its integer code.
pub fn encode_chrom(name: &str) -> ChromCode {
    let bare = name.strip_prefix("chr").unwrap_or(name);
    let code = match bare {
        "MT" => Some(CHR_MT),
        "X" => Some(CHR_X),
        "Y" => Some(CHR_Y),
        _ => match bare.parse::<u8>() {
            Ok(n) if (1..=22).contains(&n) => Some(n),
            _ => None,
        },
    };
    match code {
        Some(c) => ChromCode::Mapped(c),
        None => ChromCode::Passthrough(name.to_string()),
    }
}

/// Canonical `"chr"`-prefixed name for an integer code. Codes outside
/// 0..=24 pass through as their decimal form.
pub fn decode_chrom(code: u8) -> String {
    match code {
        CHR_MT => "chrMT".to_string(),
        1..=22 => format!("chr{}", code),
        CHR_X => "chrX".to_string(),
        CHR_Y => "chrY".to_string(),
        other => other.to_string(),
    }
}

/// Elementwise encoding, preserving order and length.
pub fn encode_chroms<'a, I: IntoIterator<Item = &'a str>>(names: I) -> Vec<ChromCode> {
    names.into_iter().map(encode_chrom).collect()
}

/// Elementwise decoding, preserving order and length.
pub fn decode_chroms(codes: &[u8]) -> Vec<String> {
    codes.iter().map(|&c| decode_chrom(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_names() {
        assert_eq!(encode_chrom("chr1"), ChromCode::Mapped(1));
        assert_eq!(encode_chrom("22"), ChromCode::Mapped(22));
        assert_eq!(encode_chrom("chrX"), ChromCode::Mapped(23));
        assert_eq!(encode_chrom("Y"), ChromCode::Mapped(24));
        assert_eq!(encode_chrom("chrMT"), ChromCode::Mapped(0));
        assert_eq!(encode_chrom("MT"), ChromCode::Mapped(0));
    }

    #[test]
    fn test_unrecognized_names_pass_through() {
        assert_eq!(
            encode_chrom("chrUn_gl000220"),
            ChromCode::Passthrough("chrUn_gl000220".to_string())
        );
        // 0 and 23 are not valid bare autosome numbers
        assert_eq!(encode_chrom("0"), ChromCode::Passthrough("0".to_string()));
        assert_eq!(encode_chrom("23"), ChromCode::Passthrough("23".to_string()));
    }

    #[test]
    fn test_round_trip_all_codes() {
        for code in 0..=24u8 {
            let name = decode_chrom(code);
            assert_eq!(encode_chrom(&name), ChromCode::Mapped(code), "code {}", code);
        }
    }

    #[test]
    fn test_round_trip_names() {
        for name in ["chr1", "chr22", "chrX", "chrY", "chrMT", "7", "X"] {
            let code = match encode_chrom(name) {
                ChromCode::Mapped(c) => c,
                ChromCode::Passthrough(_) => panic!("{} should map", name),
            };
            let canonical = decode_chrom(code);
            assert!(canonical.starts_with("chr"));
            assert_eq!(encode_chrom(&canonical), ChromCode::Mapped(code));
        }
    }

    #[test]
    fn test_elementwise_preserves_order() {
        let decoded = decode_chroms(&[24, 1, 0]);
        assert_eq!(decoded, vec!["chrY", "chr1", "chrMT"]);
        let encoded = encode_chroms(["chr2", "weird", "chrX"]);
        assert_eq!(encoded.len(), 3);
        assert_eq!(encoded[0], ChromCode::Mapped(2));
        assert_eq!(encoded[1], ChromCode::Passthrough("weird".to_string()));
        assert_eq!(encoded[2], ChromCode::Mapped(23));
    }
}
