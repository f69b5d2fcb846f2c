use super::error::{MsaPlotError, MsaResult};
use std::collections::{BTreeMap, BTreeSet};

pub const GAP_SYMBOLS: [u8; 2] = [b'-', b'.'];

const NUCLEOTIDE_SYMBOLS: &[u8] = b"ACGTUN";

pub fn is_gap(symbol: u8) -> bool {
    GAP_SYMBOLS.contains(&symbol)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    Nucleotide,
    Protein,
}

impl Alphabet {
    /// Nucleotide when every non-gap symbol is one of ACGTUN, protein otherwise.
    pub fn detect(symbols: &BTreeSet<u8>) -> Self {
        let is_nucleotide = symbols
            .iter()
            .filter(|s| !is_gap(**s))
            .all(|s| NUCLEOTIDE_SYMBOLS.contains(&s.to_ascii_uppercase()));
        if is_nucleotide {
            Alphabet::Nucleotide
        } else {
            Alphabet::Protein
        }
    }

    pub fn size(&self) -> usize {
        match self {
            Alphabet::Nucleotide => 4,
            Alphabet::Protein => 20,
        }
    }

    /// Maximum information content of a column, in bits
    pub fn max_bits(&self) -> f64 {
        (self.size() as f64).log2()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    rows: Vec<Vec<u8>>,
    names: Option<Vec<String>>,
}

impl Alignment {
    pub fn new<S: AsRef<str>>(rows: &[S], names: Option<Vec<String>>) -> MsaResult<Self> {
        if rows.is_empty() {
            return Err(MsaPlotError::validation("alignment has no sequences"));
        }

        let width = rows[0].as_ref().len();
        if width == 0 {
            return Err(MsaPlotError::validation("alignment has no columns"));
        }

        let mut encoded = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(MsaPlotError::Validation(format!(
                    "sequence {} has length {}, expected {} (all sequences must be aligned)",
                    index + 1,
                    row.len(),
                    width
                )));
            }
            if let Some(symbol) = row.chars().find(|c| !c.is_ascii_graphic()) {
                return Err(MsaPlotError::Validation(format!(
                    "sequence {} contains invalid symbol {:?}",
                    index + 1,
                    symbol
                )));
            }
            encoded.push(row.as_bytes().to_vec());
        }

        if let Some(names) = &names {
            if names.len() != rows.len() {
                return Err(MsaPlotError::Validation(format!(
                    "got {} sequence names for {} sequences",
                    names.len(),
                    rows.len()
                )));
            }
        }

        Ok(Self {
            rows: encoded,
            names,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    pub fn names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    pub fn symbols(&self) -> BTreeSet<u8> {
        self.rows.iter().flatten().copied().collect()
    }

    pub fn alphabet(&self) -> Alphabet {
        Alphabet::detect(&self.symbols())
    }

    pub fn profile(&self, col: usize) -> ColumnProfile {
        let mut profile = ColumnProfile {
            counts: BTreeMap::new(),
            gaps: 0,
            depth: self.rows.len(),
        };
        for row in &self.rows {
            let symbol = row[col];
            if is_gap(symbol) {
                profile.gaps += 1;
            } else {
                *profile
                    .counts
                    .entry(symbol.to_ascii_uppercase())
                    .or_insert(0) += 1;
            }
        }
        profile
    }
}

/// Residue counts of one alignment column; lowercase residues count as uppercase.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub counts: BTreeMap<u8, usize>,
    pub gaps: usize,
    pub depth: usize,
}

impl ColumnProfile {
    pub fn residues(&self) -> usize {
        self.depth - self.gaps
    }

    /// Most common residue and its frequency among all rows, gaps included in the denominator.
    /// Ties go to the smallest symbol.
    pub fn consensus(&self) -> Option<(u8, f64)> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(symbol, count)| (*symbol, *count as f64 / self.depth as f64))
    }

    /// Residue frequencies among the non-gap rows
    pub fn frequencies(&self) -> Vec<(u8, f64)> {
        let residues = self.residues() as f64;
        self.counts
            .iter()
            .map(|(symbol, count)| (*symbol, *count as f64 / residues))
            .collect()
    }

    pub fn entropy(&self) -> f64 {
        self.frequencies()
            .iter()
            .map(|(_, freq)| -freq * freq.log2())
            .sum()
    }

    /// Information content in bits, scaled down by the fraction of gapped rows
    pub fn information_content(&self, alphabet: Alphabet) -> f64 {
        if self.residues() == 0 {
            return 0.0;
        }
        let bits = (alphabet.max_bits() - self.entropy()).max(0.0);
        bits * self.residues() as f64 / self.depth as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Alignment {
        Alignment::new(&["ATGCATGC", "ATG-ATGC", "ATGCATGC"], None).unwrap()
    }

    #[test]
    fn rectangular_alignment_ok() {
        let alignment = example();
        assert_eq!(alignment.num_rows(), 3);
        assert_eq!(alignment.num_cols(), 8);
        assert_eq!(alignment.symbols(), BTreeSet::from([b'-', b'A', b'C', b'G', b'T']));
    }

    #[test]
    fn ragged_alignment_err() {
        assert_eq!(
            Alignment::new(&["ATGC", "ATG"], None),
            Err(MsaPlotError::Validation(
                "sequence 2 has length 3, expected 4 (all sequences must be aligned)".to_string()
            ))
        );
    }

    #[test]
    fn empty_alignment_err() {
        let rows: [&str; 0] = [];
        assert!(Alignment::new(&rows, None).is_err());
        assert!(Alignment::new(&["", ""], None).is_err());
    }

    #[test]
    fn whitespace_in_row_err() {
        assert!(Alignment::new(&["AT GC"], None).is_err());
    }

    #[test]
    fn name_count_mismatch_err() {
        let names = Some(vec!["Seq1".to_string()]);
        assert_eq!(
            Alignment::new(&["ATGC", "ATGC"], names),
            Err(MsaPlotError::Validation(
                "got 1 sequence names for 2 sequences".to_string()
            ))
        );
    }

    #[test]
    fn profile_counts_gaps_separately() {
        let profile = example().profile(3);
        assert_eq!(profile.counts.get(&b'C'), Some(&2));
        assert_eq!(profile.gaps, 1);
        assert_eq!(profile.depth, 3);
    }

    #[test]
    fn profile_folds_case() {
        let alignment = Alignment::new(&["a", "A"], None).unwrap();
        assert_eq!(alignment.profile(0).counts.get(&b'A'), Some(&2));
    }

    #[test]
    fn consensus_uses_all_rows_as_denominator() {
        let (symbol, freq) = example().profile(3).consensus().unwrap();
        assert_eq!(symbol, b'C');
        assert!((freq - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn consensus_tie_goes_to_smallest_symbol() {
        let alignment = Alignment::new(&["T", "A"], None).unwrap();
        assert_eq!(alignment.profile(0).consensus(), Some((b'A', 0.5)));
    }

    #[test]
    fn all_gap_column_has_no_consensus() {
        let alignment = Alignment::new(&["-", "."], None).unwrap();
        let profile = alignment.profile(0);
        assert_eq!(profile.consensus(), None);
        assert_eq!(profile.information_content(Alphabet::Nucleotide), 0.0);
    }

    #[test]
    fn conserved_nucleotide_column_has_two_bits() {
        let profile = example().profile(0);
        assert!((profile.information_content(Alphabet::Nucleotide) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn gapped_column_information_is_scaled() {
        let profile = example().profile(3);
        let expected = 2.0 * 2.0 / 3.0;
        assert!((profile.information_content(Alphabet::Nucleotide) - expected).abs() < 1e-12);
    }

    #[test]
    fn alphabet_detection() {
        assert_eq!(example().alphabet(), Alphabet::Nucleotide);
        let protein = Alignment::new(&["MKV-L"], None).unwrap();
        assert_eq!(protein.alphabet(), Alphabet::Protein);
        assert_eq!(Alphabet::Protein.size(), 20);
    }
}
