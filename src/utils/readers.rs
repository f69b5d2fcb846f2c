use super::Result;
use crate::msa::{Annotation, PlotRequest};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read as ioRead};
use std::path::Path;

/// Opens a plain or gzipped file; `-` reads standard input.
pub fn open_input_reader(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    fn is_gzipped(path: &Path) -> bool {
        let path_str = path.to_string_lossy().to_lowercase();
        path_str.ends_with(".gz") || path_str.ends_with(".gzip")
    }
    if path.as_os_str() == "-" {
        return Ok(BufReader::new(Box::new(io::stdin())));
    }
    let file = File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(format!("Invalid gzip header: {}", path.to_string_lossy()))
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}

pub fn read_request(path: &Path) -> Result<PlotRequest> {
    let reader = open_input_reader(path)?;
    PlotRequest::from_reader(reader).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Reads names and sequences from a FASTA file; sequence lines are concatenated.
pub fn read_fasta(path: &Path) -> Result<(Vec<String>, Vec<String>)> {
    parse_fasta(open_input_reader(path)?).map_err(|e| format!("{}: {}", path.display(), e))
}

fn parse_fasta<R: BufRead>(reader: R) -> Result<(Vec<String>, Vec<String>)> {
    let mut names = Vec::new();
    let mut seqs: Vec<String> = Vec::new();

    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Error reading line {}: {}", line_number + 1, e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = line.strip_prefix('>') {
            let name = header.split_whitespace().next().unwrap_or("").to_string();
            names.push(name);
            seqs.push(String::new());
        } else {
            let seq = seqs.last_mut().ok_or(format!(
                "Sequence data before the first header at line {}",
                line_number + 1
            ))?;
            seq.push_str(line);
        }
    }

    if seqs.is_empty() {
        return Err("No sequences found".to_string());
    }
    Ok((names, seqs))
}

/// Reads a tab-separated annotation table: START END LABEL [COLOR].
/// Blank lines and lines starting with '#' are skipped.
pub fn read_annotations(path: &Path) -> Result<Vec<Annotation>> {
    parse_annotations(open_input_reader(path)?).map_err(|e| format!("{}: {}", path.display(), e))
}

fn parse_annotations<R: BufRead>(reader: R) -> Result<Vec<Annotation>> {
    let mut annotations = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Error reading line {}: {}", line_number + 1, e))?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').map(|f| f.trim()).collect();
        if fields.len() < 3 || fields.len() > 4 {
            return Err(format!(
                "Expected 3 or 4 tab-separated fields at line {}, got {}",
                line_number + 1,
                fields.len()
            ));
        }
        let parse = |field: &str| {
            field
                .parse::<usize>()
                .map_err(|_| format!("Invalid position {:?} at line {}", field, line_number + 1))
        };
        let start = parse(fields[0])?;
        let end = parse(fields[1])?;
        let color = fields.get(3).map(|c| c.to_string());
        let annotation = Annotation::new(start, end, fields[2], color)
            .map_err(|e| format!("Line {}: {}", line_number + 1, e))?;
        annotations.push(annotation);
    }
    Ok(annotations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_multiline_fasta() {
        let fasta = ">Seq1 first\nATGC\nATGC\n\n>Seq2\nATG-\nATGC\n";
        let (names, seqs) = parse_fasta(fasta.as_bytes()).unwrap();
        assert_eq!(names, vec!["Seq1", "Seq2"]);
        assert_eq!(seqs, vec!["ATGCATGC", "ATG-ATGC"]);
    }

    #[test]
    fn fasta_without_header_err() {
        assert_eq!(
            parse_fasta("ATGC\n".as_bytes()),
            Err("Sequence data before the first header at line 1".to_string())
        );
        assert!(parse_fasta("".as_bytes()).is_err());
    }

    #[test]
    fn parse_annotation_table() {
        let table = "# start\tend\tlabel\n0\t4\tdomain\n4\t8\tloop\t#FF0000\n";
        let annotations = parse_annotations(table.as_bytes()).unwrap();
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[1].color.as_deref(), Some("#FF0000"));
    }

    #[test]
    fn annotation_table_with_bad_position_err() {
        assert_eq!(
            parse_annotations("x\t4\tdomain\n".as_bytes()),
            Err("Invalid position \"x\" at line 1".to_string())
        );
        assert!(parse_annotations("0\t4\n".as_bytes()).is_err());
    }

    #[test]
    fn read_gzipped_request() {
        use flate2::{write::GzEncoder, Compression};
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json.gz");
        let file = File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(br#"{"msa": ["AC", "AG"], "plot_type": "logo"}"#)
            .unwrap();
        encoder.finish().unwrap();

        let request = read_request(&path).unwrap();
        assert_eq!(request.msa, vec!["AC", "AG"]);
        assert_eq!(request.plot_type, "logo");
    }
}
