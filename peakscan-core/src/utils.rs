use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::errors::InputError;
use crate::models::DepthBlock;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>, InputError> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).map_err(|source| InputError::FileReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// Parses one line of a depth track into a [DepthBlock].
/// Expects at least four tab separated fields: chrom, start, end and depth.
/// Any further columns are ignored.
pub fn parse_depth_line(line: &str) -> Result<DepthBlock, String> {
    let mut fields = line.split('\t');

    let chr = fields
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "missing chromosome".to_string())?;
    let start = fields
        .next()
        .ok_or_else(|| "missing start".to_string())?
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid start: {e}"))?;
    let end = fields
        .next()
        .ok_or_else(|| "missing end".to_string())?
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid end: {e}"))?;
    let depth = fields
        .next()
        .ok_or_else(|| "missing depth".to_string())?
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid depth: {e}"))?;

    if end < start {
        return Err(format!("end ({end}) is before start ({start})"));
    }

    Ok(DepthBlock {
        chr: chr.to_string(),
        start,
        end,
        depth,
    })
}

/// Parses one `chrom<TAB>size` line of a chromosome sizes file.
pub fn parse_chrom_size_line(line: &str) -> Result<(String, u32), String> {
    let mut parts = line.split_whitespace();

    let chr = parts
        .next()
        .ok_or_else(|| "missing chromosome".to_string())?;
    let size = parts
        .next()
        .ok_or_else(|| "missing size".to_string())?
        .parse::<u32>()
        .map_err(|e| format!("invalid size: {e}"))?;

    Ok((chr.to_string(), size))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_parse_depth_line() {
        let block = parse_depth_line("chr1\t100\t200\t2.5").unwrap();
        assert_eq!(block.chr, "chr1");
        assert_eq!(block.start, 100);
        assert_eq!(block.end, 200);
        assert_eq!(block.depth, 2.5);
    }

    #[rstest]
    fn test_parse_depth_line_ignores_extra_columns() {
        let block = parse_depth_line("chr2\t0\t10\t7\tname\t.").unwrap();
        assert_eq!(block.depth, 7.0);
    }

    #[rstest]
    #[case("chr1\t100\t200")]
    #[case("chr1\tabc\t200\t1")]
    #[case("chr1\t300\t200\t1")]
    #[case("\t0\t10\t1")]
    fn test_parse_depth_line_rejects_malformed(#[case] line: &str) {
        assert_eq!(parse_depth_line(line).is_err(), true);
    }

    #[rstest]
    fn test_parse_chrom_size_line() {
        let (chr, size) = parse_chrom_size_line("chrX\t156040895").unwrap();
        assert_eq!(chr, "chrX");
        assert_eq!(size, 156040895);

        assert_eq!(parse_chrom_size_line("chrX").is_err(), true);
    }
}
