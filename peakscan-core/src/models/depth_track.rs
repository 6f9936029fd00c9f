use std::collections::HashSet;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::errors::InputError;
use crate::models::DepthBlock;
use crate::utils::{get_dynamic_reader, parse_depth_line};

///
/// DepthTrack struct, the in-memory representation of a bedGraph-like depth
/// file. Blocks are kept in file order; the file is expected to be sorted by
/// `(chrom, start)`, which is not checked here.
///
#[derive(Clone, Debug, Default)]
pub struct DepthTrack {
    pub blocks: Vec<DepthBlock>,
    pub path: Option<PathBuf>,
}

impl DepthTrack {
    ///
    /// Load a depth track from disk.
    ///
    /// # Arguments:
    /// - path: path to the track, gzipped or plain
    /// - header_lines: number of leading lines to skip
    /// - max_rows: optional cap on the number of data rows read
    pub fn from_path(
        path: &Path,
        header_lines: usize,
        max_rows: Option<usize>,
    ) -> Result<Self, InputError> {
        let reader = get_dynamic_reader(path)?;
        let mut blocks: Vec<DepthBlock> = Vec::new();

        for (line_num, line) in reader.lines().enumerate().skip(header_lines) {
            if max_rows.is_some_and(|cap| blocks.len() >= cap) {
                log::warn!(
                    "Stopped reading {path:?} after {} rows (row cap reached)",
                    blocks.len()
                );
                break;
            }

            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let block = parse_depth_line(&line).map_err(|message| InputError::ParseError {
                path: path.to_path_buf(),
                line: line_num + 1,
                message,
            })?;
            blocks.push(block);
        }

        Ok(DepthTrack {
            blocks,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The set of chromosomes with at least one block.
    pub fn chromosomes(&self) -> HashSet<&str> {
        self.blocks.iter().map(|b| b.chr.as_str()).collect()
    }
}

impl From<Vec<DepthBlock>> for DepthTrack {
    fn from(blocks: Vec<DepthBlock>) -> Self {
        DepthTrack { blocks, path: None }
    }
}
