use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

use crate::errors::InputError;
use crate::utils::{get_dynamic_reader, parse_chrom_size_line};

///
/// Chromosome size table. Entries keep the order of the file they were
/// read from; that order defines the genome-wide window order.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChromSizes {
    entries: Vec<(String, u32)>,
}

impl ChromSizes {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of a chromosome, if it is in the table.
    pub fn get(&self, chr: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(name, _)| name == chr)
            .map(|(_, size)| *size)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, size)| (name.as_str(), *size))
    }

    ///
    /// Drop every chromosome that is not in `present`, keeping file order.
    ///
    /// # Returns
    /// the names of the chromosomes that were removed
    pub fn retain_present(&mut self, present: &HashSet<&str>) -> Vec<String> {
        let mut dropped = Vec::new();
        self.entries.retain(|(name, _)| {
            let keep = present.contains(name.as_str());
            if !keep {
                dropped.push(name.clone());
            }
            keep
        });
        dropped
    }
}

impl From<Vec<(String, u32)>> for ChromSizes {
    fn from(entries: Vec<(String, u32)>) -> Self {
        ChromSizes { entries }
    }
}

impl TryFrom<&Path> for ChromSizes {
    type Error = InputError;

    ///
    /// Read a `chrom<TAB>size` table from disk (optionally gzipped).
    /// Blank lines are skipped; a chromosome listed twice keeps its first size.
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let reader = get_dynamic_reader(path)?;
        let mut entries: Vec<(String, u32)> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let (chr, size) =
                parse_chrom_size_line(&line).map_err(|message| InputError::ParseError {
                    path: path.to_path_buf(),
                    line: line_num + 1,
                    message,
                })?;

            if seen.insert(chr.clone()) {
                entries.push((chr, size));
            } else {
                log::warn!("Chromosome {chr} listed more than once in {path:?}; keeping the first size");
            }
        }

        Ok(ChromSizes { entries })
    }
}
