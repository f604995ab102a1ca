//! Reference panel access.
//!
//! A panel is configured explicitly per call; there is no ambient global
//! state, so consecutive calls carry no hidden ordering dependency.

use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::bitmask;
use crate::error::{FilterError, Result};
use crate::genome::GenomeIndex;
use crate::record::Track;

/// Source of packed 1-bit presence tracks, one per (track, chromosome).
pub trait TrackSource {
    /// Ordered chromosome lengths, index 0 = chr1.
    fn chrom_lengths(&self) -> &[u64];

    /// Full packed track for a chromosome under the given selector.
    fn packed_track(&self, track: Track, chrom: u8) -> Result<Vec<u8>>;

    /// Genome coordinate index over this panel's length table.
    fn genome_index(&self) -> GenomeIndex {
        GenomeIndex::new(self.chrom_lengths().to_vec())
    }
}

/// Panel laid out as one packed bit-track file per (track, chromosome):
/// `<dir>/<stem>.chr<N>.bin`, where stem is `all` or `to_A` .. `to_T`.
#[derive(Debug, Clone)]
pub struct FilePanel {
    dir: PathBuf,
    chrom_lengths: Vec<u64>,
}

impl FilePanel {
    pub fn new(dir: impl Into<PathBuf>, chrom_lengths: Vec<u64>) -> Self {
        FilePanel {
            dir: dir.into(),
            chrom_lengths,
        }
    }

    pub fn track_path(&self, track: Track, chrom: u8) -> PathBuf {
        self.dir.join(format!("{}.chr{}.bin", track.stem(), chrom))
    }

    fn read_packed(&self, path: &Path, expected: usize) -> Result<Vec<u8>> {
        let file = File::open(path).map_err(|e| {
            FilterError::Reference(format!("opening track file {}: {}", path.display(), e))
        })?;
        let mmap = unsafe { Mmap::map(&file)? };
        if mmap.len() < expected {
            return Err(FilterError::Reference(format!(
                "track file {} holds {} bytes, expected {}",
                path.display(),
                mmap.len(),
                expected
            )));
        }
        Ok(mmap[..expected].to_vec())
    }
}

impl TrackSource for FilePanel {
    fn chrom_lengths(&self) -> &[u64] {
        &self.chrom_lengths
    }

    fn packed_track(&self, track: Track, chrom: u8) -> Result<Vec<u8>> {
        let len = chrom
            .checked_sub(1)
            .and_then(|i| self.chrom_lengths.get(i as usize))
            .copied()
            .ok_or_else(|| {
                FilterError::Reference(format!(
                    "chromosome {} absent from panel length table ({} entries)",
                    chrom,
                    self.chrom_lengths.len()
                ))
            })?;
        let path = self.track_path(track, chrom);
        self.read_packed(&path, bitmask::packed_len(len))
    }
}
