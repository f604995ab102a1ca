// Library exports for mutmask
pub mod bitmask;
pub mod chrom;
pub mod error;
pub mod genome;
pub mod gnomad_filter;
pub mod maf_io;
pub mod panel;
pub mod pon;
pub mod record;
pub mod schema;
pub mod target_map;

pub use error::FilterError;
