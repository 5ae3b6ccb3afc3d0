use parse_display::{Display, FromStr};
use polars::prelude::*;
use std::path::Path;

pub mod columns;
mod error;
pub mod filter;
pub mod pipeline;
pub mod players;
pub mod rank;
pub mod writer;

pub use error::{Error, Stage};
pub use filter::AgeFilter;
pub use pipeline::{run, transform, PipelineConfig, RunSummary, ZeroOverallPolicy};
pub use players::PlayersDf;
pub use rank::RankCategorizer;

pub type Result<T> = std::result::Result<T, Error>;

/// Rank-derived player category, stored in frames as its one-letter label.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, FromStr)]
pub enum Category {
    A,
    B,
    C,
    D,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::A, Category::B, Category::C, Category::D];

    pub fn label(self) -> Expr {
        lit(self.to_string())
    }
}

pub fn load_parquet<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
    let mut file = std::fs::File::open(path)?;
    let df = ParquetReader::new(&mut file).finish()?;
    Ok(df)
}
