use crate::{
    columns,
    error::Error,
    filter::{self, AgeFilter},
    pipeline::ZeroOverallPolicy,
    writer, Result,
};
use derive_deref::Deref;
use polars::prelude::*;
use std::path::Path;

/// A set of player records. Every stage consumes the set and returns a new one.
#[derive(Clone, Debug, Deref)]
pub struct PlayersDf(DataFrame);

impl PlayersDf {
    pub fn new(df: DataFrame) -> Self {
        PlayersDf(df)
    }

    pub fn into_inner(self) -> DataFrame {
        self.0
    }

    /// Reads a headered CSV, inferring column types from the whole file.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::Configuration(format!(
                "input file not found: {}",
                path.display()
            )));
        }
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(None)
            .finish()?
            .collect()?;
        log::debug!("Input schema: {:?}", df.schema());
        Ok(PlayersDf(df))
    }

    pub fn require_columns(&self, required: &[&str]) -> Result<()> {
        let present = self.get_column_names();
        let missing: Vec<String> = required
            .iter()
            .filter(|name| !present.contains(name))
            .map(|name| name.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingColumns(missing))
        }
    }

    /// Drops records missing `short_name`, `overall` or `team_position`.
    pub fn clean(self) -> Result<Self> {
        self.require_columns(&columns::CLEAN_REQUIRED)?;
        let expr = columns::CLEAN_REQUIRED
            .into_iter()
            .map(|name| col(name).is_not_null())
            .reduce(|acc, expr| acc.and(expr))
            .unwrap_or_else(|| lit(true));
        let df = self.0.lazy().filter(expr).collect()?;
        Ok(PlayersDf(df))
    }

    pub fn select_columns(self, names: &[&str]) -> Result<Self> {
        self.require_columns(names)?;
        let df = self.0.lazy().select([cols(names)]).collect()?;
        Ok(PlayersDf(df))
    }

    /// The five-column view of the height categorization.
    pub fn select_height_preview(self) -> Result<Self> {
        self.select_columns(&columns::HEIGHT_PREVIEW_COLUMNS)
    }

    /// The ten input columns kept for the rest of the run.
    pub fn select_player_columns(self) -> Result<Self> {
        self.select_columns(&columns::PLAYER_COLUMNS)
    }

    /// Adds `potential_vs_overall = potential / overall`.
    pub fn with_potential_vs_overall(self, policy: ZeroOverallPolicy) -> Result<Self> {
        self.require_columns(&[columns::POTENTIAL, columns::OVERALL])?;
        let zero_overall = col(columns::OVERALL).eq(lit(0));

        if policy == ZeroOverallPolicy::Fail {
            let rows = self
                .0
                .clone()
                .lazy()
                .filter(zero_overall.clone())
                .collect()?
                .height();
            if rows > 0 {
                return Err(Error::DivisionByZero { rows });
            }
        }

        let ratio = col(columns::POTENTIAL).cast(DataType::Float64)
            / col(columns::OVERALL).cast(DataType::Float64);
        let expr = when(zero_overall)
            .then(lit(NULL).cast(DataType::Float64))
            .otherwise(ratio)
            .alias(columns::POTENTIAL_VS_OVERALL);
        let df = self.0.lazy().with_column(expr).collect()?;
        Ok(PlayersDf(df))
    }

    pub fn filter_age(self, age_filter: AgeFilter) -> Result<Self> {
        match age_filter.expr() {
            Some(expr) => {
                self.require_columns(&[columns::AGE])?;
                let df = self.0.lazy().filter(expr).collect()?;
                Ok(PlayersDf(df))
            }
            None => Ok(self),
        }
    }

    /// Keeps A/B players, and C/D players whose potential clears their ratio bar.
    pub fn filter_prospects(self) -> Result<Self> {
        self.require_columns(&[columns::PLAYER_CAT, columns::POTENTIAL_VS_OVERALL])?;
        let df = self.0.lazy().filter(filter::prospect_expr()).collect()?;
        Ok(PlayersDf(df))
    }

    /// Writes the set as a `nationality`-partitioned Parquet dataset, replacing `dir`.
    pub fn write_partitioned<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<String>> {
        writer::write_partitioned(&self.0, columns::NATIONALITY, dir)
    }
}
