//! Rank-derived categorical columns.
//!
//! A [`RankCategorizer`] partitions the frame, ranks every record inside its
//! partition with competition ranking (ties share a rank and the next rank
//! skips), then maps the rank through an ordered threshold table.
//!
//! Records whose order key is null are ranked after every non-null record of
//! their partition: they all share rank `non_null_count + 1`.

use crate::{columns, Category, PlayersDf, Result};
use polars::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RankBound {
    /// `rank < n`
    Below(u32),
    /// `rank <= n`
    AtMost(u32),
}

impl RankBound {
    pub fn matches(self, rank: u32) -> bool {
        match self {
            RankBound::Below(n) => rank < n,
            RankBound::AtMost(n) => rank <= n,
        }
    }

    fn expr(self, rank: Expr) -> Expr {
        match self {
            RankBound::Below(n) => rank.lt(lit(n as i64)),
            RankBound::AtMost(n) => rank.lt_eq(lit(n as i64)),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Threshold {
    pub bound: RankBound,
    pub category: Category,
}

#[derive(Clone, Debug)]
pub struct RankCategorizer {
    output: String,
    partition_by: Vec<String>,
    order_by: String,
    descending: bool,
    thresholds: Vec<Threshold>,
    fallback: Category,
}

impl RankCategorizer {
    pub fn new(output: &str, partition_by: &[&str], order_by: &str) -> Self {
        Self {
            output: output.to_string(),
            partition_by: partition_by.iter().map(|c| c.to_string()).collect(),
            order_by: order_by.to_string(),
            descending: false,
            thresholds: Vec::new(),
            fallback: Category::D,
        }
    }

    /// Tallest players per position.
    ///
    /// Documented as "top 20 / top 50" but the cutoffs in use are 10 and 50.
    pub fn height_by_position() -> Self {
        Self::new(
            columns::CAT_HEIGHT_BY_POSITION,
            &[columns::TEAM_POSITION],
            columns::HEIGHT_CM,
        )
        .descending(true)
        .threshold(RankBound::Below(10), Category::A)
        .threshold(RankBound::Below(50), Category::B)
        .otherwise(Category::C)
    }

    /// Best players per position within each country.
    pub fn player_by_nationality_position() -> Self {
        Self::new(
            columns::PLAYER_CAT,
            &[columns::NATIONALITY, columns::TEAM_POSITION],
            columns::OVERALL,
        )
        .descending(true)
        .threshold(RankBound::AtMost(3), Category::A)
        .threshold(RankBound::AtMost(5), Category::B)
        .threshold(RankBound::AtMost(10), Category::C)
        .otherwise(Category::D)
    }

    pub fn descending(mut self, descending: bool) -> Self {
        self.descending = descending;
        self
    }

    /// Appends a threshold; thresholds are evaluated in insertion order.
    pub fn threshold(mut self, bound: RankBound, category: Category) -> Self {
        self.thresholds.push(Threshold { bound, category });
        self
    }

    pub fn otherwise(mut self, fallback: Category) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Columns the categorizer reads.
    pub fn required_columns(&self) -> Vec<&str> {
        let mut cols: Vec<&str> = self.partition_by.iter().map(String::as_str).collect();
        cols.push(&self.order_by);
        cols
    }

    pub fn category_for(&self, rank: u32) -> Category {
        self.thresholds
            .iter()
            .find(|t| t.bound.matches(rank))
            .map(|t| t.category)
            .unwrap_or(self.fallback)
    }

    fn partition_exprs(&self) -> Vec<Expr> {
        self.partition_by.iter().map(|c| col(c)).collect()
    }

    /// Competition rank of the order key within each partition, as `Int64`.
    pub fn rank_expr(&self) -> Expr {
        let order = col(&self.order_by);
        let options = RankOptions {
            method: RankMethod::Min,
            descending: self.descending,
        };
        let ranked = order
            .clone()
            .rank(options, None)
            .over(self.partition_exprs())
            .cast(DataType::Int64);
        let non_null = order
            .is_not_null()
            .sum()
            .over(self.partition_exprs())
            .cast(DataType::Int64);
        ranked.fill_null(non_null + lit(1i64))
    }

    /// The category column, named after [`RankCategorizer::output`].
    pub fn category_expr(&self) -> Expr {
        let rank = self.rank_expr();
        self.thresholds
            .iter()
            .rev()
            .fold(self.fallback.label(), |otherwise, t| {
                when(t.bound.expr(rank.clone()))
                    .then(t.category.label())
                    .otherwise(otherwise)
            })
            .alias(&self.output)
    }

    pub fn apply(&self, players: PlayersDf) -> Result<PlayersDf> {
        players.require_columns(&self.required_columns())?;
        let df = players
            .into_inner()
            .lazy()
            .with_column(self.category_expr())
            .collect()?;
        log::trace!("{}:\n{}", self.output, df);
        Ok(PlayersDf::new(df))
    }
}
