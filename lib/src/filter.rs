use crate::{columns, error::Error, Category};
use parse_display::Display;
use polars::prelude::*;

pub const AGE_CUTOFF: i64 = 23;

/// Minimum potential/overall ratio a C player needs to be kept.
pub const C_RATIO_FLOOR: f64 = 1.15;
/// Minimum potential/overall ratio a D player needs to be kept.
pub const D_RATIO_FLOOR: f64 = 1.25;

/// Age restriction selected by the integer flag of the job configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Display)]
pub enum AgeFilter {
    /// Flag `1`: only players younger than [`AGE_CUTOFF`].
    #[display("under 23")]
    UnderAge,
    /// Flag `0`: everyone.
    #[default]
    #[display("all ages")]
    All,
}

impl AgeFilter {
    pub fn flag(self) -> i64 {
        match self {
            AgeFilter::UnderAge => 1,
            AgeFilter::All => 0,
        }
    }

    /// The filter predicate, or `None` when every record passes.
    pub fn expr(self) -> Option<Expr> {
        match self {
            AgeFilter::UnderAge => Some(col(columns::AGE).lt(lit(AGE_CUTOFF))),
            AgeFilter::All => None,
        }
    }
}

impl TryFrom<i64> for AgeFilter {
    type Error = Error;

    fn try_from(flag: i64) -> Result<Self, Self::Error> {
        match flag {
            1 => Ok(AgeFilter::UnderAge),
            0 => Ok(AgeFilter::All),
            other => Err(Error::Configuration(format!(
                "age filter flag must be 0 or 1, got {other}"
            ))),
        }
    }
}

/// Whether a player of `category` is kept, given its ratio column.
fn retain_expr(category: Category) -> Expr {
    let ratio = col(columns::POTENTIAL_VS_OVERALL);
    match category {
        Category::A | Category::B => lit(true),
        Category::C => ratio.gt(lit(C_RATIO_FLOOR)),
        Category::D => ratio.gt(lit(D_RATIO_FLOOR)),
    }
}

/// Predicate over `player_cat` and `potential_vs_overall`.
///
/// Labels outside the known categories match no clause and are dropped, as are
/// C/D players whose ratio is null.
pub fn prospect_expr() -> Expr {
    Category::ALL
        .into_iter()
        .map(|cat| col(columns::PLAYER_CAT).eq(cat.label()).and(retain_expr(cat)))
        .reduce(|acc, expr| acc.or(expr))
        .unwrap_or_else(|| lit(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayersDf;

    fn kept(cats: &[&str], ratios: &[Option<f64>]) -> Vec<usize> {
        let ids: Vec<i64> = (0..cats.len() as i64).collect();
        let df = df!(
            "id" => ids,
            "player_cat" => cats,
            "potential_vs_overall" => ratios
        )
        .unwrap();
        let out = PlayersDf::new(df).filter_prospects().unwrap();
        out.column("id")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .map(|id| id as usize)
            .collect()
    }

    #[test]
    fn a_and_b_pass_regardless_of_ratio() {
        let ids = kept(&["A", "B", "A"], &[Some(0.5), None, Some(2.0)]);
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn c_needs_ratio_strictly_above_1_15() {
        let ids = kept(&["C", "C", "C"], &[Some(1.16), Some(1.15), None]);
        assert_eq!(ids, vec![0]);
    }

    #[test]
    fn d_needs_ratio_strictly_above_1_25() {
        let ids = kept(&["D", "D", "D"], &[Some(1.25), Some(1.26), Some(1.2)]);
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn unknown_categories_are_dropped() {
        let ids = kept(&["E", "", "A"], &[Some(3.0), Some(3.0), Some(1.0)]);
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn flag_parsing() {
        assert_eq!(AgeFilter::try_from(1).unwrap(), AgeFilter::UnderAge);
        assert_eq!(AgeFilter::try_from(0).unwrap(), AgeFilter::All);
        for bad in [2, -1, 23] {
            assert!(matches!(
                AgeFilter::try_from(bad),
                Err(Error::Configuration(_))
            ));
        }
        assert_eq!(AgeFilter::UnderAge.flag(), 1);
        assert_eq!(AgeFilter::UnderAge.to_string(), "under 23");
    }

    #[test]
    fn under_age_drops_23_and_older() {
        let df = df!(
            "short_name" => ["a", "b", "c", "d"],
            "age" => [Some(22i64), Some(23), Some(30), None]
        )
        .unwrap();
        let out = PlayersDf::new(df).filter_age(AgeFilter::UnderAge).unwrap();
        let ages: Vec<Option<i64>> = out.column("age").unwrap().i64().unwrap().into_iter().collect();
        assert_eq!(ages, vec![Some(22)]);
    }

    #[test]
    fn all_ages_is_identity() {
        let df = df!(
            "short_name" => ["b", "a", "c"],
            "age" => [Some(35i64), None, Some(18)]
        )
        .unwrap();
        let out = PlayersDf::new(df.clone()).filter_age(AgeFilter::All).unwrap();
        assert!(out.equals_missing(&df));
    }
}
