use itertools::Itertools;
use parse_display::Display;
use polars::error::PolarsError;
use std::io::Error as IoError;

/// Pipeline step, used to qualify errors and log lines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
#[display(style = "snake_case")]
pub enum Stage {
    Read,
    Clean,
    HeightCategory,
    Projection,
    PlayerCategory,
    PotentialVsOverall,
    AgeFilter,
    ProspectFilter,
    Write,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Missing required columns: {}", .0.iter().join(", "))]
    MissingColumns(Vec<String>),

    #[error("Division by zero: {rows} record(s) have overall = 0")]
    DivisionByZero { rows: usize },

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] IoError),

    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn in_stage(self, stage: Stage) -> Self {
        match self {
            // Keep the innermost stage when errors are re-wrapped
            Error::Stage { .. } => self,
            other => Error::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// The stage the error was raised in, when known.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_wrapping_names_the_stage() {
        let err = Error::DivisionByZero { rows: 2 }.in_stage(Stage::PotentialVsOverall);
        assert_eq!(err.stage(), Some(Stage::PotentialVsOverall));
        assert_eq!(
            err.to_string(),
            "potential_vs_overall stage failed: Division by zero: 2 record(s) have overall = 0"
        );
    }

    #[test]
    fn rewrapping_keeps_inner_stage() {
        let err = Error::Configuration("bad".into())
            .in_stage(Stage::Read)
            .in_stage(Stage::Write);
        assert_eq!(err.stage(), Some(Stage::Read));
    }

    #[test]
    fn missing_columns_are_listed() {
        let err = Error::MissingColumns(vec!["age".into(), "overall".into()]);
        assert_eq!(err.to_string(), "Missing required columns: age, overall");
    }
}
