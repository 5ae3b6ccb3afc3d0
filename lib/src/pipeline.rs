use crate::{
    columns,
    error::{Error, Stage},
    filter::AgeFilter,
    players::PlayersDf,
    rank::RankCategorizer,
    Result,
};
use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do with records whose `overall` is zero when deriving the ratio.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Display, FromStr, Serialize, Deserialize)]
#[display(style = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ZeroOverallPolicy {
    /// The ratio is null for those records.
    #[default]
    Null,
    /// The run aborts.
    Fail,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub age_filter: AgeFilter,
    pub zero_overall: ZeroOverallPolicy,
    /// Rows of the height preview included in debug logs.
    pub preview_rows: usize,
}

impl PipelineConfig {
    pub fn new<I: Into<PathBuf>, O: Into<PathBuf>>(input: I, output: O) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            age_filter: AgeFilter::All,
            zero_overall: ZeroOverallPolicy::Null,
            preview_rows: 100,
        }
    }

    pub fn age_filter(mut self, age_filter: AgeFilter) -> Self {
        self.age_filter = age_filter;
        self
    }

    pub fn zero_overall(mut self, policy: ZeroOverallPolicy) -> Self {
        self.zero_overall = policy;
        self
    }

    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.input.is_file() {
            return Err(Error::Configuration(format!(
                "input file not found: {}",
                self.input.display()
            )));
        }
        if self.output.as_os_str().is_empty() {
            return Err(Error::Configuration("output path is empty".to_string()));
        }
        if contains_path(&self.output, &self.input) {
            return Err(Error::Configuration(format!(
                "output path {} would overwrite the input",
                self.output.display()
            )));
        }
        Ok(())
    }
}

/// True when `path` is `dir` itself or lies somewhere beneath it.
fn contains_path(dir: &Path, path: &Path) -> bool {
    match (dir.canonicalize(), path.canonicalize()) {
        (Ok(dir), Ok(path)) => path.starts_with(dir),
        _ => path.starts_with(dir),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub rows_read: usize,
    pub rows_written: usize,
    pub partitions: Vec<String>,
}

/// Runs every transformation between cleaning and the prospect filter.
pub fn transform(players: PlayersDf, config: &PipelineConfig) -> Result<PlayersDf> {
    let players = players.clean().map_err(|e| e.in_stage(Stage::Clean))?;
    log::info!("{} players after cleaning", players.height());

    let players = RankCategorizer::height_by_position()
        .apply(players)
        .map_err(|e| e.in_stage(Stage::HeightCategory))?;

    if log::log_enabled!(log::Level::Debug) {
        let preview = players
            .clone()
            .select_height_preview()
            .map_err(|e| e.in_stage(Stage::Projection))?;
        log::debug!("Height categories:\n{}", preview.head(Some(config.preview_rows)));
    }

    let players = players
        .select_player_columns()
        .map_err(|e| e.in_stage(Stage::Projection))?;

    let players = RankCategorizer::player_by_nationality_position()
        .apply(players)
        .map_err(|e| e.in_stage(Stage::PlayerCategory))?;

    let players = players
        .with_potential_vs_overall(config.zero_overall)
        .map_err(|e| e.in_stage(Stage::PotentialVsOverall))?;

    let players = players
        .filter_age(config.age_filter)
        .map_err(|e| e.in_stage(Stage::AgeFilter))?;
    log::info!("{} players after age filter ({})", players.height(), config.age_filter);

    let players = players
        .filter_prospects()
        .map_err(|e| e.in_stage(Stage::ProspectFilter))?;
    log::info!("{} players after prospect filter", players.height());
    log::debug!("Output schema: {:?}", players.schema());
    log::trace!("Output:\n{}", players.head(Some(config.preview_rows)));

    Ok(players)
}

/// Reads, transforms and writes the dataset described by `config`.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    config.validate()?;

    let players = PlayersDf::read_csv(&config.input)
        .and_then(|p| {
            p.require_columns(&columns::PLAYER_COLUMNS)?;
            Ok(p)
        })
        .map_err(|e| e.in_stage(Stage::Read))?;
    let rows_read = players.height();
    log::info!("Loaded {} players from {}", rows_read, config.input.display());

    let players = transform(players, config)?;

    let partitions = players
        .write_partitioned(&config.output)
        .map_err(|e| e.in_stage(Stage::Write))?;
    log::info!(
        "Wrote {} players in {} partitions to {}",
        players.height(),
        partitions.len(),
        config.output.display()
    );

    Ok(RunSummary {
        rows_read,
        rows_written: players.height(),
        partitions,
    })
}
