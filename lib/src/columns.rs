//! Column names of the player dataset, input and derived.

pub const SHORT_NAME: &str = "short_name";
pub const LONG_NAME: &str = "long_name";
pub const AGE: &str = "age";
pub const HEIGHT_CM: &str = "height_cm";
pub const WEIGHT_KG: &str = "weight_kg";
pub const NATIONALITY: &str = "nationality";
pub const CLUB_NAME: &str = "club_name";
pub const OVERALL: &str = "overall";
pub const POTENTIAL: &str = "potential";
pub const TEAM_POSITION: &str = "team_position";

pub const CAT_HEIGHT_BY_POSITION: &str = "cat_height_by_position";
pub const PLAYER_CAT: &str = "player_cat";
pub const POTENTIAL_VS_OVERALL: &str = "potential_vs_overall";

/// Columns that must be non-null for a record to survive cleaning.
///
/// `height_cm` is deliberately absent: the cleaning rule has always checked
/// only these three.
pub const CLEAN_REQUIRED: [&str; 3] = [SHORT_NAME, OVERALL, TEAM_POSITION];

/// The ten input columns carried to the output.
pub const PLAYER_COLUMNS: [&str; 10] = [
    SHORT_NAME,
    LONG_NAME,
    AGE,
    HEIGHT_CM,
    WEIGHT_KG,
    NATIONALITY,
    CLUB_NAME,
    OVERALL,
    POTENTIAL,
    TEAM_POSITION,
];

pub const HEIGHT_PREVIEW_COLUMNS: [&str; 5] = [
    SHORT_NAME,
    OVERALL,
    HEIGHT_CM,
    TEAM_POSITION,
    CAT_HEIGHT_BY_POSITION,
];
