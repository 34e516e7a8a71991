//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz). One tick is one frame of the host engine.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Engagement ---

/// Aggro radius used when a template does not declare one (tiles).
pub const DEFAULT_AGGRO_RADIUS: f64 = 4.0;

/// Disengage radius used when a template does not declare one (tiles).
pub const DEFAULT_DISENGAGE_RADIUS: f64 = 6.0;

/// Minimum width of the hysteresis band between aggro and disengage radius.
pub const MIN_HYSTERESIS_BAND: f64 = 1.0;

// --- Combo ---

/// Ticks within which a repeat hit on the same target extends a combo (1.5s).
pub const COMBO_WINDOW_TICKS: u64 = 90;

// --- Movement ---

/// Ticks between tile steps for a battler with no speed boost.
pub const DEFAULT_MOVE_INTERVAL: u32 = 16;

/// Fastest allowed movement cadence regardless of speed boost.
pub const MIN_MOVE_INTERVAL: u32 = 4;

/// Ticks removed from the move interval per point of speed boost.
pub const SPEED_BOOST_INTERVAL_STEP: u32 = 2;

/// Chance (percent) per eligible step that an idle battler wanders one tile.
pub const IDLE_WANDER_CHANCE: u32 = 25;

// --- Damage ---

/// Attacker attack stat multiplier in the base damage formula.
pub const ATTACK_FACTOR: i32 = 4;

/// Defender defense stat multiplier in the base damage formula.
pub const DEFENSE_FACTOR: i32 = 2;

/// Damage percent added per point of attacker speed boost.
pub const SPEED_BOOST_DAMAGE_PCT: i32 = 2;

/// Damage percent added per phase key above the opening phase.
pub const PHASE_DAMAGE_BONUS_PCT: i32 = 10;

/// Default +/- damage variance (percent).
pub const DEFAULT_DAMAGE_VARIANCE_PCT: u32 = 10;

/// Lowest damage a connecting hit can deal.
pub const MIN_DAMAGE: i32 = 1;

// --- Danger level ---

/// Level gap at or below which an enemy is rated worthless.
pub const DANGER_WORTHLESS_GAP: i32 = -7;
/// Level gap at or below which an enemy is rated simple.
pub const DANGER_SIMPLE_GAP: i32 = -3;
/// Level gap at or below which an enemy is rated moderate.
pub const DANGER_MODERATE_GAP: i32 = 1;
/// Level gap at or below which an enemy is rated challenging.
pub const DANGER_CHALLENGING_GAP: i32 = 4;
/// Level gap at or below which an enemy is rated dangerous; above is deadly.
pub const DANGER_DANGEROUS_GAP: i32 = 7;
