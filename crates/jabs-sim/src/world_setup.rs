//! Battler spawn factory and revive.
//!
//! A battler is one entity carrying the full component bundle: identity,
//! position, facing, stats, action loadout, aggro config and movement
//! cadence. Battlers with configured phases also get a `PhaseState`.

use hecs::{Entity, World};

use jabs_core::components::*;
use jabs_core::constants::*;
use jabs_core::data::{BattlerTemplate, GameData};
use jabs_core::error::JabsError;
use jabs_core::types::{BattlerId, Facing, TilePos};

use crate::roster::Roster;

/// Spawn a battler from a template and register it in the roster.
pub fn spawn_battler(
    world: &mut World,
    roster: &mut Roster,
    data: &GameData,
    id: BattlerId,
    template_name: &str,
    position: TilePos,
    tick: u64,
) -> Result<Entity, JabsError> {
    if roster.contains(id) {
        return Err(JabsError::DuplicateBattler(id));
    }
    let template = data
        .template(template_name)
        .ok_or_else(|| JabsError::missing_template(template_name))?;

    let phases = phase_state(template)?;
    let loadout = build_loadout(id, template, data);
    let aggro = build_aggro(id, template);
    let interval = move_interval(template.move_interval, template.stats.speed_boost);
    let mobility = Mobility {
        interval,
        next_step_tick: tick + interval as u64,
    };

    let mut stats = template.stats.clone();
    stats.hp = stats.hp.clamp(1, stats.max_hp.max(1));

    let battler = Battler {
        id,
        faction: template.faction,
        template: template.name.clone(),
    };
    let entity = world.spawn((
        battler,
        position,
        Facing::default(),
        stats,
        loadout,
        aggro,
        mobility,
    ));
    if let Some(phases) = phases {
        // Fresh entity, cannot fail.
        let _ = world.insert_one(entity, phases);
    }
    roster.insert(id, entity)?;

    tracing::debug!("spawned {id} from '{template_name}' at {position}");
    Ok(entity)
}

/// Ticks per tile step after applying speed boost.
pub fn move_interval(base: u32, speed_boost: i32) -> u32 {
    let adjusted = base as i64 - speed_boost as i64 * SPEED_BOOST_INTERVAL_STEP as i64;
    adjusted.max(MIN_MOVE_INTERVAL as i64) as u32
}

/// Restore a battler: hp to max, dead marker cleared, phase back to the
/// opening key, every cooldown ready. Reviving a living battler is a full
/// reset.
pub fn revive(world: &mut World, entity: Entity) -> Result<(), JabsError> {
    let id = world
        .get::<&Battler>(entity)
        .map(|b| b.id)
        .map_err(|_| JabsError::InvariantViolation {
            what: "revive target has no battler record".into(),
        })?;

    if let Ok(mut stats) = world.get::<&mut Stats>(entity) {
        stats.hp = stats.max_hp;
    }
    if let Ok(mut phases) = world.get::<&mut PhaseState>(entity) {
        phases.reset();
    }
    if let Ok(mut loadout) = world.get::<&mut Loadout>(entity) {
        for cooldown in &mut loadout.slots {
            cooldown.remaining = 0;
        }
    }
    // Living battlers carry no marker.
    let _ = world.remove_one::<Dead>(entity);

    tracing::info!("{id} revived");
    Ok(())
}

fn phase_state(template: &BattlerTemplate) -> Result<Option<PhaseState>, JabsError> {
    if template.phases.is_empty() {
        return Ok(None);
    }
    let phases = template.phases.iter().map(Phase::from).collect();
    PhaseState::new(phases).map(Some)
}

fn build_loadout(id: BattlerId, template: &BattlerTemplate, data: &GameData) -> Loadout {
    let slots = template
        .actions
        .iter()
        .map(|&action| match data.action(action) {
            Some(cfg) => Cooldown::new(action, cfg.cooldown),
            None => {
                tracing::warn!(
                    "{id}: {} is not in the action table, slot will never fire",
                    action
                );
                Cooldown::new(action, 0)
            }
        })
        .collect();
    Loadout { slots }
}

fn build_aggro(id: BattlerId, template: &BattlerTemplate) -> Aggro {
    let aggro_radius = template.aggro_radius.max(0.0);
    let mut disengage_radius = template.disengage_radius;
    if disengage_radius < aggro_radius + MIN_HYSTERESIS_BAND {
        tracing::warn!(
            "{id}: disengage radius {disengage_radius} does not clear aggro radius \
             {aggro_radius}, clamping"
        );
        disengage_radius = aggro_radius + MIN_HYSTERESIS_BAND;
    }
    Aggro {
        aggro_radius,
        disengage_radius,
        requires_sight: template.requires_sight,
        engaged: false,
        danger_indicator_visible: false,
    }
}
