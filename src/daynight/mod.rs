//! Day/night cycle: the dusk tint, the sleep fade that ends a day, the
//! daily weather roll, and rain effects.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

/// Fraction of full dusk gained per second. Roughly 110 seconds from a
/// fresh morning to full night color.
pub const DUSK_PER_SEC: f32 = 0.009;
/// Sleep fade speed in screen-alpha per second; about two seconds each way.
pub const SLEEP_FADE_PER_SEC: f32 = 0.5;

const NIGHT_COLOR: Color = Color::srgb(38.0 / 255.0, 101.0 / 255.0, 189.0 / 255.0);
const MAX_NIGHT_ALPHA: f32 = 0.55;

const RAIN_DROPS_PER_FRAME: usize = 4;
const RAIN_SPLATS_PER_FRAME: usize = 3;

pub struct DayNightPlugin;

impl Plugin for DayNightPlugin {
    fn build(&self, app: &mut App) {
        // Weather for the first day is rolled before the app starts.
        let raining = roll_rain(&mut rand::thread_rng());
        app.insert_resource(RainState { raining })
            .init_resource::<SkyTint>()
            .init_resource::<SleepFade>()
            .add_systems(Startup, spawn_overlays)
            .add_systems(Update, (advance_sky, apply_overlays))
            .add_systems(
                Update,
                (spawn_rain, move_rain_drops)
                    .run_if(in_state(GameState::Playing))
                    .run_if(|rain: Res<RainState>| rain.raining),
            );
    }
}

/// Whether a freshly rolled day is rainy.
pub fn roll_rain(rng: &mut impl Rng) -> bool {
    rng.gen_range(0..=RAIN_ROLL_MAX) > RAIN_ROLL_THRESHOLD
}

/// How far the day has progressed toward night, 0 (morning) to 1 (dusk).
#[derive(Resource, Debug, Default)]
pub struct SkyTint {
    pub progress: f32,
}

/// Screen fade driven by sleeping: rises to full black, ends the day there,
/// then falls back and wakes the player.
#[derive(Resource, Debug, Default)]
pub struct SleepFade {
    pub value: f32,
    returning: bool,
}

pub fn advance_sky(time: Res<Time>, sleep: Res<SleepState>, mut sky: ResMut<SkyTint>) {
    if !sleep.sleeping {
        sky.progress = (sky.progress + DUSK_PER_SEC * time.delta_secs()).min(1.0);
    }
}

/// Drive the sleep fade. Fires `DayEndEvent` exactly once per night, at the
/// moment the screen is fully black, so every overnight effect applies
/// while nothing is visible.
pub fn advance_sleep_transition(
    time: Res<Time>,
    mut sleep: ResMut<SleepState>,
    mut fade: ResMut<SleepFade>,
    mut day_end: EventWriter<DayEndEvent>,
) {
    if !sleep.sleeping {
        return;
    }
    let step = SLEEP_FADE_PER_SEC * time.delta_secs();
    if !fade.returning {
        fade.value += step;
        if fade.value >= 1.0 {
            fade.value = 1.0;
            fade.returning = true;
            day_end.send(DayEndEvent);
        }
    } else {
        fade.value -= step;
        if fade.value <= 0.0 {
            fade.value = 0.0;
            fade.returning = false;
            sleep.sleeping = false;
        }
    }
}

pub fn reroll_weather_on_day_end(
    mut events: EventReader<DayEndEvent>,
    mut rain: ResMut<RainState>,
) {
    if events.read().next().is_none() {
        return;
    }
    rain.raining = roll_rain(&mut rand::thread_rng());
    info!("new day: raining = {}", rain.raining);
}

pub fn reset_sky_on_day_end(mut events: EventReader<DayEndEvent>, mut sky: ResMut<SkyTint>) {
    if events.read().next().is_some() {
        sky.progress = 0.0;
    }
}

// ─── Overlays ──────────────────────────────────────────────────────────

#[derive(Component)]
struct SkyOverlay;

#[derive(Component)]
struct SleepOverlay;

fn spawn_overlays(mut commands: Commands) {
    commands.spawn((
        SkyOverlay,
        fullscreen_node(),
        BackgroundColor(NIGHT_COLOR.with_alpha(0.0)),
        GlobalZIndex(90),
    ));
    commands.spawn((
        SleepOverlay,
        fullscreen_node(),
        BackgroundColor(Color::BLACK.with_alpha(0.0)),
        GlobalZIndex(100),
    ));
}

fn fullscreen_node() -> Node {
    Node {
        position_type: PositionType::Absolute,
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        ..default()
    }
}

fn apply_overlays(
    sky: Res<SkyTint>,
    fade: Res<SleepFade>,
    mut sky_nodes: Query<&mut BackgroundColor, (With<SkyOverlay>, Without<SleepOverlay>)>,
    mut sleep_nodes: Query<&mut BackgroundColor, With<SleepOverlay>>,
) {
    for mut background in &mut sky_nodes {
        background.0 = NIGHT_COLOR.with_alpha(sky.progress * MAX_NIGHT_ALPHA);
    }
    for mut background in &mut sleep_nodes {
        background.0 = Color::BLACK.with_alpha(fade.value);
    }
}

// ─── Rain ──────────────────────────────────────────────────────────────

#[derive(Component, Debug)]
struct RainDrop {
    velocity: Vec2,
}

/// Scatter a few drops and floor splats across the map every frame while
/// it rains. Each is a short-lived particle.
fn spawn_rain(bounds: Res<MapBounds>, mut commands: Commands) {
    let mut rng = rand::thread_rng();

    for _ in 0..RAIN_DROPS_PER_FRAME {
        let pos = random_point(&mut rng, bounds.size);
        let speed = rng.gen_range(200.0..250.0);
        commands.spawn((
            RainDrop {
                velocity: Vec2::new(-2.0, -4.0).normalize() * speed,
            },
            Particle::new(rng.gen_range(400..=500)),
            Sprite {
                color: Color::srgba(0.7, 0.8, 1.0, 0.8),
                custom_size: Some(Vec2::new(3.0, 12.0)),
                ..default()
            },
            Transform::from_translation(pos.extend(depth_z(Layer::RainDrops, pos.y))),
            LogicalPosition(pos),
            Layer::RainDrops,
        ));
    }

    for _ in 0..RAIN_SPLATS_PER_FRAME {
        let pos = random_point(&mut rng, bounds.size);
        commands.spawn((
            Particle::new(rng.gen_range(400..=500)),
            Sprite {
                color: Color::srgba(0.7, 0.8, 1.0, 0.5),
                custom_size: Some(Vec2::splat(6.0)),
                ..default()
            },
            Transform::from_translation(pos.extend(depth_z(Layer::RainFloor, pos.y))),
            LogicalPosition(pos),
            Layer::RainFloor,
        ));
    }
}

fn random_point(rng: &mut impl Rng, size: Vec2) -> Vec2 {
    Vec2::new(rng.gen_range(0.0..size.x), rng.gen_range(0.0..size.y))
}

fn move_rain_drops(time: Res<Time>, mut drops: Query<(&RainDrop, &mut LogicalPosition)>) {
    for (drop, mut pos) in &mut drops {
        pos.0 += drop.velocity * time.delta_secs();
    }
}
