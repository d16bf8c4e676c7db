//! Shared components, resources, events, and states for Sproutvale.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

/// Gameplay runs in `Playing`; opening the trader menu switches to `Shop`,
/// which pauses every gameplay system until the menu is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Playing,
    Shop,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: f32 = 64.0;
pub const SCREEN_WIDTH: f32 = 1280.0;
pub const SCREEN_HEIGHT: f32 = 720.0;

pub const PLAYER_SPEED: f32 = 300.0;
/// Player collision box, deliberately smaller than the visual sprite.
pub const PLAYER_HITBOX: Vec2 = Vec2::new(40.0, 24.0);
/// Player animation rate in frames per second.
pub const PLAYER_ANIM_FPS: f32 = 4.0;
pub const PLAYER_FRAMES_PER_STATUS: usize = 4;

pub const TOOL_USE_MS: u64 = 350;
pub const TOOL_SWITCH_MS: u64 = 200;
pub const SEED_USE_MS: u64 = 350;
pub const SEED_SWITCH_MS: u64 = 200;

/// A day is rainy when `gen_range(0..=RAIN_ROLL_MAX) > RAIN_ROLL_THRESHOLD`.
pub const RAIN_ROLL_MAX: u32 = 10;
pub const RAIN_ROLL_THRESHOLD: u32 = 7;

// ═══════════════════════════════════════════════════════════════════════
// RENDER LAYERS — fixed ascending draw order, y-sorted within a layer
// ═══════════════════════════════════════════════════════════════════════

/// Vertical space reserved for each layer on the camera z axis.
pub const Z_LAYER_BAND: f32 = 10.0;
/// Scale applied to world y when computing within-layer depth.
/// Keeps the y contribution inside one band for maps up to ~4500 px tall.
pub const Z_Y_SORT_SCALE: f32 = 0.002;

/// Draw layers, lowest first. Every drawable entity carries one.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Water,
    Ground,
    Soil,
    SoilWater,
    RainFloor,
    HouseBottom,
    GroundPlant,
    Main,
    HouseTop,
    Fruit,
    RainDrops,
}

impl Layer {
    pub fn base(self) -> f32 {
        let index = match self {
            Layer::Water => 0,
            Layer::Ground => 1,
            Layer::Soil => 2,
            Layer::SoilWater => 3,
            Layer::RainFloor => 4,
            Layer::HouseBottom => 5,
            Layer::GroundPlant => 6,
            Layer::Main => 7,
            Layer::HouseTop => 8,
            Layer::Fruit => 9,
            Layer::RainDrops => 10,
        };
        index as f32 * Z_LAYER_BAND
    }
}

/// Camera z for an entity on `layer` whose center sits at world `y`.
///
/// Painter's algorithm within a band: entities farther north (larger y)
/// get a smaller z and are overdrawn by entities closer to the camera.
/// The y contribution is clamped so it can never cross into another band.
pub fn depth_z(layer: Layer, y: f32) -> f32 {
    let ysort = (y * Z_Y_SORT_SCALE).clamp(0.0, Z_LAYER_BAND - 1.0);
    layer.base() + (Z_LAYER_BAND - 0.5) - ysort
}

// ═══════════════════════════════════════════════════════════════════════
// SPATIAL PRIMITIVES
// ═══════════════════════════════════════════════════════════════════════

/// Authoritative continuous world position (entity center). The Transform
/// is derived from this in PostUpdate so gameplay code never touches z.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LogicalPosition(pub Vec2);

/// Collision box attached to an obstacle or the player. `offset` shifts the
/// box relative to the entity center (tree trunks collide near the base).
#[derive(Component, Debug, Clone, Copy)]
pub struct Hitbox {
    pub size: Vec2,
    pub offset: Vec2,
}

impl Hitbox {
    pub fn new(size: Vec2) -> Self {
        Self { size, offset: Vec2::ZERO }
    }

    pub fn with_offset(size: Vec2, offset: Vec2) -> Self {
        Self { size, offset }
    }

    pub fn aabb(&self, center: Vec2) -> Aabb {
        Aabb::from_center_size(center + self.offset, self.size)
    }
}

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self { min: center - half, max: center + half }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x < self.max.x
            && point.y >= self.min.y
            && point.y < self.max.y
    }
}

/// World position → tile coordinate by integer division.
/// Floors toward negative infinity so no tile is addressed twice.
pub fn tile_at(pos: Vec2) -> (i32, i32) {
    (
        (pos.x / TILE_SIZE).floor() as i32,
        (pos.y / TILE_SIZE).floor() as i32,
    )
}

/// Center of a tile in world space.
pub fn tile_center(col: i32, row: i32) -> Vec2 {
    Vec2::new(
        col as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        row as f32 * TILE_SIZE + TILE_SIZE / 2.0,
    )
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Where the player starts, read from the map. Inserted by the world
/// domain before any startup system runs.
#[derive(Resource, Debug, Clone, Copy)]
pub struct PlayerSpawn(pub Vec2);

/// World-space extent of the loaded map, for systems that scatter effects
/// across it.
#[derive(Resource, Debug, Clone, Copy)]
pub struct MapBounds {
    pub size: Vec2,
}

/// Farm dimensions and farmable tiles extracted from the map. The world
/// domain publishes this; the farming domain builds its soil grid from it.
#[derive(Resource, Debug, Clone)]
pub struct FarmLayout {
    pub width: usize,
    pub height: usize,
    pub farmable: Vec<(i32, i32)>,
}

/// Trigger areas the player can interact with by pressing Enter.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionZone {
    Trader,
    Bed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

/// Offset from the player center to the point a tool or seed acts on —
/// one tile "in front of" the character, never on top of it.
pub fn tool_target_offset(facing: Facing) -> Vec2 {
    match facing {
        Facing::Up => Vec2::new(0.0, TILE_SIZE),
        Facing::Down => Vec2::new(0.0, -TILE_SIZE),
        Facing::Left => Vec2::new(-TILE_SIZE, 0.0),
        Facing::Right => Vec2::new(TILE_SIZE, 0.0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Hoe,
    Axe,
    WateringCan,
}

pub const TOOL_ORDER: [ToolKind; 3] = [ToolKind::Hoe, ToolKind::Axe, ToolKind::WateringCan];

impl ToolKind {
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Hoe => "Hoe",
            ToolKind::Axe => "Axe",
            ToolKind::WateringCan => "Watering Can",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ITEMS, SEEDS, PRICES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Wood,
    Apple,
    Corn,
    Tomato,
}

/// Everything the trader buys from the player, in menu order.
pub const SELLABLE: [ItemKind; 4] =
    [ItemKind::Wood, ItemKind::Apple, ItemKind::Corn, ItemKind::Tomato];

impl ItemKind {
    pub fn sale_price(self) -> u32 {
        match self {
            ItemKind::Wood => 4,
            ItemKind::Apple => 2,
            ItemKind::Corn => 10,
            ItemKind::Tomato => 20,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Wood => "Wood",
            ItemKind::Apple => "Apple",
            ItemKind::Corn => "Corn",
            ItemKind::Tomato => "Tomato",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedKind {
    Corn,
    Tomato,
}

pub const SEED_ORDER: [SeedKind; 2] = [SeedKind::Corn, SeedKind::Tomato];

impl SeedKind {
    /// Age gained per day of watered growth.
    pub fn grow_speed(self) -> f32 {
        match self {
            SeedKind::Corn => 1.0,
            SeedKind::Tomato => 0.7,
        }
    }

    /// Number of visual growth stages; a plant is harvestable at age
    /// `stage_count - 1`.
    pub fn stage_count(self) -> usize {
        match self {
            SeedKind::Corn => 4,
            SeedKind::Tomato => 3,
        }
    }

    pub fn max_age(self) -> f32 {
        (self.stage_count() - 1) as f32
    }

    pub fn crop_item(self) -> ItemKind {
        match self {
            SeedKind::Corn => ItemKind::Corn,
            SeedKind::Tomato => ItemKind::Tomato,
        }
    }

    pub fn purchase_price(self) -> u32 {
        match self {
            SeedKind::Corn => 4,
            SeedKind::Tomato => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeedKind::Corn => "Corn Seeds",
            SeedKind::Tomato => "Tomato Seeds",
        }
    }
}

/// Currently selected tool and seed. Indices wrap around their order
/// tables, so selection can never dangle.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct GearState {
    pub tool_index: usize,
    pub seed_index: usize,
}

impl GearState {
    pub fn selected_tool(&self) -> ToolKind {
        TOOL_ORDER[self.tool_index % TOOL_ORDER.len()]
    }

    pub fn selected_seed(&self) -> SeedKind {
        SEED_ORDER[self.seed_index % SEED_ORDER.len()]
    }

    pub fn next_tool(&mut self) {
        self.tool_index = (self.tool_index + 1) % TOOL_ORDER.len();
    }

    pub fn next_seed(&mut self) {
        self.seed_index = (self.seed_index + 1) % SEED_ORDER.len();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INVENTORY
// ═══════════════════════════════════════════════════════════════════════

/// Fixed-field inventory: every item and seed the game knows has its own
/// counter, so a "missing key" lookup is unrepresentable.
#[derive(Resource, Debug, Clone)]
pub struct Inventory {
    pub wood: u32,
    pub apple: u32,
    pub corn: u32,
    pub tomato: u32,
    pub corn_seeds: u32,
    pub tomato_seeds: u32,
    pub money: u32,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            wood: 10,
            apple: 10,
            corn: 10,
            tomato: 10,
            corn_seeds: 5,
            tomato_seeds: 5,
            money: 200,
        }
    }
}

impl Inventory {
    pub fn item_count(&self, item: ItemKind) -> u32 {
        match item {
            ItemKind::Wood => self.wood,
            ItemKind::Apple => self.apple,
            ItemKind::Corn => self.corn,
            ItemKind::Tomato => self.tomato,
        }
    }

    pub fn add_item(&mut self, item: ItemKind) {
        *self.item_slot(item) += 1;
    }

    /// Remove one of `item`. Returns false if the count was already zero.
    pub fn take_item(&mut self, item: ItemKind) -> bool {
        let slot = self.item_slot(item);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    pub fn seed_count(&self, seed: SeedKind) -> u32 {
        match seed {
            SeedKind::Corn => self.corn_seeds,
            SeedKind::Tomato => self.tomato_seeds,
        }
    }

    pub fn add_seed(&mut self, seed: SeedKind) {
        *self.seed_slot(seed) += 1;
    }

    /// Remove one seed. Returns false if the count was already zero.
    pub fn take_seed(&mut self, seed: SeedKind) -> bool {
        let slot = self.seed_slot(seed);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    fn item_slot(&mut self, item: ItemKind) -> &mut u32 {
        match item {
            ItemKind::Wood => &mut self.wood,
            ItemKind::Apple => &mut self.apple,
            ItemKind::Corn => &mut self.corn,
            ItemKind::Tomato => &mut self.tomato,
        }
    }

    fn seed_slot(&mut self, seed: SeedKind) -> &mut u32 {
        match seed {
            SeedKind::Corn => &mut self.corn_seeds,
            SeedKind::Tomato => &mut self.tomato_seeds,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PARTICLES
// ═══════════════════════════════════════════════════════════════════════

pub const PARTICLE_DEFAULT_MS: u64 = 200;

/// Short-lived visual-feedback sprite (harvest flash, tree dissolve).
/// Any domain may spawn one; the world domain ticks and despawns them.
#[derive(Component, Debug)]
pub struct Particle {
    pub lifetime: Timer,
}

impl Particle {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            lifetime: Timer::new(
                std::time::Duration::from_millis(duration_ms),
                TimerMode::Once,
            ),
        }
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self::new(PARTICLE_DEFAULT_MS)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// WEATHER & SLEEP
// ═══════════════════════════════════════════════════════════════════════

/// Whether it is raining today. Rolled at startup and on every day reset.
#[derive(Resource, Debug, Clone, Default)]
pub struct RainState {
    pub raining: bool,
}

/// Set when the player goes to bed; drives the day/night fade.
#[derive(Resource, Debug, Clone, Default)]
pub struct SleepState {
    pub sleeping: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — the narrow contracts between domains
// ═══════════════════════════════════════════════════════════════════════

/// Fired by the player controller when the tool-use timer expires.
#[derive(Event, Debug, Clone)]
pub struct ToolUseEvent {
    pub tool: ToolKind,
    /// World-space point the tool acts on (one tile in front of the player).
    pub target: Vec2,
}

/// Fired by the player controller when the seed-use timer expires and the
/// selected seed's count is positive.
#[derive(Event, Debug, Clone)]
pub struct PlantSeedEvent {
    pub seed: SeedKind,
    pub target: Vec2,
}

/// Fired once when the sleep fade-out completes. Every domain with overnight
/// behaviour (growth, water removal, weather reroll, fruit respawn, sky
/// reset) listens for this.
#[derive(Event, Debug, Clone)]
pub struct DayEndEvent;

/// Something was added to the player's inventory (harvest, tree drops).
#[derive(Event, Debug, Clone)]
pub struct ItemPickupEvent {
    pub item: ItemKind,
}

/// One-shot sound effect request, consumed by the audio module.
#[derive(Event, Debug, Clone)]
pub struct PlaySfxEvent {
    pub sfx_id: String,
}

/// Looping music request, consumed by the audio module.
#[derive(Event, Debug, Clone)]
pub struct PlayMusicEvent {
    pub track_id: String,
}
