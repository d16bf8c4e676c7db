//! Gameplay HUD: selected tool, selected seed, money.

use bevy::prelude::*;

use crate::shared::*;

#[derive(Component)]
pub struct ToolLabel;

#[derive(Component)]
pub struct SeedLabel;

#[derive(Component)]
pub struct MoneyLabel;

const HUD_FONT_SIZE: f32 = 24.0;
const HUD_COLOR: Color = Color::srgb(0.95, 0.93, 0.85);

pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            bottom: Val::Px(16.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((ToolLabel, hud_text("")));
            parent.spawn((SeedLabel, hud_text("")));
            parent.spawn((MoneyLabel, hud_text("")));
        });
}

fn hud_text(value: &str) -> (Text, TextFont, TextColor) {
    (
        Text::new(value),
        TextFont { font_size: HUD_FONT_SIZE, ..default() },
        TextColor(HUD_COLOR),
    )
}

pub fn update_tool_label(
    gear: Res<GearState>,
    mut labels: Query<&mut Text, With<ToolLabel>>,
) {
    if !gear.is_changed() {
        return;
    }
    for mut text in &mut labels {
        text.0 = format!("Tool: {}", gear.selected_tool().label());
    }
}

pub fn update_seed_label(
    gear: Res<GearState>,
    inventory: Res<Inventory>,
    mut labels: Query<&mut Text, With<SeedLabel>>,
) {
    if !gear.is_changed() && !inventory.is_changed() {
        return;
    }
    for mut text in &mut labels {
        let seed = gear.selected_seed();
        text.0 = format!("Seed: {} x{}", seed.label(), inventory.seed_count(seed));
    }
}

pub fn update_money_label(
    inventory: Res<Inventory>,
    mut labels: Query<&mut Text, With<MoneyLabel>>,
) {
    if !inventory.is_changed() {
        return;
    }
    for mut text in &mut labels {
        text.0 = format!("$ {}", inventory.money);
    }
}
