//! The trader shop: sell crops and materials, buy seeds.
//!
//! The menu lists every sellable item followed by every purchasable seed.
//! Navigation wraps; selecting a row applies the transaction immediately
//! when the player can afford it, and does nothing otherwise.

use bevy::prelude::*;

use crate::input::PlayerInput;
use crate::shared::*;

/// One menu row, in display order: sales first, then seed purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopRow {
    Sell(ItemKind),
    Buy(SeedKind),
}

pub const SHOP_ROW_COUNT: usize = SELLABLE.len() + SEED_ORDER.len();

pub fn shop_row(index: usize) -> ShopRow {
    if index < SELLABLE.len() {
        ShopRow::Sell(SELLABLE[index])
    } else {
        ShopRow::Buy(SEED_ORDER[index - SELLABLE.len()])
    }
}

/// Apply the transaction for `row`. Returns false when it cannot proceed
/// (nothing left to sell, or not enough money to buy).
pub fn try_transaction(inventory: &mut Inventory, row: ShopRow) -> bool {
    match row {
        ShopRow::Sell(item) => {
            if !inventory.take_item(item) {
                return false;
            }
            inventory.money += item.sale_price();
            true
        }
        ShopRow::Buy(seed) => {
            let price = seed.purchase_price();
            if inventory.money < price {
                return false;
            }
            inventory.money -= price;
            inventory.add_seed(seed);
            true
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct ShopMenu {
    pub index: usize,
}

#[derive(Component)]
pub struct ShopRoot;

#[derive(Component)]
pub struct ShopRowLabel {
    pub index: usize,
}

const ROW_COLOR: Color = Color::srgb(0.8, 0.78, 0.72);
const SELECTED_COLOR: Color = Color::srgb(1.0, 0.95, 0.5);
const PANEL_COLOR: Color = Color::srgba(0.08, 0.06, 0.05, 0.92);

pub fn open_shop(mut commands: Commands) {
    commands.init_resource::<ShopMenu>();
    commands
        .spawn((
            ShopRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            GlobalZIndex(110),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(6.0),
                        padding: UiRect::all(Val::Px(24.0)),
                        ..default()
                    },
                    BackgroundColor(PANEL_COLOR),
                ))
                .with_children(|panel| {
                    for index in 0..SHOP_ROW_COUNT {
                        panel.spawn((
                            ShopRowLabel { index },
                            Text::new(""),
                            TextFont { font_size: 28.0, ..default() },
                            TextColor(ROW_COLOR),
                        ));
                    }
                });
        });
}

pub fn close_shop(roots: Query<Entity, With<ShopRoot>>, mut commands: Commands) {
    for root in &roots {
        commands.entity(root).despawn_recursive();
    }
    commands.remove_resource::<ShopMenu>();
}

pub fn navigate(input: Res<PlayerInput>, mut menu: ResMut<ShopMenu>) {
    if input.menu_up {
        menu.index = (menu.index + SHOP_ROW_COUNT - 1) % SHOP_ROW_COUNT;
    }
    if input.menu_down {
        menu.index = (menu.index + 1) % SHOP_ROW_COUNT;
    }
}

pub fn select(
    input: Res<PlayerInput>,
    menu: Res<ShopMenu>,
    mut inventory: ResMut<Inventory>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    if !input.menu_select {
        return;
    }
    if try_transaction(&mut inventory, shop_row(menu.index)) {
        sfx.send(PlaySfxEvent { sfx_id: "trade".into() });
    }
}

pub fn handle_escape(input: Res<PlayerInput>, mut next_state: ResMut<NextState<GameState>>) {
    if input.escape {
        next_state.set(GameState::Playing);
    }
}

pub fn refresh_rows(
    menu: Res<ShopMenu>,
    inventory: Res<Inventory>,
    mut rows: Query<(&ShopRowLabel, &mut Text, &mut TextColor)>,
) {
    for (row, mut text, mut color) in &mut rows {
        let selected = if row.index == menu.index { "> " } else { "  " };
        text.0 = match shop_row(row.index) {
            ShopRow::Sell(item) => format!(
                "{selected}{} x{}  sell {}",
                item.label(),
                inventory.item_count(item),
                item.sale_price()
            ),
            ShopRow::Buy(seed) => format!(
                "{selected}{} x{}  buy {}",
                seed.label(),
                inventory.seed_count(seed),
                seed.purchase_price()
            ),
        };
        color.0 = if row.index == menu.index { SELECTED_COLOR } else { ROW_COLOR };
    }
}
