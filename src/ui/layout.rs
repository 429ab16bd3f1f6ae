//! Panel layout: scenario on the left, results and history in the middle,
//! the close-approach dashboard on the right, a status bar underneath.

use bevy::prelude::*;
use bevy_feathers::palette;

pub const PANEL_FONT_SIZE: f32 = 13.0;
const BACKGROUND: Color = Color::srgb(0.02, 0.03, 0.05);
const PANEL_BACKGROUND: Color = Color::srgba(0.06, 0.12, 0.16, 0.9);

/// Text entity whose spans are rebuilt from one renderer.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelText {
    Scenario,
    Results,
    Historical,
    Dashboard,
    Status,
}

#[derive(Component)]
pub struct DashboardPanel;

#[derive(Component)]
pub struct HistoricalPanel;

pub fn setup_ui(mut commands: Commands) {
    commands.spawn(Camera2d);

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(8.0)),
                row_gap: Val::Px(8.0),
                ..default()
            },
            BackgroundColor(BACKGROUND),
        ))
        .with_children(|root| {
            root.spawn(Node {
                width: Val::Percent(100.0),
                flex_grow: 1.0,
                column_gap: Val::Px(8.0),
                ..default()
            })
            .with_children(|row| {
                spawn_panel(row, PanelText::Scenario, Val::Percent(30.0));
                row.spawn(Node {
                    width: Val::Percent(30.0),
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|column| {
                    spawn_panel(column, PanelText::Results, Val::Percent(100.0));
                    spawn_panel(column, PanelText::Historical, Val::Percent(100.0))
                        .insert(HistoricalPanel);
                });
                spawn_panel(row, PanelText::Dashboard, Val::Percent(40.0)).insert(DashboardPanel);
            });

            root.spawn((
                Text::default(),
                TextFont {
                    font_size: PANEL_FONT_SIZE,
                    ..default()
                },
                TextColor(palette::LIGHT_GRAY_2),
                PanelText::Status,
            ));
        });

    info!("[INIT] UI layout spawned");
}

fn spawn_panel<'a>(
    parent: &'a mut ChildSpawnerCommands,
    kind: PanelText,
    width: Val,
) -> EntityCommands<'a> {
    let mut panel = parent.spawn((
        Node {
            width,
            flex_direction: FlexDirection::Column,
            padding: UiRect::all(Val::Px(10.0)),
            overflow: Overflow::clip(),
            ..default()
        },
        BackgroundColor(PANEL_BACKGROUND),
    ));
    panel.with_children(|inner| {
        inner.spawn((
            Text::default(),
            TextFont {
                font_size: PANEL_FONT_SIZE,
                ..default()
            },
            TextColor(palette::LIGHT_GRAY_1),
            kind,
        ));
    });
    panel
}
