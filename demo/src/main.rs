//! Debug menu sample scene
//!
//! Registers a handful of sample items and windows and runs the overlay on
//! top of a stand-in game view. Toggle the menu with Ctrl+Shift+D
//! (Cmd+Shift+D on macOS). Pass `--editor` to use the persisted editor GUI
//! scale.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Result;
use eframe::egui;
use nethercore_debug_menu::surface::widgets::{self, FilterState};
use nethercore_debug_menu::{
    DebugMenu, DebugMenuConfig, EguiFrontend, FilePrefs, ScreenInfo, TargetPlatform, WindowSpec,
};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum TestEnum {
    #[default]
    None,
    One,
    Two,
    Three,
}

const TEST_ENUM_VALUES: [TestEnum; 4] = [TestEnum::None, TestEnum::One, TestEnum::Two, TestEnum::Three];

/// State edited from the sample windows
#[derive(Default)]
struct SampleState {
    test_enum: TestEnum,
    on: bool,
}

/// Stand-in for game state the menu tweaks
struct GameState {
    speed: Cell<f32>,
    spawned: Cell<u32>,
    /// Whether input reaches the game behind the menu
    background_input: Cell<bool>,
}

struct DemoApp {
    frontend: EguiFrontend,
    game: Rc<GameState>,
    frame: u64,
}

impl DemoApp {
    fn new(platform: TargetPlatform) -> Self {
        let mut menu = DebugMenu::new(DebugMenuConfig::load(), platform);
        if let Some(prefs) = FilePrefs::open_default() {
            tracing::info!("debug menu prefs: {}", prefs.path().display());
            menu.set_prefs(Box::new(prefs));
        }
        menu.init(ScreenInfo::default());

        let game = Rc::new(GameState {
            speed: Cell::new(1.0),
            spawned: Cell::new(0),
            background_input: Cell::new(true),
        });
        register_samples(&mut menu, &game);

        Self {
            frontend: EguiFrontend::new(menu),
            game,
            frame: 0,
        }
    }
}

fn register_samples(menu: &mut DebugMenu, game: &Rc<GameState>) {
    let state = Rc::new(RefCell::new(SampleState::default()));
    for i in 0..10 {
        let state = state.clone();
        menu.register_window(
            &format!("Sample/Windows/Window_{i}"),
            WindowSpec::new(move |s, _| {
                let mut state = state.borrow_mut();
                widgets::label_field(s, "TestLabel", "Hoge");
                state.test_enum = widgets::enum_arrow_field(s, "TestEnum", state.test_enum, &TEST_ENUM_VALUES);
                state.on = widgets::toggle_button_field(s, "TestOnOff", state.on);
                if widgets::button_field(s, "TestButton", "Execute") {
                    tracing::info!("Execute TestButton");
                }
            }),
        );
    }

    for i in 0..30 {
        menu.add_item(&format!("Test/Sample_{i}"), move |_| {
            tracing::info!("Execute Sample_{i}");
        });
    }

    let speed_game = game.clone();
    let mut pending = game.speed.get();
    menu.register_window(
        "Sample/Tools/Game Speed",
        WindowSpec::new(move |s, _| {
            pending = widgets::slider_with_apply_f32(s, "Speed", pending, 0.0..=4.0, |v| {
                speed_game.speed.set(v);
                tracing::info!("game speed set to {:.2}", v);
            });
        })
        .header(|s, _| s.label("Changes apply on Apply"))
        .scale(glam::Vec2::new(0.6, 0.4))
        .scroll(false),
    );

    let spawn_game = game.clone();
    let mut filters = FilterState::new();
    let enemies = ["Goblin", "Goblin Archer", "Orc", "Orc Shaman", "Slime", "Bat"];
    menu.register_window(
        "Sample/Tools/Spawner",
        WindowSpec::new(move |s, _| {
            filters.filter_field(s, "enemies", "Filter");
            for enemy in enemies.iter().filter(|e| filters.matches("enemies", e)) {
                if widgets::button_field(s, enemy, "Spawn") {
                    spawn_game.spawned.set(spawn_game.spawned.get() + 1);
                    tracing::info!("spawned {}", enemy);
                }
            }
        })
        .footer({
            let game = game.clone();
            move |s, _| widgets::label_field(s, "Spawned", &game.spawned.get().to_string())
        }),
    );

    menu.add_item("Sample/Close All Windows", |ctx| ctx.windows.close_all());

    menu.set_default_view(|s| s.label("Ctrl+Shift+D toggles this menu"));

    let background_game = game.clone();
    menu.set_background_toggle(move |enabled| background_game.background_input.set(enabled));
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.frame += 1;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Sample scene");
            ui.label(format!("Frame: {}", self.frame));
            ui.label(format!("Game speed: {:.2}", self.game.speed.get()));
            ui.label(format!("Enemies spawned: {}", self.game.spawned.get()));
            let input = if self.game.background_input.get() {
                "enabled"
            } else {
                "blocked by debug menu"
            };
            ui.label(format!("Game input: {input}"));
        });

        self.frontend.run(ctx);
        ctx.request_repaint();
    }
}

impl Drop for DemoApp {
    fn drop(&mut self) {
        let menu = self.frontend.menu_mut();
        menu.remove_item("Test");
        menu.shutdown();
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let platform = if std::env::args().any(|arg| arg == "--editor") {
        TargetPlatform::Editor
    } else {
        TargetPlatform::current()
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Debug Menu Sample")
            .with_inner_size([1280.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Debug Menu Sample",
        native_options,
        Box::new(move |_cc| Ok(Box::new(DemoApp::new(platform)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    Ok(())
}
