//! egui frame driver
//!
//! [`EguiFrontend`] wraps a [`DebugMenu`] and runs it once per egui frame:
//! it converts the frame's events into a [`FrameInput`], updates the menu,
//! sets egui's zoom so one point equals one menu unit, and draws.

use glam::Vec2;
use hashbrown::HashSet;

use crate::geometry::Rect;
use crate::input::{FrameInput, Modifiers, PointerEvent, ScreenInfo};
use crate::menu::DebugMenu;
use crate::surface::EguiSurface;

/// Runs a [`DebugMenu`] inside an egui application
pub struct EguiFrontend {
    menu: DebugMenu,
    /// Touch ids currently down
    touches: HashSet<u64>,
    safe_area: Option<Rect>,
    dpi: Option<f32>,
    last_screen: Option<ScreenInfo>,
    /// Host zoom factor saved while the menu overrides it
    host_zoom: Option<f32>,
}

impl EguiFrontend {
    /// Wrap an initialized menu
    pub fn new(menu: DebugMenu) -> Self {
        Self {
            menu,
            touches: HashSet::new(),
            safe_area: None,
            dpi: None,
            last_screen: None,
            host_zoom: None,
        }
    }

    pub fn menu(&self) -> &DebugMenu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut DebugMenu {
        &mut self.menu
    }

    /// Safe area in physical pixels, when the host platform reports one
    pub fn set_safe_area(&mut self, safe_area: Option<Rect>) {
        self.safe_area = safe_area;
    }

    /// Display DPI, when the host platform reports one
    pub fn set_dpi(&mut self, dpi: Option<f32>) {
        self.dpi = dpi;
    }

    /// Run one frame. Returns true if a debug window consumed the pointer.
    pub fn run(&mut self, ctx: &egui::Context) -> bool {
        let (input, delta_time, screen) = ctx.input(|i| {
            let input = frame_input(&i.events, i.modifiers, &mut self.touches);
            let size = i.screen_rect().size() * i.pixels_per_point();
            let mut screen = ScreenInfo::new(size.x, size.y);
            screen.safe_area = self.safe_area;
            screen.dpi = self.dpi;
            (input, i.stable_dt, screen)
        });

        if self.last_screen != Some(screen) {
            self.menu.reset_resolution(screen);
            self.last_screen = Some(screen);
        }

        if self.menu.update(&input, delta_time) {
            tracing::debug!("debug menu visible: {}", self.menu.is_visible());
        }

        if !self.menu.is_visible() {
            if let Some(zoom) = self.host_zoom.take() {
                ctx.set_zoom_factor(zoom);
            }
            return false;
        }

        if self.host_zoom.is_none() {
            self.host_zoom = Some(ctx.zoom_factor());
        }
        let native = ctx.native_pixels_per_point().unwrap_or(1.0);
        let zoom = self.menu.draw_scale() / native;
        if (ctx.zoom_factor() - zoom).abs() > f32::EPSILON {
            ctx.set_zoom_factor(zoom);
        }

        let menu = &mut self.menu;
        egui::Area::new(egui::Id::new("debug_menu_root"))
            .fixed_pos(egui::Pos2::ZERO)
            .interactable(false)
            .show(ctx, |ui| menu.draw(&mut EguiSurface::new(ui), &input.pointer))
            .inner
    }
}

fn vec2(pos: egui::Pos2) -> Vec2 {
    Vec2::new(pos.x, pos.y)
}

/// Convert one frame of egui events; `touches` tracks touch ids across frames
pub fn frame_input(
    events: &[egui::Event],
    modifiers: egui::Modifiers,
    touches: &mut HashSet<u64>,
) -> FrameInput {
    let mut input = FrameInput {
        modifiers: Modifiers::from(modifiers),
        ..Default::default()
    };

    for event in events {
        match event {
            egui::Event::Key {
                key,
                pressed: true,
                repeat: false,
                ..
            } => input.pressed_keys.push(*key),
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed,
                ..
            } => input.pointer.push(if *pressed {
                PointerEvent::Down(vec2(*pos))
            } else {
                PointerEvent::Up(vec2(*pos))
            }),
            egui::Event::PointerButton {
                button: egui::PointerButton::Secondary,
                pressed: false,
                ..
            } => input.secondary_released = true,
            egui::Event::PointerMoved(pos) => input.pointer.push(PointerEvent::Move(vec2(*pos))),
            egui::Event::Touch { id, phase, .. } => match phase {
                egui::TouchPhase::Start => {
                    touches.insert(id.0);
                }
                egui::TouchPhase::End | egui::TouchPhase::Cancel => {
                    touches.remove(&id.0);
                }
                egui::TouchPhase::Move => {}
            },
            _ => {}
        }
    }

    input.touch_count = touches.len();
    input
}
