//! Rendering.
//!
//! [`render_system`] is an exclusive system: it takes the raylib handle out
//! of the world for the duration of the frame, draws the corridor in 3D with
//! colours from the [`LightRig`], then the 2D layers on top:
//!
//! 1. HUD (bars, messages, flashlight button, crosshair, hint)
//! 2. title or game-over screen
//! 3. heartbeat pulse, scare flash, vignette, film grain
//! 4. debug overlay when [`DebugMode`] is present
//!
//! Nothing here mutates gameplay state.
use std::ffi::CString;

use bevy_ecs::prelude::*;
use log::warn;
use raylib::ffi;
use raylib::prelude::*;

use crate::components::flicker::FlickeringLight;
use crate::components::ghost::{
    BODY_HEIGHT, BODY_RADIUS, EYE_RADIUS, GhostRig, HEAD_OFFSET, HEAD_RADIUS,
};
use crate::components::particles::ParticleCloud;
use crate::components::prop::{Prop, PropShape, hex};
use crate::components::timer::Timer;
use crate::resources::camera3d::OrbitCamera;
use crate::resources::debugmode::DebugMode;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::hud::{HudLayout, Rect};
use crate::resources::lighting::LightRig;
use crate::resources::session::{HEARTBEAT_SANITY, Session, SessionSnapshot};
use crate::resources::worldtime::WorldTime;

const GRAIN_DOTS: usize = 600;
const TITLE_RED: Color = Color::new(139, 0, 0, 255);
const TEXT_DIM: Color = Color::new(170, 160, 150, 255);
const SANITY_COLOR: Color = Color::new(120, 60, 160, 255);
const BATTERY_COLOR: Color = Color::new(200, 180, 60, 255);
const LOW_COLOR: Color = Color::new(200, 30, 30, 255);

/// Draw one frame.
pub fn render_system(world: &mut World) {
    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        warn!("render_system: no RaylibHandle");
        return;
    };
    let Some(thread) = world.remove_non_send_resource::<RaylibThread>() else {
        warn!("render_system: no RaylibThread");
        world.insert_non_send_resource(rl);
        return;
    };

    {
        let fog = world.resource::<LightRig>().fog.color;
        let camera = world.resource::<OrbitCamera>().camera();
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(fog);
        {
            let mut d3 = d.begin_mode3D(camera);
            render_scene(world, &mut d3);
        }
        render_hud(world, &mut d);
        render_overlays(world, &mut d);
        render_debug_ui(world, &mut d);
    }

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);
}

fn offset(p: Vector3, dx: f32, dy: f32, dz: f32) -> Vector3 {
    Vector3 {
        x: p.x + dx,
        y: p.y + dy,
        z: p.z + dz,
    }
}

fn draw_prop(d: &mut impl RaylibDraw3D, prop: &Prop, color: Color) {
    match prop.shape {
        PropShape::Cube { size } => d.draw_cube(prop.position, size.x, size.y, size.z, color),
        PropShape::Sphere { radius } => d.draw_sphere(prop.position, radius, color),
        PropShape::Cylinder { half, radius } => d.draw_cylinder_ex(
            offset(prop.position, -half.x, -half.y, -half.z),
            offset(prop.position, half.x, half.y, half.z),
            radius,
            radius,
            8,
            color,
        ),
        PropShape::Disc { radius } => {
            d.draw_cylinder(prop.position, radius, radius, 0.005, 16, color)
        }
    }
}

/// The 3D pass: opaque props first, then everything translucent.
pub fn render_scene(world: &mut World, d: &mut impl RaylibDraw3D) {
    let rig = world.resource::<LightRig>().clone();
    let playing = world.resource::<GameState>().is_playing();
    let ghost_visible = world.resource::<Session>().ghost().visible;

    let mut translucent: Vec<(Prop, Color)> = Vec::new();
    let mut props = world.query::<&Prop>();
    for prop in props.iter(world) {
        let color = if prop.emissive {
            rig.fog_only(prop.color, prop.position, prop.opacity)
        } else {
            rig.shade(prop.color, prop.position, prop.opacity)
        };
        if prop.opacity < 1.0 {
            translucent.push((*prop, color));
        } else {
            draw_prop(d, prop, color);
        }
    }

    let mut lights = world.query::<&FlickeringLight>();
    for light in lights.iter(world) {
        let fixture = offset(light.position, 0.0, 0.1, 0.0);
        d.draw_cube(fixture, 0.3, 0.1, 0.3, rig.shade(hex(0x2a2520), fixture, 1.0));
        let bulb = offset(light.position, 0.0, -0.05, 0.0);
        let glow = if light.active {
            (light.intensity / 0.7).clamp(0.2, 1.0)
        } else {
            0.15
        };
        let base = hex(0xffeecc);
        let lit = Color::new(
            (base.r as f32 * glow) as u8,
            (base.g as f32 * glow) as u8,
            (base.b as f32 * glow) as u8,
            255,
        );
        d.draw_sphere(bulb, 0.08, rig.fog_only(lit, bulb, 1.0));
    }

    for (prop, color) in &translucent {
        draw_prop(d, prop, *color);
    }

    let mut clouds = world.query::<&ParticleCloud>();
    for cloud in clouds.iter(world) {
        for p in &cloud.points {
            let c = rig.fog_only(cloud.color, *p, cloud.opacity);
            d.draw_cube(*p, cloud.size, cloud.size, cloud.size, c);
        }
    }

    if playing && ghost_visible {
        let mut ghosts = world.query::<&GhostRig>();
        for ghost in ghosts.iter(world) {
            draw_ghost(d, ghost, &rig);
        }
    }
}

fn draw_ghost(d: &mut impl RaylibDraw3D, ghost: &GhostRig, rig: &LightRig) {
    let c = ghost.body_center();
    let half = BODY_HEIGHT / 2.0;
    let body = rig.fog_only(ghost.body_color, c, ghost.opacity);
    let bottom = offset(c, 0.0, -half, 0.0);
    let top = offset(c, 0.0, half, 0.0);
    d.draw_cylinder_ex(bottom, top, BODY_RADIUS, BODY_RADIUS, 16, body);
    d.draw_sphere(bottom, BODY_RADIUS, body);
    d.draw_sphere(top, BODY_RADIUS, body);

    let head = offset(c, 0.0, HEAD_OFFSET, 0.0);
    d.draw_sphere(
        head,
        HEAD_RADIUS,
        rig.fog_only(ghost.head_color, head, (ghost.opacity + 0.1).min(1.0)),
    );
    for eye in ghost.eyes() {
        d.draw_sphere(eye, EYE_RADIUS, Color::BLACK);
    }

    for p in &ghost.wisps.points {
        let w = offset(c, p.x, p.y, p.z);
        let s = ghost.wisps.size;
        d.draw_cube(w, s, s, s, rig.fog_only(ghost.wisps.color, w, ghost.wisps.opacity));
    }
}

fn text_width(text: &str, size: i32) -> i32 {
    match CString::new(text) {
        Ok(c) => unsafe { ffi::MeasureText(c.as_ptr(), size) },
        Err(_) => 0,
    }
}

fn draw_centered(d: &mut RaylibDrawHandle, text: &str, cx: f32, y: f32, size: i32, color: Color) {
    let w = text_width(text, size);
    d.draw_text(text, cx as i32 - w / 2, y as i32, size, color);
}

fn draw_bar(d: &mut RaylibDrawHandle, label: &str, bar: &Rect, level: f32, low: bool, color: Color) {
    d.draw_text(label, bar.x as i32, bar.y as i32 - 16, 14, TEXT_DIM);
    d.draw_rectangle(bar.x as i32, bar.y as i32, bar.w as i32, bar.h as i32, Color::new(30, 25, 25, 200));
    let fill = HudLayout::fill(bar, level);
    let c = if low { LOW_COLOR } else { color };
    d.draw_rectangle(fill.x as i32, fill.y as i32, fill.w as i32, fill.h as i32, c);
    d.draw_rectangle_lines(bar.x as i32, bar.y as i32, bar.w as i32, bar.h as i32, Color::new(80, 70, 65, 255));
}

fn draw_button(d: &mut RaylibDrawHandle, rect: &Rect, label: &str, enabled: bool, active: bool) {
    let fill = match (enabled, active) {
        (false, _) => Color::new(25, 20, 20, 160),
        (true, true) => Color::new(90, 70, 40, 220),
        (true, false) => Color::new(40, 30, 30, 220),
    };
    let (x, y, w, h) = (rect.x as i32, rect.y as i32, rect.w as i32, rect.h as i32);
    d.draw_rectangle(x, y, w, h, fill);
    d.draw_rectangle_lines(x, y, w, h, if enabled { TITLE_RED } else { Color::DARKGRAY });
    let (cx, cy) = rect.center();
    draw_centered(d, label, cx, cy - 10.0, 20, if enabled { TEXT_DIM } else { Color::GRAY });
}

fn snapshot(world: &World) -> SessionSnapshot {
    let state = world.resource::<GameState>().get();
    world
        .resource::<Session>()
        .snapshot(state, world.resource::<WorldTime>().elapsed)
}

/// HUD while playing, title and game-over screens otherwise.
pub fn render_hud(world: &World, d: &mut RaylibDrawHandle) {
    let hud = *world.resource::<HudLayout>();
    let snap = snapshot(world);
    let state = world.resource::<GameState>().get().clone();

    match state {
        GameStates::Playing => {
            draw_bar(d, "SANITY", &hud.sanity_bar, snap.sanity, snap.low_sanity, SANITY_COLOR);
            draw_bar(d, "BATTERY", &hud.battery_bar, snap.battery, snap.low_battery, BATTERY_COLOR);

            let count = snap.messages.len();
            for (i, msg) in snap.messages.iter().enumerate() {
                let (cx, y) = hud.message_line(i, count);
                draw_centered(d, msg, cx, y, 20, Color::new(200, 190, 180, 230));
            }

            let (cx, cy) = hud.crosshair();
            d.draw_circle_lines(cx as i32, cy as i32, 4.0, Color::new(200, 200, 200, 120));
            draw_centered(d, "drag to look", cx, hud.height - 40.0, 14, Color::new(120, 110, 100, 160));

            let label = if snap.flashlight_on { "LIGHT: ON" } else { "LIGHT: OFF" };
            draw_button(d, &hud.flashlight_button, label, snap.battery > 0.0, snap.flashlight_on);
        }
        GameStates::Start => {
            d.draw_rectangle(0, 0, hud.width as i32, hud.height as i32, Color::new(0, 0, 0, 230));
            let cx = hud.width / 2.0;
            draw_centered(d, "ASYLUM", cx, hud.height * 0.22, 72, TITLE_RED);
            let lines = [
                "You wake in darkness. Something is wrong.",
                "Find the exit. Don't let your sanity break.",
                "Don't let THEM find you.",
            ];
            for (i, line) in lines.iter().enumerate() {
                draw_centered(d, line, cx, hud.height * 0.38 + i as f32 * 28.0, 20, TEXT_DIM);
            }
            draw_button(d, &hud.screen_button, "ENTER", true, false);
            draw_centered(
                d,
                "Drag to look around - F toggles the flashlight - Find the way out",
                cx,
                hud.height - 60.0,
                16,
                Color::new(110, 100, 95, 255),
            );
        }
        GameStates::GameOver => {
            d.draw_rectangle(0, 0, hud.width as i32, hud.height as i32, Color::new(20, 0, 0, 220));
            let cx = hud.width / 2.0;
            draw_centered(d, "YOU DIED", cx, hud.height * 0.3, 64, TITLE_RED);
            draw_centered(d, "The darkness consumed you", cx, hud.height * 0.45, 22, TEXT_DIM);
            draw_button(d, &hud.screen_button, "TRY AGAIN", true, false);
        }
        GameStates::None | GameStates::Setup | GameStates::Quitting => {}
    }
}

/// Heartbeat, scare flash, vignette and grain.
pub fn render_overlays(world: &World, d: &mut RaylibDrawHandle) {
    let hud = *world.resource::<HudLayout>();
    let time = *world.resource::<WorldTime>();
    let session = world.resource::<Session>();
    let playing = world.resource::<GameState>().is_playing();
    let (w, h) = (hud.width as i32, hud.height as i32);

    if playing && session.sanity() < HEARTBEAT_SANITY {
        // Two beats per second, strongest at the start of each beat.
        let phase = (time.elapsed * 1.2).fract();
        let k = (1.0 - phase * 4.0).max(0.0);
        let a = (k * 70.0) as u8;
        let edge = w.min(h) / 6;
        let red = Color::new(140, 0, 0, a);
        let clear = Color::new(140, 0, 0, 0);
        d.draw_rectangle_gradient_v(0, 0, w, edge, red, clear);
        d.draw_rectangle_gradient_v(0, h - edge, w, edge, clear, red);
    }

    if session.scare_active() {
        d.draw_rectangle(0, 0, w, h, Color::new(200, 0, 0, 150));
    }

    // Vignette
    let dark = Color::new(0, 0, 0, 210);
    let clear = Color::new(0, 0, 0, 0);
    let (vx, vy) = (w / 4, h / 4);
    d.draw_rectangle_gradient_h(0, 0, vx, h, dark, clear);
    d.draw_rectangle_gradient_h(w - vx, 0, vx, h, clear, dark);
    d.draw_rectangle_gradient_v(0, 0, w, vy, dark, clear);
    d.draw_rectangle_gradient_v(0, h - vy, w, vy, clear, dark);

    // Grain, reseeded per frame so it crawls without touching the game rng.
    let mut grain = fastrand::Rng::with_seed(time.frame_count);
    for _ in 0..GRAIN_DOTS {
        let x = grain.i32(0..w.max(1));
        let y = grain.i32(0..h.max(1));
        let v = grain.u8(120..=255);
        d.draw_pixel(x, y, Color::new(v, v, v, 28));
    }
}

/// FPS, state, levels, pending timers and the ghost.
pub fn render_debug_ui(world: &mut World, d: &mut RaylibDrawHandle) {
    if !world.contains_resource::<DebugMode>() {
        return;
    }
    let hud = *world.resource::<HudLayout>();
    let snap = snapshot(world);
    let camera = *world.resource::<OrbitCamera>();
    let scare_gen = world.resource::<Session>().scare_gen();

    let x = hud.width as i32 - 330;
    let mut y = 10;
    let mut line = |d: &mut RaylibDrawHandle, text: String| {
        d.draw_text(&text, x, y, 10, Color::LIME);
        y += 14;
    };

    let fps = d.get_fps();
    line(d, format!("DEBUG (F11) | FPS: {}", fps));
    line(d, format!("state: {} | ticks: {}", snap.state, snap.ticks));
    line(
        d,
        format!(
            "sanity {:.1} | battery {:.1} | light {}",
            snap.sanity, snap.battery, snap.flashlight_on
        ),
    );
    line(
        d,
        format!(
            "scare {} #{} | ghost {} at ({:.1}, {:.1}, {:.1})",
            snap.scare_active,
            scare_gen,
            snap.ghost_visible,
            snap.ghost_position[0],
            snap.ghost_position[1],
            snap.ghost_position[2]
        ),
    );
    line(
        d,
        format!(
            "camera az {:.2} polar {:.2}",
            camera.azimuth, camera.polar
        ),
    );

    let mut timers = world.query::<&Timer>();
    let mut pending: Vec<(f32, String)> = timers
        .iter(world)
        .map(|t| (t.remaining(), format!("{:?}", t.action)))
        .collect();
    pending.sort_by(|a, b| a.0.total_cmp(&b.0));
    line(d, format!("timers: {}", pending.len()));
    for (remaining, action) in pending.iter().take(8) {
        line(d, format!("  {:>5.2}s {}", remaining, action));
    }
}
