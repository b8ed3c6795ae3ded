//! Fullscreen toggle event and observer.
//!
//! Pressing **F10** triggers [`SwitchFullScreenEvent`], which is handled by
//! [`switch_fullscreen_observer`]. The observer toggles the window between
//! fullscreen and windowed mode, using the [`FullScreen`] marker resource to
//! track the current state.

use crate::resources::fullscreen::FullScreen;
use crate::resources::gameconfig::GameConfig;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{error, info};
use raylib::ffi;

/// Event triggered to toggle fullscreen mode.
#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchFullScreenEvent {}

/// Observer that toggles fullscreen mode when [`SwitchFullScreenEvent`] fires.
///
/// - If [`FullScreen`] exists: removes it and restores the configured
///   window size.
/// - If absent: inserts it and goes fullscreen at the monitor resolution.
pub fn switch_fullscreen_observer(
    _trigger: On<SwitchFullScreenEvent>,
    rl: Option<NonSendMut<raylib::RaylibHandle>>,
    mut commands: Commands,
    fullscreen: Option<Res<FullScreen>>,
    config: Res<GameConfig>,
) {
    let Some(mut rl) = rl else {
        info!("No window, ignoring fullscreen toggle");
        return;
    };

    if fullscreen.is_some() {
        commands.remove_resource::<FullScreen>();
        if rl.is_window_fullscreen() {
            rl.toggle_fullscreen();
            let (w, h) = config.window_size();
            rl.set_window_size(w as i32, h as i32);
            rl.restore_window();
        }
        if rl.is_window_fullscreen() {
            error!("Failed to disable full screen");
        } else {
            info!("Full screen disabled");
        }
    } else {
        commands.insert_resource(FullScreen {});
        if !rl.is_window_fullscreen() {
            let monitor: i32 = unsafe { ffi::GetCurrentMonitor() };
            let width = unsafe { ffi::GetMonitorWidth(monitor) };
            let height = unsafe { ffi::GetMonitorHeight(monitor) };
            info!("Monitor dimensions: {}x{}", width, height);
            rl.set_window_size(width, height);
            rl.toggle_fullscreen();
        }
        if rl.is_window_fullscreen() {
            info!("Full screen enabled");
        } else {
            error!("Failed to enable full screen");
        }
    }
}
