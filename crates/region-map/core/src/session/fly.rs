//! Fly destination picking layered on the region map.

use super::scene::MapScene;
use super::{Continuation, Permissions, SessionExit};
use crate::display::{DisplayDriver, HelpSlot, HelpText, SoundCue};
use crate::env::{RegionMapEnv, resolve_fly_destination};
use crate::types::{Layer, SectionId, SectionType};

/// What an A press did in fly mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlyChoice {
    /// Nothing flyable under the cursor.
    Ignored,
    /// The player stands somewhere fly cannot start from; the map closes without a destination.
    Blocked,
    Selected(SectionId),
}

impl FlyChoice {
    /// True when the choice ends the input loop.
    pub fn closes_map(self) -> bool {
        !matches!(self, FlyChoice::Ignored)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlyOverlaySession {
    destination: Option<SectionId>,
}

impl FlyOverlaySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_destination(&self) -> Option<SectionId> {
        self.destination
    }

    /// Sound and help text after the cursor lands on a cell.
    pub(crate) fn move_end(&self, scene: &MapScene, env: &RegionMapEnv<'_>, driver: &mut dyn DisplayDriver) {
        let surface = scene.cursor.section_type(Layer::Surface);
        if surface == SectionType::Visited {
            driver.play_sound(SoundCue::FlyHover);
        } else {
            scene.move_end_sound(env, driver);
        }

        let help = if scene.cursor.is_on_cancel() {
            driver.play_sound(SoundCue::ButtonHover);
            HelpText::AButtonCancel
        } else if is_flyable(surface) {
            HelpText::AButtonOk
        } else {
            HelpText::Blank
        };
        driver.print_help(HelpSlot::Right, help);
    }

    /// Handles an A press on the current cell.
    pub(crate) fn confirm(
        &mut self,
        scene: &MapScene,
        env: &RegionMapEnv<'_>,
        driver: &mut dyn DisplayDriver,
    ) -> FlyChoice {
        let surface = scene.cursor.section_type(Layer::Surface);
        if !is_flyable(surface) || !scene.permissions.contains(Permissions::FLY_DESTINATIONS) {
            return FlyChoice::Ignored;
        }

        let kind = env.overworld.current_map_kind();
        if kind.blocks_fly() {
            self.destination = None;
            tracing::debug!(%kind, "fly is unavailable from this map kind");
            return FlyChoice::Blocked;
        }

        driver.play_sound(SoundCue::FlyConfirm);
        let section = scene.cursor.section(Layer::Surface);
        self.destination = Some(section);
        tracing::debug!(%section, "fly destination selected");
        FlyChoice::Selected(section)
    }

    /// Exit for a fly session: a warp back to the field when a destination
    /// resolves, `otherwise` when nothing was chosen or the table has no entry.
    pub fn finish(&self, env: &RegionMapEnv<'_>, otherwise: Continuation) -> SessionExit {
        let warp = self
            .destination
            .and_then(|section| resolve_fly_destination(env.fly, section));
        match warp {
            Some(warp) => SessionExit {
                continuation: Continuation::ReturnToField,
                warp: Some(warp),
            },
            None => SessionExit::new(otherwise),
        }
    }
}

fn is_flyable(section_type: SectionType) -> bool {
    matches!(section_type, SectionType::Visited | SectionType::Unknown)
}
