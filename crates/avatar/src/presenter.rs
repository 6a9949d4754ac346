use crate::animation::AvatarPose;
use crate::palette::VariantPalette;
use glam::Vec3;
use mallspace_common::{AvatarVariant, ParticipantId};

/// Everything needed to draw one avatar this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarInstance {
    pub id: ParticipantId,
    pub username: String,
    pub position: Vec3,
    /// Body rotation about +Y in radians.
    pub yaw: f32,
    pub variant: AvatarVariant,
    pub pose: AvatarPose,
    pub is_local: bool,
}

/// One frame's worth of avatars, local participant first.
#[derive(Debug, Clone, Default)]
pub struct AvatarScene {
    pub avatars: Vec<AvatarInstance>,
}

impl AvatarScene {
    pub fn local(&self) -> Option<&AvatarInstance> {
        self.avatars.iter().find(|a| a.is_local)
    }
}

/// Presentation interface. Presenters read the scene and produce
/// output; they never mutate simulation or session state.
pub trait Presenter {
    type Output;

    fn present(&self, scene: &AvatarScene) -> Self::Output;
}

/// Text presenter for CLI output, logging, and tests.
#[derive(Debug, Default)]
pub struct DebugTextPresenter;

impl DebugTextPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Presenter for DebugTextPresenter {
    type Output = String;

    fn present(&self, scene: &AvatarScene) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Mall Scene ({} avatars) ===\n", scene.avatars.len()));
        for a in &scene.avatars {
            let palette = VariantPalette::for_variant(a.variant);
            let marker = if a.is_local { "*" } else { " " };
            out.push_str(&format!(
                "{marker} {} [{:.8}] pos=({:.2}, {:.2}, {:.2}) yaw={:.2} shirt={} bob={:.3}\n",
                a.username,
                &a.id.to_string()[..8],
                a.position.x,
                a.position.y,
                a.position.z,
                a.yaw,
                palette.shirt,
                a.pose.bob,
            ));
        }
        out
    }
}
