//! Stand / crouch / prone state machine with smoothed camera and collider geometry.

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use super::smoothing::{SmoothedF32, SmoothedVec3};

/// Discrete body posture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Stance {
    #[default]
    Stand,
    Crouch,
    Prone,
}

/// Target geometry for one stance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StanceProfile {
    /// Local height of the camera rig above the body origin
    pub camera_height: f32,
    pub collider_height: f32,
    /// Collider offset from the body origin
    pub collider_center: Vec3,
}

/// One profile per stance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StanceProfiles {
    pub stand: StanceProfile,
    pub crouch: StanceProfile,
    pub prone: StanceProfile,
}

impl StanceProfiles {
    pub fn get(&self, stance: Stance) -> &StanceProfile {
        match stance {
            Stance::Stand => &self.stand,
            Stance::Crouch => &self.crouch,
            Stance::Prone => &self.prone,
        }
    }
}

/// Smoothed geometry produced by one stance tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StanceSample {
    pub camera_height: f32,
    pub collider_height: f32,
    pub collider_center: Vec3,
}

/// Tracks the active stance and eases the camera and collider toward it.
///
/// The smoothers are independent of the discrete state: switching stance just
/// changes the target, so a transition interrupted halfway turns around
/// without a jump.
#[derive(Debug, Clone)]
pub struct StanceStateMachine {
    stance: Stance,
    profiles: StanceProfiles,
    smoothing_time: f32,
    camera_height: SmoothedF32,
    collider_height: SmoothedF32,
    collider_center: SmoothedVec3,
}

impl StanceStateMachine {
    /// Starts standing with geometry already at the stand profile.
    pub fn new(profiles: StanceProfiles, smoothing_time: f32) -> Self {
        let stand = profiles.stand;
        Self {
            stance: Stance::Stand,
            profiles,
            smoothing_time,
            camera_height: SmoothedF32::new(stand.camera_height),
            collider_height: SmoothedF32::new(stand.collider_height),
            collider_center: SmoothedVec3::new(stand.collider_center),
        }
    }

    pub fn stance(&self) -> Stance {
        self.stance
    }

    pub fn profile(&self) -> &StanceProfile {
        self.profiles.get(self.stance)
    }

    /// Crouch stands back up; anything else (including prone) crouches.
    pub fn request_crouch_toggle(&mut self) -> Stance {
        self.stance = match self.stance {
            Stance::Crouch => Stance::Stand,
            Stance::Stand | Stance::Prone => Stance::Crouch,
        };
        self.stance
    }

    pub fn request_prone(&mut self) -> Stance {
        self.stance = Stance::Prone;
        self.stance
    }

    /// Places the camera smoother at an externally observed height without
    /// disturbing its velocity.
    pub fn set_camera_height(&mut self, height: f32) {
        self.camera_height.value = height;
    }

    /// Advances all three smoothers toward the active profile.
    pub fn tick(&mut self, dt: f32) -> StanceSample {
        let target = *self.profile();
        let time = self.smoothing_time;
        StanceSample {
            camera_height: self.camera_height.step(target.camera_height, time, dt),
            collider_height: self.collider_height.step(target.collider_height, time, dt),
            collider_center: self.collider_center.step(target.collider_center, time, dt),
        }
    }

    pub fn sample(&self) -> StanceSample {
        StanceSample {
            camera_height: self.camera_height.value,
            collider_height: self.collider_height.value,
            collider_center: self.collider_center.value,
        }
    }
}
