//! Rotation animator
//!
//! Turns one face layer a little further on every frame. The angular step
//! follows an eased profile: slow at both ends of the turn and fastest in
//! the middle. The host frame loop calls [`RotationAnimator::tick`] until it
//! returns `false`.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use super::moves::Move;
use super::position::CubiePosition;
use super::registry::CubieRegistry;
use crate::config::animation::{EASING_PEAK, MIN_SPEED, STEP_FACTOR};

#[derive(Debug, Clone)]
pub struct RotationAnimator {
    mv: Move,
    cubies: Vec<CubiePosition>,
    axis: Vec3,
    direction: f32,
    target: f32,
    remaining: f32,
    step_factor: f32,
}

impl RotationAnimator {
    /// Prepare a stepper for `mv` over the cubies currently in `registry`
    pub fn new(registry: &CubieRegistry, mv: Move, speed: f32) -> Self {
        let quarter_turns = mv.modifier.quarter_turns() as f32;
        let target = quarter_turns * FRAC_PI_2;
        let cubies = mv
            .face
            .layer()
            .into_iter()
            .filter(|position| registry.contains(*position))
            .collect();

        Self {
            mv,
            cubies,
            axis: mv.face.axis().unit(),
            direction: mv.direction(),
            target,
            remaining: target,
            step_factor: STEP_FACTOR * quarter_turns * speed.max(MIN_SPEED),
        }
    }

    pub fn mv(&self) -> Move {
        self.mv
    }

    /// Total angle this stepper turns through, in radians
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Angle turned so far, in radians
    pub fn applied(&self) -> f32 {
        self.target - self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Advance one frame. Returns `false` once the turn is complete.
    pub fn tick(&mut self, registry: &mut CubieRegistry) -> bool {
        if self.is_finished() {
            return false;
        }

        let progress = (2.0 * self.remaining - self.target) / self.target;
        let theta = ((EASING_PEAK - progress * progress) * self.step_factor).min(self.remaining);
        self.remaining -= theta;

        let rotation = Quat::from_axis_angle(self.axis, theta * self.direction);
        for position in &self.cubies {
            if let Some(transform) = registry.get_mut(*position) {
                transform.rotate_around(Vec3::ZERO, rotation);
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::moves::{Face, Modifier};

    fn run(animator: &mut RotationAnimator, registry: &mut CubieRegistry) -> usize {
        let mut frames = 0;
        while animator.tick(registry) {
            frames += 1;
            assert!(frames < 10_000, "rotation never finished");
        }
        frames
    }

    #[test]
    fn every_move_turns_exactly_its_target_angle() {
        for face in Face::ALL {
            for modifier in [Modifier::Normal, Modifier::Prime, Modifier::Double] {
                let mv = Move::new(face, modifier);
                let mut registry = CubieRegistry::new();
                let mut animator = RotationAnimator::new(&registry, mv, 1.0);
                run(&mut animator, &mut registry);

                let expected = modifier.quarter_turns() as f32 * FRAC_PI_2;
                assert_eq!(animator.target(), expected, "{mv}");
                assert!((animator.applied() - animator.target()).abs() < 1e-5, "{mv}");

                let centre = registry.get(face.layer()[8]).unwrap();
                let (_, angle) = centre.rotation.to_axis_angle();
                assert!((angle - expected).abs() < 1e-3, "{mv}: {angle}");
            }
        }
    }

    #[test]
    fn finished_animator_keeps_returning_false() {
        let mut registry = CubieRegistry::new();
        let mut animator = RotationAnimator::new(&registry, "U".parse().unwrap(), 1.0);
        run(&mut animator, &mut registry);
        assert!(animator.is_finished());
        assert!(!animator.tick(&mut registry));
    }

    #[test]
    fn quarter_turn_moves_corner_into_neighbouring_slot() {
        let mut registry = CubieRegistry::new();
        let mut animator = RotationAnimator::new(&registry, "R".parse().unwrap(), 1.0);
        run(&mut animator, &mut registry);

        let urf = registry.get(CubiePosition::URF).unwrap();
        assert!(urf.translation.abs_diff_eq(CubiePosition::URB.home(), 1e-4));

        let mut registry = CubieRegistry::new();
        let mut animator = RotationAnimator::new(&registry, "R'".parse().unwrap(), 1.0);
        run(&mut animator, &mut registry);

        let urf = registry.get(CubiePosition::URF).unwrap();
        assert!(urf.translation.abs_diff_eq(CubiePosition::DRF.home(), 1e-4));
    }

    #[test]
    fn cubies_outside_the_layer_stay_put() {
        let mut registry = CubieRegistry::new();
        let mut animator = RotationAnimator::new(&registry, "F2".parse().unwrap(), 1.0);
        run(&mut animator, &mut registry);

        let layer = Face::F.layer();
        for (position, transform) in registry.iter() {
            if !layer.contains(&position) {
                assert_eq!(transform.translation, position.home());
                assert_eq!(transform.rotation, Quat::IDENTITY);
            }
        }
    }

    #[test]
    fn faster_speed_takes_fewer_frames() {
        let mv: Move = "L".parse().unwrap();
        let mut registry = CubieRegistry::new();
        let slow = run(&mut RotationAnimator::new(&registry, mv, 1.0), &mut registry);
        registry.reset();
        let fast = run(&mut RotationAnimator::new(&registry, mv, 3.0), &mut registry);
        assert!(fast < slow);
    }

    #[test]
    fn non_positive_speed_still_terminates() {
        let mut registry = CubieRegistry::new();
        let mut animator = RotationAnimator::new(&registry, "D2".parse().unwrap(), 0.0);
        run(&mut animator, &mut registry);
        assert!(animator.is_finished());
    }
}
