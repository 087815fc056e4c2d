//! Cube animation systems
//!
//! Runs once per frame, in order: pick up session changes, start the next
//! auto-play turn, step the active turn, then copy the cubie registry onto
//! the rendered entities.

use bevy::{
    log::{debug, info},
    pbr::MeshMaterial3d,
    prelude::*,
};

use crate::bevy::components::{Cubie, Sticker};
use crate::bevy::resources::{
    ActiveRotation, AnimationSpeed, AppliedRevision, FaceletMaterials, SessionRes,
};
use crate::cube::{CubieRegistry, RotationAnimator};

/// Recolour stickers and reset cubies when the session changed
///
/// Any rotation still running belongs to the old session and is dropped.
pub fn apply_session_changes(
    session: Res<SessionRes>,
    materials: Option<Res<FaceletMaterials>>,
    mut applied: ResMut<AppliedRevision>,
    mut active: ResMut<ActiveRotation>,
    mut registry: ResMut<CubieRegistry>,
    mut stickers: Query<(&Sticker, &mut MeshMaterial3d<StandardMaterial>)>,
) {
    let Some(materials) = materials else {
        return;
    };

    let (revision, facelets) = {
        let guard = match session.0 .0.lock() {
            Ok(g) => g,
            Err(_) => return,
        };
        if applied.0 == Some(guard.revision()) {
            return;
        }
        (guard.revision(), guard.state().facelets())
    };

    for (sticker, mut material) in stickers.iter_mut() {
        let Some(index) = sticker.position.facelet_indices()[sticker.slot] else {
            continue;
        };
        if let Some(handle) = materials.0.get(&facelets[index]) {
            material.0 = handle.clone();
        }
    }

    if let Some((animator, _)) = active.0.take() {
        debug!("[Bevy] Dropping rotation {} after session change", animator.mv());
    }
    registry.reset();
    applied.0 = Some(revision);
}

/// Start animating the next auto-play move when nothing is turning
pub fn start_pending_rotation(
    session: Res<SessionRes>,
    applied: Res<AppliedRevision>,
    speed: Res<AnimationSpeed>,
    registry: Res<CubieRegistry>,
    mut active: ResMut<ActiveRotation>,
) {
    if active.0.is_some() {
        return;
    }

    let pending = {
        let guard = match session.0 .0.lock() {
            Ok(g) => g,
            Err(_) => return,
        };
        guard.pending_rotation()
    };

    // Wait until the scene shows the state the move starts from
    let Some(pending) = pending.filter(|p| applied.0 == Some(p.revision)) else {
        return;
    };

    info!("[Bevy] Rotating {} (move {})", pending.mv, pending.index);
    active.0 = Some((RotationAnimator::new(&registry, pending.mv, speed.0), pending));
}

/// Step the active rotation and commit it once it completes
pub fn drive_rotation(
    session: Res<SessionRes>,
    mut active: ResMut<ActiveRotation>,
    mut registry: ResMut<CubieRegistry>,
) {
    let Some((animator, _)) = active.0.as_mut() else {
        return;
    };

    if animator.tick(&mut registry) {
        return;
    }

    let Some((animator, pending)) = active.0.take() else {
        return;
    };

    let committed = match session.0 .0.lock() {
        Ok(mut guard) => guard.complete_rotation(pending),
        Err(_) => false,
    };

    if !committed {
        debug!("[Bevy] Rotation {} went stale, resetting cubies", animator.mv());
        registry.reset();
    }
}

/// Mirror the cubie registry onto the cubie entities
pub fn sync_cubie_transforms(
    registry: Res<CubieRegistry>,
    mut cubies: Query<(&Cubie, &mut Transform)>,
) {
    if !registry.is_changed() {
        return;
    }
    for (cubie, mut transform) in cubies.iter_mut() {
        if let Some(placed) = registry.get(cubie.position) {
            *transform = *placed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bevy::plugins::CubePlugin;
    use crate::cube::solution::{solve, tests::ChainSolver};
    use crate::cube::{CubiePosition, Session};
    use crate::tauri_bridge::shared_state::SharedSession;

    fn cube_app(session: SharedSession) -> App {
        let mut app = App::new();
        app.add_plugins(CubePlugin {
            session,
            speed: 4.0,
        })
        .insert_resource(FaceletMaterials(Default::default()));
        for position in CubiePosition::ALL {
            app.world_mut()
                .spawn((Cubie { position }, Transform::from_translation(position.home())));
        }
        app
    }

    fn loaded_session() -> (SharedSession, ChainSolver) {
        let solver = ChainSolver::scrambled();
        let mut session = Session::new();
        session.randomize(solver.chain[0].clone());
        let solution = solve(&solver, session.state()).unwrap();
        session.load_solution(solution);
        (SharedSession::new(session), solver)
    }

    #[test]
    fn auto_play_runs_the_whole_solution() {
        let (shared, _) = loaded_session();
        let mut app = cube_app(shared.clone());

        for _ in 0..2_000 {
            app.update();
        }

        let session = shared.0.lock().unwrap();
        assert!(session.state().is_solved());
        assert_eq!(session.index(), session.solution().len() - 1);
        assert!(app.world().resource::<ActiveRotation>().0.is_none());
        assert!(app.world().resource::<CubieRegistry>().is_at_rest());
    }

    #[test]
    fn rotation_moves_cubie_entities() {
        let (shared, _) = loaded_session();
        let mut app = cube_app(shared);

        // The turn starts on the first frame and lasts several more
        app.update();
        app.update();
        app.update();

        assert!(app.world().resource::<ActiveRotation>().0.is_some());
        let mut query = app.world_mut().query::<(&Cubie, &Transform)>();
        let moved = query
            .iter(app.world())
            .filter(|(cubie, transform)| transform.translation != cubie.position.home())
            .count();
        assert!(moved > 0);
    }

    #[test]
    fn pausing_drops_the_running_rotation() {
        let (shared, _) = loaded_session();
        let mut app = cube_app(shared.clone());
        app.update();
        app.update();
        assert!(app.world().resource::<ActiveRotation>().0.is_some());

        shared.0.lock().unwrap().set_auto_play(false);
        app.update();

        assert!(app.world().resource::<ActiveRotation>().0.is_none());
        assert!(app.world().resource::<CubieRegistry>().is_at_rest());
        assert_eq!(shared.0.lock().unwrap().index(), 0);
    }
}
