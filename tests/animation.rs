use anim_ik::anim::{
    optimize_clip, optimize_track, AnimationClip, Interpolation, KeyframeTrack, Pose,
    QuaternionFrame, QuaternionTrack, ScalarFrame, ScalarTrack, Skeleton, Track, TransformTrack,
    VectorFrame,
};
use anim_ik::math::Transform;
use anim_ik::Error;
use glam::{Quat, Vec3};

const MODES: [Interpolation; 3] = [
    Interpolation::Constant,
    Interpolation::Linear,
    Interpolation::Cubic,
];

fn scalar_track(interpolation: Interpolation) -> ScalarTrack {
    Track::from_frames(
        interpolation,
        vec![
            ScalarFrame::new(0.0, [1.0]),
            ScalarFrame::new(1.0, [3.0]).with_tangents([2.0], [-1.0]),
            ScalarFrame::new(2.0, [-2.0]),
        ],
    )
}

fn swinging_rotation() -> QuaternionTrack {
    Track::from_frames(
        Interpolation::Cubic,
        vec![
            QuaternionFrame::from_value(0.0, Quat::IDENTITY),
            QuaternionFrame::from_value(0.4, Quat::from_rotation_y(1.2))
                .with_tangents([0.0, 0.5, 0.0, 0.0], [0.0, 0.5, 0.0, 0.0]),
            QuaternionFrame::from_value(1.1, Quat::from_rotation_x(-0.7)),
            QuaternionFrame::from_value(1.75, Quat::from_rotation_z(2.5)),
        ],
    )
}

#[test]
fn sampling_at_a_key_returns_its_value() {
    for mode in MODES {
        let track = scalar_track(mode);
        for frame in track.frames() {
            let value = track.sample(frame.time, false);
            assert!(
                (value - frame.value[0]).abs() < 1e-5,
                "{mode:?} at {}: {value}",
                frame.time
            );
        }
    }
}

#[test]
fn looping_wraps_past_the_end() {
    for mode in MODES {
        let track = scalar_track(mode);
        let wrapped = track.sample(2.5, true);
        let inside = track.sample(0.5, true);
        assert!((wrapped - inside).abs() < 1e-5, "{mode:?}");
    }
}

#[test]
fn clamped_sampling_holds_end_values() {
    for mode in MODES {
        let track = scalar_track(mode);
        assert!((track.sample(-1.0, false) - 1.0).abs() < 1e-6, "{mode:?}");
        assert!((track.sample(7.0, false) + 2.0).abs() < 1e-6, "{mode:?}");
    }
}

#[test]
fn cubic_rotation_never_flips() {
    let track: QuaternionTrack = Track::from_frames(
        Interpolation::Cubic,
        vec![
            QuaternionFrame::from_value(0.0, Quat::IDENTITY),
            QuaternionFrame::from_value(1.0, -Quat::from_rotation_z(0.5)),
        ],
    );

    let mut previous = track.sample(0.0, false);
    for step in 1..=200 {
        let current = track.sample(step as f32 / 200.0, false);
        assert!(current.is_normalized());
        assert!(previous.dot(current) > 0.99, "flip at step {step}");
        previous = current;
    }
    assert!(previous.angle_between(Quat::from_rotation_z(0.5)) < 1e-3);
}

#[test]
fn fast_track_matches_track_everywhere() {
    let track = swinging_rotation();
    let fast = optimize_track(&track);

    for step in 0..=800 {
        let time = -0.5 + step as f32 * 0.004;
        for looping in [true, false] {
            let slow = track.sample(time, looping);
            let quick = fast.sample(time, looping);
            assert!(
                slow.abs_diff_eq(quick, 1e-6),
                "t={time} looping={looping}: {slow} vs {quick}"
            );
        }
    }
}

#[test]
fn pose_global_transform_composes_parents() {
    let root = Transform::new(
        Vec3::new(1.0, 0.0, 0.0),
        Quat::from_rotation_y(0.8),
        Vec3::splat(2.0),
    );
    let mid =
        Transform::from_position_rotation(Vec3::new(0.0, 1.0, 0.0), Quat::from_rotation_x(0.3));
    let leaf = Transform::from_position(Vec3::new(0.0, 0.0, 1.5));
    let pose = Pose::from_parts(vec![root, mid, leaf], vec![None, Some(0), Some(1)]);

    let expected = Transform::combine(&Transform::combine(&root, &mid), &leaf);

    assert!(pose.global_transform(2).abs_diff_eq(&expected, 1e-5));

    let mut palette = Vec::new();
    pose.matrix_palette(&mut palette);
    assert!(palette[2].abs_diff_eq(expected.to_matrix(), 1e-5));
}

#[test]
fn clip_duration_spans_all_tracks() {
    let mut clip = AnimationClip::new("walk");
    clip.track_mut(0).position = Track::from_frames(
        Interpolation::Linear,
        vec![
            VectorFrame::from_value(0.0, Vec3::ZERO),
            VectorFrame::from_value(1.0, Vec3::X),
        ],
    );
    clip.track_mut(3).rotation = Track::from_frames(
        Interpolation::Linear,
        vec![
            QuaternionFrame::from_value(0.5, Quat::IDENTITY),
            QuaternionFrame::from_value(2.0, Quat::from_rotation_z(1.0)),
        ],
    );

    clip.recalculate_duration();

    assert_eq!(clip.start_time(), 0.0);
    assert_eq!(clip.end_time(), 2.0);
    assert_eq!(clip.len(), 2);
}

#[test]
fn optimized_clip_samples_the_same_pose() {
    let mut track = TransformTrack::new(1);
    track.rotation = swinging_rotation();
    track.position = Track::from_frames(
        Interpolation::Linear,
        vec![
            VectorFrame::from_value(0.0, Vec3::ZERO),
            VectorFrame::from_value(1.75, Vec3::new(0.0, 2.0, 0.0)),
        ],
    );
    let clip = AnimationClip::builder("swing").track(track).build();
    let fast = optimize_clip(&clip);

    let mut pose = Pose::new(2);
    let mut fast_pose = Pose::new(2);
    for step in 0..100 {
        let time = step as f32 * 0.037;
        let a = clip.sample(&mut pose, time);
        let b = fast.sample(&mut fast_pose, time);
        assert_eq!(a, b);
        assert!(pose.abs_diff_eq(&fast_pose, 1e-6));
    }
}

#[test]
fn skeleton_loads_from_json() {
    let json = r#"{
        "rest_pose": {
            "joints": [
                { "position": [0.0, 1.0, 0.0], "rotation": [0.0, 0.0, 0.0, 1.0], "scale": [1.0, 1.0, 1.0] },
                { "position": [0.0, 1.0, 0.0], "rotation": [0.0, 0.0, 0.0, 1.0], "scale": [1.0, 1.0, 1.0] }
            ],
            "parents": [null, 0]
        },
        "bind_pose": {
            "joints": [
                { "position": [0.0, 1.0, 0.0], "rotation": [0.0, 0.0, 0.0, 1.0], "scale": [1.0, 1.0, 1.0] },
                { "position": [0.0, 1.0, 0.0], "rotation": [0.0, 0.0, 0.0, 1.0], "scale": [1.0, 1.0, 1.0] }
            ],
            "parents": [null, 0]
        },
        "joint_names": ["root", "tip"]
    }"#;

    let skeleton: Skeleton = serde_json::from_str(json).unwrap();

    assert_eq!(skeleton.joint_count(), 2);
    assert_eq!(skeleton.find_joint("tip"), Some(1));
    let tip_bind = skeleton.inverse_bind_pose()[1];
    assert!(tip_bind
        .transform_point3(Vec3::new(0.0, 2.0, 0.0))
        .abs_diff_eq(Vec3::ZERO, 1e-6));

    let round_trip: Skeleton =
        serde_json::from_str(&serde_json::to_string(&skeleton).unwrap()).unwrap();
    assert_eq!(round_trip, skeleton);
}

#[test]
fn skeleton_rejects_cyclic_parents() {
    let pose = Pose::from_parts(vec![Transform::IDENTITY; 2], vec![Some(1), Some(0)]);

    let result = Skeleton::new(pose.clone(), pose, vec!["a".into(), "b".into()]);

    assert!(matches!(result, Err(Error::ParentCycle { .. })));
}

#[test]
fn sampler_names_map_to_interpolation() {
    assert_eq!("STEP".parse::<Interpolation>(), Ok(Interpolation::Constant));
    assert_eq!("LINEAR".parse::<Interpolation>(), Ok(Interpolation::Linear));
    assert_eq!("CUBICSPLINE".parse::<Interpolation>(), Ok(Interpolation::Cubic));
    assert!("BEZIER".parse::<Interpolation>().is_err());
}
