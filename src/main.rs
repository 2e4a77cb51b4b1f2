use anim_ik::anim::{
    optimize_clip, AnimationClip, Interpolation, Pose, QuaternionFrame, Skeleton, Track,
    TransformTrack, VectorFrame,
};
use anim_ik::math::{matrix_palette_bytes, Transform};
use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

const JOINT_NAMES: [&str; 4] = ["hips", "spine", "neck", "head"];

fn build_skeleton() -> anim_ik::Result<Skeleton> {
    let joints = vec![
        Transform::from_position(Vec3::new(0.0, 1.0, 0.0)),
        Transform::from_position(Vec3::new(0.0, 0.5, 0.0)),
        Transform::from_position(Vec3::new(0.0, 0.4, 0.0)),
        Transform::from_position(Vec3::new(0.0, 0.2, 0.0)),
    ];
    let parents = vec![None, Some(0), Some(1), Some(2)];
    let rest = Pose::from_parts(joints, parents);

    Skeleton::new(
        rest.clone(),
        rest,
        JOINT_NAMES.iter().map(|name| name.to_string()).collect(),
    )
}

fn build_clip(skeleton: &Skeleton) -> AnimationClip {
    let spine = skeleton.find_joint("spine").unwrap_or(1);
    let head = skeleton.find_joint("head").unwrap_or(3);

    let mut sway = TransformTrack::new(spine);
    sway.rotation = Track::from_frames(
        Interpolation::Linear,
        vec![
            QuaternionFrame::from_value(0.0, Quat::IDENTITY),
            QuaternionFrame::from_value(0.5, Quat::from_rotation_z(0.3)),
            QuaternionFrame::from_value(1.0, Quat::IDENTITY),
            QuaternionFrame::from_value(1.5, Quat::from_rotation_z(-0.3)),
            QuaternionFrame::from_value(2.0, Quat::IDENTITY),
        ],
    );

    let mut nod = TransformTrack::new(head);
    nod.rotation = Track::from_frames(
        Interpolation::Cubic,
        vec![
            QuaternionFrame::from_value(0.0, Quat::IDENTITY),
            QuaternionFrame::from_value(1.0, Quat::from_rotation_x(FRAC_PI_2 * 0.25)),
            QuaternionFrame::from_value(2.0, Quat::IDENTITY),
        ],
    );
    nod.scale = Track::from_frames(
        Interpolation::Constant,
        vec![
            VectorFrame::from_value(0.0, Vec3::ONE),
            VectorFrame::from_value(1.0, Vec3::splat(1.1)),
        ],
    );

    AnimationClip::builder("idle")
        .looping(true)
        .track(sway)
        .track(nod)
        .build()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let skeleton = match build_skeleton() {
        Ok(skeleton) => skeleton,
        Err(e) => {
            log::error!("Invalid skeleton: {}", e);
            std::process::exit(1);
        }
    };

    let clip = build_clip(&skeleton);
    let fast_clip = optimize_clip(&clip);
    log::info!(
        "Clip '{}' spans [{}, {}] with {} tracks",
        clip.name(),
        clip.start_time(),
        clip.end_time(),
        clip.len()
    );

    let mut pose = skeleton.rest_pose().clone();
    let mut fast_pose = skeleton.rest_pose().clone();
    let mut palette = Vec::new();
    let mut skin = Vec::new();

    for frame in 0..=10 {
        let time = frame as f32 * 0.25;
        let sampled_at = clip.sample(&mut pose, time);
        fast_clip.sample(&mut fast_pose, time);

        pose.matrix_palette(&mut palette);
        skeleton.skin_matrices(&pose, &mut skin);

        let head = skeleton.find_joint("head").unwrap_or(pose.len() - 1);
        let head_position = pose.global_transform(head).position;
        log::info!(
            "t={:.2} (clip time {:.2}): head at {:.3?}, fast track agrees: {}",
            time,
            sampled_at,
            head_position,
            pose.abs_diff_eq(&fast_pose, 1e-4)
        );
        log::debug!(
            "palette {} bytes, skin[{}] = {:?}",
            matrix_palette_bytes(&palette).len(),
            head,
            skin[head]
        );
    }
}
