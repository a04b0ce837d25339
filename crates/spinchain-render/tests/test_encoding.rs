//! Encoding tests against the real filesystem.

use std::fs::File;
use std::io::BufReader;

use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;
use spinchain_render::{
    GifEncoder, PngSequenceEncoder, RenderConfig, RenderError, render_animation,
};
use spinchain_sim::{EvolutionDriver, SimulationParameters, Trajectory};

fn small_run(steps: usize) -> Trajectory {
    let params = SimulationParameters::new(3, 1.0, 1.2, steps, 0.1);
    EvolutionDriver::new(params).unwrap().run().unwrap()
}

fn small_config() -> RenderConfig {
    RenderConfig {
        width: 200,
        height: 160,
        ..Default::default()
    }
}

#[test]
fn gif_has_one_frame_per_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chain.gif");
    let traj = small_run(6);

    let summary = render_animation(&traj, &small_config(), &GifEncoder::default(), &path).unwrap();
    assert_eq!(summary.frames, 6);
    assert_eq!(summary.encoder, "gif");
    assert_eq!(summary.path, path);

    let decoder = GifDecoder::new(BufReader::new(File::open(&path).unwrap())).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 6);
    assert_eq!(frames[0].buffer().dimensions(), (200, 160));
}

#[test]
fn gif_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chain.gif");
    std::fs::write(&path, b"stale").unwrap();

    render_animation(&small_run(2), &small_config(), &GifEncoder { speed: 30 }, &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"GIF89a"));
}

#[test]
fn png_sequence_writes_numbered_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("frames");

    let summary =
        render_animation(&small_run(4), &small_config(), &PngSequenceEncoder, &out).unwrap();
    assert_eq!(summary.frames, 4);
    for index in 0..4 {
        let file = out.join(PngSequenceEncoder::file_name(index));
        let img = image::open(&file).unwrap();
        assert_eq!((img.width(), img.height()), (200, 160));
    }
    assert!(out.join("frame_00000.png").exists());
    assert!(!out.join("frame_00004.png").exists());
}

#[test]
fn unwritable_path_surfaces_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("chain.gif");
    let err = render_animation(&small_run(1), &small_config(), &GifEncoder::default(), &path);
    assert!(matches!(err, Err(RenderError::Io(_))));
}

#[test]
fn empty_trajectory_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chain.gif");
    let err = render_animation(
        &Trajectory::new(3, 0.1),
        &small_config(),
        &GifEncoder::default(),
        &path,
    );
    assert!(matches!(err, Err(RenderError::EmptyTrajectory)));
    assert!(!path.exists());
}
