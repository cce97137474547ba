#![cfg(feature = "cli")]

use assert_cmd::Command;
use image::{Rgb, RgbImage};
use predicates::prelude::*;
use std::path::{Path, PathBuf};

use cubescan::config::{CameraBankConfig, FaceLayout, LightingConfig, RigConfig};
use cubescan::{ClassifyParams, FaceId};

// sRGB pigments whose OpenCV-scale hues land where the default profile
// expects them: blue 120, yellow 30, green 60, orange 5, red wraps to 181.
const BLUE: [u8; 3] = [0, 0, 255];
const RED: [u8; 3] = [255, 0, 0];
const WHITE: [u8; 3] = [200, 200, 200];
const YELLOW: [u8; 3] = [255, 255, 0];
const ORANGE: [u8; 3] = [255, 40, 0];
const GREEN: [u8; 3] = [0, 255, 0];

fn grid(slot: u32) -> [[u32; 2]; 9] {
    std::array::from_fn(|i| {
        [
            20 + slot * 100 + (i as u32 % 3) * 30,
            60 + (i as u32 / 3) * 30,
        ]
    })
}

fn rig_config() -> RigConfig {
    let layouts = [
        (FaceId::Back, 0, 0),
        (FaceId::Right, 0, 1),
        (FaceId::Down, 0, 2),
        (FaceId::Up, 1, 0),
        (FaceId::Left, 1, 1),
        (FaceId::Front, 1, 2),
    ];
    RigConfig {
        cameras: CameraBankConfig {
            sources: vec!["cam://0".into(), "cam://1".into()],
            device_offset: 1,
            width: 320,
            height: 240,
            read_delay_ms: 0,
        },
        window: 5,
        classify: ClassifyParams::default(),
        lighting: LightingConfig::default(),
        faces: layouts
            .into_iter()
            .map(|(id, camera, slot)| FaceLayout {
                id,
                camera,
                facelets: grid(slot),
            })
            .collect(),
    }
}

fn paint_face(img: &mut RgbImage, slot: u32, rgb: [u8; 3]) {
    let x0 = slot * 100 + 10;
    for y in 50..135 {
        for x in x0..x0 + 85 {
            img.put_pixel(x, y, Rgb(rgb));
        }
    }
}

/// Write the rig config and one painted PNG per camera into `dir`.
fn write_scene(dir: &Path) -> (PathBuf, PathBuf, PathBuf) {
    let config_path = dir.join("rig.json");
    rig_config().write_json(&config_path).expect("write config");

    let mut cam0 = RgbImage::from_pixel(320, 240, Rgb([0, 0, 0]));
    paint_face(&mut cam0, 0, BLUE);
    paint_face(&mut cam0, 1, RED);
    paint_face(&mut cam0, 2, WHITE);
    let cam0_path = dir.join("cam0.png");
    cam0.save(&cam0_path).expect("save cam0");

    let mut cam1 = RgbImage::from_pixel(320, 240, Rgb([0, 0, 0]));
    paint_face(&mut cam1, 0, YELLOW);
    paint_face(&mut cam1, 1, ORANGE);
    paint_face(&mut cam1, 2, GREEN);
    let cam1_path = dir.join("cam1.png");
    cam1.save(&cam1_path).expect("save cam1");

    (config_path, cam0_path, cam1_path)
}

fn cubescan_cmd() -> Command {
    Command::cargo_bin("cubescan").expect("cubescan binary")
}

#[test]
fn check_config_summarizes_a_valid_rig() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (config_path, _, _) = write_scene(dir.path());

    cubescan_cmd()
        .arg("check-config")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("config is valid"))
        .stdout(predicate::str::contains("B on camera 0"));
}

#[test]
fn recognize_prints_solver_lines_and_writes_the_outcome() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (config_path, cam0_path, cam1_path) = write_scene(dir.path());
    let out_path = dir.path().join("outcome.json");

    cubescan_cmd()
        .arg("recognize")
        .arg("--config")
        .arg(&config_path)
        .arg("--frame")
        .arg(&cam0_path)
        .arg("--frame")
        .arg(&cam1_path)
        .arg("--attempts")
        .arg("2")
        .arg("--out")
        .arg(&out_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("B-BBBBBBBBB"))
        .stdout(predicate::str::contains("L-LLLLLLLLL"))
        .stdout(predicate::str::contains("F-FFFFFFFFF"));

    let raw = std::fs::read_to_string(&out_path).expect("outcome file");
    let outcome: serde_json::Value = serde_json::from_str(&raw).expect("outcome json");
    assert_eq!(outcome["success"], serde_json::json!(true));
    assert_eq!(outcome["attempts"], serde_json::json!(1));
}

#[test]
fn recognize_rejects_a_frame_count_mismatch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (config_path, cam0_path, _) = write_scene(dir.path());

    cubescan_cmd()
        .arg("recognize")
        .arg("--config")
        .arg(&config_path)
        .arg("--frame")
        .arg(&cam0_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pass one --frame per camera"));
}

#[test]
fn sample_prints_per_facelet_means() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (config_path, cam0_path, cam1_path) = write_scene(dir.path());

    cubescan_cmd()
        .arg("sample")
        .arg("--config")
        .arg(&config_path)
        .arg("--frame")
        .arg(&cam0_path)
        .arg("--frame")
        .arg(&cam1_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("face B on camera 0: center pigment B"))
        .stdout(predicate::str::contains("face L on camera 1: center pigment O"));
}
