//! Recognize a synthetic scrambled cube without touching any cameras.
//!
//! Paints two fake camera frames in HSV, runs the full recognition loop
//! over them and prints the solver lines. `RUST_LOG=debug` shows the
//! attempt pacing and classification chatter.

use cubescan::capture::{NullIlluminator, StillSource};
use cubescan::config::{CameraBankConfig, FaceLayout, LightingConfig, RigConfig};
use cubescan::core::HsvFrame;
use cubescan::recognize::{Recognizer, DEFAULT_MAX_ATTEMPTS};
use cubescan::{ClassifyParams, FaceId};

const BLUE: [u8; 3] = [110, 200, 200];
const RED: [u8; 3] = [175, 200, 200];
const WHITE: [u8; 3] = [90, 40, 200];
const YELLOW: [u8; 3] = [30, 200, 200];
const ORANGE: [u8; 3] = [8, 200, 200];
const GREEN: [u8; 3] = [70, 200, 200];

// Sticker swaps between faces; pairwise swaps keep nine stickers per
// pigment, so the scramble still passes the tally.
const SWAPS: [((usize, usize), (usize, usize)); 3] = [
    ((0, 0), (3, 0)),
    ((1, 2), (5, 2)),
    ((2, 8), (4, 8)),
];

fn grid(slot: u32) -> [[u32; 2]; 9] {
    std::array::from_fn(|i| {
        [
            20 + slot * 100 + (i as u32 % 3) * 30,
            60 + (i as u32 / 3) * 30,
        ]
    })
}

fn synthetic_config() -> RigConfig {
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
            sources: vec!["synthetic://0".into(), "synthetic://1".into()],
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

fn paint_scene(config: &RigConfig) -> [HsvFrame; 2] {
    let mut stickers = [
        [BLUE; 9],
        [RED; 9],
        [WHITE; 9],
        [YELLOW; 9],
        [ORANGE; 9],
        [GREEN; 9],
    ];
    for ((face_a, idx_a), (face_b, idx_b)) in SWAPS {
        let tmp = stickers[face_a][idx_a];
        stickers[face_a][idx_a] = stickers[face_b][idx_b];
        stickers[face_b][idx_b] = tmp;
    }

    let mut frames = [
        HsvFrame::solid(320, 240, [0, 0, 0]),
        HsvFrame::solid(320, 240, [0, 0, 0]),
    ];
    for (layout, pigments) in config.faces.iter().zip(stickers) {
        let frame = &mut frames[layout.camera];
        for (&[x, y], pigment) in layout.facelets.iter().zip(pigments) {
            let (x, y) = (x as usize, y as usize);
            frame.fill_rect(x - 5, y - 5, x + 6, y + 6, pigment);
        }
    }
    frames
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = synthetic_config();
    let [cam0, cam1] = paint_scene(&config);
    let mut sources = [StillSource::new(cam0), StillSource::new(cam1)];

    let mut recognizer = Recognizer::from_config(&config)?;
    let outcome = recognizer.recognize(
        &mut sources,
        &mut NullIlluminator,
        DEFAULT_MAX_ATTEMPTS,
        None,
    );

    println!(
        "{} after {} attempt(s)",
        if outcome.success { "recognized" } else { "failed" },
        outcome.attempts
    );
    for line in outcome.cube.solver_lines() {
        println!("{line}");
    }
    Ok(())
}
