use std::path::PathBuf;

use anyhow::{Context, Result};

use rusty_shutter::data::synth::{write_raw_file, SyntheticExif};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Pick from `items` with a bias towards the front (squared uniform).
    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let u = self.next_f64();
        let i = ((u * u) * items.len() as f64) as usize;
        &items[i.min(items.len() - 1)]
    }
}

// Unreduced the way cameras store them.
const EXPOSURES: [(u32, u32); 14] = [
    (10, 1250), (10, 2500), (10, 1600), (10, 600), (10, 4000), (10, 800),
    (10, 320), (10, 8000), (10, 2000), (10, 1000), (10, 300), (10, 80),
    (10, 40), (20, 10),
];
const ISOS: [u16; 12] = [100, 200, 400, 800, 160, 1600, 320, 640, 3200, 250, 500, 6400];
const FOCALS: [(u32, u32); 12] = [
    (500, 10), (350, 10), (850, 10), (240, 10), (700, 10), (2000, 10),
    (1050, 10), (280, 10), (1350, 10), (600, 10), (180, 10), (4000, 10),
];
const APERTURES: [(u32, u32); 11] = [
    (28, 10), (40, 10), (56, 10), (18, 10), (80, 10), (14, 10),
    (110, 10), (35, 10), (45, 10), (63, 10), (160, 10),
];

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "sample_shots".to_string()));
    let count: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid file count {n:?}"))?,
        None => 200,
    };

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let mut rng = SimpleRng::new(42);

    for (i, sub) in ["day1", "day2", "day2/extra"].iter().cycle().take(count).enumerate() {
        let dir = out_dir.join(sub);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating {}", dir.display()))?;

        let (num, den) = *rng.pick(&EXPOSURES);
        let mut exif = SyntheticExif::new()
            .exposure(num, den)
            .iso(*rng.pick(&ISOS));
        let (num, den) = *rng.pick(&FOCALS);
        exif = exif.focal(num, den);
        // some lenses report no aperture
        if rng.next_f64() > 0.05 {
            let (num, den) = *rng.pick(&APERTURES);
            exif = exif.aperture(num, den);
        }

        let ext = if i % 7 == 0 { "NEF" } else { "nef" };
        let path = dir.join(format!("DSC_{i:04}.{ext}"));
        write_raw_file(&path, &exif).with_context(|| format!("writing {}", path.display()))?;
    }

    // decoys the harvester must ignore
    std::fs::write(out_dir.join("README.txt"), "synthetic RAW files\n")?;
    std::fs::write(out_dir.join("preview.jpg"), [0xFF, 0xD8, 0xFF, 0xD9])?;

    println!("Wrote {count} synthetic RAW files under {}", out_dir.display());
    Ok(())
}
