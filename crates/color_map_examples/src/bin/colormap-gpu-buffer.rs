//! Encodes a map for GPU upload and checks the records against the CPU evaluator with
//! a Rust port of `WGSL_COLOR_AT` that reads only the flat buffer. The WGSL itself is
//! checked for layout agreement by the `wgsl_layout_matches_rust_records` test in
//! `color_map::transfer`.
use color_map::prelude::*;
use color_map_examples::init_tracing;
use glam::{Vec2, Vec4};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(99);

    for (count, exponent) in [(0, 2.0), (5, 2.0), (24, 5.0)] {
        let map = random_color_map(count, exponent, &mut rng)?;
        let gpu = GpuColorMap::encode(&map);
        let params = gpu.params();
        info!(
            "{} entries -> {} records, {} bytes, params {:?}",
            map.len(),
            gpu.record_count(),
            gpu.as_bytes().len(),
            params.as_bytes()
        );

        let mut worst = 0.0f32;
        for j in 0..32 {
            for i in 0..32 {
                let p = Vec2::new(i as f32 / 31.0, j as f32 / 31.0);
                let diff = (shader_color_at(&gpu, p) - map.color_at(p)).abs().max_element();
                worst = worst.max(diff);
            }
        }
        info!("max |gpu - cpu| = {worst:e}");
        anyhow::ensure!(worst < 1.0e-5, "buffer evaluation diverged from CPU");
    }

    info!("WGSL snippet is {} bytes", WGSL_COLOR_AT.len());
    Ok(())
}

/// Rust port of `WGSL_COLOR_AT`, reading only what the shader would see.
fn shader_color_at(gpu: &GpuColorMap, pos: Vec2) -> Vec4 {
    if gpu.count == 0 {
        return Vec4::from_array(gpu.entries[0].color);
    }
    let mut numerator = Vec4::ZERO;
    let mut denominator = 0.0;
    for entry in &gpu.entries[..gpu.count as usize] {
        let mut d = Vec2::from_array(entry.position).distance_squared(pos) + IDW_EPSILON;
        if gpu.idw_exponent != 2.0 {
            d = d.powf(gpu.idw_exponent * 0.5);
        }
        d += IDW_EPSILON;
        let weight = (1.0 / d) * entry.color[3];
        let [r, g, b, _] = entry.color;
        numerator += weight * Vec4::new(r, g, b, 1.0);
        denominator += weight;
    }
    numerator / denominator
}
