//! Random color maps, handy for previews and stress tests.
use glam::Vec2;
use rand::Rng;

use crate::error::Result;
use crate::map::{Color8, ColorMap, ColorMapEntry};

/// Maps the top 24 bits of `bits` onto [0, 1) without rounding up to 1.
#[inline]
fn unit_f32(bits: u32) -> f32 {
    (bits >> 8) as f32 / (1u32 << 24) as f32
}

#[inline]
fn random_coord(rng: &mut dyn Rng) -> f32 {
    unit_f32(rng.next_u32())
}

/// Builds a map of `count` entries at uniformly random positions with random opaque
/// colors. Fails if `idw_exponent` is out of range.
pub fn random_color_map(
    count: usize,
    idw_exponent: f32,
    rng: &mut dyn Rng,
) -> Result<ColorMap> {
    let mut map = ColorMap::with_capacity(count).with_idw_exponent(idw_exponent)?;
    for _ in 0..count {
        let p = Vec2::new(random_coord(rng), random_coord(rng));
        let [r, g, b, _] = rng.next_u32().to_le_bytes();
        map.push(ColorMapEntry::new(p, Color8::rgb(r, g, b))?);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn unit_f32_covers_half_open_interval() {
        assert_eq!(unit_f32(0), 0.0);
        assert_eq!(unit_f32(u32::MAX), 1.0 - 1.0 / (1u32 << 24) as f32);
        assert!(unit_f32(u32::MAX) < 1.0);
        assert_eq!(unit_f32(1 << 31), 0.5);
    }

    #[test]
    fn positions_stay_inside_unit_square() {
        let mut rng = StdRng::seed_from_u64(9);
        let map = random_color_map(256, 2.0, &mut rng).unwrap();
        for e in &map {
            let p = e.position();
            assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y), "{p}");
        }
    }

    #[test]
    fn count_and_exponent_are_respected() {
        let mut rng = StdRng::seed_from_u64(42);
        let map = random_color_map(32, 6.0, &mut rng).unwrap();
        assert_eq!(map.len(), 32);
        assert_eq!(map.idw_exponent(), 6.0);
        assert!(map.iter().all(|e| e.weight() == 255));
    }

    #[test]
    fn zero_count_gives_empty_map() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_color_map(0, 2.0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn bad_exponent_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_color_map(4, 50.0, &mut rng).is_err());
    }

    #[test]
    fn determinism_for_same_seed() {
        let mut rng_a = StdRng::seed_from_u64(123);
        let mut rng_b = StdRng::seed_from_u64(123);
        let a = random_color_map(16, 2.0, &mut rng_a).unwrap();
        let b = random_color_map(16, 2.0, &mut rng_b).unwrap();
        assert_eq!(a, b);

        let mut rng_c = StdRng::seed_from_u64(456);
        let c = random_color_map(16, 2.0, &mut rng_c).unwrap();
        assert_ne!(a, c);
    }
}
