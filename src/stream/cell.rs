//! Cell updates and the fixed stream presets.

use std::time::Duration;

use rand::Rng;

/// One cosmetic update: set cell `index` to `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    /// Target cell, always below the grid's cell count.
    pub index: usize,
    /// Two upper-case hex digits, `00` to `FF`.
    pub value: String,
    /// Whether the cell should be drawn lit.
    pub highlight: bool,
}

impl CellUpdate {
    /// Picks a uniformly random cell in `[0, cells)` and a random byte value.
    ///
    /// `cells` must be non-zero; the presets guarantee it.
    pub fn random<R: Rng>(rng: &mut R, cells: usize) -> Self {
        let byte: u8 = rng.r#gen();
        Self {
            index: rng.gen_range(0..cells),
            value: format!("{byte:02X}"),
            highlight: true,
        }
    }
}

/// Cadence and bounds of one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastSettings {
    /// Size of the index space.
    pub cells: usize,
    /// Updates written per tick.
    pub updates_per_tick: usize,
    /// Time between ticks. The first tick fires one interval after start.
    pub tick_interval: Duration,
    /// Hard cap on stream lifetime.
    pub max_duration: Duration,
}

/// A named grid on the page together with the route that animates it.
#[derive(Debug, Clone, Copy)]
pub struct CellStream {
    /// Element id prefix of the grid's cells.
    pub grid: &'static str,
    /// Route serving the SSE stream.
    pub path: &'static str,
    /// Stream cadence.
    pub settings: BroadcastSettings,
}

const TICK: Duration = Duration::from_millis(50);

/// Hero banner on the home page.
pub const HERO_GRID: CellStream = CellStream {
    grid: "hero",
    path: "/stream/hex",
    settings: BroadcastSettings {
        cells: 96,
        updates_per_tick: 1,
        tick_interval: TICK,
        max_duration: Duration::from_secs(30),
    },
};

/// Full-width backdrop lower on the home page.
pub const WIDE_GRID: CellStream = CellStream {
    grid: "wide",
    path: "/stream/hex-wide",
    settings: BroadcastSettings {
        cells: 384,
        updates_per_tick: 1,
        tick_interval: TICK,
        max_duration: Duration::from_secs(30),
    },
};

/// Dense rain effect behind the 404 page.
pub const MATRIX_RAIN: CellStream = CellStream {
    grid: "matrix",
    path: "/stream/matrix",
    settings: BroadcastSettings {
        cells: 768,
        updates_per_tick: 3,
        tick_interval: TICK,
        max_duration: Duration::from_secs(60),
    },
};

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn is_hex_pair(value: &str) -> bool {
        value.len() == 2
            && value
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
    }

    #[test]
    fn random_updates_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for stream in [HERO_GRID, WIDE_GRID, MATRIX_RAIN] {
            for _ in 0..5_000 {
                let update = CellUpdate::random(&mut rng, stream.settings.cells);
                assert!(update.index < stream.settings.cells);
                assert!(is_hex_pair(&update.value), "bad value {}", update.value);
                assert!(update.highlight);
            }
        }
    }

    #[test]
    fn values_cover_both_ends_of_the_byte_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let values: Vec<String> = (0..20_000)
            .map(|_| CellUpdate::random(&mut rng, 96).value)
            .collect();
        assert!(values.iter().any(|v| v == "00"));
        assert!(values.iter().any(|v| v == "FF"));
    }

    #[test]
    fn presets_share_the_fifty_millisecond_cadence() {
        for stream in [HERO_GRID, WIDE_GRID, MATRIX_RAIN] {
            assert_eq!(stream.settings.tick_interval, Duration::from_millis(50));
            assert!(stream.path.starts_with("/stream/"));
        }
        assert_eq!(MATRIX_RAIN.settings.updates_per_tick, 3);
        assert_eq!(MATRIX_RAIN.settings.max_duration, Duration::from_secs(60));
    }
}
