use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//
// Walks two-column strips from the right edge to the left, upwards then downwards
// alternately, right module before left within a row. The vertical timing column is
// skipped. Reserved modules are yielded too; the caller skips them.
//------------------------------------------------------------------------------

pub struct EncRegionIter {
    r: i16,
    c: i16,
    width: i16,
}

const VERT_TIMING_COL: i16 = 6;

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { r: w - 1, c: w - 1, width: w }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.c < 0 {
            return None;
        }
        let adjusted_col = if self.c <= VERT_TIMING_COL { self.c + 1 } else { self.c };
        let res = (self.r, self.c);
        let col_type = (self.width - adjusted_col) % 4;
        match col_type {
            2 if self.r > 0 => {
                self.r -= 1;
                self.c += 1;
            }
            0 if self.r < self.width - 1 => {
                self.r += 1;
                self.c += 1;
            }
            0 | 2 if self.c == VERT_TIMING_COL + 1 => {
                self.c -= 2;
            }
            _ => {
                self.c -= 1;
            }
        }
        Some(res)
    }
}

#[cfg(test)]
mod iter_tests {
    use std::collections::HashSet;

    use super::EncRegionIter;
    use crate::common::metadata::Version;

    #[test]
    fn test_enc_region_iter_covers_grid() {
        for ver in Version::all() {
            let w = ver.width() as i16;
            let coords = EncRegionIter::new(ver).collect::<Vec<_>>();
            let unique = coords.iter().copied().collect::<HashSet<_>>();
            assert_eq!(coords.len(), unique.len(), "Duplicate coords for version {}", *ver);
            assert_eq!(coords.len() as i16, w * (w - 1));
            assert!(coords.iter().all(|&(r, c)| c != 6 && (0..w).contains(&r)));
        }
    }

    #[test]
    fn test_enc_region_iter_order() {
        let ver = Version::new(1).unwrap();
        let coords = EncRegionIter::new(ver).collect::<Vec<_>>();
        // Upwards through the rightmost strip
        assert_eq!(coords[..4], [(20, 20), (20, 19), (19, 20), (19, 19)]);
        // Turn at the top into the next strip, now downwards
        assert_eq!(coords[40..44], [(0, 20), (0, 19), (0, 18), (0, 17)]);
        assert_eq!(coords[44..46], [(1, 18), (1, 17)]);
        // Strip left of the timing column starts right after column 7
        let pos = coords.iter().position(|&rc| rc == (0, 7)).unwrap();
        assert_eq!(coords[pos + 1], (0, 5));
        assert_eq!(coords[pos + 2], (0, 4));
        assert_eq!(coords.last(), Some(&(20, 0)));
    }
}
