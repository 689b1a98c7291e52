use std::sync::OnceLock;

// GF(256) arithmetic over the primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

const PRIMITIVE_POLY: u16 = 0x11D;

pub(crate) struct GaloisTables {
    // Doubled so that log[a] + log[b] never needs a modulo
    pub exp: [u8; 512],
    pub log: [u8; 256],
}

fn build_tables() -> GaloisTables {
    let mut exp = [0u8; 512];
    let mut log = [0u8; 256];

    let mut x: u16 = 1;
    for i in 0..255 {
        exp[i] = x as u8;
        exp[i + 255] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE_POLY;
        }
    }
    exp[510] = exp[0];
    exp[511] = exp[1];

    GaloisTables { exp, log }
}

// Built on first use and read-only afterwards
pub(crate) fn tables() -> &'static GaloisTables {
    static TABLES: OnceLock<GaloisTables> = OnceLock::new();
    TABLES.get_or_init(build_tables)
}

pub(crate) fn gf_mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let t = tables();
    t.exp[t.log[a as usize] as usize + t.log[b as usize] as usize]
}

// alpha^i
pub(crate) fn gf_pow_alpha(i: usize) -> u8 {
    tables().exp[i % 255]
}
