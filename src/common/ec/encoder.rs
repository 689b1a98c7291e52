use super::galois::{gf_mul, gf_pow_alpha};

// Generator polynomial (x - a^0)(x - a^1)...(x - a^(n-1)), coefficients highest degree first.
// The leading coefficient is always 1.
pub(crate) fn generator_polynomial(degree: usize) -> Vec<u8> {
    let mut poly = Vec::with_capacity(degree + 1);
    poly.push(1u8);
    for i in 0..degree {
        let root = gf_pow_alpha(i);
        let mut next = vec![0u8; poly.len() + 1];
        for (j, &coeff) in poly.iter().enumerate() {
            next[j] ^= coeff;
            next[j + 1] ^= gf_mul(coeff, root);
        }
        poly = next;
    }
    poly
}

// ECC: Error Correction Codeword generator
//
// Remainder of data(x) * x^n divided by the generator polynomial, computed with an n-cell
// shift register. The remainder coefficients are the ecc.
pub(crate) fn ecc(block: &[u8], ecc_count: usize) -> Vec<u8> {
    debug_assert!(ecc_count > 0, "Ecc count should be positive");

    let gen_poly = generator_polynomial(ecc_count);
    let mut reg = vec![0u8; ecc_count];

    for &b in block {
        let factor = b ^ reg[0];
        reg.rotate_left(1);
        reg[ecc_count - 1] = 0;
        if factor == 0 {
            continue;
        }
        for (r, &g) in reg.iter_mut().zip(gen_poly[1..].iter()) {
            *r ^= gf_mul(g, factor);
        }
    }

    reg
}
