// GF(256) arithmetic
//------------------------------------------------------------------------------

// Reduction polynomial x^8 + x^4 + x^3 + x^2 + 1, expressed through the
// recurrence exp[i] = exp[i-4] ^ exp[i-5] ^ exp[i-6] ^ exp[i-8].
const fn build_exp_table() -> [u8; 256] {
    let mut exp = [0u8; 256];
    let mut i = 0;
    while i < 8 {
        exp[i] = 1 << i;
        i += 1;
    }
    while i < 256 {
        exp[i] = exp[i - 4] ^ exp[i - 5] ^ exp[i - 6] ^ exp[i - 8];
        i += 1;
    }
    exp
}

const fn build_log_table(exp: &[u8; 256]) -> [u8; 256] {
    let mut log = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        log[exp[i] as usize] = i as u8;
        i += 1;
    }
    log
}

const TABLES: ([u8; 256], [u8; 256]) = {
    let exp = build_exp_table();
    let log = build_log_table(&exp);
    (exp, log)
};

pub static EXP_TABLE: [u8; 256] = TABLES.0;
pub static LOG_TABLE: [u8; 256] = TABLES.1;

/// Antilog of `n`, reduced modulo 255; negative exponents wrap forward.
pub fn exp(n: i32) -> u8 {
    EXP_TABLE[n.rem_euclid(255) as usize]
}

/// Discrete log of a nonzero field element.
pub fn log(n: u8) -> u8 {
    debug_assert!(n >= 1, "Log of zero is undefined");
    LOG_TABLE[n as usize]
}


// Polynomial over GF(256)
//------------------------------------------------------------------------------

/// Field-element coefficients, highest degree first. Leading zeros are
/// stripped on construction; the zero polynomial has no coefficients.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Polynomial {
    coeffs: Vec<u8>,
}

impl Polynomial {
    /// Builds a polynomial from `coeffs`, multiplied by x^`shift`.
    pub fn new(coeffs: &[u8], shift: usize) -> Self {
        let offset = coeffs.iter().position(|&c| c != 0).unwrap_or(coeffs.len());
        let mut stripped = Vec::with_capacity(coeffs.len() - offset + shift);
        stripped.extend_from_slice(&coeffs[offset..]);
        stripped.resize(coeffs.len() - offset + shift, 0);
        Self { coeffs: stripped }
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn coeffs(&self) -> &[u8] {
        &self.coeffs
    }

    pub fn multiply(&self, other: &Polynomial) -> Polynomial {
        if self.coeffs.is_empty() || other.coeffs.is_empty() {
            return Polynomial { coeffs: vec![] };
        }

        let mut num = vec![0u8; self.len() + other.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in other.coeffs.iter().enumerate() {
                // log(0) is undefined, zero operands contribute nothing
                if a != 0 && b != 0 {
                    num[i + j] ^= exp(log(a) as i32 + log(b) as i32);
                }
            }
        }
        Polynomial::new(&num, 0)
    }

    /// Remainder of long division by `divisor`, the systematic Reed-Solomon
    /// remainder computation.
    pub fn rem(&self, divisor: &Polynomial) -> Polynomial {
        debug_assert!(!divisor.coeffs.is_empty(), "Division by the zero polynomial");

        let mut num = self.coeffs.clone();
        let mut lead = 0;
        loop {
            while lead < num.len() && num[lead] == 0 {
                lead += 1;
            }
            if num.len() - lead < divisor.len() {
                return Polynomial::new(&num[lead..], 0);
            }
            let ratio = log(num[lead]) as i32 - log(divisor.coeffs[0]) as i32;
            for (u, &d) in num[lead..].iter_mut().zip(divisor.coeffs.iter()) {
                if d != 0 {
                    *u ^= exp(log(d) as i32 + ratio);
                }
            }
        }
    }

    /// Error correction generator polynomial
    /// g(x) = (x - exp(0)) (x - exp(1)) ... (x - exp(n-1)).
    pub fn generator(ec_len: usize) -> Polynomial {
        let mut g = Polynomial { coeffs: vec![1] };
        for i in 0..ec_len {
            g = g.multiply(&Polynomial { coeffs: vec![1, exp(i as i32)] });
        }
        g
    }
}
