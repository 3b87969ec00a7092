//! Small-integer number theory used to classify element orders.
//!
//! Operands are group orders (small integers), so everything here is plain
//! `u64` arithmetic with `u128` intermediates for the modular steps.

use std::sync::OnceLock;

/// Modular exponentiation: base^exp mod m using the binary method.
fn mod_pow(base: u64, mut exp: u64, m: u64) -> u64 {
    if m == 1 {
        return 0;
    }
    let modulus = m as u128;
    let mut result = 1u128;
    let mut b = (base % m) as u128;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * b % modulus;
        }
        exp >>= 1;
        b = b * b % modulus;
    }
    result as u64
}

/// Deterministic Miller-Rabin primality test for `u64`.
///
/// The witness set {2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37} is known to
/// be exact for all 64-bit integers.
pub fn is_prime(n: usize) -> bool {
    // Element orders are small; nearly every call hits the sieved table.
    if n < 256 {
        return small_primes().binary_search(&n).is_ok();
    }
    let n = n as u64;
    for p in [2u64, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37] {
        if n % p == 0 {
            return false;
        }
    }

    // Write n-1 as 2^r * d with d odd.
    let mut d = n - 1;
    let mut r = 0u32;
    while d % 2 == 0 {
        d >>= 1;
        r += 1;
    }

    'witness: for a in [2u64, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37] {
        let mut x = mod_pow(a, d, n);
        if x == 1 || x == n - 1 {
            continue 'witness;
        }
        for _ in 0..r - 1 {
            x = mod_pow(x, 2, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Prime factors of `n` with multiplicity, smallest first, by trial division.
/// Returns an empty list for `n < 2`.
pub fn factorize(n: usize) -> Vec<usize> {
    let mut factors = Vec::new();
    let mut remaining = n;
    let mut divisor = 2usize;
    while divisor * divisor <= remaining {
        while remaining % divisor == 0 {
            factors.push(divisor);
            remaining /= divisor;
        }
        divisor += if divisor == 2 { 1 } else { 2 };
    }
    if remaining > 1 {
        factors.push(remaining);
    }
    factors
}

/// True iff `n = p^k` for a single prime `p` and `k >= 1`.
pub fn is_prime_power(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    let factors = factorize(n);
    factors.iter().all(|&p| p == factors[0])
}

/// Primes below 256, computed once per process.
///
/// Group orders here are small-to-moderate, so prime-indexed power marking
/// only ever consults this table.
pub fn small_primes() -> &'static [usize] {
    static PRIMES: OnceLock<Vec<usize>> = OnceLock::new();
    PRIMES.get_or_init(|| sieve_primes(256))
}

/// Sieve of Eratosthenes up to (and excluding) `limit`.
fn sieve_primes(limit: usize) -> Vec<usize> {
    if limit < 3 {
        return Vec::new();
    }
    let mut is_prime = vec![true; limit];
    is_prime[0] = false;
    is_prime[1] = false;
    let mut i = 2;
    while i * i < limit {
        if is_prime[i] {
            let mut j = i * i;
            while j < limit {
                is_prime[j] = false;
                j += i;
            }
        }
        i += 1;
    }
    is_prime
        .iter()
        .enumerate()
        .filter(|(_, &p)| p)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_primality() {
        let primes = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 97, 101, 251];
        for p in primes {
            assert!(is_prime(p), "{} is prime", p);
        }
        for n in [0, 1, 4, 6, 9, 15, 21, 25, 49, 91, 100, 121, 255] {
            assert!(!is_prime(n), "{} is composite", n);
        }
    }

    #[test]
    fn larger_primality() {
        assert!(is_prime(104_729)); // 10000th prime
        assert!(!is_prime(104_730));
        assert!(!is_prime(3_215_031_751)); // strong pseudoprime to bases 2,3,5,7
    }

    #[test]
    fn factorization_smallest_first() {
        assert_eq!(factorize(1), Vec::<usize>::new());
        assert_eq!(factorize(2), vec![2]);
        assert_eq!(factorize(12), vec![2, 2, 3]);
        assert_eq!(factorize(360), vec![2, 2, 2, 3, 3, 5]);
        assert_eq!(factorize(97), vec![97]);
    }

    #[test]
    fn prime_powers() {
        for n in [2, 3, 4, 8, 9, 27, 32, 121, 125, 128] {
            assert!(is_prime_power(n), "{} is a prime power", n);
        }
        for n in [0, 1, 6, 12, 36, 100, 210] {
            assert!(!is_prime_power(n), "{} is not a prime power", n);
        }
    }

    #[test]
    fn prime_table_matches_is_prime() {
        let table = small_primes();
        assert_eq!(table.first(), Some(&2));
        assert!(table.iter().all(|&p| is_prime(p)));
        assert_eq!(table.len(), (0..256).filter(|&n| is_prime(n)).count());
    }
}
