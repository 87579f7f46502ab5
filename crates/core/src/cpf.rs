//! # CPF Module
//!
//! Validation and normalization of the Brazilian individual taxpayer ID.
//!
//! A CPF has 9 base digits followed by two check digits, each computed as a
//! weighted sum modulo 11 over the digits before it.
//!
//! # Examples
//! ```
//! use branchbank_core::cpf;
//!
//! assert!(cpf::is_valid("111.444.777-35"));
//! assert!(!cpf::is_valid("12345678900"));
//! assert_eq!(cpf::normalize("111.444.777-35"), "11144477735");
//! ```

/// Number of digits in a normalized CPF
pub const CPF_LEN: usize = 11;

/// Strip everything that is not an ASCII digit.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Check a CPF, with or without `.`/`-` punctuation.
///
/// Never fails: malformed input simply returns `false`.
pub fn is_valid(raw: &str) -> bool {
    let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != CPF_LEN {
        return false;
    }

    // 000.000.000-00, 111.111.111-11, ... pass the checksum but are not issued
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    digits[9] == check_digit(&digits[..9]) && digits[10] == check_digit(&digits[..10])
}

/// Weighted mod-11 check digit over `digits`, weights descending to 2.
fn check_digit(digits: &[u32]) -> u32 {
    let top_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (top_weight - i as u32))
        .sum();

    let digit = 11 - (sum % 11);
    if digit >= 10 {
        0
    } else {
        digit
    }
}

/// Render a CPF as `XXX.XXX.XXX-XX`.
///
/// Input that does not normalize to 11 digits is returned normalized but
/// otherwise untouched.
pub fn format(raw: &str) -> String {
    let digits = normalize(raw);
    if digits.len() != CPF_LEN {
        return digits;
    }
    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}
