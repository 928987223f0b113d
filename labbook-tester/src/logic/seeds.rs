use anyhow::{Result, bail};
use std::collections::HashSet;

pub const DEFAULT_SEED: u64 = 1337;

/// Resolve CLI seed tokens into a deduplicated seed list, in first-seen order.
///
/// Accepts decimal integers (a leading minus is dropped) and `0x` hex.
/// An empty list falls back to [`DEFAULT_SEED`].
pub fn resolve_seeds(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seen = HashSet::new();
    let mut seeds = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }
        let seed = if let Some(hex) = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
        {
            u64::from_str_radix(hex, 16).ok()
        } else if let Ok(value) = token.parse::<u64>() {
            Some(value)
        } else {
            token.parse::<i64>().ok().map(i64::unsigned_abs)
        };

        let Some(seed) = seed else {
            bail!("Unrecognized seed token: {token}");
        };
        if seen.insert(seed) {
            seeds.push(seed);
        }
    }

    if seeds.is_empty() {
        seeds.push(DEFAULT_SEED);
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn resolves_decimal_negative_and_hex() {
        let seeds = resolve_seeds(&tokens(&["42", "-7", "0xff"])).unwrap();
        assert_eq!(seeds, vec![42, 7, 255]);
    }

    #[test]
    fn drops_duplicates_keeping_order() {
        let seeds = resolve_seeds(&tokens(&["5", "0x5", "3", "5"])).unwrap();
        assert_eq!(seeds, vec![5, 3]);
    }

    #[test]
    fn empty_input_uses_default() {
        assert_eq!(resolve_seeds(&[]).unwrap(), vec![DEFAULT_SEED]);
    }

    #[test]
    fn rejects_words() {
        let err = resolve_seeds(&tokens(&["orange"])).unwrap_err();
        assert!(err.to_string().contains("orange"));
    }
}
