//! Backup codes for account recovery when the authenticator device is unavailable.
//!
//! Codes are generated here and handed to the caller in their stored form, a
//! single comma-joined string. Tracking which codes were already used belongs
//! to whoever persists them.

use super::random::SecureRandom;

/// Number of backup codes per batch
pub const BACKUP_CODE_COUNT: usize = 10;

/// Digits in each backup code
pub const BACKUP_CODE_DIGITS: usize = 8;

const BACKUP_CODE_MODULUS: u32 = 100_000_000;

/// Separator used in the stored form
pub const BACKUP_CODE_SEPARATOR: char = ',';

/// Generate a batch of backup codes, joined for storage
pub fn generate_backup_codes(random: &dyn SecureRandom) -> String {
    let codes: Vec<String> = (0..BACKUP_CODE_COUNT).map(|_| generate_single_code(random)).collect();
    codes.join(&BACKUP_CODE_SEPARATOR.to_string())
}

fn generate_single_code(random: &dyn SecureRandom) -> String {
    let mut bytes = [0u8; 4];
    random.fill(&mut bytes);
    let value = u32::from_le_bytes(bytes) % BACKUP_CODE_MODULUS;
    format!("{value:0width$}", width = BACKUP_CODE_DIGITS)
}

/// Split the stored form back into individual codes
pub fn split_backup_codes(stored: &str) -> Vec<String> {
    stored
        .split(BACKUP_CODE_SEPARATOR)
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::mfa::random::{OsSecureRandom, RepeatingRandom};

    #[test]
    fn test_generate_backup_codes_format() {
        let stored = generate_backup_codes(&OsSecureRandom);
        let codes = split_backup_codes(&stored);

        assert_eq!(codes.len(), BACKUP_CODE_COUNT);
        for code in &codes {
            assert_eq!(code.len(), BACKUP_CODE_DIGITS);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }

        // Check uniqueness
        let mut unique_codes = codes.clone();
        unique_codes.sort();
        unique_codes.dedup();
        assert_eq!(unique_codes.len(), codes.len());
    }

    #[test]
    fn test_small_values_are_zero_padded() {
        let stored = generate_backup_codes(&RepeatingRandom::new(vec![7, 0, 0, 0]));
        let codes = split_backup_codes(&stored);
        assert_eq!(codes.len(), BACKUP_CODE_COUNT);
        assert!(codes.iter().all(|c| c == "00000007"));
    }

    #[test]
    fn test_large_values_stay_eight_digits() {
        // u32::MAX = 4294967295
        let stored = generate_backup_codes(&RepeatingRandom::new(vec![0xFF; 4]));
        assert!(split_backup_codes(&stored).iter().all(|c| c == "94967295"));
    }

    #[test]
    fn test_split_backup_codes_tolerates_whitespace() {
        assert_eq!(split_backup_codes("12345678, 87654321,,"), vec!["12345678", "87654321"]);
        assert!(split_backup_codes("").is_empty());
    }
}
