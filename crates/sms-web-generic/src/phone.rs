/// Local trunk prefix every Iranian mobile number starts with.
pub const MOBILE_PREFIX: &str = "09";
pub const MOBILE_LEN: usize = 11;

/// True for `09` followed by exactly nine ASCII digits.
pub fn is_valid_mobile(phone: &str) -> bool {
    phone.len() == MOBILE_LEN
        && phone.starts_with(MOBILE_PREFIX)
        && phone.bytes().all(|b| b.is_ascii_digit())
}

/// Mask a phone number for logging, keeping the first four and last two characters.
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 6 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 6), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_numbers() {
        assert!(is_valid_mobile("09123456789"));
        assert!(is_valid_mobile("09000000000"));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!is_valid_mobile("0912345678"));
        assert!(!is_valid_mobile("091234567890"));
        assert!(!is_valid_mobile(""));
    }

    #[test]
    fn rejects_wrong_prefix() {
        assert!(!is_valid_mobile("08123456789"));
        assert!(!is_valid_mobile("19123456789"));
        assert!(!is_valid_mobile("+9891234567"));
    }

    #[test]
    fn rejects_non_digits() {
        assert!(!is_valid_mobile("09abcdefghi"));
        assert!(!is_valid_mobile("0912345678 "));
        assert!(!is_valid_mobile("09-23456789"));
        // Persian digits are not ASCII digits.
        assert!(!is_valid_mobile("09۱۲۳۴۵۶۷۸۹"));
    }

    #[test]
    fn masks_middle_digits() {
        assert_eq!(mask_phone("09123456789"), "0912*****89");
        assert_eq!(mask_phone("0912"), "****");
    }
}
