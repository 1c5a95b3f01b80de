/// Derive the 8-digit card number from the owner's externally-visible id token:
/// strip all non-digit characters, keep the last 8 digits, left-pad with zeros.
pub fn derive_card_number(owner_token: &str) -> String {
    let digits: String = tail_digits(owner_token, 8);
    format!("{digits:0>8}")
}

fn tail_digits(input: &str, n: usize) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let start = digits.len().saturating_sub(n);
    digits[start..].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_last_eight_digits() {
        assert_eq!(derive_card_number("ID-1234567890"), "34567890");
        assert_eq!(derive_card_number("+1 (555) 123-4567"), "51234567");
    }

    #[test]
    fn test_pads_short_tokens() {
        assert_eq!(derive_card_number("42"), "00000042");
        assert_eq!(derive_card_number("C-7"), "00000007");
    }

    #[test]
    fn test_ignores_non_digits() {
        assert_eq!(derive_card_number("AB-12x34y56z78"), "12345678");
    }

    #[test]
    fn test_empty_token_is_all_zeros() {
        assert_eq!(derive_card_number("no digits here"), "00000000");
    }
}
