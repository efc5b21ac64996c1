const ONES: [&str; 20] = [
    "",
    "One",
    "Two",
    "Three",
    "Four",
    "Five",
    "Six",
    "Seven",
    "Eight",
    "Nine",
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const SCALES: [(u64, &str); 3] = [
    (1_000_000, "Million"),
    (1_000, "Thousand"),
    (100, "Hundred"),
];

/// Spells the whole part of an amount in English, e.g. `1250.75` ->
/// `"One Thousand Two Hundred Fifty"`. Amounts of a billion or more read
/// `"Number too large"`; negative amounts are prefixed with `"Minus"`.
pub fn number_to_words(amount: f64) -> String {
    let whole = amount.abs().floor();
    if whole >= 1_000_000_000.0 {
        return "Number too large".to_string();
    }

    let words = match whole as u64 {
        0 => "Zero".to_string(),
        n => spell(n),
    };

    if amount <= -1.0 {
        format!("Minus {words}")
    } else {
        words
    }
}

fn spell(n: u64) -> String {
    if n < 20 {
        return ONES[n as usize].to_string();
    }
    if n < 100 {
        let tens = TENS[(n / 10) as usize];
        return match n % 10 {
            0 => tens.to_string(),
            rest => format!("{tens} {}", ONES[rest as usize]),
        };
    }

    for (scale, name) in SCALES {
        if n >= scale {
            let head = if scale == 100 {
                ONES[(n / scale) as usize].to_string()
            } else {
                spell(n / scale)
            };
            return match n % scale {
                0 => format!("{head} {name}"),
                rest => format!("{head} {name} {}", spell(rest)),
            };
        }
    }

    unreachable!("values below 100 return early")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers() {
        assert_eq!(number_to_words(0.0), "Zero");
        assert_eq!(number_to_words(0.99), "Zero");
        assert_eq!(number_to_words(7.0), "Seven");
        assert_eq!(number_to_words(19.0), "Nineteen");
        assert_eq!(number_to_words(40.0), "Forty");
        assert_eq!(number_to_words(42.0), "Forty Two");
    }

    #[test]
    fn test_scales() {
        assert_eq!(number_to_words(100.0), "One Hundred");
        assert_eq!(number_to_words(1250.75), "One Thousand Two Hundred Fifty");
        assert_eq!(
            number_to_words(2_000_019.0),
            "Two Million Nineteen"
        );
        assert_eq!(
            number_to_words(999_999_999.0),
            "Nine Hundred Ninety Nine Million Nine Hundred Ninety Nine Thousand Nine Hundred Ninety Nine"
        );
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(number_to_words(1_000_000_000.0), "Number too large");
        assert_eq!(number_to_words(-100.0), "Minus One Hundred");
    }
}
