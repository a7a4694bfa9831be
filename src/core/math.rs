//! Small numeric helpers shared by cost curves and labels.

use super::constants::LOOP_EPSILON;

/// Round to three significant digits (cost and bonus display values).
pub fn precision3(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let digits = 2 - value.abs().log10().floor() as i32;
    if digits >= 0 {
        let factor = 10f64.powi(digits);
        (value * factor).round() / factor
    } else {
        let factor = 10f64.powi(-digits);
        (value / factor).round() * factor
    }
}

/// Fibonacci number with fib(0) = 0, fib(1) = 1.
pub fn fibonacci(n: u64) -> f64 {
    let (mut a, mut b) = (0.0_f64, 1.0_f64);
    for _ in 0..n {
        let next = a + b;
        a = b;
        b = next;
    }
    a
}

/// Floor of `value / divisor` with a small positive bias so exact
/// boundaries never round down.
pub fn floor_div_eps(value: f64, divisor: f64) -> u64 {
    ((value + LOOP_EPSILON) / divisor).floor().max(0.0) as u64
}

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Spell out a non-negative integer in English words ("forty-two").
pub fn number_to_words(n: u64) -> String {
    if n < 20 {
        return ONES[n as usize].to_string();
    }
    if n < 100 {
        let tens = TENS[(n / 10) as usize];
        return match n % 10 {
            0 => tens.to_string(),
            ones => format!("{}-{}", tens, ONES[ones as usize]),
        };
    }
    if n < 1000 {
        let head = format!("{} hundred", ONES[(n / 100) as usize]);
        return match n % 100 {
            0 => head,
            rest => format!("{} {}", head, number_to_words(rest)),
        };
    }
    let scales = [
        (1_000_000_000_000, "trillion"),
        (1_000_000_000, "billion"),
        (1_000_000, "million"),
        (1_000, "thousand"),
    ];
    for (scale, name) in scales {
        if n >= scale {
            let head = format!("{} {}", number_to_words(n / scale), name);
            return match n % scale {
                0 => head,
                rest => format!("{} {}", head, number_to_words(rest)),
            };
        }
    }
    n.to_string()
}

/// Capitalize the first letter ("forty-two" -> "Forty-two").
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
