//! Number parsing
//!
//! All parsers accept digits in some radix with an optional `.` fraction.
//! Integer targets round the fraction half away from zero, so `"10.5"` reads
//! as 11 and `"-0x567.8"` as -0x568. Anything that does not fit the target
//! type, or is not a number at all, gives `None`.

/// Validated digits of an unsigned number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Magnitude<'a> {
    text: &'a str,
    whole: &'a str,
    fraction: &'a str,
    radix: u32,
}

impl<'a> Magnitude<'a> {
    /// Split `digits` at the `.`; `None` unless both parts are valid in `radix`
    pub fn parse(digits: &'a str, radix: u32) -> Option<Self> {
        if !(2..=36).contains(&radix) {
            return None;
        }
        let (whole, fraction) = match digits.split_once('.') {
            Some((_, "")) => return None,
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };
        let valid = |part: &str| part.chars().all(|c| c.is_digit(radix));
        if whole.is_empty() || !valid(whole) || !valid(fraction) {
            return None;
        }
        Some(Self {
            text: digits,
            whole,
            fraction,
            radix,
        })
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    pub fn radix(&self) -> u32 {
        self.radix
    }

    pub fn whole_digits(&self) -> impl DoubleEndedIterator<Item = u32> + 'a {
        let radix = self.radix;
        self.whole.chars().filter_map(move |c| c.to_digit(radix))
    }

    pub fn fraction_digits(&self) -> impl DoubleEndedIterator<Item = u32> + 'a {
        let radix = self.radix;
        self.fraction.chars().filter_map(move |c| c.to_digit(radix))
    }

    /// The integral part, if it fits in a `u128`
    pub fn whole(&self) -> Option<u128> {
        let radix = u128::from(self.radix);
        self.whole_digits()
            .try_fold(0u128, |acc, d| acc.checked_mul(radix)?.checked_add(u128::from(d)))
    }

    /// True if the fraction is at least one half.
    ///
    /// One half is `0.h000...` in an even radix (`h = radix / 2`) and
    /// `0.hhh...` repeating in an odd one (`h = (radix - 1) / 2`); the digits
    /// are compared against it one by one.
    pub fn rounds_up(&self) -> bool {
        let even = self.radix % 2 == 0;
        let half_digit = |i: usize| match (even, i) {
            (true, 0) => self.radix / 2,
            (true, _) => 0,
            (false, _) => (self.radix - 1) / 2,
        };
        let mut seen = 0;
        for (i, digit) in self.fraction_digits().enumerate() {
            let half = half_digit(i);
            if digit != half {
                return digit > half;
            }
            seen += 1;
        }
        // every digit matched: exactly one half in an even radix, just below it in an odd one
        seen > 0 && even
    }
}

/// A numeric type the parsers can produce
pub trait ParsedNumber: Sized {
    /// Whether the type can hold negative values
    const SIGNED: bool;

    /// Build a value from a sign and validated digits
    fn from_magnitude(negative: bool, magnitude: &Magnitude<'_>) -> Option<Self>;
}

macro_rules! impl_parsed_integer {
    ($($t:ty),* $(,)?) => {$(
        impl ParsedNumber for $t {
            const SIGNED: bool = <$t>::MIN != 0;

            fn from_magnitude(negative: bool, magnitude: &Magnitude<'_>) -> Option<Self> {
                let whole = magnitude.whole()?;
                let rounded = if magnitude.rounds_up() {
                    whole.checked_add(1)?
                } else {
                    whole
                };
                if !negative {
                    return <$t>::try_from(rounded).ok();
                }
                let value = if rounded == i128::MIN.unsigned_abs() {
                    i128::MIN
                } else {
                    -i128::try_from(rounded).ok()?
                };
                <$t>::try_from(value).ok()
            }
        }
    )*};
}

macro_rules! impl_parsed_float {
    ($($t:ty),* $(,)?) => {$(
        impl ParsedNumber for $t {
            const SIGNED: bool = true;

            fn from_magnitude(negative: bool, magnitude: &Magnitude<'_>) -> Option<Self> {
                let value: $t = if magnitude.radix() == 10 {
                    magnitude.as_str().parse().ok()?
                } else {
                    let radix = magnitude.radix() as $t;
                    let zero: $t = 0.0;
                    let whole = magnitude
                        .whole_digits()
                        .fold(zero, |acc, d| acc * radix + d as $t);
                    let fraction = magnitude
                        .fraction_digits()
                        .rev()
                        .fold(zero, |acc, d| (acc + d as $t) / radix);
                    whole + fraction
                };
                Some(if negative { -value } else { value })
            }
        }
    )*};
}

impl_parsed_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_parsed_float!(f32, f64);

/// Parse a decimal number, e.g. `"-42"` or `"3.25"`
pub fn string_to_number<T: ParsedNumber>(text: &str) -> Option<T> {
    string_to_number_radix(text, 10)
}

/// Parse a number written in `radix` (2 to 36)
pub fn string_to_number_radix<T: ParsedNumber>(text: &str, radix: u32) -> Option<T> {
    let (negative, digits) = split_sign(text);
    T::from_magnitude(negative, &Magnitude::parse(digits, radix)?)
}

/// Parse a number whose radix is given by a `0b`, `0o`, or `0x` prefix.
///
/// Without a prefix the number is decimal; a leading zero does not mean octal.
pub fn string_to_number_multibase<T: ParsedNumber>(text: &str) -> Option<T> {
    let (negative, rest) = split_sign(text);
    let (radix, digits) = split_radix_prefix(rest);
    T::from_magnitude(negative, &Magnitude::parse(digits, radix)?)
}

/// Parse unsigned decimal digits as a negative number.
///
/// Unsigned targets cannot hold the negation and get the magnitude instead.
pub fn string_to_number_assume_negative<T: ParsedNumber>(text: &str) -> Option<T> {
    T::from_magnitude(T::SIGNED, &Magnitude::parse(text, 10)?)
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    }
}

fn split_radix_prefix(text: &str) -> (u32, &str) {
    let prefixes = [("0b", 2), ("0B", 2), ("0o", 8), ("0O", 8), ("0x", 16), ("0X", 16)];
    prefixes
        .iter()
        .find_map(|(prefix, radix)| text.strip_prefix(prefix).map(|rest| (*radix, rest)))
        .unwrap_or((10, text))
}
