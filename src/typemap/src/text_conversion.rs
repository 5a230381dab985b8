//! Text conversion for the console syscalls.
//!
//! Guest-visible number formats (`%d`, `0x%08x`, `%.1f`) and an incremental
//! scanner that recognizes the same input a C `%d` / `%f` conversion does,
//! one byte at a time, so a handler can stop reading a host file exactly
//! where the number ends.

/// Signed decimal, like `%d`.
pub fn format_int(value: i32) -> String {
    value.to_string()
}

/// Zero padded lowercase hex with prefix, like `0x%08x`.
pub fn format_hex(value: u32) -> String {
    format!("0x{:08x}", value)
}

/// One digit after the point, like `%.1f`.
pub fn format_float(value: f32) -> String {
    if value.is_nan() {
        return if value.is_sign_negative() { "-nan" } else { "nan" }.to_string();
    }
    format!("{:.1}", value as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanKind {
    Int,
    Float,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Leading,
    Sign,
    Whole,
    Fraction,
    ExpMark,
    ExpSign,
    ExpDigits,
}

/// Significant digits a float scan keeps. Later digits only move the
/// decimal exponent (whole part) or are dropped (fraction).
const MAX_MANTISSA_DIGITS: usize = 40;

/// Incremental number scanner.
///
/// Feed bytes until [`NumberScanner::feed`] returns `false`; the byte that
/// was refused is not part of the number and belongs to whoever reads next.
/// The scanner keeps a fixed amount of state however long the number is.
#[derive(Debug, Clone)]
pub struct NumberScanner {
    kind: ScanKind,
    state: ScanState,
    seen_digit: bool,
    negative: bool,
    int_value: i32,
    // significant digits without leading zeros, value = mantissa * 10^scale
    mantissa: String,
    scale: i64,
    exp_negative: bool,
    exp: i64,
}

impl NumberScanner {
    pub fn new(kind: ScanKind) -> Self {
        NumberScanner {
            kind,
            state: ScanState::Leading,
            seen_digit: false,
            negative: false,
            int_value: 0,
            mantissa: String::new(),
            scale: 0,
            exp_negative: false,
            exp: 0,
        }
    }

    pub fn int() -> Self {
        Self::new(ScanKind::Int)
    }

    pub fn float() -> Self {
        Self::new(ScanKind::Float)
    }

    fn whole_digit(&mut self, c: char) {
        let d = c as u8 - b'0';
        self.int_value = self.int_value.wrapping_mul(10).wrapping_add(d as i32);
        if self.mantissa.is_empty() && d == 0 {
            return;
        }
        if self.mantissa.len() < MAX_MANTISSA_DIGITS {
            self.mantissa.push(c);
        } else {
            self.scale = self.scale.saturating_add(1);
        }
    }

    fn fraction_digit(&mut self, c: char) {
        if self.mantissa.len() >= MAX_MANTISSA_DIGITS {
            return;
        }
        if !(self.mantissa.is_empty() && c == '0') {
            self.mantissa.push(c);
        }
        self.scale = self.scale.saturating_sub(1);
    }

    /// Offers one byte. Returns `true` if it was consumed.
    pub fn feed(&mut self, byte: u8) -> bool {
        let c = byte as char;
        let float = self.kind == ScanKind::Float;
        let next = match (self.state, c) {
            (ScanState::Leading, c) if c.is_ascii_whitespace() => {
                return true;
            }
            (ScanState::Leading, '+' | '-') => {
                self.negative = c == '-';
                ScanState::Sign
            }
            (ScanState::Leading | ScanState::Sign | ScanState::Whole, '0'..='9') => {
                self.seen_digit = true;
                self.whole_digit(c);
                ScanState::Whole
            }
            (ScanState::Leading | ScanState::Sign | ScanState::Whole, '.') if float => {
                ScanState::Fraction
            }
            (ScanState::Fraction, '0'..='9') => {
                self.seen_digit = true;
                self.fraction_digit(c);
                ScanState::Fraction
            }
            (ScanState::Whole | ScanState::Fraction, 'e' | 'E') if float && self.seen_digit => {
                ScanState::ExpMark
            }
            (ScanState::ExpMark, '+' | '-') => {
                self.exp_negative = c == '-';
                ScanState::ExpSign
            }
            (ScanState::ExpMark | ScanState::ExpSign | ScanState::ExpDigits, '0'..='9') => {
                let d = (byte - b'0') as i64;
                self.exp = self.exp.saturating_mul(10).saturating_add(d);
                ScanState::ExpDigits
            }
            _ => return false,
        };
        self.state = next;
        true
    }

    /// True once at least one digit of the number has been seen.
    pub fn has_digits(&self) -> bool {
        self.seen_digit
    }

    /// Integer value of what was consumed. Values outside the 32-bit range
    /// wrap, the way a C `int` conversion truncates them.
    pub fn finish_int(&self) -> Option<i32> {
        if !self.has_digits() {
            return None;
        }
        Some(if self.negative { self.int_value.wrapping_neg() } else { self.int_value })
    }

    /// Float value of what was consumed. A dangling exponent marker (`1e`,
    /// `1e+`) is consumed but ignored.
    pub fn finish_float(&self) -> Option<f32> {
        if !self.has_digits() {
            return None;
        }
        let sign = if self.negative { "-" } else { "" };
        if self.mantissa.is_empty() {
            return format!("{}0", sign).parse::<f32>().ok();
        }
        let exp = if self.exp_negative { -self.exp } else { self.exp };
        let exp = self.scale.saturating_add(exp);
        format!("{}{}e{}", sign, self.mantissa, exp).parse::<f32>().ok()
    }
}
