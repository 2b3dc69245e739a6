// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Literal numbers as written in a block.

/// Digit and range rules that a literal number has to satisfy.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberFormat {
    /// Maximum number of significant digits, counting the decimal places.
    pub max_digits: usize,
    pub min_digits: usize,
    /// Number of decimal places, i.e. the least input increment.
    pub decimal_places: usize,
    pub leading_zeros: bool,
    /// If false, a number without decimal point counts in increments
    /// (`X1000` is `X1.`).
    pub decimal_calculator: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat {
            max_digits: 15,
            min_digits: 1,
            decimal_places: 3,
            leading_zeros: true,
            decimal_calculator: true,
        }
    }
}

impl NumberFormat {
    /// Convert the text of a literal, or return `None` if it violates the
    /// format.
    pub fn parse(&self, text: &str) -> Option<f64> {
        let unsigned = text.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(text);
        let (lead, frac, has_point) = match unsigned.split_once('.') {
            Some((lead, frac)) => (lead, frac, true),
            None => (unsigned, "", false),
        };
        let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(lead) || !is_digits(frac) {
            return None;
        }
        if lead.len() + frac.len() < self.min_digits.max(1) {
            return None;
        }
        if !self.leading_zeros && lead.len() > 1 && lead.starts_with('0') {
            return None;
        }
        if frac.trim_end_matches('0').len() > self.decimal_places {
            return None;
        }
        if lead.trim_start_matches('0').len() + self.decimal_places > self.max_digits {
            return None;
        }

        let mut value: f64 = text.parse().ok()?;
        if !has_point && !self.decimal_calculator {
            value /= 10f64.powi(self.decimal_places as i32);
        }
        let magnitude = value.abs();
        if value == 0. || (f64::MIN_POSITIVE..=f64::MAX).contains(&magnitude) {
            Some(value)
        } else {
            None
        }
    }
}
