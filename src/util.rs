// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


/// Helper for converting a floating number to a variable number, or a
/// suitable error.  Fractional parts are cut off like the controller does.
pub fn num_to_id<T>(inp: f64, err: impl FnOnce(f64) -> T) -> Result<u16, T> {
    if inp.is_finite() && inp >= 0. && inp < 65536. {
        Ok(inp as u16)
    } else {
        Err(err(inp))
    }
}

/// Truthiness of an arithmetic value in logical context.
pub fn truthy(value: f64) -> bool {
    value as i64 != 0
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180. / std::f64::consts::PI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_to_id() {
        assert_eq!(num_to_id(1.0, |_| ()), Ok(1));
        assert_eq!(num_to_id(4201.9, |_| ()), Ok(4201));
        assert_eq!(num_to_id(65535.0, |_| ()), Ok(65535));
        assert_eq!(num_to_id(-1.0, |v| v), Err(-1.0));
        assert_eq!(num_to_id(f64::MIN, |_| ()), Err(()));
        assert!(num_to_id(f64::NAN, |_| ()).is_err());
        assert!(num_to_id(65536.0, |_| ()).is_err());
    }

    #[test]
    fn test_truthy() {
        assert!(truthy(1.0));
        assert!(truthy(-2.5));
        assert!(!truthy(0.7));
        assert!(!truthy(0.0));
    }
}
