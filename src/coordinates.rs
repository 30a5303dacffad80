use anyhow::Result;

const EARTH_RADIUS_KM: f64 = 6371.0;

// 2 digits for degrees, the rest is minutes with 4 implied fraction digits.
const PACKED_MIN_WIDTH: usize = 8;
const MINUTE_FRACTION_SCALE: f64 = 10000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

impl Point {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Point {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in kilometers on a spherical earth.
    pub fn haversine_distance(&self, other: &Point) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lng = (other.longitude - self.longitude).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

/// Converts a packed `DDMM.MMMM` coordinate into decimal degrees.
///
/// The digits are left-padded to 8 characters, so the first two digits are
/// always read as degrees. Inputs must keep the logger's native digit count:
/// a short value like `512.5` is read as `00005125`, and longitudes with
/// three degree digits are not supported by this encoding. The result is not
/// range checked.
pub fn packed_to_decimal_degrees(packed: &str) -> Result<f64> {
    let packed = packed.trim();
    if packed.is_empty() {
        bail!("empty coordinate");
    }
    if packed.chars().filter(|c| *c == '.').count() > 1
        || !packed.chars().all(|c| c.is_ascii_digit() || c == '.')
    {
        bail!("invalid packed coordinate: {:?}", packed);
    }

    let digits: String = packed.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        bail!("invalid packed coordinate: {:?}", packed);
    }
    let digits = format!("{:0>width$}", digits, width = PACKED_MIN_WIDTH);

    let degrees: u32 = digits[..2].parse()?;
    let minutes = digits[2..].parse::<f64>()? / MINUTE_FRACTION_SCALE;
    Ok(degrees as f64 + minutes / 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;

    #[test]
    fn packed_value() {
        let degrees = packed_to_decimal_degrees("3745.1234").unwrap();
        assert_float_absolute_eq!(degrees, 37.752057, 1e-6);
        assert_float_absolute_eq!(
            packed_to_decimal_degrees("37451234").unwrap(),
            degrees,
            1e-12
        );
    }

    #[test]
    fn short_input_is_zero_padded() {
        // "0512.5000" -> "05125000": 5 degrees, 12.5 minutes
        assert_float_absolute_eq!(
            packed_to_decimal_degrees("0512.5000").unwrap(),
            5.0 + 12.5 / 60.0,
            1e-12
        );
        // too few fraction digits shift everything to the right
        assert_float_absolute_eq!(
            packed_to_decimal_degrees("512.5").unwrap(),
            0.5125 / 60.0,
            1e-12
        );
    }

    #[test]
    fn monotonic_within_degree() {
        let values = ["3700.0000", "3712.3456", "3745.1234", "3759.9999"]
            .iter()
            .map(|x| packed_to_decimal_degrees(x).unwrap())
            .collect::<Vec<_>>();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn long_input_is_not_range_checked() {
        let degrees = packed_to_decimal_degrees("374512340000000000000000").unwrap();
        assert!(degrees.is_finite());
        assert!(degrees > 90.0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(packed_to_decimal_degrees("").is_err());
        assert!(packed_to_decimal_degrees("N3745.1234").is_err());
        assert!(packed_to_decimal_degrees("37.45.1234").is_err());
        assert!(packed_to_decimal_degrees(".").is_err());
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = Point::new(31.2304, 121.4737);
        assert_eq!(p.haversine_distance(&p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(31.2304, 121.4737);
        let b = Point::new(30.2741, 120.1551);
        assert_float_absolute_eq!(a.haversine_distance(&b), b.haversine_distance(&a), 1e-9);
    }

    #[test]
    fn one_degree_at_equator() {
        let d = Point::new(0.0, 0.0).haversine_distance(&Point::new(0.0, 1.0));
        assert_float_absolute_eq!(d, 111.19, 0.01);
    }
}
