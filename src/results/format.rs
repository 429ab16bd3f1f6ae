//! Number formatting for the results panel.

/// Impact energy in megatons, scaled by magnitude.
///
/// The 1e3 and 1e6 bands share the "Gigatons" label with different divisors.
pub fn format_energy(mt: f64) -> String {
    if mt >= 1e9 {
        format!("{:.1} Teratons", mt / 1e9)
    } else if mt >= 1e6 {
        format!("{:.1} Gigatons", mt / 1e6)
    } else if mt >= 1e3 {
        format!("{:.1} Gigatons", mt / 1e3)
    } else {
        format!("{:.1} MT", mt)
    }
}

pub fn format_km(km: f64) -> String {
    if km >= 100.0 {
        format!("{:.0} km", km)
    } else {
        format!("{:.2} km", km)
    }
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "YES" } else { "No" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_bands() {
        assert_eq!(format_energy(1500.0), "1.5 Gigatons");
        assert_eq!(format_energy(2_000_000_000.0), "2.0 Teratons");
        assert_eq!(format_energy(42.0), "42.0 MT");
    }

    #[test]
    fn overlapping_gigaton_bands_use_different_divisors() {
        assert_eq!(format_energy(2_500_000.0), "2.5 Gigatons");
        assert_eq!(format_energy(999_999.0), "1000.0 Gigatons");
        assert_eq!(format_energy(0.0), "0.0 MT");
    }

    #[test]
    fn crater_sizes() {
        assert_eq!(format_km(1.234), "1.23 km");
        assert_eq!(format_km(180.4), "180 km");
    }
}
