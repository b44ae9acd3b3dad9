// 📏 Stats - Height/weight in the API's native subunits
//
// PokeAPI reports height in decimeters and weight in hectograms.
// We store those raw values and convert on the way out.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::json_int;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    height_decimeters: u32,
    weight_hectograms: u32,
}

impl Stats {
    pub fn new(height_decimeters: u32, weight_hectograms: u32) -> Self {
        Stats {
            height_decimeters,
            weight_hectograms,
        }
    }

    /// Read `height` and `weight` from a pokemon resource.
    /// Missing, negative or non-numeric values become 0.
    pub fn from_api(data: &Value) -> Self {
        let read = |key: &str| {
            data.get(key)
                .and_then(json_int)
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(0)
        };

        Stats::new(read("height"), read("weight"))
    }

    pub fn height_decimeters(&self) -> u32 {
        self.height_decimeters
    }

    pub fn weight_hectograms(&self) -> u32 {
        self.weight_hectograms
    }

    pub fn height_meters(&self) -> f64 {
        f64::from(self.height_decimeters) / 10.0
    }

    /// 1 dm = 10 cm, widened so the full `u32` range converts
    pub fn height_centimeters(&self) -> u64 {
        u64::from(self.height_decimeters) * 10
    }

    pub fn weight_kilograms(&self) -> f64 {
        f64::from(self.weight_hectograms) / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unit_conversions() {
        let stats = Stats::new(4, 60);

        assert_eq!(stats.height_meters(), 0.4);
        assert_eq!(stats.height_centimeters(), 40);
        assert_eq!(stats.weight_kilograms(), 6.0);
    }

    #[test]
    fn test_zero_is_valid() {
        let stats = Stats::new(0, 0);

        assert_eq!(stats.height_meters(), 0.0);
        assert_eq!(stats.height_centimeters(), 0);
        assert_eq!(stats.weight_kilograms(), 0.0);
    }

    #[test]
    fn test_conversions_hold_across_range() {
        for raw in [1u32, 7, 10, 14, 145, 9999] {
            let stats = Stats::new(raw, raw);
            assert_eq!(stats.height_meters(), raw as f64 / 10.0);
            assert_eq!(stats.weight_kilograms(), raw as f64 / 10.0);
            assert_eq!(stats.height_centimeters(), u64::from(raw) * 10);
        }
    }

    #[test]
    fn test_huge_height_converts_without_overflow() {
        let stats = Stats::from_api(&json!({ "height": 500_000_000u64, "weight": 1 }));
        assert_eq!(stats.height_centimeters(), 5_000_000_000);

        let stats = Stats::new(u32::MAX, u32::MAX);
        assert_eq!(stats.height_centimeters(), 42_949_672_950);
        assert_eq!(stats.height_meters(), 429_496_729.5);
    }

    #[test]
    fn test_from_api_defaults_missing_fields() {
        let stats = Stats::from_api(&json!({ "height": 17 }));
        assert_eq!(stats.height_decimeters(), 17);
        assert_eq!(stats.weight_hectograms(), 0);

        let stats = Stats::from_api(&json!({ "height": -3, "weight": "905" }));
        assert_eq!(stats.height_decimeters(), 0);
        assert_eq!(stats.weight_hectograms(), 905);
    }
}
