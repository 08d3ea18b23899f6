//! Configuration for the debate engine
//!
//! A single explicit record passed into the engine; nothing is read from
//! ambient or global state, so two concurrent runs with different
//! configurations cannot interfere.

use arbiter_domain::claim::HarmPotential;
use arbiter_domain::scale::BandConfig;
use arbiter_domain::traits::ModelTier;
use serde::{Deserialize, Serialize};

/// Floor for the self-consistency sampling temperature
const TEMPERATURE_FLOOR: f64 = 0.1;

/// Ceiling for the self-consistency sampling temperature
const TEMPERATURE_CEILING: f64 = 0.7;

/// Configuration for one debate run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateConfig {
    /// Band thresholds for the truth scale
    pub bands: BandConfig,

    /// Whether the self-consistency check runs at all
    pub self_consistency_enabled: bool,

    /// Sampling temperature for self-consistency re-runs; clamped to
    /// [0.1, 0.7] at use
    pub consistency_temperature: f64,

    /// Maximum spread (max - min truth percentage across re-runs) still
    /// considered stable
    pub stable_threshold: f64,

    /// Confidence floor for high-harm claims; 0 disables the floor
    pub harm_floor: f64,

    /// Harm tiers subject to the confidence floor
    pub high_harm_tiers: Vec<HarmPotential>,

    /// Model tier for the advocate role (also used by re-runs)
    pub advocate_tier: ModelTier,

    /// Model tier for the challenger role
    pub challenger_tier: ModelTier,

    /// Model tier for the reconciler role
    pub reconciler_tier: ModelTier,

    /// Model tier for the two validation calls
    pub validator_tier: ModelTier,

    /// Confidence reduction applied to contested claims, [0, 1];
    /// pipeline generations have shipped both 0.3 and 0.5
    pub contested_weight: f64,

    /// Whether reliability scores carry multi-model consensus
    pub consensus_weighting: bool,

    /// Whether to compute plausible truth-percentage intervals
    pub range_reporting: bool,

    /// Weight of cross-boundary variance when widening an interval;
    /// 0 leaves intervals at the raw self-consistency min/max
    pub range_variance_weight: f64,

    /// Interval width above which a wide-range warning is emitted
    pub max_range_width: f64,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            bands: BandConfig::default(),
            self_consistency_enabled: true,
            consistency_temperature: 0.3,
            stable_threshold: 5.0,
            harm_floor: 50.0,
            high_harm_tiers: vec![HarmPotential::Critical, HarmPotential::High],
            advocate_tier: ModelTier::Cheap,
            challenger_tier: ModelTier::Cheap,
            reconciler_tier: ModelTier::Flagship,
            validator_tier: ModelTier::Cheap,
            contested_weight: 0.3,
            consensus_weighting: false,
            range_reporting: false,
            range_variance_weight: 0.0,
            max_range_width: 30.0,
        }
    }
}

impl DebateConfig {
    /// Strict preset: tighter stability bar, broader harm floor
    pub fn strict() -> Self {
        Self {
            stable_threshold: 3.0,
            harm_floor: 60.0,
            high_harm_tiers: vec![
                HarmPotential::Critical,
                HarmPotential::High,
                HarmPotential::Medium,
            ],
            contested_weight: 0.5,
            range_reporting: true,
            ..Self::default()
        }
    }

    /// Lenient preset: no harm floor, consistency still informative
    pub fn lenient() -> Self {
        Self {
            stable_threshold: 10.0,
            harm_floor: 0.0,
            ..Self::default()
        }
    }

    /// The consistency temperature clamped into its sanctioned range
    pub fn clamped_consistency_temperature(&self) -> f64 {
        self.consistency_temperature
            .clamp(TEMPERATURE_FLOOR, TEMPERATURE_CEILING)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.consistency_temperature.is_finite() || self.consistency_temperature <= 0.0 {
            return Err("consistency_temperature must be a positive number".to_string());
        }
        if !self.stable_threshold.is_finite() || self.stable_threshold < 0.0 {
            return Err("stable_threshold must be non-negative".to_string());
        }
        if !self.harm_floor.is_finite() || !(0.0..=100.0).contains(&self.harm_floor) {
            return Err("harm_floor must be within [0, 100]".to_string());
        }
        if !self.contested_weight.is_finite() || !(0.0..=1.0).contains(&self.contested_weight) {
            return Err("contested_weight must be within [0, 1]".to_string());
        }
        if !self.range_variance_weight.is_finite() || self.range_variance_weight < 0.0 {
            return Err("range_variance_weight must be non-negative".to_string());
        }
        if !self.max_range_width.is_finite() || self.max_range_width <= 0.0 {
            return Err("max_range_width must be greater than 0".to_string());
        }

        let bands = [
            self.bands.true_min,
            self.bands.mostly_true_min,
            self.bands.leaning_true_min,
            self.bands.mixed_min,
            self.bands.leaning_false_min,
            self.bands.mostly_false_min,
        ];
        if bands.windows(2).any(|pair| pair[0] <= pair[1]) {
            return Err("band thresholds must be strictly decreasing".to_string());
        }

        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
