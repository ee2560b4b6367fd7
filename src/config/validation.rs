//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use super::SimulationConfig;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for SimulationConfig.
///
/// Entries of the `[[wells]]` array share the `wells.` prefix.
/// Any new field added to SimulationConfig must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [simulation]
        "simulation",
        "simulation.seed",
        "simulation.start_date",
        "simulation.days",
        "simulation.well_count",
        "simulation.field_count",
        // [sampling]
        "sampling",
        "sampling.oil_initial_bbl",
        "sampling.gas_oil_ratio",
        "sampling.water_initial_bbl",
        "sampling.hydrocarbon_decline",
        "sampling.water_decline",
        "sampling.noise_fraction",
        "sampling.intervention_probability",
        "sampling.intervention_scale",
        "sampling.intervention_window",
        "sampling.tubing_head_pressure_psi",
        "sampling.line_pressure_psi",
        "sampling.temperature_c",
        "sampling.choke_percent",
        // [ancillary]
        "ancillary",
        "ancillary.pressure_noise_fraction",
        "ancillary.temperature_noise_c",
        "ancillary.choke_noise_percent",
        "ancillary.downtime_probability",
        // [analysis]
        "analysis",
        "analysis.outlier_sigma",
        // [[wells]]
        "wells",
        "wells.well_id",
        "wells.field_id",
        "wells.oil_initial_bbl",
        "wells.gas_initial_mscf",
        "wells.water_initial_bbl",
        "wells.oil_decline",
        "wells.gas_decline",
        "wells.water_decline",
        "wells.noise_fraction",
        "wells.intervention",
        "wells.intervention.day",
        "wells.intervention.scale",
        "wells.tubing_head_pressure_psi",
        "wells.line_pressure_psi",
        "wells.temperature_c",
        "wells.choke_percent",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`. Tables inside arrays (`[[a]]`) are walked with
/// the array's own path as prefix, so every entry maps onto the same keys.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            match v {
                toml::Value::Table(_) => keys.extend(walk_toml_keys(v, &path)),
                toml::Value::Array(items) => {
                    for item in items.iter().filter(|i| i.is_table()) {
                        keys.extend(walk_toml_keys(item, &path));
                    }
                }
                _ => {}
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties go to the lexicographically smaller key so the result does not
/// depend on `HashSet` iteration order.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();

    for key in walk_toml_keys(&value, "") {
        if !known.contains(key.as_str()) && seen.insert(key.clone()) {
            let suggestion = suggest_correction(&key, &known);
            let message = format!("Unknown config key '{key}'");
            warnings.push(ValidationWarning {
                field: key,
                message,
                suggestion,
            });
        }
    }

    warnings
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on a parsed SimulationConfig.
///
/// Returns (errors, warnings): errors are impossible values that must
/// prevent a run; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(config: &SimulationConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let s = &config.sampling;

    // Rates and pressures cannot be negative
    for (name, (min, _)) in [
        ("sampling.oil_initial_bbl", s.oil_initial_bbl),
        ("sampling.gas_oil_ratio", s.gas_oil_ratio),
        ("sampling.water_initial_bbl", s.water_initial_bbl),
        ("sampling.tubing_head_pressure_psi", s.tubing_head_pressure_psi),
        ("sampling.line_pressure_psi", s.line_pressure_psi),
    ] {
        if min < 0.0 {
            errors.push(format!("{name} = {min:.2} cannot be negative"));
        }
    }

    // Decline >= 1 would zero or invert the decay curve
    for (name, (_, max)) in [
        ("sampling.hydrocarbon_decline", s.hydrocarbon_decline),
        ("sampling.water_decline", s.water_decline),
    ] {
        if max >= 1.0 {
            errors.push(format!("{name} upper bound {max:.3} must be < 1"));
        }
    }

    if s.intervention_scale.0 <= 0.0 {
        errors.push(format!(
            "sampling.intervention_scale lower bound {:.3} must be > 0",
            s.intervention_scale.0
        ));
    }

    let (w_lo, w_hi) = s.intervention_window;
    if w_lo < 0.0 || w_hi > 1.0 {
        errors.push(format!(
            "sampling.intervention_window [{w_lo:.2}, {w_hi:.2}] must lie within [0, 1]"
        ));
    }

    let (c_lo, c_hi) = s.choke_percent;
    if c_lo < 0.0 || c_hi > 100.0 {
        errors.push(format!("sampling.choke_percent [{c_lo:.1}, {c_hi:.1}] must lie within [0, 100]"));
    }

    // Noise above the initial rate clamps a large share of days at zero
    if s.noise_fraction > 1.0 {
        warnings.push(ValidationWarning {
            field: "sampling.noise_fraction".to_string(),
            message: format!(
                "sampling.noise_fraction = {:.2} exceeds 1.0, many days will clamp to zero",
                s.noise_fraction
            ),
            suggestion: None,
        });
    }

    // Wellhead temperature: suspicious outside -20..200 °C
    let (t_lo, t_hi) = s.temperature_c;
    if t_lo < -20.0 || t_hi > 200.0 {
        warnings.push(ValidationWarning {
            field: "sampling.temperature_c".to_string(),
            message: format!("sampling.temperature_c [{t_lo:.1}, {t_hi:.1}] is outside typical range (-20 to 200 °C)"),
            suggestion: None,
        });
    }

    // Flowline above wellhead pressure means the well cannot flow
    if s.line_pressure_psi.1 > s.tubing_head_pressure_psi.0 {
        warnings.push(ValidationWarning {
            field: "sampling.line_pressure_psi".to_string(),
            message: format!(
                "sampling.line_pressure_psi max ({:.0}) exceeds tubing_head_pressure_psi min ({:.0})",
                s.line_pressure_psi.1, s.tubing_head_pressure_psi.0
            ),
            suggestion: None,
        });
    }

    if config.simulation.days > 36_500 {
        warnings.push(ValidationWarning {
            field: "simulation.days".to_string(),
            message: format!("simulation.days = {} spans more than 100 years", config.simulation.days),
            suggestion: None,
        });
    }

    validate_well_profiles(config, &mut errors, &mut warnings);

    (errors, warnings)
}

fn validate_well_profiles(
    config: &SimulationConfig,
    errors: &mut Vec<String>,
    warnings: &mut Vec<ValidationWarning>,
) {
    let days = config.simulation.days;
    let mut ids = HashSet::new();

    for w in &config.wells {
        let id = &w.well_id;
        if id.trim().is_empty() {
            errors.push("wells.well_id cannot be empty".to_string());
        } else if !ids.insert(id.as_str()) {
            errors.push(format!("wells.well_id '{id}' is defined more than once"));
        }

        for (name, rate) in [
            ("oil_initial_bbl", w.oil_initial_bbl),
            ("gas_initial_mscf", w.gas_initial_mscf),
            ("water_initial_bbl", w.water_initial_bbl),
        ] {
            if !rate.is_finite() || rate < 0.0 {
                errors.push(format!("wells[{id}].{name} = {rate} must be a finite value >= 0"));
            }
        }

        for (name, decline) in [
            ("oil_decline", w.oil_decline),
            ("gas_decline", w.gas_decline),
            ("water_decline", w.water_decline),
        ] {
            if !decline.is_finite() || decline >= 1.0 {
                errors.push(format!("wells[{id}].{name} = {decline} must be finite and < 1"));
            }
        }

        if !w.noise_fraction.is_finite() || w.noise_fraction < 0.0 {
            errors.push(format!("wells[{id}].noise_fraction = {} must be >= 0", w.noise_fraction));
        } else if w.noise_fraction > 1.0 {
            warnings.push(ValidationWarning {
                field: "wells.noise_fraction".to_string(),
                message: format!("wells[{id}].noise_fraction = {:.2} exceeds 1.0", w.noise_fraction),
                suggestion: None,
            });
        }

        if let Some(iv) = w.intervention {
            if iv.day >= days {
                errors.push(format!(
                    "wells[{id}].intervention.day = {} is outside the horizon [0, {days})",
                    iv.day
                ));
            }
            if !iv.scale.is_finite() || iv.scale <= 0.0 {
                errors.push(format!("wells[{id}].intervention.scale = {} must be > 0", iv.scale));
            }
        }

        if !(0.0..=100.0).contains(&w.choke_percent) {
            errors.push(format!("wells[{id}].choke_percent = {} must lie within [0, 100]", w.choke_percent));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::WellProfile;
    use crate::types::Intervention;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("outlier_sigam", "outlier_sigma"), 2);
        assert_eq!(levenshtein("seeed", "seed"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [simulation]
            days = 30
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"simulation".to_string()));
        assert!(keys.contains(&"simulation.days".to_string()));
    }

    #[test]
    fn test_walk_toml_keys_array_of_tables() {
        let toml: toml::Value = r#"
            [[wells]]
            well_id = "A"
            intervention = { day = 3, scale = 1.5 }

            [[wells]]
            well_id = "B"
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"wells".to_string()));
        assert!(keys.contains(&"wells.well_id".to_string()));
        assert!(keys.contains(&"wells.intervention.day".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let toml_str = r#"
[analysis]
outlier_sigam = 2.5
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].field.contains("outlier_sigam"));
        assert_eq!(warnings[0].suggestion.as_deref(), Some("analysis.outlier_sigma"));
    }

    #[test]
    fn test_repeated_typo_in_wells_reported_once() {
        let toml_str = r#"
[[wells]]
well_id = "A"
oil_decilne = 0.2

[[wells]]
well_id = "B"
oil_decilne = 0.3
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].suggestion.as_deref(), Some("wells.oil_decline"));
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        assert!(suggest_correction("completely_unrelated_garbage_key_xyz", &known).is_none());
    }

    #[test]
    fn test_known_keys_covers_all_sections() {
        let known = known_config_keys();
        for section in ["simulation", "sampling", "ancillary", "analysis", "wells"] {
            assert!(known.contains(section), "missing section {section}");
        }
        assert!(known.contains("wells.intervention.scale"));
        assert!(known.contains("ancillary.downtime_probability"));
    }

    #[test]
    fn test_physical_range_defaults_clean() {
        let (errors, warnings) = validate_physical_ranges(&SimulationConfig::default());
        assert!(errors.is_empty(), "Defaults should produce no errors: {errors:?}");
        assert!(warnings.is_empty(), "Defaults should produce no warnings: {warnings:?}");
    }

    #[test]
    fn test_decline_of_one_is_an_error() {
        let mut config = SimulationConfig::default();
        config.sampling.hydrocarbon_decline = (0.2, 1.0);
        let (errors, _) = validate_physical_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("hydrocarbon_decline")));
    }

    #[test]
    fn test_choke_above_100_is_an_error() {
        let mut config = SimulationConfig::default();
        config.sampling.choke_percent = (50.0, 120.0);
        let (errors, _) = validate_physical_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("choke_percent")));
    }

    #[test]
    fn test_high_noise_is_a_warning() {
        let mut config = SimulationConfig::default();
        config.sampling.noise_fraction = 1.5;
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.is_empty());
        assert!(warnings.iter().any(|w| w.field == "sampling.noise_fraction"));
    }

    #[test]
    fn test_well_intervention_outside_horizon() {
        let mut config = SimulationConfig::default();
        config.simulation.days = 100;
        let mut well = WellProfile::new("W-A", "F-1");
        well.intervention = Some(Intervention::new(100, 1.5));
        config.wells.push(well);
        let (errors, _) = validate_physical_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("intervention.day")));
    }

    #[test]
    fn test_duplicate_well_ids() {
        let mut config = SimulationConfig::default();
        config.wells.push(WellProfile::new("W-A", "F-1"));
        config.wells.push(WellProfile::new("W-A", "F-2"));
        let (errors, _) = validate_physical_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("more than once")));
    }
}
