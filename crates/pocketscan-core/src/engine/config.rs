use thiserror::Error;

pub const DEFAULT_RADIUS: f64 = 5.0;
pub const DEFAULT_PROBE_RADIUS: f64 = 1.4;
pub const DEFAULT_SPHERE_POINTS: usize = 960;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Search radius must be a positive finite number of Angstroms (got {0})")]
    InvalidRadius(f64),
    #[error("Probe radius must be a non-negative finite number of Angstroms (got {0})")]
    InvalidProbeRadius(f64),
    #[error("SASA sphere must have at least one point")]
    InvalidSpherePoints,
}

/// How atoms are weighted when computing the radius of gyration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GyrationWeighting {
    #[default]
    Uniform,
    Mass,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SasaConfig {
    pub probe_radius: f64,
    pub sphere_points: usize,
}

impl Default for SasaConfig {
    fn default() -> Self {
        Self {
            probe_radius: DEFAULT_PROBE_RADIUS,
            sphere_points: DEFAULT_SPHERE_POINTS,
        }
    }
}

/// Parameters for one pocket analysis run.
///
/// Build it with [`AnalysisConfigBuilder`], which validates every value
/// before any extraction happens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    /// Pocket search radius around each ligand atom, in Angstroms.
    pub radius: f64,
    pub infer_bonds: bool,
    pub gyration: GyrationWeighting,
    pub sasa: SasaConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            infer_bonds: false,
            gyration: GyrationWeighting::Uniform,
            sasa: SasaConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        if !(self.sasa.probe_radius.is_finite() && self.sasa.probe_radius >= 0.0) {
            return Err(ConfigError::InvalidProbeRadius(self.sasa.probe_radius));
        }
        if self.sasa.sphere_points == 0 {
            return Err(ConfigError::InvalidSpherePoints);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    radius: Option<f64>,
    infer_bonds: Option<bool>,
    gyration: Option<GyrationWeighting>,
    probe_radius: Option<f64>,
    sphere_points: Option<usize>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }
    pub fn infer_bonds(mut self, enabled: bool) -> Self {
        self.infer_bonds = Some(enabled);
        self
    }
    pub fn gyration(mut self, weighting: GyrationWeighting) -> Self {
        self.gyration = Some(weighting);
        self
    }
    pub fn probe_radius(mut self, radius: f64) -> Self {
        self.probe_radius = Some(radius);
        self
    }
    pub fn sphere_points(mut self, n: usize) -> Self {
        self.sphere_points = Some(n);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let config = AnalysisConfig {
            radius: self.radius.unwrap_or(DEFAULT_RADIUS),
            infer_bonds: self.infer_bonds.unwrap_or(false),
            gyration: self.gyration.unwrap_or_default(),
            sasa: SasaConfig {
                probe_radius: self.probe_radius.unwrap_or(DEFAULT_PROBE_RADIUS),
                sphere_points: self.sphere_points.unwrap_or(DEFAULT_SPHERE_POINTS),
            },
        };
        config.validate()?;
        Ok(config)
    }
}
