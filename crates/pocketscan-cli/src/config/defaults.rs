use pocketscan::engine::config::{DEFAULT_PROBE_RADIUS, DEFAULT_RADIUS, DEFAULT_SPHERE_POINTS};

pub struct DefaultsConfig {
    pub radius: f64,
    pub infer_bonds: bool,
    pub mass_weighted: bool,
    pub probe_radius: f64,
    pub sphere_points: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            infer_bonds: false,
            mass_weighted: false,
            probe_radius: DEFAULT_PROBE_RADIUS,
            sphere_points: DEFAULT_SPHERE_POINTS,
        }
    }
}
