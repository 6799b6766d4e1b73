use super::status::Stage;

/// ParticleId is an index into the Event's particle vector.
/// Two particles are the same particle only if their ids are equal.
pub type ParticleId = usize;

/// Transverse momentum, pseudorapidity, azimuth and energy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kinematics {
    pub pt: f64,
    pub eta: f64,
    pub phi: f64,
    pub energy: f64,
}

impl Kinematics {
    pub fn new(pt: f64, eta: f64, phi: f64, energy: f64) -> Self {
        Self {
            pt,
            eta,
            phi,
            energy,
        }
    }

    /// Distance in the (eta, phi) plane
    ///
    /// ```
    /// use hfc::libs::genealogy::Kinematics;
    /// let a = Kinematics::new(30.0, 0.0, 3.0, 30.0);
    /// let b = Kinematics::new(30.0, 0.0, -3.0, 30.0);
    /// assert!((a.delta_r(&b) - (2.0 * std::f64::consts::PI - 6.0)).abs() < 1e-9);
    /// ```
    pub fn delta_r(&self, other: &Kinematics) -> f64 {
        let d_eta = self.eta - other.eta;
        let mut d_phi = (self.phi - other.phi).abs();
        if d_phi > std::f64::consts::PI {
            d_phi = 2.0 * std::f64::consts::PI - d_phi;
        }
        (d_eta * d_eta + d_phi * d_phi).sqrt()
    }
}

#[derive(Debug, Clone)]
pub struct Particle {
    /// Position in the event record (index in the arena)
    pub id: ParticleId,

    /// PDG code, the sign tells particles from antiparticles
    pub pdg_id: i32,

    /// Generator status code
    pub status: i32,

    /// Mother ids, in generator order
    pub mothers: Vec<ParticleId>,

    /// Daughter ids, in generator order
    pub daughters: Vec<ParticleId>,

    pub kinematics: Option<Kinematics>,
}

impl Particle {
    /// Create a particle without relatives
    pub fn new(id: ParticleId, pdg_id: i32, status: i32) -> Self {
        Self {
            id,
            pdg_id,
            status,
            mothers: Vec::new(),
            daughters: Vec::new(),
            kinematics: None,
        }
    }

    /// Set the kinematics (builder pattern)
    pub fn with_kinematics(mut self, kinematics: Kinematics) -> Self {
        self.kinematics = Some(kinematics);
        self
    }

    pub fn stage(&self) -> Stage {
        Stage::of(self.status)
    }

    pub fn abs_pdg_id(&self) -> i32 {
        self.pdg_id.abs()
    }

    pub fn is_beam(&self) -> bool {
        self.pdg_id.abs() == super::BEAM_PDG_ID
    }

    /// u, d, s quarks and gluons
    pub fn is_light_parton(&self) -> bool {
        (self.pdg_id != 0 && self.pdg_id.abs() <= 3) || self.pdg_id == super::GLUON_PDG_ID
    }
}
