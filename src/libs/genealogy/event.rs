use super::error::GenealogyError;
use super::particle::{Kinematics, Particle, ParticleId};
use super::status::{is_entering_status, Stage};
use super::GLUON_PDG_ID;

/// One generated collision: the particle genealogy plus the generator info
/// the classification needs.
#[derive(Debug, Default, Clone)]
pub struct Event {
    /// Event number as given by the generator
    pub number: u64,

    /// Arena storage for all particles
    particles: Vec<Particle>,

    /// PDG ids of the two partons picked from the PDFs, gluon is 21
    pdf_ids: Option<[i32; 2]>,

    /// Bjorken x of the two PDF partons
    pub pdf_x: Option<[f64; 2]>,

    /// Signal process id
    pub process_id: Option<u32>,

    /// Generator jets, in the order of the input
    pub jets: Vec<Kinematics>,
}

impl Event {
    pub fn new(number: u64) -> Self {
        Self {
            number,
            ..Self::default()
        }
    }

    /// Add a new particle to the event. Returns the new particle's ID.
    pub fn add_particle(&mut self, pdg_id: i32, status: i32) -> ParticleId {
        let id = self.particles.len();
        self.particles.push(Particle::new(id, pdg_id, status));
        id
    }

    pub fn set_kinematics(&mut self, id: ParticleId, kinematics: Kinematics) {
        if let Some(particle) = self.particles.get_mut(id) {
            particle.kinematics = Some(kinematics);
        }
    }

    /// Link `mother` as the next mother of `child`, and `child` as the next
    /// daughter of `mother`.
    pub fn add_mother(
        &mut self,
        child: ParticleId,
        mother: ParticleId,
    ) -> Result<(), GenealogyError> {
        if mother >= self.particles.len() || child >= self.particles.len() {
            return Err(GenealogyError::Link {
                particle: child,
                mother,
            });
        }

        self.particles[child].mothers.push(mother);
        self.particles[mother].daughters.push(child);
        Ok(())
    }

    /// Get number of particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Get a reference to a particle by ID.
    pub fn get_particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id)
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Set the PDF parton ids. Code 0, used by some generators for the gluon,
    /// is normalised to 21.
    pub fn set_pdf_ids(&mut self, first: i32, second: i32) {
        let normalise = |id: i32| if id == 0 { GLUON_PDG_ID } else { id };
        self.pdf_ids = Some([normalise(first), normalise(second)]);
    }

    /// PDG ids of the partons entering the hard process.
    ///
    /// Falls back to the first two particles entering the hard process when
    /// the generator did not provide PDF info; a missing parton gets id 0.
    pub fn pdf_ids(&self) -> [i32; 2] {
        if let Some(ids) = self.pdf_ids {
            return ids;
        }

        let entering = self.entering_partons();
        let first = entering.first().map(|&id| self[id].pdg_id).unwrap_or(0);
        let second = entering.get(1).map(|&id| self[id].pdg_id).unwrap_or(0);
        [first, second]
    }

    pub fn has_pdf_info(&self) -> bool {
        self.pdf_ids.is_some()
    }

    pub fn is_beam(&self, id: ParticleId) -> bool {
        self.get_particle(id).map(|p| p.is_beam()).unwrap_or(false)
    }

    /// A parton entering the hard process has an entering status code and a
    /// beam particle as a direct mother.
    pub fn enters_hard_process(&self, id: ParticleId) -> bool {
        let Some(particle) = self.get_particle(id) else {
            return false;
        };

        is_entering_status(particle.status) && particle.mothers.iter().any(|&m| self.is_beam(m))
    }

    /// Partons entering the hard process, in record order
    pub fn entering_partons(&self) -> Vec<ParticleId> {
        self.particles
            .iter()
            .filter(|p| !p.is_beam() && self.enters_hard_process(p.id))
            .map(|p| p.id)
            .collect()
    }

    /// Whether any daughter of the particle belongs to the hard process
    pub fn has_hard_daughter(&self, id: ParticleId) -> bool {
        self[id]
            .daughters
            .iter()
            .any(|&d| self[d].stage() == Stage::HardProcess)
    }

    /// Light partons (u, d, s, g) leaving the hard process: hard-process
    /// stage and no hard-process daughters.
    pub fn light_partons_leaving(&self) -> Vec<ParticleId> {
        self.particles
            .iter()
            .filter(|p| p.is_light_parton())
            .filter(|p| p.stage() == Stage::HardProcess)
            .filter(|p| !self.has_hard_daughter(p.id))
            .map(|p| p.id)
            .collect()
    }
}

impl std::ops::Index<ParticleId> for Event {
    type Output = Particle;

    /// Ids handed out by the same event are always valid.
    fn index(&self, id: ParticleId) -> &Particle {
        &self.particles[id]
    }
}
