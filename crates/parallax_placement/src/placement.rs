//! # Placement Engine
//!
//! Grows an accepted set of markers towards a target count. Every
//! candidate walks the same state machine:
//!
//! ```text
//! Sampling -> Testing -> Accepted -> Committed
//!                |
//!                v
//!            Conflicted -> Resolving -> Testing ...
//!                              |
//!                              v
//!                          Abandoned
//! ```
//!
//! - **Sampling**: draw a uniform point in the domain and spawn a marker.
//! - **Testing**: compare the candidate's footprint against every accepted
//!   marker in insertion order; the first overlap is the conflict.
//! - **Resolving**: push the candidate one step directly away from the
//!   conflicting marker. A push that would leave the domain is discarded.
//!   Each resolution costs one attempt.
//! - **Committed**: the candidate joins the accepted set and the attempt
//!   counter resets.
//! - **Abandoned**: the attempt counter hit the budget. The candidate is
//!   despawned and the [`ExhaustionPolicy`] decides whether the run ends.
//!
//! ## Determinism
//!
//! The engine draws from the random source only in `Sampling`, and
//! iterates the accepted set in insertion order, so a seeded source
//! reproduces the same accepted set.

use parallax_shared::{
    Vec3, DEFAULT_ATTEMPT_BUDGET, DEFAULT_MARKER_RADIUS, DEFAULT_STEP, DEFAULT_TARGET_COUNT,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::domain::Domain;
use crate::error::{ScatterError, ScatterResult};
use crate::marker::{Marker, MarkerCollection, MarkerId, MarkerSink};
use crate::overlap::Footprint;

/// What to do when a candidate exhausts the attempt budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// Stop the whole run and return the markers committed so far.
    #[default]
    StopRun,
    /// Drop the candidate, reset the counter, and sample a fresh one.
    /// The run stops once `max_abandoned` candidates have been dropped.
    DiscardCandidate {
        /// Abandoned candidates tolerated before the run stops.
        max_abandoned: u32,
    },
}

/// Tuning for a placement run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlacementConfig {
    /// Markers to commit.
    pub target_count: usize,
    /// Resolution attempts allowed between two commits.
    pub attempt_budget: u32,
    /// World-space length of one resolution push.
    pub step: f32,
    /// Base marker radius.
    pub marker_radius: f32,
    /// Scale applied to every marker's radius.
    pub marker_scale: f32,
    /// Leave footprints that are entirely off screen out of overlap tests,
    /// for the candidate and for accepted markers alike.
    pub ignore_off_screen: bool,
    /// Behaviour on budget exhaustion.
    pub exhaustion: ExhaustionPolicy,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            target_count: DEFAULT_TARGET_COUNT,
            attempt_budget: DEFAULT_ATTEMPT_BUDGET,
            step: DEFAULT_STEP,
            marker_radius: DEFAULT_MARKER_RADIUS,
            marker_scale: 1.0,
            ignore_off_screen: false,
            exhaustion: ExhaustionPolicy::StopRun,
        }
    }
}

impl PlacementConfig {
    /// Checks that every field is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ScatterError::InvalidConfig`] for a zero budget, a
    /// discard policy that tolerates no abandonment, or a non-positive or
    /// non-finite step, radius or scale.
    pub fn validate(&self) -> ScatterResult<()> {
        if self.attempt_budget == 0 {
            return Err(ScatterError::InvalidConfig(
                "attempt_budget must be at least 1".to_string(),
            ));
        }
        if matches!(self.exhaustion, ExhaustionPolicy::DiscardCandidate { max_abandoned: 0 }) {
            return Err(ScatterError::InvalidConfig(
                "max_abandoned must be at least 1; use stop_run to stop on the first".to_string(),
            ));
        }
        for (name, value) in [
            ("step", self.step),
            ("marker_radius", self.marker_radius),
            ("marker_scale", self.marker_scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScatterError::InvalidConfig(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStatus {
    /// The accepted set reached the target count.
    Complete,
    /// The attempt budget ran out first; the set is partial.
    BudgetExhausted,
}

/// Counters collected during a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementStats {
    /// Candidates drawn from the domain.
    pub candidates_sampled: u64,
    /// Resolution attempts across the whole run.
    pub total_attempts: u64,
    /// Highest attempt count reached between two commits.
    pub peak_attempts: u32,
    /// Pushes discarded because they would leave the domain.
    pub out_of_domain_moves: u64,
    /// Projections that fell behind the camera.
    pub degenerate_projections: u64,
    /// Candidates despawned after exhausting the budget.
    pub abandoned: u32,
}

/// Result of a placement run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementReport {
    /// How the run ended.
    pub status: PlacementStatus,
    /// Run counters.
    pub stats: PlacementStats,
    /// Accepted markers in commit order.
    pub markers: Vec<Marker>,
}

impl PlacementReport {
    /// True when the target count was reached.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == PlacementStatus::Complete
    }

    /// Accepted positions in commit order.
    #[must_use]
    pub fn positions(&self) -> Vec<Vec3> {
        self.markers.iter().map(|m| m.position).collect()
    }
}

/// A candidate marker and its current footprint.
struct Candidate {
    id: MarkerId,
    marker: Marker,
    footprint: Option<Footprint>,
}

/// Per-candidate state. Each variant carries the data the next step needs.
enum CandidateState {
    Sampling,
    Testing(Candidate),
    Conflicted(Candidate, usize),
    Resolving(Candidate, Vec3),
    Accepted(Candidate),
    Abandoned(Candidate),
}

/// Places markers that do not overlap on screen.
#[derive(Clone, Debug)]
pub struct PlacementEngine {
    camera: Camera,
    domain: Domain,
    config: PlacementConfig,
}

impl PlacementEngine {
    /// Creates an engine for one camera and domain.
    ///
    /// # Errors
    ///
    /// Returns [`ScatterError::InvalidConfig`] if the config fails
    /// [`PlacementConfig::validate`].
    pub fn new(camera: Camera, domain: Domain, config: PlacementConfig) -> ScatterResult<Self> {
        config.validate()?;
        Ok(Self {
            camera,
            domain,
            config,
        })
    }

    /// The camera overlap is judged through.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The placement domain.
    #[must_use]
    pub const fn domain(&self) -> &Domain {
        &self.domain
    }

    /// The run configuration.
    #[must_use]
    pub const fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Runs placement into a fresh in-memory collection.
    pub fn place<R: Rng + ?Sized>(&self, rng: &mut R) -> PlacementReport {
        let mut collection = MarkerCollection::new("Markers");
        self.run(&mut collection, rng)
    }

    /// Runs placement, mirroring every marker into `sink`.
    ///
    /// The sink is cleared first. On return it holds exactly the accepted
    /// markers.
    pub fn run<S, R>(&self, sink: &mut S, rng: &mut R) -> PlacementReport
    where
        S: MarkerSink + ?Sized,
        R: Rng + ?Sized,
    {
        let target = self.config.target_count;
        let budget = self.config.attempt_budget;

        sink.clear();
        tracing::info!(
            "Placement run: target {} markers, budget {} attempts, step {}",
            target,
            budget,
            self.config.step
        );

        let mut accepted: Vec<Marker> = Vec::with_capacity(target);
        // Accepted markers never move, so their footprints are computed once.
        let mut accepted_footprints: Vec<Option<Footprint>> = Vec::with_capacity(target);
        let mut stats = PlacementStats::default();
        let mut attempts: u32 = 0;

        let mut state = CandidateState::Sampling;
        let status = loop {
            state = match state {
                CandidateState::Sampling => {
                    if accepted.len() >= target {
                        break PlacementStatus::Complete;
                    }
                    let marker = Marker::new(self.domain.sample(rng), self.config.marker_radius)
                        .with_scale(self.config.marker_scale);
                    let id = sink.spawn(&marker);
                    stats.candidates_sampled += 1;
                    let footprint = self.footprint(&marker, &mut stats);
                    CandidateState::Testing(Candidate {
                        id,
                        marker,
                        footprint,
                    })
                }

                CandidateState::Testing(candidate) => {
                    match self.first_conflict(candidate.footprint.as_ref(), &accepted_footprints) {
                        Some(index) => CandidateState::Conflicted(candidate, index),
                        None => CandidateState::Accepted(candidate),
                    }
                }

                CandidateState::Conflicted(candidate, index) => {
                    CandidateState::Resolving(candidate, accepted[index].position)
                }

                CandidateState::Resolving(mut candidate, away_from) => {
                    self.push_away(&mut candidate, away_from, sink, &mut stats);
                    attempts += 1;
                    stats.total_attempts += 1;
                    stats.peak_attempts = stats.peak_attempts.max(attempts);

                    if attempts >= budget {
                        CandidateState::Abandoned(candidate)
                    } else {
                        CandidateState::Testing(candidate)
                    }
                }

                CandidateState::Accepted(candidate) => {
                    tracing::debug!(
                        "Committed marker {} at ({:.3}, {:.3}, {:.3}) after {} attempts",
                        accepted.len(),
                        candidate.marker.position.x,
                        candidate.marker.position.y,
                        candidate.marker.position.z,
                        attempts
                    );
                    accepted.push(candidate.marker);
                    accepted_footprints.push(candidate.footprint);
                    attempts = 0;
                    CandidateState::Sampling
                }

                CandidateState::Abandoned(candidate) => {
                    sink.despawn(candidate.id);
                    stats.abandoned += 1;
                    tracing::debug!(
                        "Abandoned candidate at ({:.3}, {:.3}, {:.3}) after {} attempts",
                        candidate.marker.position.x,
                        candidate.marker.position.y,
                        candidate.marker.position.z,
                        attempts
                    );
                    match self.config.exhaustion {
                        ExhaustionPolicy::StopRun => break PlacementStatus::BudgetExhausted,
                        ExhaustionPolicy::DiscardCandidate { max_abandoned } => {
                            if stats.abandoned >= max_abandoned {
                                break PlacementStatus::BudgetExhausted;
                            }
                            attempts = 0;
                            CandidateState::Sampling
                        }
                    }
                }
            };
        };

        match status {
            PlacementStatus::Complete => tracing::info!(
                "Placement complete: {} markers, {} attempts",
                accepted.len(),
                stats.total_attempts
            ),
            PlacementStatus::BudgetExhausted => tracing::warn!(
                "Attempt budget exhausted: placed {} of {} markers",
                accepted.len(),
                target
            ),
        }

        PlacementReport {
            status,
            stats,
            markers: accepted,
        }
    }

    /// Projects a marker, counting degenerate projections.
    fn footprint(&self, marker: &Marker, stats: &mut PlacementStats) -> Option<Footprint> {
        match self.camera.project(marker.position, marker.effective_radius()) {
            Ok(footprint) => Some(footprint),
            Err(err) => {
                stats.degenerate_projections += 1;
                tracing::trace!("Marker treated as out of view: {}", err);
                None
            }
        }
    }

    /// Moves the candidate one step away from `away_from`.
    ///
    /// A push that would leave the domain is dropped and the candidate keeps
    /// its position. Returns whether the candidate moved.
    fn push_away<S: MarkerSink + ?Sized>(
        &self,
        candidate: &mut Candidate,
        away_from: Vec3,
        sink: &mut S,
        stats: &mut PlacementStats,
    ) -> bool {
        let direction = (candidate.marker.position - away_from)
            .normalized()
            .unwrap_or(Vec3::X);
        let proposed = candidate.marker.position + direction * self.config.step;

        if !self.domain.contains(proposed) {
            stats.out_of_domain_moves += 1;
            tracing::trace!(
                "Push to ({:.3}, {:.3}, {:.3}) leaves the domain, keeping position",
                proposed.x,
                proposed.y,
                proposed.z
            );
            return false;
        }

        candidate.marker.position = proposed;
        sink.relocate(candidate.id, proposed);
        candidate.footprint = self.footprint(&candidate.marker, stats);
        true
    }

    /// Index of the first accepted footprint the candidate overlaps.
    fn first_conflict(
        &self,
        candidate: Option<&Footprint>,
        accepted: &[Option<Footprint>],
    ) -> Option<usize> {
        let candidate = candidate?;
        if self.config.ignore_off_screen && !candidate.is_on_screen() {
            return None;
        }
        accepted.iter().position(|other| match other {
            Some(other) if self.config.ignore_off_screen && !other.is_on_screen() => false,
            Some(other) => candidate.overlaps(other),
            None => false,
        })
    }
}
