//! The interactive body-shaping session.

use crate::{ModelSet, SessionError, SessionResult};
use body_shape::ReconstructedBody;
use body_types::{BodyMesh, Gender, MeasurementKind, Measurements, PARAM_COUNT};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One interactive editing session over a shared [`ModelSet`].
///
/// A session owns its gender, measurement vector, reconstructed body,
/// and optional garment. It is single-threaded and run-to-completion:
/// every mutating operation either commits a fully consistent new state
/// or returns an error with the previous state untouched.
///
/// # Example
///
/// ```no_run
/// use body_session::{ModelSet, Session};
/// use body_types::{Gender, MeasurementKind};
/// use std::sync::Arc;
///
/// # fn load() -> ModelSet { unimplemented!() }
/// let models = Arc::new(load());
/// let mut session = Session::new(models, Gender::Female)?;
///
/// session.set_measurement(MeasurementKind::Waist, 72.0)?;
/// let body = session.body();
/// # Ok::<(), body_session::SessionError>(())
/// ```
#[derive(Debug)]
pub struct Session {
    models: Arc<ModelSet>,
    gender: Gender,
    measurements: Measurements,
    body: ReconstructedBody,
    garment: Option<BodyMesh>,
    garment_visible: bool,
    outside: bool,
}

/// A fully consistent post-reconstruction state, staged before commit.
struct Rebuilt {
    body: ReconstructedBody,
    garment: Option<BodyMesh>,
    outside: bool,
}

impl Session {
    /// Opens a session at the gender's default measurements.
    ///
    /// # Errors
    ///
    /// Propagates reconstruction errors; with well-formed model data and
    /// the built-in defaults this cannot fail.
    pub fn new(models: Arc<ModelSet>, gender: Gender) -> SessionResult<Self> {
        let measurements = Measurements::defaults(gender);
        let rebuilt = rebuild(&models, gender, &measurements, false)?;
        info!(%gender, "session opened");
        Ok(Self {
            models,
            gender,
            measurements,
            body: rebuilt.body,
            garment: rebuilt.garment,
            garment_visible: false,
            outside: rebuilt.outside,
        })
    }

    /// Current gender.
    #[inline]
    #[must_use]
    pub const fn gender(&self) -> Gender {
        self.gender
    }

    /// Current measurement vector.
    #[inline]
    #[must_use]
    pub const fn measurements(&self) -> &Measurements {
        &self.measurements
    }

    /// The current reconstructed body.
    #[inline]
    #[must_use]
    pub const fn body(&self) -> &ReconstructedBody {
        &self.body
    }

    /// The deformed garment, when visible.
    #[inline]
    #[must_use]
    pub const fn garment(&self) -> Option<&BodyMesh> {
        self.garment.as_ref()
    }

    /// Whether the garment is currently shown.
    #[inline]
    #[must_use]
    pub const fn is_garment_visible(&self) -> bool {
        self.garment_visible
    }

    /// Whether the current measurements fall outside the feasible
    /// region. Advisory only; the body shown is still the reconstruction
    /// of the current measurements.
    #[inline]
    #[must_use]
    pub const fn is_outside(&self) -> bool {
        self.outside
    }

    /// Sets one measurement and reconstructs.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Shape`] when the resulting vector has a
    /// non-positive height; measurements, body, and garment all keep
    /// their prior values.
    pub fn set_measurement(&mut self, kind: MeasurementKind, value: f64) -> SessionResult<()> {
        self.apply(&[(kind, value)])
    }

    /// Applies a batch of measurement edits with exactly one
    /// reconstruction afterward.
    ///
    /// Later edits to the same parameter win. An empty batch still
    /// reconstructs, which makes it a cheap way to force a refresh.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Shape`] when the edited vector has a
    /// non-positive height. Nothing is committed: measurements, body,
    /// and garment keep their prior values.
    pub fn apply(&mut self, edits: &[(MeasurementKind, f64)]) -> SessionResult<()> {
        let mut candidate = self.measurements;
        for &(kind, value) in edits {
            candidate.set(kind, value);
        }

        let rebuilt = rebuild(&self.models, self.gender, &candidate, self.garment_visible)?;
        self.measurements = candidate;
        self.commit(rebuilt);
        debug!(edits = edits.len(), outside = self.outside, "measurements applied");
        Ok(())
    }

    /// Switches gender, keeping the current measurements.
    ///
    /// If the garment is visible and the new gender's bundle carries no
    /// cloth data, the garment is hidden with a warning rather than
    /// failing the switch.
    ///
    /// # Errors
    ///
    /// Propagates reconstruction errors; the session's height has
    /// already been accepted, so this cannot fail in practice.
    pub fn set_gender(&mut self, gender: Gender) -> SessionResult<()> {
        if gender == self.gender {
            return Ok(());
        }
        let show_garment = if self.garment_visible && self.models.bundle(gender).cloth().is_none() {
            warn!(%gender, "no garment data for this gender, hiding garment");
            false
        } else {
            self.garment_visible
        };

        let rebuilt = rebuild(&self.models, gender, &self.measurements, show_garment)?;
        self.gender = gender;
        self.garment_visible = show_garment;
        self.commit(rebuilt);
        info!(%gender, "gender switched");
        Ok(())
    }

    /// Shows or hides the garment.
    ///
    /// Showing deforms the garment onto the current body immediately;
    /// while visible, every reconstruction re-deforms it. Hiding drops
    /// the deformed mesh.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::GarmentUnavailable`] when showing is
    /// requested and the current bundle carries no cloth data.
    pub fn set_garment_visible(&mut self, visible: bool) -> SessionResult<()> {
        if !visible {
            self.garment_visible = false;
            self.garment = None;
            return Ok(());
        }
        if self.garment_visible {
            return Ok(());
        }

        let models = Arc::clone(&self.models);
        let bundle = models.bundle(self.gender);
        let Some(cloth) = bundle.cloth() else {
            return Err(SessionError::GarmentUnavailable {
                gender: self.gender,
            });
        };
        let garment = cloth.deform(
            &self.body.mesh.vertices,
            self.measurements.height(),
            self.body.ground_offset,
        )?;
        self.garment_visible = true;
        self.garment = Some(garment);
        Ok(())
    }

    /// Projects the current measurements onto the feasible region.
    ///
    /// Feasible measurements are left untouched. Otherwise the ratios
    /// are projected onto the hull and the corrected measurements
    /// (projected ratio times height, height unchanged) are committed
    /// with one reconstruction. If the projection fails, or its result
    /// still violates the hull beyond the relaxed tolerance, the session
    /// reverts to the gender's defaults with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Shape`] when the current height is not
    /// positive (ratios are undefined). Projection failures are handled
    /// by the defaults fallback, not surfaced.
    pub fn fix(&mut self) -> SessionResult<()> {
        let models = Arc::clone(&self.models);
        let shape = models.bundle(self.gender).shape();

        if shape.is_feasible(&self.measurements)? {
            self.outside = false;
            return Ok(());
        }

        let height = self.measurements.height();
        match shape.hull().project(&self.measurements.ratios()) {
            Ok(projection) => {
                let mut values = *self.measurements.values();
                for (value, ratio) in values
                    .iter_mut()
                    .take(PARAM_COUNT - 1)
                    .zip(projection.ratio.iter())
                {
                    *value = ratio * height;
                }
                let corrected = Measurements::new(values);

                let rebuilt = rebuild(&models, self.gender, &corrected, self.garment_visible)?;
                self.measurements = corrected;
                self.commit(rebuilt);
                info!(
                    active_facets = projection.active_facets.len(),
                    iterations = projection.iterations,
                    "measurements projected into feasible region"
                );
            }
            Err(err) => {
                warn!(%err, "projection failed, reverting to defaults");
                self.reset_defaults()?;
            }
        }
        Ok(())
    }

    /// Restores the gender's default measurements and reconstructs.
    ///
    /// # Errors
    ///
    /// Propagates reconstruction errors; defaults always carry a valid
    /// height, so this cannot fail in practice.
    pub fn reset_defaults(&mut self) -> SessionResult<()> {
        let defaults = Measurements::defaults(self.gender);
        let rebuilt = rebuild(&self.models, self.gender, &defaults, self.garment_visible)?;
        self.measurements = defaults;
        self.commit(rebuilt);
        Ok(())
    }

    fn commit(&mut self, rebuilt: Rebuilt) {
        self.body = rebuilt.body;
        self.garment = rebuilt.garment;
        self.outside = rebuilt.outside;
    }
}

/// Reconstructs the body (and garment, when shown) for a candidate
/// state without touching any session field. Callers commit the result
/// only on success, which is what keeps failed edits side-effect free.
fn rebuild(
    models: &ModelSet,
    gender: Gender,
    measurements: &Measurements,
    show_garment: bool,
) -> SessionResult<Rebuilt> {
    let bundle = models.bundle(gender);
    let body = bundle.shape().reconstruct(measurements)?;
    let outside = !bundle.shape().is_feasible(measurements)?;

    let garment = if show_garment {
        match bundle.cloth() {
            Some(cloth) => Some(cloth.deform(
                &body.mesh.vertices,
                measurements.height(),
                body.ground_offset,
            )?),
            None => None,
        }
    } else {
        None
    };

    Ok(Rebuilt {
        body,
        garment,
        outside,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ModelBundle;
    use approx::assert_relative_eq;
    use body_cloth::{BindingOperator, ClothModelData};
    use body_hull::ConvexHull;
    use body_shape::ShapeModelData;
    use nalgebra::{DMatrix, DVector, Point3};

    /// 4-vertex, 2-latent shape model with a box-like feasible region.
    ///
    /// Latent 0 follows the bust ratio and lifts vertex 1 along Y;
    /// latent 1 follows the waist ratio and spreads vertices 2 and 3
    /// along X. Default ratios for both genders are inside the hull.
    fn tiny_shape(hull: ConvexHull) -> ShapeModelData {
        let mut regression = DMatrix::zeros(2, 7);
        regression[(0, 0)] = 1.0;
        regression[(1, 2)] = 1.0;
        let offset = DVector::from_vec(vec![0.0, 0.0]);

        let mut basis = DMatrix::zeros(12, 2);
        basis[(4, 0)] = 10.0;
        basis[(6, 1)] = 5.0;
        basis[(9, 1)] = -5.0;
        let mean_shape = DVector::from_vec(vec![
            0.0, 0.0, 0.0, //
            0.0, 100.0, 0.0, //
            1.0, 50.0, 0.0, //
            -1.0, 50.0, 0.0,
        ]);
        let faces = vec![[0, 1, 2], [0, 2, 3]];

        ShapeModelData::new(regression, offset, basis, mean_shape, faces, hull).unwrap()
    }

    /// Feasible region: bust ratio <= 0.7, waist ratio <= 0.6.
    fn box_hull() -> ConvexHull {
        ConvexHull::from_rows(vec![
            [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -0.7],
            [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, -0.6],
        ])
        .unwrap()
    }

    /// Contradictory facets: bust ratio <= -1 and >= 2. Projection onto
    /// this region cannot satisfy the post-check.
    fn empty_hull() -> ConvexHull {
        ConvexHull::from_rows(vec![
            [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
            [-1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0],
        ])
        .unwrap()
    }

    /// One-vertex garment riding vertex 1, draped on the mean body.
    fn tiny_cloth() -> ClothModelData {
        let garment_rest = vec![Point3::new(0.0, 105.0, 0.0)];
        let garment_faces = vec![[0, 0, 0]];
        let body_rest = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 100.0, 0.0),
            Point3::new(1.0, 50.0, 0.0),
            Point3::new(-1.0, 50.0, 0.0),
        ];
        let binding = BindingOperator::from_triplets(1, 4, &[(0, 1, 1.0)]).unwrap();
        ClothModelData::new(garment_rest, garment_faces, body_rest, binding).unwrap()
    }

    fn models_with(hull: ConvexHull, cloth: bool) -> Arc<ModelSet> {
        let bundle = |cloth: Option<ClothModelData>, hull: ConvexHull| {
            ModelBundle::new(tiny_shape(hull), cloth).unwrap()
        };
        let cloth_data = cloth.then(tiny_cloth);
        Arc::new(ModelSet::new(
            bundle(cloth_data.clone(), hull.clone()),
            bundle(cloth_data, hull),
        ))
    }

    fn models() -> Arc<ModelSet> {
        models_with(box_hull(), true)
    }

    #[test]
    fn bundle_rejects_vertex_count_mismatch() {
        let cloth = ClothModelData::new(
            vec![Point3::origin()],
            vec![],
            vec![Point3::origin(); 3],
            BindingOperator::from_triplets(1, 3, &[(0, 0, 1.0)]).unwrap(),
        )
        .unwrap();
        let result = ModelBundle::new(tiny_shape(box_hull()), Some(cloth));
        assert!(matches!(
            result,
            Err(SessionError::ModelDataMismatch {
                shape_vertices: 4,
                cloth_vertices: 3,
            })
        ));
    }

    #[test]
    fn opens_at_gender_defaults() {
        let session = Session::new(models(), Gender::Female).unwrap();

        assert_eq!(session.gender(), Gender::Female);
        assert_eq!(
            session.measurements(),
            &Measurements::defaults(Gender::Female)
        );
        assert_eq!(session.body().mesh.vertex_count(), 4);
        assert!(session.garment().is_none());
        assert!(!session.is_outside());
    }

    #[test]
    fn single_edit_reconstructs() {
        let mut session = Session::new(models(), Gender::Female).unwrap();
        let before = session.body().clone();

        session
            .set_measurement(MeasurementKind::Waist, 75.0)
            .unwrap();

        assert_relative_eq!(
            session.measurements().get(MeasurementKind::Waist),
            75.0
        );
        assert_ne!(session.body().mesh, before.mesh);
    }

    #[test]
    fn batch_matches_sequential_edits() {
        let mut batched = Session::new(models(), Gender::Male).unwrap();
        let mut sequential = Session::new(models(), Gender::Male).unwrap();

        batched
            .apply(&[
                (MeasurementKind::Bust, 95.0),
                (MeasurementKind::Waist, 84.0),
                (MeasurementKind::Height, 180.0),
            ])
            .unwrap();
        sequential
            .set_measurement(MeasurementKind::Bust, 95.0)
            .unwrap();
        sequential
            .set_measurement(MeasurementKind::Waist, 84.0)
            .unwrap();
        sequential
            .set_measurement(MeasurementKind::Height, 180.0)
            .unwrap();

        assert_eq!(batched.measurements(), sequential.measurements());
        assert_eq!(batched.body().mesh, sequential.body().mesh);
    }

    #[test]
    fn later_batch_edit_wins() {
        let mut session = Session::new(models(), Gender::Female).unwrap();

        session
            .apply(&[
                (MeasurementKind::Hip, 100.0),
                (MeasurementKind::Hip, 95.0),
            ])
            .unwrap();

        assert_relative_eq!(session.measurements().get(MeasurementKind::Hip), 95.0);
    }

    #[test]
    fn zero_height_rejected_and_state_held() {
        let mut session = Session::new(models(), Gender::Female).unwrap();
        session.set_garment_visible(true).unwrap();
        let body_before = session.body().clone();
        let garment_before = session.garment().cloned();
        let measurements_before = *session.measurements();

        let result = session.set_measurement(MeasurementKind::Height, 0.0);

        assert!(matches!(result, Err(SessionError::Shape(_))));
        // Held state is bitwise identical, not merely close.
        assert_eq!(session.body(), &body_before);
        assert_eq!(session.garment().cloned(), garment_before);
        assert_eq!(session.measurements(), &measurements_before);
    }

    #[test]
    fn gender_switch_keeps_measurements() {
        let mut session = Session::new(models(), Gender::Female).unwrap();
        session
            .set_measurement(MeasurementKind::Bust, 95.0)
            .unwrap();
        let measurements = *session.measurements();

        session.set_gender(Gender::Male).unwrap();

        assert_eq!(session.gender(), Gender::Male);
        assert_eq!(session.measurements(), &measurements);
    }

    #[test]
    fn garment_tracks_visibility_and_edits() {
        let mut session = Session::new(models(), Gender::Female).unwrap();
        assert!(session.garment().is_none());

        session.set_garment_visible(true).unwrap();
        let first = session.garment().cloned().unwrap();
        assert_eq!(first.vertex_count(), 1);

        // The garment vertex rides body vertex 1, which moves with the
        // bust ratio, so an edit must re-deform it.
        session
            .set_measurement(MeasurementKind::Bust, 110.0)
            .unwrap();
        let second = session.garment().cloned().unwrap();
        assert_ne!(first.vertices[0], second.vertices[0]);

        session.set_garment_visible(false).unwrap();
        assert!(session.garment().is_none());
    }

    #[test]
    fn garment_unavailable_without_cloth_data() {
        let models = models_with(box_hull(), false);
        let mut session = Session::new(models, Gender::Male).unwrap();

        let result = session.set_garment_visible(true);

        assert!(matches!(
            result,
            Err(SessionError::GarmentUnavailable {
                gender: Gender::Male,
            })
        ));
        assert!(!session.is_garment_visible());
    }

    #[test]
    fn fix_is_noop_on_feasible_measurements() {
        let mut session = Session::new(models(), Gender::Female).unwrap();
        let before = *session.measurements();

        session.fix().unwrap();

        assert_eq!(session.measurements(), &before);
        assert!(!session.is_outside());
    }

    #[test]
    fn fix_projects_infeasible_measurements() {
        let mut session = Session::new(models(), Gender::Female).unwrap();

        // Bust ratio 145/145 = 1.0, past the 0.7 facet.
        session
            .apply(&[
                (MeasurementKind::Bust, 145.0),
                (MeasurementKind::Height, 145.0),
            ])
            .unwrap();
        assert!(session.is_outside());

        session.fix().unwrap();

        assert!(!session.is_outside());
        // Height is preserved; the bust ratio lands on the facet.
        assert_relative_eq!(session.measurements().height(), 145.0);
        assert_relative_eq!(
            session.measurements().get(MeasurementKind::Bust) / 145.0,
            0.7,
            epsilon = 1e-6
        );
    }

    #[test]
    fn fix_falls_back_to_defaults_on_projection_failure() {
        let models = models_with(empty_hull(), true);
        let mut session = Session::new(models, Gender::Female).unwrap();
        assert!(session.is_outside());

        session.fix().unwrap();

        // Defaults are also outside an empty region, but the state is
        // consistent and exactly the default vector.
        assert_eq!(
            session.measurements(),
            &Measurements::defaults(Gender::Female)
        );
    }
}
